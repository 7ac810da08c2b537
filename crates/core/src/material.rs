//! Material record, status enum, and request payloads.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::types::{Date, MaterialId};
use crate::validation::not_blank;

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// Lifecycle status of a material.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaterialStatus {
    #[default]
    Active,
    Obsolete,
    OnHold,
}

impl MaterialStatus {
    /// Every status, in display order.
    pub const ALL: [MaterialStatus; 3] = [Self::Active, Self::Obsolete, Self::OnHold];

    /// Wire literal for this status.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Obsolete => "obsolete",
            Self::OnHold => "on_hold",
        }
    }

    /// Parse a wire literal. Matching is exact and case-sensitive.
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == value)
    }
}

impl std::fmt::Display for MaterialStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// A stored material, exactly as it appears in the JSON document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub id: MaterialId,
    pub name: String,
    pub category: String,
    pub description: Option<String>,
    pub quantity: f64,
    pub unit: String,
    pub min_stock: f64,
    pub unit_price: f64,
    pub supplier: Option<String>,
    pub warehouse_location: Option<String>,
    pub project: Option<String>,
    pub responsible: Option<String>,
    pub sku: Option<String>,
    pub intake_date: Date,
    pub status: MaterialStatus,
}

impl Material {
    /// Split into the id and the validatable field set.
    pub fn into_parts(self) -> (MaterialId, NewMaterial) {
        let fields = NewMaterial {
            name: self.name,
            category: self.category,
            description: self.description,
            quantity: self.quantity,
            unit: self.unit,
            min_stock: self.min_stock,
            unit_price: self.unit_price,
            supplier: self.supplier,
            warehouse_location: self.warehouse_location,
            project: self.project,
            responsible: self.responsible,
            sku: self.sku,
            intake_date: self.intake_date,
            status: self.status,
        };
        (self.id, fields)
    }
}

/// A complete material that has not been assigned an id yet.
///
/// Field-level rules live here as `validator` attributes. Rules that need
/// outside context (the current date) are checked in [`crate::validation`].
#[derive(Debug, Clone, PartialEq, Validate)]
pub struct NewMaterial {
    #[validate(
        custom(function = "not_blank"),
        length(max = 200, message = "must be at most 200 characters")
    )]
    pub name: String,
    #[validate(
        custom(function = "not_blank"),
        length(max = 100, message = "must be at most 100 characters")
    )]
    pub category: String,
    #[validate(length(max = 1000, message = "must be at most 1000 characters"))]
    pub description: Option<String>,
    #[validate(range(min = 0.0, message = "must not be negative"))]
    pub quantity: f64,
    #[validate(
        custom(function = "not_blank"),
        length(max = 20, message = "must be at most 20 characters")
    )]
    pub unit: String,
    #[validate(range(min = 0.0, message = "must not be negative"))]
    pub min_stock: f64,
    #[validate(range(min = 0.0, message = "must not be negative"))]
    pub unit_price: f64,
    #[validate(length(max = 150, message = "must be at most 150 characters"))]
    pub supplier: Option<String>,
    #[validate(length(max = 100, message = "must be at most 100 characters"))]
    pub warehouse_location: Option<String>,
    #[validate(length(max = 150, message = "must be at most 150 characters"))]
    pub project: Option<String>,
    #[validate(length(max = 100, message = "must be at most 100 characters"))]
    pub responsible: Option<String>,
    #[validate(
        custom(function = "not_blank"),
        length(max = 50, message = "must be at most 50 characters")
    )]
    pub sku: Option<String>,
    pub intake_date: Date,
    pub status: MaterialStatus,
}

impl NewMaterial {
    /// Attach a store-assigned id.
    pub fn with_id(self, id: MaterialId) -> Material {
        Material {
            id,
            name: self.name,
            category: self.category,
            description: self.description,
            quantity: self.quantity,
            unit: self.unit,
            min_stock: self.min_stock,
            unit_price: self.unit_price,
            supplier: self.supplier,
            warehouse_location: self.warehouse_location,
            project: self.project,
            responsible: self.responsible,
            sku: self.sku,
            intake_date: self.intake_date,
            status: self.status,
        }
    }
}

// ---------------------------------------------------------------------------
// Request payloads
// ---------------------------------------------------------------------------

/// Untyped-to-typed candidate for `POST /materials`.
///
/// Every field is optional at parse time so that missing required fields
/// are reported together with the other violations instead of failing
/// deserialization on the first one. `status` stays a string until
/// validation so an unknown literal becomes a field violation.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MaterialInput {
    pub name: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub quantity: Option<f64>,
    pub unit: Option<String>,
    #[serde(alias = "minimum_stock")]
    pub min_stock: Option<f64>,
    pub unit_price: Option<f64>,
    pub supplier: Option<String>,
    #[serde(alias = "location")]
    pub warehouse_location: Option<String>,
    pub project: Option<String>,
    pub responsible: Option<String>,
    pub sku: Option<String>,
    #[serde(alias = "entry_date")]
    pub intake_date: Option<Date>,
    pub status: Option<String>,
}

/// Partial update for `PUT /materials/{id}`.
///
/// `None` (absent or `null`) leaves the stored value untouched. The id is
/// not part of the patch and can never change.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MaterialPatch {
    pub name: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub quantity: Option<f64>,
    pub unit: Option<String>,
    #[serde(alias = "minimum_stock")]
    pub min_stock: Option<f64>,
    pub unit_price: Option<f64>,
    pub supplier: Option<String>,
    #[serde(alias = "location")]
    pub warehouse_location: Option<String>,
    pub project: Option<String>,
    pub responsible: Option<String>,
    pub sku: Option<String>,
    #[serde(alias = "entry_date")]
    pub intake_date: Option<Date>,
    pub status: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_literals_round_trip() {
        for status in MaterialStatus::ALL {
            assert_eq!(MaterialStatus::parse(status.as_str()), Some(status));
        }
    }

    #[test]
    fn status_parse_is_case_sensitive() {
        assert_eq!(MaterialStatus::parse("Active"), None);
        assert_eq!(MaterialStatus::parse("ON_HOLD"), None);
        assert_eq!(MaterialStatus::parse("on hold"), None);
    }

    #[test]
    fn status_serializes_as_snake_case() {
        let json = serde_json::to_string(&MaterialStatus::OnHold).unwrap();
        assert_eq!(json, "\"on_hold\"");
    }

    #[test]
    fn patch_accepts_legacy_aliases() {
        let patch: MaterialPatch = serde_json::from_value(serde_json::json!({
            "quantity": 100,
            "location": "Bodega A",
            "minimum_stock": 5,
            "entry_date": "2024-02-01"
        }))
        .unwrap();

        assert_eq!(patch.quantity, Some(100.0));
        assert_eq!(patch.warehouse_location.as_deref(), Some("Bodega A"));
        assert_eq!(patch.min_stock, Some(5.0));
        assert!(patch.intake_date.is_some());
    }

    #[test]
    fn patch_rejects_unknown_fields() {
        let result: Result<MaterialPatch, _> =
            serde_json::from_value(serde_json::json!({ "colour": "grey" }));
        assert!(result.is_err());
    }

    #[test]
    fn input_rejects_id_field() {
        let result: Result<MaterialInput, _> =
            serde_json::from_value(serde_json::json!({ "id": 7, "name": "Arena" }));
        assert!(result.is_err());
    }

    #[test]
    fn material_missing_optionals_deserializes() {
        let material: Material = serde_json::from_value(serde_json::json!({
            "id": 3,
            "name": "Varilla",
            "category": "Acero",
            "quantity": 10.0,
            "unit": "pieza",
            "min_stock": 0.0,
            "unit_price": 120.0,
            "intake_date": "2024-03-10",
            "status": "obsolete"
        }))
        .unwrap();

        assert_eq!(material.status, MaterialStatus::Obsolete);
        assert!(material.sku.is_none());
        assert!(material.supplier.is_none());
    }
}
