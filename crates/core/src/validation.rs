//! Record schema validation.
//!
//! Two pure entry points, [`validate_for_create`] and [`validate_for_update`],
//! turn a parsed payload into a complete record or a [`ValidationErrors`]
//! listing every offending field. The current date is an argument so the
//! rules never read the clock themselves.

use std::borrow::Cow;

use serde::Serialize;
use validator::Validate;

use crate::material::{Material, MaterialInput, MaterialPatch, MaterialStatus, NewMaterial};
use crate::types::Date;

/// Field names in declaration order. Violations are reported in this order.
pub const FIELD_ORDER: &[&str] = &[
    "name",
    "category",
    "description",
    "quantity",
    "unit",
    "min_stock",
    "unit_price",
    "supplier",
    "warehouse_location",
    "project",
    "responsible",
    "sku",
    "intake_date",
    "status",
];

/* --------------------------------------------------------------------------
Error types
-------------------------------------------------------------------------- */

/// A single field-level violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    pub field: String,
    pub message: String,
}

/// One or more field violations, at most one per field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(transparent)]
#[error("{}", summary(.0))]
pub struct ValidationErrors(Vec<FieldViolation>);

fn summary(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(|v| format!("{}: {}", v.field, v.message))
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationErrors {
    /// Build an error for a single field.
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = Self::default();
        errors.add(field, message);
        errors
    }

    /// Record a violation. A field that already has one keeps the first.
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        let field = field.into();
        if self.has_field(&field) {
            return;
        }
        self.0.push(FieldViolation {
            field,
            message: message.into(),
        });
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.0.iter().any(|v| v.field == field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn violations(&self) -> &[FieldViolation] {
        &self.0
    }

    /// Fold the derive-generated `validator` errors into this list.
    fn absorb(&mut self, errors: validator::ValidationErrors) {
        for (field, errs) in errors.field_errors() {
            if let Some(first) = errs.first() {
                let message = first
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| first.code.to_string());
                self.add(field.to_string(), message);
            }
        }
    }

    fn sort(&mut self) {
        self.0.sort_by_key(|v| {
            FIELD_ORDER
                .iter()
                .position(|f| *f == v.field)
                .unwrap_or(FIELD_ORDER.len())
        });
    }

    fn into_result<T>(mut self, value: T) -> Result<T, ValidationErrors> {
        if self.is_empty() {
            Ok(value)
        } else {
            self.sort();
            Err(self)
        }
    }
}

/* --------------------------------------------------------------------------
Rule functions
-------------------------------------------------------------------------- */

/// Rejects empty and whitespace-only text.
pub fn not_blank(value: &str) -> Result<(), validator::ValidationError> {
    if value.trim().is_empty() {
        return Err(validator::ValidationError::new("blank")
            .with_message(Cow::Borrowed("must not be empty")));
    }
    Ok(())
}

/// Run the derive rules plus the checks that need outside context.
fn check_record(record: &NewMaterial, today: Date, errors: &mut ValidationErrors) {
    for (field, value) in [
        ("quantity", record.quantity),
        ("min_stock", record.min_stock),
        ("unit_price", record.unit_price),
    ] {
        if !value.is_finite() {
            errors.add(field, "must be a finite number");
        }
    }

    if record.intake_date > today {
        errors.add(
            "intake_date",
            format!("must not be in the future (today is {today})"),
        );
    }

    if let Err(derived) = record.validate() {
        errors.absorb(derived);
    }
}

fn parse_status(value: &str, errors: &mut ValidationErrors) -> Option<MaterialStatus> {
    let status = MaterialStatus::parse(value);
    if status.is_none() {
        let allowed: Vec<_> = MaterialStatus::ALL.iter().map(|s| s.as_str()).collect();
        errors.add("status", format!("must be one of: {}", allowed.join(", ")));
    }
    status
}

fn required<T: Default>(value: Option<T>, field: &str, errors: &mut ValidationErrors) -> T {
    match value {
        Some(v) => v,
        None => {
            errors.add(field, "field is required");
            T::default()
        }
    }
}

/* --------------------------------------------------------------------------
Entry points
-------------------------------------------------------------------------- */

/// Build a complete record from a create payload.
///
/// Required: `name`, `category`, `quantity`, `unit`, `unit_price`.
/// Defaults: `min_stock` 0, `intake_date` today, `status` active.
pub fn validate_for_create(
    input: MaterialInput,
    today: Date,
) -> Result<NewMaterial, ValidationErrors> {
    let mut errors = ValidationErrors::default();

    let status = match input.status.as_deref() {
        Some(s) => parse_status(s, &mut errors).unwrap_or_default(),
        None => MaterialStatus::default(),
    };

    let record = NewMaterial {
        name: required(input.name, "name", &mut errors),
        category: required(input.category, "category", &mut errors),
        description: input.description,
        quantity: required(input.quantity, "quantity", &mut errors),
        unit: required(input.unit, "unit", &mut errors),
        min_stock: input.min_stock.unwrap_or(0.0),
        unit_price: required(input.unit_price, "unit_price", &mut errors),
        supplier: input.supplier,
        warehouse_location: input.warehouse_location,
        project: input.project,
        responsible: input.responsible,
        sku: input.sku,
        intake_date: input.intake_date.unwrap_or(today),
        status,
    };

    check_record(&record, today, &mut errors);
    errors.into_result(record)
}

/// Overlay a patch onto an existing record and revalidate the result.
///
/// Only supplied fields change. The whole merged record is checked, so a
/// patch that touches one field can still fail on that field alone.
pub fn validate_for_update(
    existing: &Material,
    patch: MaterialPatch,
    today: Date,
) -> Result<Material, ValidationErrors> {
    let mut errors = ValidationErrors::default();
    let (id, mut record) = existing.clone().into_parts();

    if let Some(v) = patch.name {
        record.name = v;
    }
    if let Some(v) = patch.category {
        record.category = v;
    }
    if let Some(v) = patch.description {
        record.description = Some(v);
    }
    if let Some(v) = patch.quantity {
        record.quantity = v;
    }
    if let Some(v) = patch.unit {
        record.unit = v;
    }
    if let Some(v) = patch.min_stock {
        record.min_stock = v;
    }
    if let Some(v) = patch.unit_price {
        record.unit_price = v;
    }
    if let Some(v) = patch.supplier {
        record.supplier = Some(v);
    }
    if let Some(v) = patch.warehouse_location {
        record.warehouse_location = Some(v);
    }
    if let Some(v) = patch.project {
        record.project = Some(v);
    }
    if let Some(v) = patch.responsible {
        record.responsible = Some(v);
    }
    if let Some(v) = patch.sku {
        record.sku = Some(v);
    }
    if let Some(v) = patch.intake_date {
        record.intake_date = v;
    }
    if let Some(s) = patch.status.as_deref() {
        if let Some(status) = parse_status(s, &mut errors) {
            record.status = status;
        }
    }

    check_record(&record, today, &mut errors);
    errors.into_result(record.with_id(id))
}

/* --------------------------------------------------------------------------
Tests
-------------------------------------------------------------------------- */
