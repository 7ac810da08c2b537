/// Material ids are positive integers assigned by the store.
pub type MaterialId = i64;

/// Calendar dates carry no timezone; "today" is taken from the server clock in UTC.
pub type Date = chrono::NaiveDate;

/// Current date on the server clock.
pub fn today() -> Date {
    chrono::Utc::now().date_naive()
}
