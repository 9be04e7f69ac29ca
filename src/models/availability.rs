use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A date range during which a person can work. `from_date <= to_date` is
/// expected but validated by the backend, not here.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityPeriod {
    pub availability_id: i32,
    pub from_date: NaiveDate,
    pub to_date: NaiveDate,
}
