use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The two portal counters collected for one calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyStats {
    pub target_date: NaiveDate,
    pub qa_count: u64,
    pub inbound_call_count: u64,
}

impl DailyStats {
    #[must_use]
    pub fn new(target_date: NaiveDate, qa_count: u64, inbound_call_count: u64) -> Self {
        Self {
            target_date,
            qa_count,
            inbound_call_count,
        }
    }
}
