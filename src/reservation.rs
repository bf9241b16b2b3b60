// Committed reservation records and their id generator

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReservationStatus {
    Pending,
    Confirmed,
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Paid,
    Failed,
}

// Room id and name are copied at booking time and never follow catalog edits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    pub id: String,
    pub room_id: String,
    pub room_name: String,
    pub customer_name: String,
    pub customer_email: String,
    #[serde(default)]
    pub customer_phone: String,
    pub check_in: Option<NaiveDate>,
    pub check_out: Option<NaiveDate>,
    pub guest_count: u32,
    pub total_price: f64,
    pub status: ReservationStatus,
    pub payment_status: PaymentStatus,
    #[serde(default)]
    pub special_requests: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Reservation {
    pub fn is_owned_by(&self, email: &str) -> bool {
        self.customer_email == email
    }
}

// Produces "{prefix}{unix_millis}-{sequence}"; the sequence keeps ids unique
// for commits landing in the same millisecond. One generator per store.
#[derive(Debug, Default)]
pub struct ReservationIdGenerator {
    sequence: AtomicU64,
}

impl ReservationIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&self, prefix: &str, now: DateTime<Utc>) -> String {
        let sequence = self.sequence.fetch_add(1, Ordering::SeqCst) + 1;
        format!("{}{}-{}", prefix, now.timestamp_millis(), sequence)
    }
}
