// Reservation store: append-only, insertion-ordered record of committed bookings

use crate::access::{ReservationScope, RoleContext};
use crate::reservation::{PaymentStatus, Reservation, ReservationIdGenerator, ReservationStatus};
use chrono::{DateTime, NaiveDate, Utc};
use parking_lot::Mutex;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Snapshot encode error: {0}")]
    Encode(serde_json::Error),

    #[error("Snapshot decode error: {0}")]
    Decode(serde_json::Error),
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct StoreStats {
    pub items_count: usize,
    pub confirmed_count: usize,
    pub pending_count: usize,
    pub cancelled_count: usize,
    // Sum of total_price over confirmed reservations
    pub confirmed_revenue: f64,
}

// Store trait shared between the workflow and the presentation shell
pub trait ReservationStore: Send + Sync + 'static {
    // Adds to the end of the collection; no deduplication
    fn append(&self, reservation: Reservation);

    // Reservations visible to the caller, in booking order
    fn list(&self, context: &RoleContext) -> Vec<Reservation>;

    fn get(&self, id: &str) -> Option<Reservation>;

    fn stats(&self) -> StoreStats;

    // Ids are unique across every workflow sharing this store
    fn next_id(&self, prefix: &str, now: DateTime<Utc>) -> String;
}

#[derive(Debug, Default)]
pub struct InMemoryReservationStore {
    reservations: Mutex<Vec<Reservation>>,
    ids: ReservationIdGenerator,
}

impl InMemoryReservationStore {
    pub fn new() -> Self {
        Self::default()
    }

    // Store preloaded with the portal's two demo bookings
    pub fn with_seed_data() -> Self {
        let seeded = Self::new();
        for reservation in seed_reservations() {
            seeded.append(reservation);
        }
        seeded
    }

    pub fn len(&self) -> usize {
        self.reservations.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.reservations.lock().is_empty()
    }

    pub fn to_json(&self) -> Result<String, StoreError> {
        let reservations = self.reservations.lock();
        serde_json::to_string(&*reservations).map_err(StoreError::Encode)
    }

    pub fn from_json(json: &str) -> Result<Self, StoreError> {
        let reservations: Vec<Reservation> =
            serde_json::from_str(json).map_err(StoreError::Decode)?;
        Ok(Self {
            reservations: Mutex::new(reservations),
            ids: ReservationIdGenerator::new(),
        })
    }
}

impl ReservationStore for InMemoryReservationStore {
    fn append(&self, reservation: Reservation) {
        let mut reservations = self.reservations.lock();
        debug!(
            reservation_id = %reservation.id,
            position = reservations.len(),
            "Appending reservation"
        );
        reservations.push(reservation);
    }

    fn list(&self, context: &RoleContext) -> Vec<Reservation> {
        let reservations = self.reservations.lock();

        match context.scope() {
            ReservationScope::All => reservations.clone(),
            ReservationScope::Own => match context.email.as_deref() {
                Some(email) => reservations
                    .iter()
                    .filter(|r| r.is_owned_by(email))
                    .cloned()
                    .collect(),
                None => Vec::new(),
            },
            ReservationScope::Nothing => Vec::new(),
        }
    }

    fn get(&self, id: &str) -> Option<Reservation> {
        self.reservations.lock().iter().find(|r| r.id == id).cloned()
    }

    fn stats(&self) -> StoreStats {
        let reservations = self.reservations.lock();
        let mut stats = StoreStats {
            items_count: reservations.len(),
            ..Default::default()
        };

        for reservation in reservations.iter() {
            match reservation.status {
                ReservationStatus::Confirmed => {
                    stats.confirmed_count += 1;
                    stats.confirmed_revenue += reservation.total_price;
                }
                ReservationStatus::Pending => stats.pending_count += 1,
                ReservationStatus::Cancelled => stats.cancelled_count += 1,
            }
        }

        stats
    }

    fn next_id(&self, prefix: &str, now: DateTime<Utc>) -> String {
        self.ids.next_id(prefix, now)
    }
}

fn seed_reservations() -> Vec<Reservation> {
    let now = Utc::now();
    vec![
        Reservation {
            id: "1".to_string(),
            room_id: "1".to_string(),
            room_name: "Deluxe Suite".to_string(),
            customer_name: "John Doe".to_string(),
            customer_email: "john@example.com".to_string(),
            customer_phone: "+1 (555) 123-4567".to_string(),
            check_in: NaiveDate::from_ymd_opt(2024, 1, 15),
            check_out: NaiveDate::from_ymd_opt(2024, 1, 18),
            guest_count: 2,
            total_price: 897.0,
            status: ReservationStatus::Confirmed,
            payment_status: PaymentStatus::Paid,
            special_requests: None,
            created_at: now,
        },
        Reservation {
            id: "2".to_string(),
            room_id: "2".to_string(),
            room_name: "Standard Room".to_string(),
            customer_name: "Jane Smith".to_string(),
            customer_email: "jane@example.com".to_string(),
            customer_phone: "+1 (555) 987-6543".to_string(),
            check_in: NaiveDate::from_ymd_opt(2024, 1, 20),
            check_out: NaiveDate::from_ymd_opt(2024, 1, 22),
            guest_count: 1,
            total_price: 298.0,
            status: ReservationStatus::Pending,
            payment_status: PaymentStatus::Pending,
            special_requests: None,
            created_at: now,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    fn reservation_for(id: &str, email: &str) -> Reservation {
        Reservation {
            id: id.to_string(),
            room_id: "3".to_string(),
            room_name: "Presidential Suite".to_string(),
            customer_name: "Test Guest".to_string(),
            customer_email: email.to_string(),
            customer_phone: String::new(),
            check_in: NaiveDate::from_ymd_opt(2024, 3, 1),
            check_out: NaiveDate::from_ymd_opt(2024, 3, 2),
            guest_count: 1,
            total_price: 599.0,
            status: ReservationStatus::Confirmed,
            payment_status: PaymentStatus::Paid,
            special_requests: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_list_preserves_insertion_order() {
        let store = InMemoryReservationStore::new();
        store.append(reservation_for("c", "a@example.com"));
        store.append(reservation_for("a", "b@example.com"));
        store.append(reservation_for("b", "a@example.com"));

        let ids: Vec<String> = store
            .list(&RoleContext::admin())
            .into_iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(ids, vec!["c", "a", "b"]);
    }

    #[test]
    fn test_append_does_not_deduplicate() {
        let store = InMemoryReservationStore::new();
        store.append(reservation_for("same", "a@example.com"));
        store.append(reservation_for("same", "a@example.com"));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_list_scoped_by_role() {
        let store = InMemoryReservationStore::with_seed_data();
        store.append(reservation_for("3", "JANE@example.com"));
        store.append(reservation_for("4", "jane@example.com"));

        let jane: Vec<String> = store
            .list(&RoleContext::customer("jane@example.com"))
            .into_iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(jane, vec!["2", "4"]);

        assert_eq!(store.list(&RoleContext::receptionist()).len(), 4);
        assert_eq!(store.list(&RoleContext::admin()).len(), 4);
        assert!(store.list(&RoleContext::guest()).is_empty());

        let anonymous_customer = RoleContext::new(crate::access::Role::Customer, None);
        assert!(store.list(&anonymous_customer).is_empty());
    }

    #[test]
    fn test_get_and_stats() {
        let store = InMemoryReservationStore::with_seed_data();
        assert_eq!(store.get("2").unwrap().customer_name, "Jane Smith");
        assert!(store.get("missing").is_none());

        let stats = store.stats();
        assert_eq!(stats.items_count, 2);
        assert_eq!(stats.confirmed_count, 1);
        assert_eq!(stats.pending_count, 1);
        assert_eq!(stats.cancelled_count, 0);
        assert_eq!(stats.confirmed_revenue, 897.0);
    }

    #[test]
    fn test_json_snapshot_restores_records() {
        let store = InMemoryReservationStore::with_seed_data();
        let json = store.to_json().unwrap();

        let restored = InMemoryReservationStore::from_json(&json).unwrap();
        assert_eq!(
            restored.list(&RoleContext::admin()),
            store.list(&RoleContext::admin())
        );

        assert!(matches!(
            InMemoryReservationStore::from_json("{not json"),
            Err(StoreError::Decode(_))
        ));
    }

    #[test]
    fn test_decode_error_message_names_cause_once() {
        let err = InMemoryReservationStore::from_json("{not json").unwrap_err();
        let message = err.to_string();
        assert!(message.starts_with("Snapshot decode error: "));
        assert!(std::error::Error::source(&err).is_none());
    }

    #[test]
    fn test_next_id_unique_across_threads() {
        let store = Arc::new(InMemoryReservationStore::new());
        let now = Utc::now();

        let mut handles = vec![];
        for _ in 0..4 {
            let store = Arc::clone(&store);
            handles.push(thread::spawn(move || {
                (0..100).map(|_| store.next_id("BK-", now)).collect::<Vec<_>>()
            }));
        }

        let mut ids = std::collections::HashSet::new();
        for handle in handles {
            ids.extend(handle.join().unwrap());
        }
        assert_eq!(ids.len(), 400);
    }

    #[test]
    fn test_concurrent_appends_keep_every_record() {
        let store = Arc::new(InMemoryReservationStore::new());
        let threads_count = 8;
        let appends_per_thread = 250;

        let mut handles = vec![];
        for i in 0..threads_count {
            let store = Arc::clone(&store);
            handles.push(thread::spawn(move || {
                for j in 0..appends_per_thread {
                    store.append(reservation_for(
                        &format!("{}-{}", i, j),
                        &format!("guest{}@example.com", i),
                    ));
                }
            }));
        }

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(store.len(), threads_count * appends_per_thread);

        // Each writer's own records stay in the order it appended them
        let own = store.list(&RoleContext::customer("guest3@example.com"));
        let expected: Vec<String> = (0..appends_per_thread).map(|j| format!("3-{}", j)).collect();
        let actual: Vec<String> = own.into_iter().map(|r| r.id).collect();
        assert_eq!(actual, expected);
    }
}
