//! Capacity-checked booking ledger.
//!
//! The ledger owns a persisted, append-mostly collection of passenger
//! applications under a single storage key, and enforces a per-slot
//! capacity limit before allowing an insertion. A slot is the tuple
//! (origin, destination, date, time window); the "any time" window is
//! exempt from the limit.
//!
//! Storage failures on the read side degrade to an empty collection so
//! the rest of the site keeps rendering; only `submit` and `clear_all`
//! surface errors.

mod error;
mod store;


pub use error::{LedgerError, SlotFullError, StoreError};
pub use store::{FileStore, KeyValueStore, MemoryStore};

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{Local, NaiveDate, Utc};
use serde::Serialize;

use crate::domain::{ApplicationStatus, PassengerApplication, TimeSlot, TripForm};

/// Maximum applications per (origin, destination, date, window) slot.
pub const MAX_PASSENGERS_PER_SLOT: usize = 5;

/// Storage key owning the serialized collection.
pub const STORAGE_KEY: &str = "transitsafe_ghana_passengers";

/// Key used by earlier site versions; read as a fallback and removed by
/// `clear_all` so stale data cannot resurface.
pub const LEGACY_STORAGE_KEY: &str = "passengers";

/// Passenger count for one route, for the dashboard statistics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteCount {
    pub route: String,
    pub count: usize,
}

/// One-pass statistics over the stored collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerStats {
    /// Total stored applications.
    pub total: usize,
    /// Distinct routes with per-route counts, sorted descending by count;
    /// ties keep first-encountered order.
    pub routes: Vec<RouteCount>,
    /// Applications that asked for SMS alerts.
    pub alerts_subscribed: usize,
    /// Applications submitted today (local timezone).
    pub today_applications: usize,
}

/// The booking ledger.
///
/// Constructed over an injected [`KeyValueStore`] so tests can substitute
/// an in-memory backend. All operations are synchronous and bounded by
/// collection size; `submit` serializes its read-modify-write behind a
/// mutex so sequential capacity enforcement holds within one process.
/// Writers in other processes are not coordinated with (soft capacity
/// advisory, not a hard allocation guarantee).
pub struct BookingLedger {
    store: Box<dyn KeyValueStore>,
    write_lock: Mutex<()>,
    last_id: AtomicI64,
}

impl BookingLedger {
    /// Create a ledger over the given persistence backend.
    pub fn new(store: impl KeyValueStore + 'static) -> Self {
        Self {
            store: Box::new(store),
            write_lock: Mutex::new(()),
            last_id: AtomicI64::new(0),
        }
    }

    /// Load the stored collection.
    ///
    /// Absent, unreadable or malformed data is a recoverable condition
    /// (first use, disabled storage, corruption) and yields an empty
    /// collection. Never fails.
    pub fn load(&self) -> Vec<PassengerApplication> {
        let Some(raw) = self.load_raw() else {
            return Vec::new();
        };

        match serde_json::from_str(&raw) {
            Ok(records) => records,
            Err(e) => {
                tracing::warn!(error = %e, "stored passenger data is malformed, treating as empty");
                Vec::new()
            }
        }
    }

    fn load_raw(&self) -> Option<String> {
        match self.store.get(STORAGE_KEY) {
            Ok(Some(raw)) => return Some(raw),
            Ok(None) => {}
            Err(e) => {
                tracing::warn!(error = %e, "failed to read passenger data");
                return None;
            }
        }

        // Old site versions stored under the legacy key; keep that data
        // visible until the next write or clear.
        match self.store.get(LEGACY_STORAGE_KEY) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(error = %e, "failed to read legacy passenger data");
                None
            }
        }
    }

    /// Count stored applications matching the exact slot key.
    pub fn count_for_slot(
        &self,
        origin: &str,
        destination: &str,
        date: &str,
        time: TimeSlot,
    ) -> usize {
        count_matching(&self.load(), origin, destination, date, time)
    }

    /// Whether the slot is at capacity.
    ///
    /// The "any time" window is never full: it exists so passengers can
    /// avoid the constraint entirely.
    pub fn is_slot_full(
        &self,
        origin: &str,
        destination: &str,
        date: &str,
        time: TimeSlot,
    ) -> bool {
        if !time.is_capacitated() {
            return false;
        }
        self.count_for_slot(origin, destination, date, time) >= MAX_PASSENGERS_PER_SLOT
    }

    /// Submit a validated application.
    ///
    /// The capacity check is re-evaluated here against freshly loaded
    /// data; a UI pre-check is not trusted. On success the record gets a
    /// fresh id, a submission timestamp and `Pending` status, and the
    /// whole updated collection is persisted as one write.
    pub fn submit(&self, form: TripForm) -> Result<PassengerApplication, LedgerError> {
        let _guard = self.write_lock.lock().unwrap_or_else(|e| e.into_inner());

        let mut records = self.load();

        let slot_count = count_matching(&records, &form.origin, &form.destination, &form.date, form.time);
        if form.time.is_capacitated() && slot_count >= MAX_PASSENGERS_PER_SLOT {
            return Err(SlotFullError {
                origin: form.origin,
                destination: form.destination,
                date: form.date,
                time: form.time,
                max: MAX_PASSENGERS_PER_SLOT,
            }
            .into());
        }

        let record = PassengerApplication {
            id: self.next_id(&records).to_string(),
            name: form.name,
            phone: form.phone,
            email: form.email,
            origin: form.origin,
            destination: form.destination,
            date: form.date,
            time: form.time,
            alerts: form.alerts,
            notes: form.notes,
            submitted_at: Utc::now(),
            status: ApplicationStatus::Pending,
            extra: serde_json::Map::new(),
        };

        records.push(record.clone());

        let json = serde_json::to_string(&records).map_err(|e| LedgerError::Encode {
            message: e.to_string(),
        })?;
        self.store.set(STORAGE_KEY, &json)?;

        Ok(record)
    }

    /// Delete the entire collection, including the legacy key.
    /// Irreversible; callers must confirm with the user first.
    pub fn clear_all(&self) -> Result<(), LedgerError> {
        let _guard = self.write_lock.lock().unwrap_or_else(|e| e.into_inner());

        self.store.remove(STORAGE_KEY)?;
        self.store.remove(LEGACY_STORAGE_KEY)?;
        Ok(())
    }

    /// All stored records matching `predicate`, in insertion order.
    pub fn query<F>(&self, predicate: F) -> Vec<PassengerApplication>
    where
        F: Fn(&PassengerApplication) -> bool,
    {
        self.load().into_iter().filter(|r| predicate(r)).collect()
    }

    /// Compute dashboard statistics in one pass over the collection.
    pub fn aggregate(&self) -> LedgerStats {
        let records = self.load();
        let today = Local::now().date_naive();

        let mut routes: Vec<RouteCount> = Vec::new();
        let mut route_index: HashMap<String, usize> = HashMap::new();
        let mut alerts_subscribed = 0;
        let mut today_applications = 0;

        for record in &records {
            if !record.origin.is_empty() && !record.destination.is_empty() {
                let label = record.route_label();
                match route_index.get(&label) {
                    Some(&i) => routes[i].count += 1,
                    None => {
                        route_index.insert(label.clone(), routes.len());
                        routes.push(RouteCount {
                            route: label,
                            count: 1,
                        });
                    }
                }
            }

            if record.alerts {
                alerts_subscribed += 1;
            }

            if record.submitted_at.with_timezone(&Local).date_naive() == today {
                today_applications += 1;
            }
        }

        // Stable sort: equal counts keep first-encountered order.
        routes.sort_by(|a, b| b.count.cmp(&a.count));

        LedgerStats {
            total: records.len(),
            routes,
            alerts_subscribed,
            today_applications,
        }
    }

    /// The collection as pretty-printed JSON, for user download.
    pub fn export_pretty(&self) -> Result<String, LedgerError> {
        serde_json::to_string_pretty(&self.load()).map_err(|e| LedgerError::Encode {
            message: e.to_string(),
        })
    }

    /// Suggested download filename for an export on `date`.
    pub fn export_filename(date: NaiveDate) -> String {
        format!("passengers_{}.json", date.format("%Y-%m-%d"))
    }

    /// Fresh id: millisecond timestamp, bumped past every id this store
    /// has seen so generation order stays strictly increasing even when
    /// two submissions land in the same millisecond.
    fn next_id(&self, records: &[PassengerApplication]) -> i64 {
        let now = Utc::now().timestamp_millis();
        let max_existing = records
            .iter()
            .filter_map(|r| r.id.parse::<i64>().ok())
            .max()
            .unwrap_or(0);
        let floor = self.last_id.load(Ordering::Relaxed).max(max_existing);

        let id = now.max(floor + 1);
        self.last_id.store(id, Ordering::Relaxed);
        id
    }
}

fn count_matching(
    records: &[PassengerApplication],
    origin: &str,
    destination: &str,
    date: &str,
    time: TimeSlot,
) -> usize {
    records
        .iter()
        .filter(|r| {
            r.origin == origin && r.destination == destination && r.date == date && r.time == time
        })
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn export_filename_embeds_date() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        assert_eq!(
            BookingLedger::export_filename(date),
            "passengers_2024-06-01.json"
        );
    }

    #[test]
    fn storage_keys_are_distinct() {
        assert_ne!(STORAGE_KEY, LEGACY_STORAGE_KEY);
    }
}
