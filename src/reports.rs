use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::Serialize;
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::models::StoredRecord;

/// Status value that marks a maintenance record as finished. Anything else
/// (including a missing status) counts as open.
pub const DONE_STATUS: &str = "done";

const UPCOMING_WINDOW_DAYS: i64 = 7;

#[derive(Debug, Serialize)]
pub struct Report {
    pub equipment_total: i64,
    pub maintenance_total: i64,
    pub maintenance_pending: i64,
    pub maintenance_done: i64,
    pub generated_at: DateTime<Utc>,
    pub generated_by: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Classification {
    Overdue,
    Upcoming,
}

impl Classification {
    pub fn priority(self) -> &'static str {
        match self {
            Classification::Overdue => "high",
            Classification::Upcoming => "medium",
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            Classification::Overdue => "overdue",
            Classification::Upcoming => "upcoming",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Notification {
    pub id: Uuid,
    pub maintenance_id: Uuid,
    pub classification: Classification,
    pub priority: &'static str,
    pub scheduled_date: DateTime<Utc>,
    pub message: String,
}

/// Derive notifications for every open maintenance record, judged against
/// `now`: overdue if scheduled before it, upcoming if scheduled within the
/// next seven days.
pub fn derive_notifications(records: &[StoredRecord], now: DateTime<Utc>) -> Vec<Notification> {
    records.iter().filter_map(|r| classify(r, now)).collect()
}

fn classify(record: &StoredRecord, now: DateTime<Utc>) -> Option<Notification> {
    let status = record
        .doc
        .get("status")
        .and_then(|v| v.as_str())
        .unwrap_or("");
    if status == DONE_STATUS {
        return None;
    }

    let scheduled = record
        .doc
        .get("scheduled_date")
        .and_then(|v| v.as_str())
        .and_then(parse_scheduled)?;

    let classification = if scheduled < now {
        Classification::Overdue
    } else if scheduled <= now + Duration::days(UPCOMING_WINDOW_DAYS) {
        Classification::Upcoming
    } else {
        return None;
    };

    Some(Notification {
        id: notification_id(record.id, classification),
        maintenance_id: record.id,
        classification,
        priority: classification.priority(),
        scheduled_date: scheduled,
        message: message_for(record, classification, scheduled),
    })
}

/// Accepts RFC 3339 timestamps or bare `YYYY-MM-DD` dates (midnight UTC).
fn parse_scheduled(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    raw.parse::<NaiveDate>()
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

/// The same record in the same classification always derives the same id,
/// so repeated calls over an unchanged collection report stable identities.
fn notification_id(source: Uuid, classification: Classification) -> Uuid {
    let mut hasher = Sha256::new();
    hasher.update(source.as_bytes());
    hasher.update(b":");
    hasher.update(classification.as_str().as_bytes());
    let digest = hasher.finalize();

    let mut bytes = [0u8; 16];
    bytes.copy_from_slice(&digest[..16]);
    Uuid::from_bytes(bytes)
}

fn message_for(
    record: &StoredRecord,
    classification: Classification,
    scheduled: DateTime<Utc>,
) -> String {
    let subject = record
        .doc
        .get("equipment_name")
        .or_else(|| record.doc.get("title"))
        .and_then(|v| v.as_str())
        .map(str::to_string)
        .unwrap_or_else(|| format!("maintenance {}", record.id));

    let date = scheduled.format("%Y-%m-%d");
    match classification {
        Classification::Overdue => format!("{subject} was due on {date}"),
        Classification::Upcoming => format!("{subject} is due on {date}"),
    }
}
