use chrono::{DateTime, Utc};
use serde_json::{Map, Value, json};
use uuid::Uuid;

/// A document row as stored. The table's `seq` key never leaves the database
/// layer; API responses are built through [`StoredRecord::into_document`].
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct StoredRecord {
    pub id: Uuid,
    pub collection: String,
    pub doc: Value,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl StoredRecord {
    /// Merge the document body with the stamped fields. Stamped fields win
    /// over same-named body keys.
    pub fn into_document(self) -> Value {
        let mut map = match self.doc {
            Value::Object(map) => map,
            other => {
                let mut map = Map::new();
                map.insert("data".to_string(), other);
                map
            }
        };
        map.insert("id".to_string(), json!(self.id));
        map.insert("created_by".to_string(), Value::String(self.created_by));
        map.insert("created_at".to_string(), json!(self.created_at));
        map.insert("updated_at".to_string(), json!(self.updated_at));
        Value::Object(map)
    }
}
