use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// System metadata attached to every entry, asset and link
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Sys {
    pub id: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(rename = "linkType", default, skip_serializing_if = "Option::is_none")]
    pub link_type: Option<String>,
}

/// A single content record (entry or asset) as delivered by the API
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Entry {
    pub sys: Sys,
    #[serde(default)]
    pub fields: Map<String, Value>,
}

impl Entry {
    pub fn id(&self) -> &str {
        &self.sys.id
    }

    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    pub fn field_str(&self, name: &str) -> Option<&str> {
        self.field(name).and_then(Value::as_str)
    }
}

/// Linked records delivered alongside the items of a collection
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Includes {
    #[serde(rename = "Asset", default)]
    pub assets: Vec<Entry>,
    #[serde(rename = "Entry", default)]
    pub entries: Vec<Entry>,
}

/// Response body of an entries query
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct EntryCollection {
    #[serde(default)]
    pub items: Vec<Entry>,
    #[serde(default)]
    pub includes: Includes,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub skip: u64,
    #[serde(default)]
    pub limit: u64,
}

impl EntryCollection {
    pub fn new(items: Vec<Entry>) -> Self {
        let total = items.len() as u64;
        EntryCollection {
            items,
            total,
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Resolve a field value that is either a link or an inline record.
    ///
    /// Links are looked up in `includes` by `linkType` and id. A value that
    /// already carries `fields` is returned as-is.
    pub fn resolve(&self, value: &Value) -> Option<Entry> {
        let sys = value.get("sys")?;
        let is_link = sys.get("type").and_then(Value::as_str) == Some("Link");

        if !is_link {
            return serde_json::from_value(value.clone()).ok();
        }

        let id = sys.get("id").and_then(Value::as_str)?;
        let pool = match sys.get("linkType").and_then(Value::as_str) {
            Some("Asset") => &self.includes.assets,
            Some("Entry") => &self.includes.entries,
            _ => return None,
        };

        pool.iter().find(|e| e.id() == id).cloned()
    }
}
