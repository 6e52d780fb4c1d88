mod client;
mod entry;
mod query;

pub use client::DeliveryClient;
pub use entry::{Entry, EntryCollection, Includes, Sys};
pub use query::EntryQuery;

use crate::error::SiteError;
use async_trait::async_trait;

/// Read-only access to a headless CMS
///
/// Constructed once per build and passed to every page function.
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// Get the source name (e.g., "contentful")
    fn source_name(&self) -> &str;

    /// Fetch entries matching the query, in the order the source returns them
    async fn get_entries(&self, query: &EntryQuery) -> Result<EntryCollection, SiteError>;
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use serde_json::{json, Value};
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// In-memory content source filtering a fixed set of entries
    pub struct FixtureSource {
        pub content_type: String,
        pub collection: EntryCollection,
        pub calls: AtomicUsize,
    }

    impl FixtureSource {
        pub fn new(content_type: &str, items: Vec<Entry>, assets: Vec<Entry>) -> Self {
            let mut collection = EntryCollection::new(items);
            collection.includes.assets = assets;
            FixtureSource {
                content_type: content_type.to_string(),
                collection,
                calls: AtomicUsize::new(0),
            }
        }

        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ContentSource for FixtureSource {
        fn source_name(&self) -> &str {
            "fixture"
        }

        async fn get_entries(&self, query: &EntryQuery) -> Result<EntryCollection, SiteError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if query.get_content_type() != self.content_type {
                return Ok(EntryCollection::default());
            }

            let items: Vec<Entry> = self
                .collection
                .items
                .iter()
                .filter(|entry| {
                    query
                        .field_filters()
                        .iter()
                        .all(|(field, value)| entry.field_str(field) == Some(value.as_str()))
                })
                .cloned()
                .collect();

            let mut result = EntryCollection::new(items);
            result.includes = self.collection.includes.clone();
            Ok(result)
        }
    }

    pub fn image_asset(id: &str, width: u64, height: u64) -> Entry {
        serde_json::from_value(json!({
            "sys": { "id": id, "type": "Asset" },
            "fields": {
                "title": "Featured",
                "file": {
                    "url": format!("//images.ctfassets.net/space/{}/photo.jpg", id),
                    "details": { "image": { "width": width, "height": height } }
                }
            }
        }))
        .unwrap()
    }

    pub fn method_document(text: &str) -> Value {
        json!({
            "nodeType": "document",
            "data": {},
            "content": [{
                "nodeType": "paragraph",
                "data": {},
                "content": [{ "nodeType": "text", "value": text, "marks": [], "data": {} }]
            }]
        })
    }

    pub fn recipe_entry(id: &str, slug: &str, title: &str, image_id: &str) -> Entry {
        serde_json::from_value(json!({
            "sys": { "id": id, "type": "Entry" },
            "fields": {
                "title": title,
                "slug": slug,
                "cookingTime": 30,
                "ingredients": ["water", "salt"],
                "method": method_document("Boil the water."),
                "featuredImage": { "sys": { "type": "Link", "linkType": "Asset", "id": image_id } }
            }
        }))
        .unwrap()
    }
}
