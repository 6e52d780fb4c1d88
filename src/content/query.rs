/// Parameters of an entries query against the content source.
///
/// Serialized as `content_type`, then each `fields.<name>` filter in the
/// order added, then `include`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryQuery {
    content_type: String,
    field_filters: Vec<(String, String)>,
    include: Option<u8>,
}

impl EntryQuery {
    /// All entries of the given content type
    pub fn content_type(content_type: impl Into<String>) -> Self {
        EntryQuery {
            content_type: content_type.into(),
            field_filters: Vec::new(),
            include: None,
        }
    }

    /// Restrict to entries whose field equals `value` exactly
    pub fn field_eq(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.field_filters.push((field.into(), value.into()));
        self
    }

    /// Depth of linked records to include in the response
    pub fn include(mut self, depth: u8) -> Self {
        self.include = Some(depth);
        self
    }

    pub fn get_content_type(&self) -> &str {
        &self.content_type
    }

    pub fn field_filters(&self) -> &[(String, String)] {
        &self.field_filters
    }

    pub fn to_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![("content_type".to_string(), self.content_type.clone())];
        for (field, value) in &self.field_filters {
            pairs.push((format!("fields.{}", field), value.clone()));
        }
        if let Some(depth) = self.include {
            pairs.push(("include".to_string(), depth.to_string()));
        }
        pairs
    }
}
