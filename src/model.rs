use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Number, Value};

use crate::content::{Entry, EntryCollection};
use crate::error::SiteError;
use crate::rich_text::Node;

/// Identifier block carried by typed records
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntryId {
    pub id: String,
}

/// A resolved image asset
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageAsset {
    /// Absolute URL (protocol-relative URLs are prefixed with `https:`)
    pub url: String,
    pub width: u32,
    pub height: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl ImageAsset {
    /// Build from an asset record, naming `field` in errors
    pub fn from_asset(asset: &Entry, field: &str) -> Result<Self, SiteError> {
        let file = asset
            .field("file")
            .ok_or_else(|| SiteError::malformed(asset.id(), field, "asset has no file"))?;

        let url = file
            .get("url")
            .and_then(Value::as_str)
            .ok_or_else(|| SiteError::malformed(asset.id(), field, "asset file has no url"))?;

        let image = file.pointer("/details/image");
        let dimension = |name: &str| -> Result<u32, SiteError> {
            image
                .and_then(|i| i.get(name))
                .and_then(Value::as_u64)
                .and_then(|v| u32::try_from(v).ok())
                .ok_or_else(|| {
                    SiteError::malformed(
                        asset.id(),
                        field,
                        format!("asset has no image {}", name),
                    )
                })
        };

        Ok(ImageAsset {
            url: absolute_url(url),
            width: dimension("width")?,
            height: dimension("height")?,
            title: asset.field_str("title").map(str::to_string),
        })
    }

    /// Dimensions multiplied by `factor`, saturating
    pub fn scaled(&self, factor: u32) -> (u32, u32) {
        (
            self.width.saturating_mul(factor),
            self.height.saturating_mul(factor),
        )
    }
}

fn absolute_url(url: &str) -> String {
    if url.starts_with("//") {
        format!("https:{}", url)
    } else {
        url.to_string()
    }
}

/// An entry as listed on the index page.
///
/// Only the identifier is required; everything else is read leniently by
/// the card view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecipeSummary {
    pub sys: EntryId,
    pub fields: Map<String, Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<ImageAsset>,
}

impl RecipeSummary {
    pub fn from_entry(entry: &Entry, collection: &EntryCollection) -> Result<Self, SiteError> {
        if entry.id().is_empty() {
            return Err(SiteError::malformed("<unknown>", "sys.id", "is empty"));
        }

        let thumbnail = entry
            .field("thumbnail")
            .and_then(|link| collection.resolve(link))
            .and_then(|asset| ImageAsset::from_asset(&asset, "thumbnail").ok());

        Ok(RecipeSummary {
            sys: EntryId {
                id: entry.id().to_string(),
            },
            fields: entry.fields.clone(),
            thumbnail,
        })
    }

    pub fn id(&self) -> &str {
        &self.sys.id
    }

    pub fn title(&self) -> Option<&str> {
        self.fields.get("title").and_then(Value::as_str)
    }

    pub fn slug(&self) -> Option<&str> {
        self.fields.get("slug").and_then(Value::as_str)
    }

    pub fn cooking_time(&self) -> Option<&Number> {
        match self.fields.get("cookingTime") {
            Some(Value::Number(minutes)) => Some(minutes),
            _ => None,
        }
    }
}

/// Validated fields of a recipe entry
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeFields {
    pub title: String,
    /// Minutes, integral or decimal as stored in the entry
    pub cooking_time: Number,
    pub ingredients: Vec<String>,
    pub method: Node,
    pub featured_image: ImageAsset,
    pub slug: String,
}

/// A recipe entry with every field the detail page needs
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecipeDetail {
    pub sys: EntryId,
    pub fields: RecipeFields,
}

impl RecipeDetail {
    /// Validate a raw entry, resolving its featured image from `collection`
    pub fn from_entry(entry: &Entry, collection: &EntryCollection) -> Result<Self, SiteError> {
        let title: String = required(entry, "title")?;
        let cooking_time: Number = required(entry, "cookingTime")?;
        let ingredients: Vec<String> = required(entry, "ingredients")?;
        let slug = validate_slug(entry, required(entry, "slug")?)?;

        let method: Node = required(entry, "method")?;
        if !method.is_document() {
            return Err(SiteError::malformed(
                entry.id(),
                "method",
                format!("is a '{}' node, expected a rich-text document", method.node_type),
            ));
        }

        let link = entry
            .field("featuredImage")
            .ok_or_else(|| SiteError::malformed(entry.id(), "featuredImage", "is missing"))?;
        let asset = collection.resolve(link).ok_or_else(|| {
            SiteError::malformed(entry.id(), "featuredImage", "links to an unknown asset")
        })?;
        let featured_image = ImageAsset::from_asset(&asset, "featuredImage")?;

        Ok(RecipeDetail {
            sys: EntryId {
                id: entry.id().to_string(),
            },
            fields: RecipeFields {
                title,
                cooking_time,
                ingredients,
                method,
                featured_image,
                slug,
            },
        })
    }

    pub fn id(&self) -> &str {
        &self.sys.id
    }

    pub fn slug(&self) -> &str {
        &self.fields.slug
    }
}

/// Read a required field and deserialize it into `T`
fn required<T: DeserializeOwned>(entry: &Entry, field: &str) -> Result<T, SiteError> {
    let value = entry
        .field(field)
        .ok_or_else(|| SiteError::malformed(entry.id(), field, "is missing"))?;

    serde_json::from_value(value.clone())
        .map_err(|e| SiteError::malformed(entry.id(), field, format!("has the wrong shape: {}", e)))
}

/// Slugs become directory names under `recipes/`
pub(crate) fn validate_slug(entry: &Entry, slug: String) -> Result<String, SiteError> {
    let unsafe_slug = slug.is_empty()
        || slug == "."
        || slug == ".."
        || slug.contains(['/', '\\'])
        || slug.chars().any(char::is_control);

    if unsafe_slug {
        return Err(SiteError::malformed(
            entry.id(),
            "slug",
            format!("'{}' is not a usable path segment", slug),
        ));
    }
    Ok(slug)
}
