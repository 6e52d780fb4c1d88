use log::{debug, info};
use serde::Serialize;

use crate::content::{ContentSource, Entry, EntryQuery};
use crate::error::SiteError;
use crate::model::{validate_slug, RecipeDetail};
use crate::pages::{
    Fallback, PageSettings, PathParams, Redirect, SlugParams, StaticPaths, StaticProps,
};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailProps {
    pub recipe: RecipeDetail,
}

/// Enumerate the detail pages to pre-build, one per entry in source order.
///
/// Slugs outside this set are served through the placeholder fallback. Any
/// entry without a usable slug fails the whole enumeration; see
/// [`enumerate_paths`] for the per-entry results.
pub async fn get_static_paths(
    source: &dyn ContentSource,
    settings: &PageSettings,
) -> Result<StaticPaths, SiteError> {
    let paths = enumerate_paths(source, settings)
        .await?
        .into_iter()
        .collect::<Result<Vec<_>, _>>()?;

    info!("enumerated {} recipe paths", paths.len());

    Ok(StaticPaths {
        paths,
        fallback: Fallback::Placeholder,
    })
}

/// One slug result per entry, in source order.
///
/// The outer error is a failed fetch; an inner error is an entry whose slug
/// is missing or unusable as a path segment.
pub async fn enumerate_paths(
    source: &dyn ContentSource,
    settings: &PageSettings,
) -> Result<Vec<Result<PathParams, SiteError>>, SiteError> {
    let query = EntryQuery::content_type(&settings.content_type);
    let collection = source.get_entries(&query).await?;

    Ok(collection.items.iter().map(path_params).collect())
}

fn path_params(entry: &Entry) -> Result<PathParams, SiteError> {
    let slug = entry
        .field_str("slug")
        .ok_or_else(|| SiteError::malformed(entry.id(), "slug", "is missing or not text"))?;
    Ok(PathParams {
        params: SlugParams {
            slug: validate_slug(entry, slug.to_string())?,
        },
    })
}

/// Fetch the entry for `slug`.
///
/// The first match becomes the page's props; no match redirects to `/`,
/// non-permanently since the slug may be published later.
pub async fn get_static_props(
    source: &dyn ContentSource,
    settings: &PageSettings,
    slug: &str,
) -> Result<StaticProps<DetailProps>, SiteError> {
    let query = EntryQuery::content_type(&settings.content_type)
        .field_eq("slug", slug)
        .include(settings.include_depth);
    let collection = source.get_entries(&query).await?;

    let Some(entry) = collection.items.first() else {
        debug!("no entry for slug '{}', redirecting", slug);
        return Ok(StaticProps::Redirect {
            redirect: Redirect::temporary("/"),
        });
    };

    if collection.items.len() > 1 {
        debug!(
            "{} entries share slug '{}', using '{}'",
            collection.items.len(),
            slug,
            entry.id()
        );
    }

    let recipe = RecipeDetail::from_entry(entry, &collection)?;

    Ok(StaticProps::Props {
        props: DetailProps { recipe },
        revalidate: Some(settings.revalidate.as_secs()),
    })
}
