use log::info;
use serde::Serialize;

use crate::content::{ContentSource, EntryQuery};
use crate::error::SiteError;
use crate::model::RecipeSummary;
use crate::pages::{PageSettings, StaticProps};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndexProps {
    pub recipes: Vec<RecipeSummary>,
}

/// Fetch every recipe entry for the index page.
///
/// No filtering, sorting or pagination: the order is whatever the source
/// returns.
pub async fn get_static_props(
    source: &dyn ContentSource,
    settings: &PageSettings,
) -> Result<StaticProps<IndexProps>, SiteError> {
    let query = EntryQuery::content_type(&settings.content_type).include(settings.include_depth);
    let collection = source.get_entries(&query).await?;

    let recipes = collection
        .items
        .iter()
        .map(|entry| RecipeSummary::from_entry(entry, &collection))
        .collect::<Result<Vec<_>, _>>()?;

    info!(
        "index: {} recipes from {}",
        recipes.len(),
        source.source_name()
    );

    Ok(StaticProps::Props {
        props: IndexProps { recipes },
        revalidate: Some(settings.revalidate.as_secs()),
    })
}
