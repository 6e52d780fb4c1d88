//! Page-generation policy for the two routes of the site.
//!
//! - `/` ([`index`]): every recipe entry, in source order.
//! - `/recipes/{slug}` ([`recipe`]): path enumeration, per-slug fetch and
//!   redirect-on-miss.
//!
//! Page functions take the content source explicitly and return plain
//! values describing what to render; writing files is left to
//! [`crate::site`].

pub mod index;
pub mod recipe;

use serde::{Serialize, Serializer};
use std::time::Duration;

use crate::config::SiteConfig;

/// Settings shared by every page function
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSettings {
    pub content_type: String,
    pub include_depth: u8,
    pub revalidate: Duration,
}

impl Default for PageSettings {
    fn default() -> Self {
        PageSettings::from(&SiteConfig::default())
    }
}

impl From<&SiteConfig> for PageSettings {
    fn from(config: &SiteConfig) -> Self {
        PageSettings {
            content_type: config.content_type.clone(),
            include_depth: config.include_depth,
            revalidate: config.revalidate(),
        }
    }
}

/// Outcome of a data fetch for one page
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum StaticProps<P> {
    /// Render the page with `props`; eligible for regeneration after
    /// `revalidate` seconds
    Props {
        props: P,
        #[serde(skip_serializing_if = "Option::is_none")]
        revalidate: Option<u64>,
    },
    /// Do not render; send the visitor elsewhere
    Redirect { redirect: Redirect },
}

impl<P> StaticProps<P> {
    pub fn props(&self) -> Option<&P> {
        match self {
            StaticProps::Props { props, .. } => Some(props),
            StaticProps::Redirect { .. } => None,
        }
    }

    pub fn redirect(&self) -> Option<&Redirect> {
        match self {
            StaticProps::Props { .. } => None,
            StaticProps::Redirect { redirect } => Some(redirect),
        }
    }

    pub fn revalidate(&self) -> Option<u64> {
        match self {
            StaticProps::Props { revalidate, .. } => *revalidate,
            StaticProps::Redirect { .. } => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Redirect {
    pub destination: String,
    pub permanent: bool,
}

impl Redirect {
    /// A non-permanent redirect: the missing page may appear later
    pub fn temporary(destination: impl Into<String>) -> Self {
        Redirect {
            destination: destination.into(),
            permanent: false,
        }
    }
}

/// How a detail route missing from the pre-built set is handled.
///
/// Only the placeholder policy is served by this site: the skeleton is shown
/// while the page is fetched, then the page is kept as pre-built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fallback {
    Placeholder,
}

impl Serialize for Fallback {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Fallback::Placeholder => serializer.serialize_bool(true),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlugParams {
    pub slug: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathParams {
    pub params: SlugParams,
}

impl PathParams {
    pub fn slug(&self) -> &str {
        &self.params.slug
    }
}

/// Detail routes to pre-build and the policy for every other slug
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StaticPaths {
    pub paths: Vec<PathParams>,
    pub fallback: Fallback,
}

/// What the detail view is given to render
#[derive(Debug, Clone, PartialEq)]
pub enum PageState<P> {
    Ready(P),
    /// Data is still being fetched for a path outside the pre-built set
    Placeholder,
}

/// Route of the detail page for `slug`
pub fn recipe_route(slug: &str) -> String {
    format!("/recipes/{}", slug)
}

pub const INDEX_ROUTE: &str = "/";
