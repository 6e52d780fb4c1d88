//! Static recipe site generated from a Contentful space.
//!
//! Two routes are produced: `/` lists every recipe entry and
//! `/recipes/{slug}` renders one recipe. Content is fetched through a
//! [`content::ContentSource`], validated into typed records, rendered with
//! maud and written to an output directory. Pages carry a revalidation
//! interval; [`Site::revalidate`] regenerates the ones that have expired.

pub mod config;
pub mod content;
pub mod error;
pub mod manifest;
pub mod model;
pub mod pages;
pub mod render;
pub mod rich_text;
pub mod site;

pub use crate::config::SiteConfig;
pub use crate::content::{ContentSource, DeliveryClient, EntryQuery};
pub use crate::error::SiteError;
pub use crate::model::{ImageAsset, RecipeDetail, RecipeSummary};
pub use crate::pages::{Fallback, PageSettings, PathParams, Redirect, StaticPaths, StaticProps};
pub use crate::site::{BuildReport, PageOutcome, Site};

