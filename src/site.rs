//! Static build and incremental regeneration of the site.
//!
//! ## Output Structure
//!
//! ```text
//! dist/
//! ├── .recipe-pages.json        # Build manifest (route → file, generation time)
//! ├── index.html                # Recipe list
//! └── recipes/
//!     ├── _fallback.html        # Placeholder for slugs not yet generated
//!     ├── pancakes/index.html
//!     └── soup/index.html
//! ```
//!
//! A full [`Site::build`] pre-builds every enumerated path. [`Site::revalidate`]
//! only touches pages already in the manifest whose interval has elapsed.
//! [`Site::request_page`] is the fallback path for a single slug: the page is
//! generated on demand and recorded so later builds treat it as pre-built.

use log::{info, warn};
use maud::Markup;
use std::path::{Path, PathBuf};

use crate::config::SiteConfig;
use crate::content::{ContentSource, DeliveryClient};
use crate::error::SiteError;
use crate::manifest::{BuildManifest, PageRecord};
use crate::pages::{
    self, index, recipe, PageSettings, PageState, Redirect, StaticPaths, StaticProps, INDEX_ROUTE,
};
use crate::render;

pub const FALLBACK_FILE: &str = "recipes/_fallback.html";

/// Summary of the pages touched by a build or revalidation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildReport {
    /// Routes whose HTML was (re)written
    pub written: Vec<String>,
    /// Routes whose entry no longer exists
    pub redirected: Vec<String>,
    /// Routes left alone because their content failed validation, with the reason
    pub skipped: Vec<(String, String)>,
}

/// Result of requesting a single detail page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageOutcome {
    /// Already generated and within its revalidation interval
    Fresh(PathBuf),
    /// Generated (or regenerated) by this request
    Generated(PathBuf),
    /// No entry for the slug
    Redirected(Redirect),
}

enum Generation {
    Written(String, PageRecord),
    Redirected(Redirect),
}

pub struct Site {
    source: Box<dyn ContentSource>,
    settings: PageSettings,
    output_dir: PathBuf,
    image_scale: u32,
}

impl Site {
    pub fn new(source: Box<dyn ContentSource>, config: &SiteConfig) -> Self {
        Site {
            source,
            settings: PageSettings::from(config),
            output_dir: config.output_dir.clone(),
            image_scale: config.image_scale,
        }
    }

    /// Site backed by the Content Delivery API described in `config`
    pub fn from_config(config: &SiteConfig) -> Result<Self, SiteError> {
        let client = DeliveryClient::new(config)?;
        Ok(Site::new(Box::new(client), config))
    }

    pub async fn paths(&self) -> Result<StaticPaths, SiteError> {
        recipe::get_static_paths(self.source.as_ref(), &self.settings).await
    }

    /// Generate the index, every enumerated detail page and the placeholder.
    ///
    /// Entries that fail validation are skipped with a warning so one bad
    /// entry does not take the whole site down. A skipped route that was
    /// built before keeps its previous page. Pages from a previous build
    /// that are no longer enumerated are removed.
    pub async fn build(&self, now: u64) -> Result<BuildReport, SiteError> {
        let previous = BuildManifest::load(&self.output_dir).await?;
        let mut manifest = BuildManifest::default();
        let mut report = BuildReport::default();

        let enumerated = recipe::enumerate_paths(self.source.as_ref(), &self.settings).await?;

        let record = self.generate_index(now).await?;
        manifest.record(INDEX_ROUTE, record);
        report.written.push(INDEX_ROUTE.to_string());

        for path in enumerated {
            let path = match path {
                Ok(path) => path,
                Err(e) => {
                    let label = match &e {
                        SiteError::MalformedContent { entry_id, .. } => {
                            format!("entry {}", entry_id)
                        }
                        _ => "unknown entry".to_string(),
                    };
                    warn!("skipping {}: {}", label, e);
                    report.skipped.push((label, e.to_string()));
                    continue;
                }
            };

            let route = pages::recipe_route(path.slug());
            match self.generate_recipe(path.slug(), now).await {
                Ok(Generation::Written(route, record)) => {
                    manifest.record(route.clone(), record);
                    report.written.push(route);
                }
                Ok(Generation::Redirected(_)) => {
                    warn!("{} was enumerated but no longer resolves", route);
                    report.redirected.push(route);
                }
                Err(e @ SiteError::MalformedContent { .. }) => {
                    if let Some(old) = previous.get(&route) {
                        warn!("keeping previous {}: {}", route, e);
                        manifest.record(route.clone(), old.clone());
                    } else {
                        warn!("skipping {}: {}", route, e);
                    }
                    report.skipped.push((route, e.to_string()));
                }
                Err(e) => return Err(e),
            }
        }

        let placeholder = render::detail_page(&PageState::Placeholder, self.image_scale);
        self.write_page(Path::new(FALLBACK_FILE), placeholder).await?;

        for (route, record) in &previous.pages {
            if manifest.get(route).is_none() {
                info!("removing {}", route);
                remove_file(&self.output_dir.join(&record.file)).await?;
            }
        }

        manifest.save(&self.output_dir).await?;
        info!(
            "built {} pages ({} redirected, {} skipped) into {}",
            report.written.len(),
            report.redirected.len(),
            report.skipped.len(),
            self.output_dir.display()
        );
        Ok(report)
    }

    /// Regenerate pages that already exist and whose interval has elapsed
    pub async fn revalidate(&self, now: u64) -> Result<BuildReport, SiteError> {
        let mut manifest = BuildManifest::load(&self.output_dir).await?;
        let mut report = BuildReport::default();

        for route in manifest.stale_routes(now) {
            if route == INDEX_ROUTE {
                let record = self.generate_index(now).await?;
                manifest.record(INDEX_ROUTE, record);
                report.written.push(route);
                continue;
            }

            let Some(slug) = route.strip_prefix("/recipes/") else {
                warn!("unknown route {} in manifest, dropping it", route);
                manifest.remove(&route);
                continue;
            };

            match self.generate_recipe(slug, now).await {
                Ok(Generation::Written(route, record)) => {
                    manifest.record(route.clone(), record);
                    report.written.push(route);
                }
                Ok(Generation::Redirected(redirect)) => {
                    self.retire_page(&mut manifest, &route, &redirect).await?;
                    report.redirected.push(route);
                }
                Err(e @ SiteError::MalformedContent { .. }) => {
                    warn!("keeping previous {}: {}", route, e);
                    report.skipped.push((route, e.to_string()));
                }
                Err(e) => return Err(e),
            }
        }

        manifest.save(&self.output_dir).await?;
        Ok(report)
    }

    /// Serve one detail page, generating it when missing or stale
    pub async fn request_page(&self, slug: &str, now: u64) -> Result<PageOutcome, SiteError> {
        let mut manifest = BuildManifest::load(&self.output_dir).await?;
        let route = pages::recipe_route(slug);

        if let Some(record) = manifest.get(&route) {
            if !record.is_stale(now) {
                return Ok(PageOutcome::Fresh(self.output_dir.join(&record.file)));
            }
        } else {
            info!("{} is not pre-built, generating on demand", route);
        }

        match self.generate_recipe(slug, now).await? {
            Generation::Written(route, record) => {
                let file = self.output_dir.join(&record.file);
                manifest.record(route, record);
                manifest.save(&self.output_dir).await?;
                Ok(PageOutcome::Generated(file))
            }
            Generation::Redirected(redirect) => {
                if manifest.get(&route).is_some() {
                    self.retire_page(&mut manifest, &route, &redirect).await?;
                    manifest.save(&self.output_dir).await?;
                }
                Ok(PageOutcome::Redirected(redirect))
            }
        }
    }

    /// Replace a built page whose entry is gone with a redirect stub and
    /// drop it from the manifest
    async fn retire_page(
        &self,
        manifest: &mut BuildManifest,
        route: &str,
        redirect: &Redirect,
    ) -> Result<(), SiteError> {
        if let Some(old) = manifest.remove(route) {
            self.write_page(&old.file, render::redirect_stub(redirect))
                .await?;
        }
        info!("{} now redirects to {}", route, redirect.destination);
        Ok(())
    }

    async fn generate_index(&self, now: u64) -> Result<PageRecord, SiteError> {
        let result = index::get_static_props(self.source.as_ref(), &self.settings).await?;
        let file = PathBuf::from("index.html");

        if let StaticProps::Props { props, .. } = &result {
            self.write_page(&file, render::index_page(props)).await?;
        }

        Ok(PageRecord {
            file,
            generated_at: now,
            revalidate_secs: result.revalidate(),
        })
    }

    async fn generate_recipe(&self, slug: &str, now: u64) -> Result<Generation, SiteError> {
        let result = recipe::get_static_props(self.source.as_ref(), &self.settings, slug).await?;

        match result {
            StaticProps::Props { props, revalidate } => {
                let file = recipe_file(props.recipe.slug());
                let route = pages::recipe_route(props.recipe.slug());
                let markup = render::detail_page(&PageState::Ready(props), self.image_scale);
                self.write_page(&file, markup).await?;
                Ok(Generation::Written(
                    route,
                    PageRecord {
                        file,
                        generated_at: now,
                        revalidate_secs: revalidate,
                    },
                ))
            }
            StaticProps::Redirect { redirect } => Ok(Generation::Redirected(redirect)),
        }
    }

    async fn write_page(&self, relative: &Path, markup: Markup) -> Result<(), SiteError> {
        let path = self.output_dir.join(relative);
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&path, markup.into_string()).await?;
        Ok(())
    }
}

fn recipe_file(slug: &str) -> PathBuf {
    Path::new("recipes").join(slug).join("index.html")
}

async fn remove_file(path: &Path) -> Result<(), SiteError> {
    match tokio::fs::remove_file(path).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}
