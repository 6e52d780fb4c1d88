use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::SiteError;

pub const MANIFEST_FILE: &str = ".recipe-pages.json";

/// A generated page and when it may be regenerated
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PageRecord {
    /// Path of the HTML file, relative to the output directory
    pub file: PathBuf,
    /// Unix seconds at generation time
    pub generated_at: u64,
    pub revalidate_secs: Option<u64>,
}

impl PageRecord {
    /// A page without a revalidation interval is never stale
    pub fn is_stale(&self, now: u64) -> bool {
        match self.revalidate_secs {
            Some(secs) => now >= self.generated_at.saturating_add(secs),
            None => false,
        }
    }
}

/// Every page written to the output directory, keyed by route
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct BuildManifest {
    pub pages: BTreeMap<String, PageRecord>,
}

impl BuildManifest {
    /// Read the manifest from `output_dir`; a missing file is an empty manifest
    pub async fn load(output_dir: &Path) -> Result<Self, SiteError> {
        let path = output_dir.join(MANIFEST_FILE);
        match tokio::fs::read_to_string(&path).await {
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }

    pub async fn save(&self, output_dir: &Path) -> Result<(), SiteError> {
        tokio::fs::create_dir_all(output_dir).await?;
        let json = serde_json::to_string_pretty(self)?;
        tokio::fs::write(output_dir.join(MANIFEST_FILE), json).await?;
        Ok(())
    }

    pub fn record(&mut self, route: impl Into<String>, record: PageRecord) {
        self.pages.insert(route.into(), record);
    }

    pub fn remove(&mut self, route: &str) -> Option<PageRecord> {
        self.pages.remove(route)
    }

    pub fn get(&self, route: &str) -> Option<&PageRecord> {
        self.pages.get(route)
    }

    /// Routes whose revalidation interval has elapsed at `now`
    pub fn stale_routes(&self, now: u64) -> Vec<String> {
        self.pages
            .iter()
            .filter(|(_, record)| record.is_stale(now))
            .map(|(route, _)| route.clone())
            .collect()
    }
}

pub fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}
