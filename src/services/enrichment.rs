//! Fills in covers, synonyms and synopses from AniList, per line right
//! after creation or in bulk over everything still missing data. Bulk runs
//! are paced so the lookup API does not rate-limit us mid-pass.

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tracing::{info, warn};

use crate::catalog::entry::LookupKind;
use crate::clients::anilist::AnilistClient;
use crate::constants::limits::REFRESH_PACING_MS;
use crate::db::Store;
use crate::models::Line;

#[derive(Debug, Error)]
pub enum EnrichmentError {
    #[error("Database error: {0}")]
    Database(String),
}

impl From<anyhow::Error> for EnrichmentError {
    fn from(err: anyhow::Error) -> Self {
        Self::Database(err.to_string())
    }
}

#[derive(Debug, Default, Clone, Copy, serde::Serialize)]
pub struct RefreshStats {
    pub examined: usize,
    pub updated: usize,
}

pub struct EnrichmentService {
    store: Store,
    anilist: Arc<AnilistClient>,
    pacing: Duration,
}

impl EnrichmentService {
    #[must_use]
    pub fn new(store: Store, anilist: Arc<AnilistClient>) -> Self {
        Self {
            store,
            anilist,
            pacing: Duration::from_millis(REFRESH_PACING_MS),
        }
    }

    /// Repairs whatever one line is missing. Lookup failures degrade to
    /// "nothing found" with a warning; only storage failures surface.
    pub async fn repair_line(&self, line: &Line) -> Result<bool, EnrichmentError> {
        let kind = LookupKind::for_content(&line.content);
        let mut updated = false;

        if line.needs_image() {
            match self.anilist.next_cover(&line.name, kind).await {
                Ok(Some(url)) => {
                    self.store.update_line_image(line.id, &url).await?;
                    info!("Saved cover for {}", line.name);
                    updated = true;
                }
                Ok(None) => {}
                Err(e) => warn!("Cover lookup failed for {}: {}", line.name, e),
            }
        }

        if line.needs_details() {
            match self.anilist.fetch_details(&line.name, kind).await {
                Ok(Some(details))
                    if !details.synopsis.is_empty() || !details.synonyms.is_empty() =>
                {
                    self.store
                        .update_line_details(line.id, &details.synonyms, &details.synopsis)
                        .await?;
                    info!("Saved details for {}", line.name);
                    updated = true;
                }
                Ok(_) => {}
                Err(e) => warn!("Detail lookup failed for {}: {}", line.name, e),
            }
        }

        Ok(updated)
    }

    /// Re-resolves every missing or placeholder cover. Only real URLs are
    /// persisted; the sentinel never is.
    pub async fn refresh_images(&self) -> Result<RefreshStats, EnrichmentError> {
        let lines = self.store.lines_missing_image().await?;
        let mut stats = RefreshStats {
            examined: lines.len(),
            updated: 0,
        };

        for line in &lines {
            let kind = LookupKind::for_content(&line.content);
            match self.anilist.next_cover(&line.name, kind).await {
                Ok(Some(url)) => {
                    self.store.update_line_image(line.id, &url).await?;
                    stats.updated += 1;
                }
                Ok(None) => {}
                Err(e) => warn!("Cover lookup failed for {}: {}", line.name, e),
            }
            tokio::time::sleep(self.pacing).await;
        }

        info!(
            "Cover refresh finished: {}/{} updated",
            stats.updated, stats.examined
        );
        Ok(stats)
    }

    /// Enriches every line still waiting for synonyms or a synopsis.
    pub async fn refresh_details(&self) -> Result<RefreshStats, EnrichmentError> {
        let lines = self.store.lines_missing_details().await?;
        let mut stats = RefreshStats {
            examined: lines.len(),
            updated: 0,
        };

        for (idx, line) in lines.iter().enumerate() {
            let kind = LookupKind::for_content(&line.content);
            info!(
                "({}/{}) Fetching details for '{}' ({})",
                idx + 1,
                stats.examined,
                line.name,
                kind
            );

            match self.anilist.fetch_details(&line.name, kind).await {
                Ok(Some(details))
                    if !details.synopsis.is_empty() || !details.synonyms.is_empty() =>
                {
                    self.store
                        .update_line_details(line.id, &details.synonyms, &details.synopsis)
                        .await?;
                    stats.updated += 1;
                }
                Ok(_) => info!("No usable details for '{}'", line.name),
                Err(e) => warn!("Detail lookup failed for {}: {}", line.name, e),
            }

            tokio::time::sleep(self.pacing).await;
        }

        info!(
            "Detail refresh finished: {}/{} updated",
            stats.updated, stats.examined
        );
        Ok(stats)
    }
}
