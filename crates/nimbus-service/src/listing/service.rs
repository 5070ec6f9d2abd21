//! Recent and by-date listings.

use std::sync::Arc;

use chrono::NaiveDate;

use nimbus_core::error::AppError;
use nimbus_core::result::AppResult;
use nimbus_entity::{Entity, EntityFilter};
use nimbus_store::traits::{FileStore, FolderStore, NoteStore};

use crate::context::RequestContext;

/// How many entries a recent listing returns.
const RECENT_LIMIT: usize = 10;

/// Sort a mixed entity list newest first, id as a tiebreaker.
pub(crate) fn newest_first(entities: &mut [Entity]) {
    entities.sort_by(|a, b| {
        b.created_at()
            .cmp(&a.created_at())
            .then(a.id().cmp(&b.id()))
    });
}

/// Cross-kind listings: recents and creation-date queries.
#[derive(Debug, Clone)]
pub struct ListingService {
    folders: Arc<dyn FolderStore>,
    files: Arc<dyn FileStore>,
    notes: Arc<dyn NoteStore>,
}

impl ListingService {
    /// Creates a new listing service.
    pub fn new(
        folders: Arc<dyn FolderStore>,
        files: Arc<dyn FileStore>,
        notes: Arc<dyn NoteStore>,
    ) -> Self {
        Self {
            folders,
            files,
            notes,
        }
    }

    /// The ten most recently created entries, merged across files and
    /// folders. Notes are deliberately excluded from recents.
    pub async fn recent(&self, ctx: &RequestContext) -> AppResult<Vec<Entity>> {
        let files = self.files.find_recent(ctx.user_id, RECENT_LIMIT).await?;
        let folders = self.folders.find_recent(ctx.user_id, RECENT_LIMIT).await?;

        let mut merged: Vec<Entity> = files
            .into_iter()
            .map(Entity::File)
            .chain(folders.into_iter().map(Entity::Folder))
            .collect();
        newest_first(&mut merged);
        merged.truncate(RECENT_LIMIT);
        Ok(merged)
    }

    /// Everything created on one UTC calendar day (`YYYY-MM-DD`), across
    /// all three kinds, both day bounds inclusive.
    pub async fn by_date(&self, ctx: &RequestContext, date: &str) -> AppResult<Vec<Entity>> {
        let day = NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .map_err(|_| AppError::validation(format!("Invalid date: {date}")))?;
        let start = day
            .and_hms_opt(0, 0, 0)
            .ok_or_else(|| AppError::internal("Day window out of range"))?
            .and_utc();
        let end = day
            .and_hms_milli_opt(23, 59, 59, 999)
            .ok_or_else(|| AppError::internal("Day window out of range"))?
            .and_utc();

        let filter = EntityFilter::owned_by(ctx.user_id).created_between(start, end);
        let mut merged: Vec<Entity> = self
            .files
            .find(&filter)
            .await?
            .into_iter()
            .map(Entity::File)
            .chain(
                self.folders
                    .find(&filter)
                    .await?
                    .into_iter()
                    .map(Entity::Folder),
            )
            .chain(
                self.notes
                    .find(&filter)
                    .await?
                    .into_iter()
                    .map(Entity::Note),
            )
            .collect();
        newest_first(&mut merged);
        Ok(merged)
    }
}
