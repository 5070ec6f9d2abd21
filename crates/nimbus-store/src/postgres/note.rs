//! Note store backed by PostgreSQL.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use nimbus_core::error::{AppError, ErrorKind};
use nimbus_core::result::AppResult;
use nimbus_entity::{EntityFilter, Note, ParentScope};

use crate::traits::NoteStore;

/// PostgreSQL-backed [`NoteStore`].
#[derive(Debug, Clone)]
pub struct PgNoteStore {
    pool: PgPool,
}

impl PgNoteStore {
    /// Create a new note store over the shared pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn select_filtered(filter: &EntityFilter) -> QueryBuilder<'_, Postgres> {
        let mut qb = QueryBuilder::new("SELECT * FROM notes WHERE owner_id = ");
        qb.push_bind(filter.owner_id);
        match filter.parent {
            ParentScope::Any => {}
            ParentScope::Root => {
                qb.push(" AND folder_id IS NULL");
            }
            ParentScope::In(id) => {
                qb.push(" AND folder_id = ");
                qb.push_bind(id);
            }
        }
        if let Some(favourite) = filter.favourite {
            qb.push(" AND favourite = ");
            qb.push_bind(favourite);
        }
        if let Some(range) = filter.created_in {
            qb.push(" AND created_at >= ");
            qb.push_bind(range.start);
            qb.push(" AND created_at <= ");
            qb.push_bind(range.end);
        }
        if let Some(ids) = &filter.ids {
            qb.push(" AND id = ANY(");
            qb.push_bind(ids.clone());
            qb.push(")");
        }
        qb.push(" ORDER BY created_at DESC, id ASC");
        qb
    }
}

#[async_trait]
impl NoteStore for PgNoteStore {
    async fn get(&self, id: Uuid) -> AppResult<Option<Note>> {
        sqlx::query_as::<_, Note>("SELECT * FROM notes WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to fetch note", e))
    }

    async fn find(&self, filter: &EntityFilter) -> AppResult<Vec<Note>> {
        Self::select_filtered(filter)
            .build_query_as::<Note>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to query notes", e))
    }

    async fn save(&self, note: &Note) -> AppResult<Note> {
        sqlx::query_as::<_, Note>(
            "INSERT INTO notes \
                 (id, owner_id, title, content, folder_id, favourite, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             ON CONFLICT (id) DO UPDATE SET \
                 title = EXCLUDED.title, \
                 content = EXCLUDED.content, \
                 folder_id = EXCLUDED.folder_id, \
                 favourite = EXCLUDED.favourite, \
                 updated_at = EXCLUDED.updated_at \
             RETURNING *",
        )
        .bind(note.id)
        .bind(note.owner_id)
        .bind(&note.title)
        .bind(&note.content)
        .bind(note.folder_id)
        .bind(note.favourite)
        .bind(note.created_at)
        .bind(note.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to save note", e))
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM notes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete note", e))?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_many(&self, ids: &[Uuid]) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM notes WHERE id = ANY($1)")
            .bind(ids)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete notes", e))?;
        Ok(result.rows_affected())
    }

    async fn delete_owned(&self, ids: &[Uuid], owner_id: Uuid) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM notes WHERE id = ANY($1) AND owner_id = $2")
            .bind(ids)
            .bind(owner_id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete notes", e))?;
        Ok(result.rows_affected())
    }

    async fn set_favourite(&self, id: Uuid, owner_id: Uuid, favourite: bool) -> AppResult<bool> {
        let result = sqlx::query("UPDATE notes SET favourite = $3 WHERE id = $1 AND owner_id = $2")
            .bind(id)
            .bind(owner_id)
            .bind(favourite)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to update favourite", e)
            })?;
        Ok(result.rows_affected() > 0)
    }
}
