//! File store backed by PostgreSQL.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use nimbus_core::error::{AppError, ErrorKind};
use nimbus_core::result::AppResult;
use nimbus_entity::{EntityFilter, File, ParentScope};

use crate::traits::FileStore;

/// PostgreSQL-backed [`FileStore`].
#[derive(Debug, Clone)]
pub struct PgFileStore {
    pool: PgPool,
}

impl PgFileStore {
    /// Create a new file store over the shared pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn select_filtered(filter: &EntityFilter) -> QueryBuilder<'_, Postgres> {
        let mut qb = QueryBuilder::new("SELECT * FROM files WHERE owner_id = ");
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
        if let Some(kind) = filter.file_kind {
            qb.push(" AND kind = ");
            qb.push_bind(kind);
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
impl FileStore for PgFileStore {
    async fn get(&self, id: Uuid) -> AppResult<Option<File>> {
        sqlx::query_as::<_, File>("SELECT * FROM files WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to fetch file", e))
    }

    async fn find(&self, filter: &EntityFilter) -> AppResult<Vec<File>> {
        Self::select_filtered(filter)
            .build_query_as::<File>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to query files", e))
    }

    async fn find_recent(&self, owner_id: Uuid, limit: usize) -> AppResult<Vec<File>> {
        sqlx::query_as::<_, File>(
            "SELECT * FROM files WHERE owner_id = $1 \
             ORDER BY created_at DESC, id ASC LIMIT $2",
        )
        .bind(owner_id)
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to query recent files", e))
    }

    async fn save(&self, file: &File) -> AppResult<File> {
        sqlx::query_as::<_, File>(
            "INSERT INTO files \
                 (id, owner_id, name, kind, folder_id, size_bytes, locator, favourite, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
             ON CONFLICT (id) DO UPDATE SET \
                 name = EXCLUDED.name, \
                 folder_id = EXCLUDED.folder_id, \
                 size_bytes = EXCLUDED.size_bytes, \
                 locator = EXCLUDED.locator, \
                 favourite = EXCLUDED.favourite \
             RETURNING *",
        )
        .bind(file.id)
        .bind(file.owner_id)
        .bind(&file.name)
        .bind(file.kind)
        .bind(file.folder_id)
        .bind(file.size_bytes)
        .bind(&file.locator)
        .bind(file.favourite)
        .bind(file.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to save file", e))
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM files WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete file", e))?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_many(&self, ids: &[Uuid]) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM files WHERE id = ANY($1)")
            .bind(ids)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete files", e))?;
        Ok(result.rows_affected())
    }

    async fn set_favourite(&self, id: Uuid, owner_id: Uuid, favourite: bool) -> AppResult<bool> {
        let result = sqlx::query("UPDATE files SET favourite = $3 WHERE id = $1 AND owner_id = $2")
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
