//! Folder store backed by PostgreSQL.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use nimbus_core::error::{AppError, ErrorKind};
use nimbus_core::result::AppResult;
use nimbus_entity::{EntityFilter, Folder, ParentScope};

use crate::traits::FolderStore;

/// PostgreSQL-backed [`FolderStore`].
#[derive(Debug, Clone)]
pub struct PgFolderStore {
    pool: PgPool,
}

impl PgFolderStore {
    /// Create a new folder store over the shared pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn select_filtered(filter: &EntityFilter) -> QueryBuilder<'_, Postgres> {
        let mut qb = QueryBuilder::new("SELECT * FROM folders WHERE owner_id = ");
        qb.push_bind(filter.owner_id);
        match filter.parent {
            ParentScope::Any => {}
            ParentScope::Root => {
                qb.push(" AND parent_id IS NULL");
            }
            ParentScope::In(id) => {
                qb.push(" AND parent_id = ");
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
impl FolderStore for PgFolderStore {
    async fn get(&self, id: Uuid) -> AppResult<Option<Folder>> {
        sqlx::query_as::<_, Folder>("SELECT * FROM folders WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to fetch folder", e))
    }

    async fn find(&self, filter: &EntityFilter) -> AppResult<Vec<Folder>> {
        Self::select_filtered(filter)
            .build_query_as::<Folder>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to query folders", e))
    }

    async fn find_recent(&self, owner_id: Uuid, limit: usize) -> AppResult<Vec<Folder>> {
        sqlx::query_as::<_, Folder>(
            "SELECT * FROM folders WHERE owner_id = $1 \
             ORDER BY created_at DESC, id ASC LIMIT $2",
        )
        .bind(owner_id)
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to query recent folders", e))
    }

    async fn save(&self, folder: &Folder) -> AppResult<Folder> {
        sqlx::query_as::<_, Folder>(
            "INSERT INTO folders (id, owner_id, name, parent_id, favourite, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             ON CONFLICT (id) DO UPDATE SET \
                 name = EXCLUDED.name, \
                 parent_id = EXCLUDED.parent_id, \
                 favourite = EXCLUDED.favourite \
             RETURNING *",
        )
        .bind(folder.id)
        .bind(folder.owner_id)
        .bind(&folder.name)
        .bind(folder.parent_id)
        .bind(folder.favourite)
        .bind(folder.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to save folder", e))
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM folders WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete folder", e)
            })?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_many(&self, ids: &[Uuid]) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM folders WHERE id = ANY($1)")
            .bind(ids)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete folders", e)
            })?;
        Ok(result.rows_affected())
    }

    async fn set_favourite(&self, id: Uuid, owner_id: Uuid, favourite: bool) -> AppResult<bool> {
        let result =
            sqlx::query("UPDATE folders SET favourite = $3 WHERE id = $1 AND owner_id = $2")
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
