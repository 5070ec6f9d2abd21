//! File operations.

use std::sync::Arc;

use bytes::Bytes;
use tracing::info;
use uuid::Uuid;

use nimbus_core::error::AppError;
use nimbus_core::result::AppResult;
use nimbus_core::traits::blob::BlobStore;
use nimbus_entity::{EntityFilter, File, FileKind, ParentScope};
use nimbus_store::traits::FileStore;

use crate::context::RequestContext;
use crate::guard::OwnershipGuard;

/// One incoming upload part.
#[derive(Debug, Clone)]
pub struct FileUpload {
    /// Original file name, extension included.
    pub name: String,
    /// MIME type as declared by the client.
    pub content_type: String,
    /// The raw bytes.
    pub data: Bytes,
}

/// Manages file records and their backing blobs.
#[derive(Debug, Clone)]
pub struct FileService {
    files: Arc<dyn FileStore>,
    blobs: Arc<dyn BlobStore>,
    guard: OwnershipGuard,
}

impl FileService {
    /// Creates a new file service.
    pub fn new(files: Arc<dyn FileStore>, blobs: Arc<dyn BlobStore>, guard: OwnershipGuard) -> Self {
        Self {
            files,
            blobs,
            guard,
        }
    }

    /// Stores uploaded files, optionally inside an owned folder.
    ///
    /// The file kind is derived from the declared MIME type: anything
    /// image-flavoured is an image, everything else is treated as a PDF.
    pub async fn upload(
        &self,
        ctx: &RequestContext,
        folder_id: Option<Uuid>,
        uploads: Vec<FileUpload>,
    ) -> AppResult<Vec<File>> {
        if uploads.is_empty() {
            return Err(AppError::validation("No files given"));
        }
        if uploads.iter().any(|u| u.name.trim().is_empty()) {
            return Err(AppError::validation("File name cannot be empty"));
        }
        if let Some(folder_id) = folder_id {
            self.guard.folder(ctx, folder_id).await?;
        }

        let mut stored = Vec::with_capacity(uploads.len());
        for upload in uploads {
            let kind = FileKind::from_mime(&upload.content_type);
            let size = upload.data.len() as i64;
            let locator = self.blobs.store(upload.data, &upload.name).await?;
            let file = self
                .files
                .save(&File::new(
                    ctx.user_id,
                    upload.name,
                    kind,
                    folder_id,
                    size,
                    locator,
                ))
                .await?;
            stored.push(file);
        }

        info!(
            user_id = %ctx.user_id,
            count = stored.len(),
            "Files uploaded"
        );
        Ok(stored)
    }

    /// Files directly inside an owned folder.
    pub async fn list_in_folder(&self, ctx: &RequestContext, folder_id: Uuid) -> AppResult<Vec<File>> {
        self.guard.folder(ctx, folder_id).await?;
        self.files
            .find(&EntityFilter::owned_by(ctx.user_id).in_scope(ParentScope::In(folder_id)))
            .await
    }

    /// Every file the user owns.
    pub async fn list_all(&self, ctx: &RequestContext) -> AppResult<Vec<File>> {
        self.files.find(&EntityFilter::owned_by(ctx.user_id)).await
    }

    /// Files at the root level (no folder).
    pub async fn list_root(&self, ctx: &RequestContext) -> AppResult<Vec<File>> {
        self.files
            .find(&EntityFilter::owned_by(ctx.user_id).in_scope(ParentScope::Root))
            .await
    }

    /// Every image the user owns.
    pub async fn list_images(&self, ctx: &RequestContext) -> AppResult<Vec<File>> {
        self.files
            .find(&EntityFilter::owned_by(ctx.user_id).of_kind(FileKind::Image))
            .await
    }

    /// Every PDF the user owns.
    pub async fn list_pdfs(&self, ctx: &RequestContext) -> AppResult<Vec<File>> {
        self.files
            .find(&EntityFilter::owned_by(ctx.user_id).of_kind(FileKind::Pdf))
            .await
    }

    /// Renames an owned file.
    pub async fn rename_file(
        &self,
        ctx: &RequestContext,
        file_id: Uuid,
        new_name: &str,
    ) -> AppResult<File> {
        if new_name.trim().is_empty() {
            return Err(AppError::validation("File name cannot be empty"));
        }

        let mut file = self.guard.file(ctx, file_id).await?;
        file.name = new_name.to_string();
        let file = self.files.save(&file).await?;

        info!(user_id = %ctx.user_id, file_id = %file_id, "File renamed");
        Ok(file)
    }

    /// Deletes a batch of owned files, blobs included.
    ///
    /// Every id must resolve to an owned file before anything is removed;
    /// a single bad id fails the whole batch with nothing touched.
    pub async fn delete_files(&self, ctx: &RequestContext, file_ids: &[Uuid]) -> AppResult<u64> {
        if file_ids.is_empty() {
            return Err(AppError::validation("No files given"));
        }

        let mut doomed = Vec::with_capacity(file_ids.len());
        for &id in file_ids {
            match self.files.get(id).await? {
                Some(file) if file.owner_id == ctx.user_id => doomed.push(file),
                _ => return Err(AppError::not_found("Some files not found")),
            }
        }

        for file in &doomed {
            self.blobs.delete(&file.locator).await?;
        }
        let removed = self.files.delete_many(file_ids).await?;

        info!(user_id = %ctx.user_id, removed, "Files deleted");
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use nimbus_core::error::ErrorKind;
    use nimbus_entity::Folder;
    use nimbus_store::traits::{FileStore, FolderStore};

    use super::*;
    use crate::testutil::{TestEnv, ctx_for};

    fn service(env: &TestEnv) -> FileService {
        FileService::new(env.files(), env.blobs.clone(), env.guard())
    }

    fn upload(name: &str, content_type: &str, data: &str) -> FileUpload {
        FileUpload {
            name: name.to_string(),
            content_type: content_type.to_string(),
            data: Bytes::from(data.to_string()),
        }
    }

    #[tokio::test]
    async fn upload_stores_bytes_and_records() {
        let env = TestEnv::new();
        let ctx = ctx_for(Uuid::new_v4());
        let svc = service(&env);

        let stored = svc
            .upload(
                &ctx,
                None,
                vec![
                    upload("photo.png", "image/png", "pixels"),
                    upload("doc.pdf", "application/pdf", "pages"),
                ],
            )
            .await
            .unwrap();

        assert_eq!(stored.len(), 2);
        assert_eq!(stored[0].kind, FileKind::Image);
        assert_eq!(stored[1].kind, FileKind::Pdf);
        assert_eq!(stored[0].size_bytes, 6);
        assert_eq!(
            env.blobs.read(&stored[0].locator).await.unwrap(),
            Bytes::from("pixels")
        );
    }

    #[tokio::test]
    async fn upload_rejects_empty_batch_and_foreign_folder() {
        let env = TestEnv::new();
        let ctx = ctx_for(Uuid::new_v4());
        let svc = service(&env);

        let err = svc.upload(&ctx, None, vec![]).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);

        let theirs = Folder::new(Uuid::new_v4(), "theirs", None);
        FolderStore::save(env.store.as_ref(), &theirs).await.unwrap();
        let err = svc
            .upload(&ctx, Some(theirs.id), vec![upload("a.pdf", "application/pdf", "x")])
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn listings_are_scoped() {
        let env = TestEnv::new();
        let owner = Uuid::new_v4();
        let ctx = ctx_for(owner);
        let svc = service(&env);

        let folder = Folder::new(owner, "docs", None);
        FolderStore::save(env.store.as_ref(), &folder).await.unwrap();

        svc.upload(&ctx, None, vec![upload("root.png", "image/png", "a")])
            .await
            .unwrap();
        svc.upload(
            &ctx,
            Some(folder.id),
            vec![upload("inner.pdf", "application/pdf", "b")],
        )
        .await
        .unwrap();

        assert_eq!(svc.list_all(&ctx).await.unwrap().len(), 2);
        assert_eq!(svc.list_root(&ctx).await.unwrap().len(), 1);
        assert_eq!(svc.list_in_folder(&ctx, folder.id).await.unwrap().len(), 1);
        assert_eq!(svc.list_images(&ctx).await.unwrap().len(), 1);
        assert_eq!(svc.list_pdfs(&ctx).await.unwrap().len(), 1);

        // Another user sees nothing.
        let other = ctx_for(Uuid::new_v4());
        assert!(svc.list_all(&other).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn delete_validates_all_before_removing_any() {
        let env = TestEnv::new();
        let owner = Uuid::new_v4();
        let ctx = ctx_for(owner);
        let svc = service(&env);

        let mine = svc
            .upload(&ctx, None, vec![upload("mine.pdf", "application/pdf", "x")])
            .await
            .unwrap()
            .remove(0);
        let theirs = File::new(Uuid::new_v4(), "b.pdf", FileKind::Pdf, None, 1, "loc");
        FileStore::save(env.store.as_ref(), &theirs).await.unwrap();

        let err = svc
            .delete_files(&ctx, &[mine.id, theirs.id])
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
        assert_eq!(err.message, "Some files not found");
        assert!(FileStore::get(env.store.as_ref(), mine.id)
            .await
            .unwrap()
            .is_some());
        assert!(env.blobs.exists(&mine.locator).await.unwrap());
    }

    #[tokio::test]
    async fn delete_removes_records_and_blobs() {
        let env = TestEnv::new();
        let ctx = ctx_for(Uuid::new_v4());
        let svc = service(&env);

        let stored = svc
            .upload(
                &ctx,
                None,
                vec![
                    upload("a.pdf", "application/pdf", "a"),
                    upload("b.pdf", "application/pdf", "b"),
                ],
            )
            .await
            .unwrap();
        let ids: Vec<Uuid> = stored.iter().map(|f| f.id).collect();

        let removed = svc.delete_files(&ctx, &ids).await.unwrap();
        assert_eq!(removed, 2);
        assert!(env.blobs.is_empty());
        assert!(svc.list_all(&ctx).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn rename_requires_nonempty_name() {
        let env = TestEnv::new();
        let ctx = ctx_for(Uuid::new_v4());
        let svc = service(&env);

        let file = svc
            .upload(&ctx, None, vec![upload("old.pdf", "application/pdf", "x")])
            .await
            .unwrap()
            .remove(0);

        let err = svc.rename_file(&ctx, file.id, "").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);

        let renamed = svc.rename_file(&ctx, file.id, "new.pdf").await.unwrap();
        assert_eq!(renamed.name, "new.pdf");
    }
}
