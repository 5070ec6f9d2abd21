//! Iterative folder-subtree collection.

use std::collections::{HashSet, VecDeque};
use std::sync::Arc;

use uuid::Uuid;

use nimbus_core::result::AppResult;
use nimbus_entity::{EntityFilter, File, Folder, Note, ParentScope};
use nimbus_store::traits::{FileStore, FolderStore, NoteStore};

/// Everything reachable from one folder, including the folder itself.
#[derive(Debug, Clone, Default)]
pub struct Subtree {
    /// All folders, breadth-first: parents always precede their children.
    pub folders: Vec<Folder>,
    /// All files directly inside any collected folder.
    pub files: Vec<File>,
    /// All notes directly inside any collected folder.
    pub notes: Vec<Note>,
}

impl Subtree {
    /// Ids of every collected folder.
    pub fn folder_ids(&self) -> Vec<Uuid> {
        self.folders.iter().map(|f| f.id).collect()
    }

    /// Total number of entities in the subtree.
    pub fn entity_count(&self) -> usize {
        self.folders.len() + self.files.len() + self.notes.len()
    }
}

/// Collects folder subtrees without recursion.
///
/// The walk is a plain breadth-first traversal over a `VecDeque` worklist.
/// A visited set keeps it terminating even if stored parent links ever
/// form a cycle; such a cycle is malformed data, not a supported shape,
/// but it must never hang a request.
#[derive(Debug, Clone)]
pub struct TreeWalker {
    folders: Arc<dyn FolderStore>,
    files: Arc<dyn FileStore>,
    notes: Arc<dyn NoteStore>,
}

impl TreeWalker {
    /// Creates a new walker over the three entity stores.
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

    /// Collect `root` and everything transitively below it.
    pub async fn collect(&self, root: &Folder) -> AppResult<Subtree> {
        let mut subtree = Subtree {
            folders: vec![root.clone()],
            ..Subtree::default()
        };
        let mut visited = HashSet::from([root.id]);
        let mut queue = VecDeque::from([root.id]);

        while let Some(folder_id) = queue.pop_front() {
            let scope =
                EntityFilter::owned_by(root.owner_id).in_scope(ParentScope::In(folder_id));

            subtree.files.extend(self.files.find(&scope).await?);
            subtree.notes.extend(self.notes.find(&scope).await?);
            for child in self.folders.find(&scope).await? {
                if visited.insert(child.id) {
                    queue.push_back(child.id);
                    subtree.folders.push(child);
                }
            }
        }

        Ok(subtree)
    }
}

#[cfg(test)]
mod tests {
    use nimbus_entity::FileKind;
    use nimbus_store::traits::{FileStore, FolderStore, NoteStore};

    use super::*;
    use crate::testutil::TestEnv;

    #[tokio::test]
    async fn collects_nested_structure() {
        let env = TestEnv::new();
        let owner = Uuid::new_v4();

        let root = Folder::new(owner, "root", None);
        let child = Folder::new(owner, "child", Some(root.id));
        let grandchild = Folder::new(owner, "grandchild", Some(child.id));
        for f in [&root, &child, &grandchild] {
            FolderStore::save(env.store.as_ref(), f).await.unwrap();
        }

        let file = File::new(owner, "deep.pdf", FileKind::Pdf, Some(grandchild.id), 1, "loc");
        FileStore::save(env.store.as_ref(), &file).await.unwrap();
        let note = Note::new(owner, "memo", "text", Some(child.id));
        NoteStore::save(env.store.as_ref(), &note).await.unwrap();

        // A sibling outside the subtree must not be picked up.
        let outside = Folder::new(owner, "other", None);
        FolderStore::save(env.store.as_ref(), &outside).await.unwrap();

        let subtree = env.walker().collect(&root).await.unwrap();
        assert_eq!(subtree.folders.len(), 3);
        assert_eq!(subtree.files.len(), 1);
        assert_eq!(subtree.notes.len(), 1);
        assert_eq!(subtree.entity_count(), 5);
        assert!(!subtree.folder_ids().contains(&outside.id));
    }

    #[tokio::test]
    async fn parents_precede_children() {
        let env = TestEnv::new();
        let owner = Uuid::new_v4();

        let root = Folder::new(owner, "a", None);
        let mid = Folder::new(owner, "b", Some(root.id));
        let leaf = Folder::new(owner, "c", Some(mid.id));
        for f in [&root, &mid, &leaf] {
            FolderStore::save(env.store.as_ref(), f).await.unwrap();
        }

        let subtree = env.walker().collect(&root).await.unwrap();
        let ids = subtree.folder_ids();
        let pos = |id| ids.iter().position(|x| *x == id).unwrap();
        assert!(pos(root.id) < pos(mid.id));
        assert!(pos(mid.id) < pos(leaf.id));
    }

    #[tokio::test]
    async fn terminates_on_cyclic_parent_links() {
        let env = TestEnv::new();
        let owner = Uuid::new_v4();

        let mut a = Folder::new(owner, "a", None);
        let b = Folder::new(owner, "b", Some(a.id));
        a.parent_id = Some(b.id);
        FolderStore::save(env.store.as_ref(), &a).await.unwrap();
        FolderStore::save(env.store.as_ref(), &b).await.unwrap();

        let subtree = env.walker().collect(&a).await.unwrap();
        assert_eq!(subtree.folders.len(), 2);
    }
}
