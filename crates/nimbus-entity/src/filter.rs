//! Typed filter vocabulary for entity-store queries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::file::FileKind;

/// Which parent/folder attachment a query matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ParentScope {
    /// No constraint on attachment.
    #[default]
    Any,
    /// Root-level only (no parent/folder).
    Root,
    /// Directly inside the given folder.
    In(Uuid),
}

impl ParentScope {
    /// Build a scope from an optional folder id, mapping `None` to root.
    pub fn of(folder_id: Option<Uuid>) -> Self {
        match folder_id {
            Some(id) => Self::In(id),
            None => Self::Root,
        }
    }

    /// Whether the given attachment matches this scope.
    pub fn matches(&self, parent: Option<Uuid>) -> bool {
        match self {
            Self::Any => true,
            Self::Root => parent.is_none(),
            Self::In(id) => parent == Some(*id),
        }
    }
}

/// An inclusive creation-timestamp window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedRange {
    /// Inclusive lower bound.
    pub start: DateTime<Utc>,
    /// Inclusive upper bound.
    pub end: DateTime<Utc>,
}

impl CreatedRange {
    /// Whether the timestamp falls inside the window, bounds included.
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        at >= self.start && at <= self.end
    }
}

/// A composable entity-store query.
///
/// Every query is owner-scoped; the remaining constraints are optional.
/// `file_kind` only applies to file queries and is ignored by the folder
/// and note stores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityFilter {
    /// The owning user (always required).
    pub owner_id: Uuid,
    /// Parent/folder attachment constraint.
    pub parent: ParentScope,
    /// Favourite-flag constraint.
    pub favourite: Option<bool>,
    /// Creation-date window constraint.
    pub created_in: Option<CreatedRange>,
    /// File-kind constraint (file queries only).
    pub file_kind: Option<FileKind>,
    /// Restrict to this id set.
    pub ids: Option<Vec<Uuid>>,
}

impl EntityFilter {
    /// A filter matching everything the user owns.
    pub fn owned_by(owner_id: Uuid) -> Self {
        Self {
            owner_id,
            parent: ParentScope::Any,
            favourite: None,
            created_in: None,
            file_kind: None,
            ids: None,
        }
    }

    /// Constrain to a parent scope.
    pub fn in_scope(mut self, scope: ParentScope) -> Self {
        self.parent = scope;
        self
    }

    /// Constrain to a favourite flag value.
    pub fn favourite(mut self, value: bool) -> Self {
        self.favourite = Some(value);
        self
    }

    /// Constrain to a creation window.
    pub fn created_between(mut self, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        self.created_in = Some(CreatedRange { start, end });
        self
    }

    /// Constrain to a file kind.
    pub fn of_kind(mut self, kind: FileKind) -> Self {
        self.file_kind = Some(kind);
        self
    }

    /// Constrain to an id set.
    pub fn with_ids(mut self, ids: Vec<Uuid>) -> Self {
        self.ids = Some(ids);
        self
    }
}
