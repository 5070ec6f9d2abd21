//! Polymorphic entity types.
//!
//! Operations like favourite toggling and duplication act on "any entity";
//! the tagged [`Entity`] union and [`EntityKind`] dispatch tag replace the
//! per-kind branching those operations would otherwise need.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::file::File;
use crate::folder::Folder;
use crate::note::Note;

/// The entity kind tag as it appears on the wire.
///
/// `image` and `pdf` both address [`File`] records; the split exists so
/// callers can use the same tag vocabulary as file listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    /// An image file.
    Image,
    /// A PDF file.
    Pdf,
    /// A folder.
    Folder,
    /// A note.
    Note,
}

impl EntityKind {
    /// Whether this kind addresses a [`File`] record.
    pub fn is_file(&self) -> bool {
        matches!(self, Self::Image | Self::Pdf)
    }
}

impl std::str::FromStr for EntityKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "image" => Ok(Self::Image),
            "pdf" => Ok(Self::Pdf),
            "folder" => Ok(Self::Folder),
            "note" => Ok(Self::Note),
            _ => Err(()),
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Image => write!(f, "image"),
            Self::Pdf => write!(f, "pdf"),
            Self::Folder => write!(f, "folder"),
            Self::Note => write!(f, "note"),
        }
    }
}

/// An (id, kind) pair addressing one entity in a batch operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityRef {
    /// Entity id.
    pub id: Uuid,
    /// Entity kind tag.
    pub kind: EntityKind,
}

/// A tagged union over the three entity records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Entity {
    /// A file record.
    File(File),
    /// A folder record.
    Folder(Folder),
    /// A note record.
    Note(Note),
}

impl Entity {
    /// The entity's id.
    pub fn id(&self) -> Uuid {
        match self {
            Self::File(f) => f.id,
            Self::Folder(f) => f.id,
            Self::Note(n) => n.id,
        }
    }

    /// The entity's favourite flag.
    pub fn favourite(&self) -> bool {
        match self {
            Self::File(f) => f.favourite,
            Self::Folder(f) => f.favourite,
            Self::Note(n) => n.favourite,
        }
    }

    /// The entity's creation timestamp.
    pub fn created_at(&self) -> DateTime<Utc> {
        match self {
            Self::File(f) => f.created_at,
            Self::Folder(f) => f.created_at,
            Self::Note(n) => n.created_at,
        }
    }
}
