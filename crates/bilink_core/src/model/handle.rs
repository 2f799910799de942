//! Typed entity handles.
//!
//! # Responsibility
//! - Identify one entity of a given type without owning it.
//! - Let relationship fields store references that never form ownership cycles.
//!
//! # Invariants
//! - A handle wraps a non-nil UUID; the nil UUID is never a valid handle.
//! - Handles are `Copy`, ordered and hashable independently of the entity type.
//! - Serialized form is the bare UUID string.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::error::Error;
use std::fmt::{self, Debug, Display, Formatter};
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use uuid::Uuid;

/// Validation errors for handle construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandleError {
    /// The nil UUID is reserved and cannot identify an entity.
    NilUuid,
}

impl Display for HandleError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::NilUuid => write!(f, "handle must not be the nil uuid"),
        }
    }
}

impl Error for HandleError {}

/// Stable identifier of one entity of type `E`.
///
/// The type parameter only tags the handle; it does not require `E` to
/// implement anything, so handles for any entity are `Copy + Eq + Ord + Hash`.
pub struct Handle<E> {
    uuid: Uuid,
    _entity: PhantomData<fn() -> E>,
}

impl<E> Handle<E> {
    /// Creates a handle with a freshly generated v4 UUID.
    pub fn new() -> Self {
        Self {
            uuid: Uuid::new_v4(),
            _entity: PhantomData,
        }
    }

    /// Creates a handle from a caller-provided UUID.
    ///
    /// Used by import paths where identity already exists externally.
    ///
    /// # Errors
    /// - Returns `HandleError::NilUuid` for `Uuid::nil()`.
    pub fn try_from_uuid(uuid: Uuid) -> Result<Self, HandleError> {
        if uuid.is_nil() {
            return Err(HandleError::NilUuid);
        }
        Ok(Self {
            uuid,
            _entity: PhantomData,
        })
    }

    /// Returns the underlying UUID.
    pub fn uuid(&self) -> Uuid {
        self.uuid
    }
}

impl<E> Default for Handle<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Clone for Handle<E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E> Copy for Handle<E> {}

impl<E> PartialEq for Handle<E> {
    fn eq(&self, other: &Self) -> bool {
        self.uuid == other.uuid
    }
}

impl<E> Eq for Handle<E> {}

impl<E> PartialOrd for Handle<E> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<E> Ord for Handle<E> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.uuid.cmp(&other.uuid)
    }
}

impl<E> Hash for Handle<E> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.uuid.hash(state);
    }
}

impl<E> Debug for Handle<E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Handle({})", self.uuid)
    }
}

impl<E> Display for Handle<E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.uuid)
    }
}

impl<E> Serialize for Handle<E> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.uuid.serialize(serializer)
    }
}

impl<'de, E> Deserialize<'de> for Handle<E> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let uuid = Uuid::deserialize(deserializer)?;
        Self::try_from_uuid(uuid).map_err(serde::de::Error::custom)
    }
}
