//! In-memory entity registry keyed by typed handles.

use crate::model::handle::Handle;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Registry insert/lookup errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    DuplicateHandle(Uuid),
    NotFound(Uuid),
}

impl Display for RegistryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateHandle(uuid) => write!(f, "handle already registered: {uuid}"),
            Self::NotFound(uuid) => write!(f, "entity not found: {uuid}"),
        }
    }
}

impl Error for RegistryError {}

/// Arena of entities of one type.
///
/// Iteration is ordered by handle so that exported graphs are deterministic.
pub struct Registry<E> {
    entities: BTreeMap<Handle<E>, E>,
}

impl<E> Default for Registry<E> {
    fn default() -> Self {
        Self {
            entities: BTreeMap::new(),
        }
    }
}

impl<E> Registry<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores one entity under a freshly generated handle.
    pub fn insert(&mut self, entity: E) -> Handle<E> {
        let handle = Handle::new();
        self.entities.insert(handle, entity);
        handle
    }

    /// Stores one entity under a caller-provided handle.
    pub fn insert_with_handle(
        &mut self,
        handle: Handle<E>,
        entity: E,
    ) -> Result<(), RegistryError> {
        if self.entities.contains_key(&handle) {
            return Err(RegistryError::DuplicateHandle(handle.uuid()));
        }
        self.entities.insert(handle, entity);
        Ok(())
    }

    pub fn get(&self, handle: Handle<E>) -> Option<&E> {
        self.entities.get(&handle)
    }

    pub fn get_mut(&mut self, handle: Handle<E>) -> Option<&mut E> {
        self.entities.get_mut(&handle)
    }

    /// Returns one entity or a `NotFound` error.
    pub fn try_get(&self, handle: Handle<E>) -> Result<&E, RegistryError> {
        self.get(handle)
            .ok_or(RegistryError::NotFound(handle.uuid()))
    }

    /// Removes one entity.
    ///
    /// Relationship fields elsewhere are not touched; callers detach the
    /// entity through its endpoints first.
    pub fn remove(&mut self, handle: Handle<E>) -> Option<E> {
        self.entities.remove(&handle)
    }

    pub fn contains(&self, handle: Handle<E>) -> bool {
        self.entities.contains_key(&handle)
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Returns sorted handles.
    pub fn handles(&self) -> Vec<Handle<E>> {
        self.entities.keys().copied().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Handle<E>, &E)> {
        self.entities.iter().map(|(handle, entity)| (*handle, entity))
    }
}

#[cfg(test)]
mod tests {
    use super::{Registry, RegistryError};
    use crate::model::handle::Handle;

    #[derive(Debug, PartialEq, Eq)]
    struct Label(&'static str);

    #[test]
    fn inserts_and_reads_back_entities() {
        let mut registry = Registry::new();
        let handle = registry.insert(Label("first"));
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get(handle), Some(&Label("first")));

        registry.get_mut(handle).expect("entity should exist").0 = "renamed";
        assert_eq!(registry.try_get(handle), Ok(&Label("renamed")));
    }

    #[test]
    fn rejects_duplicate_handle() {
        let mut registry = Registry::new();
        let handle = Handle::new();
        registry
            .insert_with_handle(handle, Label("first"))
            .expect("first insert should succeed");
        let duplicate = registry.insert_with_handle(handle, Label("second"));
        assert_eq!(duplicate, Err(RegistryError::DuplicateHandle(handle.uuid())));
        assert_eq!(registry.get(handle), Some(&Label("first")));
    }

    #[test]
    fn try_get_reports_missing_entity_after_remove() {
        let mut registry = Registry::new();
        let handle = registry.insert(Label("gone"));
        assert_eq!(registry.remove(handle), Some(Label("gone")));
        assert!(registry.is_empty());
        assert_eq!(
            registry.try_get(handle),
            Err(RegistryError::NotFound(handle.uuid()))
        );
    }

    #[test]
    fn handles_are_sorted() {
        let mut registry = Registry::new();
        for name in ["a", "b", "c", "d"] {
            registry.insert(Label(name));
        }
        let handles = registry.handles();
        let mut sorted = handles.clone();
        sorted.sort();
        assert_eq!(handles, sorted);
        assert_eq!(registry.iter().count(), 4);
    }
}
