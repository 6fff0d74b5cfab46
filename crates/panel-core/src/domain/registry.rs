//! Generic id-indexed entity registry.
//!
//! Each board owns three registries — one per entity type — that provide
//! O(log n) lookup by id independently of the nested
//! board → compartment → module → switch ownership structure.  The registry
//! *owns* the entities; containers reference them by id only (arena
//! pattern).  A derived `Clone` of a registry is therefore already a full
//! deep copy.
//!
//! # Id generation
//!
//! Ids are handed out monotonically: an empty registry starts at the type's
//! first id (`s1`, `m1`, `c1`) and each insert advances `last_id`.  After
//! removing the entity with the maximum id, `last_id` is recomputed from the
//! remaining keys, so [`next_id`](Registry::next_id) always returns one above
//! the maximum id currently present.  Ids are unique among live entities at
//! all times.
//!
//! # Unknown ids
//!
//! Lookup of an unknown id returns `None`; the board layer converts that
//! into a typed error.  It is never silently treated as an empty result.

use std::collections::BTreeMap;

use crate::domain::id::EntityId;

/// Ties an entity type to its id type: every entity knows its own key.
pub trait Keyed<I: EntityId> {
    /// The entity's registry key.
    fn key(&self) -> I;
}

/// An id-keyed, id-ordered collection of entities with monotonic id
/// generation.
///
/// Iteration order is ascending id order.  Because ids are assigned
/// monotonically, this equals creation order and defines the deterministic
/// "registry order" the placement engine scans in.
#[derive(Debug, Clone, PartialEq)]
pub struct Registry<I: EntityId, T> {
    entries: BTreeMap<I, T>,
    last_id: Option<I>,
}

impl<I: EntityId, T: Keyed<I>> Registry<I, T> {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
            last_id: None,
        }
    }

    /// Returns the id the next inserted entity should carry, without
    /// consuming it.
    pub fn next_id(&self) -> I {
        match self.last_id {
            Some(last) => last.next(),
            None => I::FIRST,
        }
    }

    /// Inserts an entity under its own key and returns that key.
    ///
    /// The key is expected to be fresh (normally obtained from
    /// [`next_id`](Self::next_id)); inserting a duplicate key is a caller
    /// bug and debug-asserted.
    pub fn insert(&mut self, entity: T) -> I {
        let id = entity.key();
        debug_assert!(
            !self.entries.contains_key(&id),
            "duplicate registry id {id}"
        );
        if self.last_id.map_or(true, |last| id > last) {
            self.last_id = Some(id);
        }
        self.entries.insert(id, entity);
        id
    }

    /// Returns the entity with the given id, or `None` if it is not
    /// registered.
    pub fn get(&self, id: I) -> Option<&T> {
        self.entries.get(&id)
    }

    /// Mutable variant of [`get`](Self::get).
    pub fn get_mut(&mut self, id: I) -> Option<&mut T> {
        self.entries.get_mut(&id)
    }

    /// Returns `true` if an entity with the given id is registered.
    pub fn contains(&self, id: I) -> bool {
        self.entries.contains_key(&id)
    }

    /// Removes and returns the entity with the given id.
    ///
    /// When the removed id was the maximum, `last_id` is re-derived from the
    /// remaining keys so that [`next_id`](Self::next_id) stays one above the
    /// current maximum.
    pub fn remove(&mut self, id: I) -> Option<T> {
        let removed = self.entries.remove(&id)?;
        if self.last_id == Some(id) {
            self.last_id = self.entries.keys().next_back().copied();
        }
        Some(removed)
    }

    /// Removes every listed id, ignoring ids that are not present.
    ///
    /// Used by cascading deletes, where the caller has already collected the
    /// id list from the containers being torn down.  Returns the number of
    /// entities actually removed.
    pub fn remove_many(&mut self, ids: &[I]) -> usize {
        let mut removed = 0;
        for &id in ids {
            if self.remove(id).is_some() {
                removed += 1;
            }
        }
        removed
    }

    /// Number of registered entities.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no entities are registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates entities in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.entries.values()
    }

    /// Iterates ids in ascending order.
    pub fn ids(&self) -> impl Iterator<Item = I> + '_ {
        self.entries.keys().copied()
    }

    /// The id of the most recently inserted entity, or the maximum id still
    /// present after a removal.  `None` when the registry is empty.
    pub fn last_id(&self) -> Option<I> {
        self.last_id
    }
}

impl<I: EntityId, T: Keyed<I>> Default for Registry<I, T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::id::SwitchId;

    /// Minimal entity for registry tests.
    #[derive(Debug, Clone, PartialEq)]
    struct Probe {
        id: SwitchId,
        label: &'static str,
    }

    impl Keyed<SwitchId> for Probe {
        fn key(&self) -> SwitchId {
            self.id
        }
    }

    fn register(reg: &mut Registry<SwitchId, Probe>, label: &'static str) -> SwitchId {
        let id = reg.next_id();
        reg.insert(Probe { id, label })
    }

    #[test]
    fn test_next_id_on_empty_registry_is_first() {
        let reg: Registry<SwitchId, Probe> = Registry::new();
        assert_eq!(reg.next_id().to_string(), "s1");
    }

    #[test]
    fn test_next_id_after_ten_inserts_is_eleven() {
        let mut reg = Registry::new();
        for _ in 0..10 {
            register(&mut reg, "x");
        }
        assert_eq!(reg.next_id().to_string(), "s11");
    }

    #[test]
    fn test_next_id_after_removing_maximum_is_one_above_new_maximum() {
        let mut reg = Registry::new();
        let ids: Vec<_> = (0..5).map(|_| register(&mut reg, "x")).collect();

        // Removing s5 leaves s4 as the maximum; the next id is s5 again.
        reg.remove(ids[4]);
        assert_eq!(reg.last_id(), Some(ids[3]));
        assert_eq!(reg.next_id(), ids[4]);
    }

    #[test]
    fn test_next_id_unaffected_by_removing_non_maximum() {
        let mut reg = Registry::new();
        let ids: Vec<_> = (0..5).map(|_| register(&mut reg, "x")).collect();

        reg.remove(ids[1]);
        assert_eq!(reg.last_id(), Some(ids[4]));
        assert_eq!(reg.next_id().to_string(), "s6");
    }

    #[test]
    fn test_remove_returns_entity_and_shrinks_len() {
        let mut reg = Registry::new();
        let id = register(&mut reg, "a");
        register(&mut reg, "b");

        let removed = reg.remove(id);

        assert_eq!(removed.map(|p| p.label), Some("a"));
        assert_eq!(reg.len(), 1);
        assert!(!reg.contains(id));
    }

    #[test]
    fn test_remove_unknown_id_returns_none_without_side_effects() {
        let mut reg = Registry::new();
        register(&mut reg, "a");
        let before = reg.clone();

        assert!(reg.remove(SwitchId::from_index(99)).is_none());
        assert_eq!(reg, before);
    }

    #[test]
    fn test_remove_many_ignores_unknown_ids() {
        let mut reg = Registry::new();
        let a = register(&mut reg, "a");
        let b = register(&mut reg, "b");

        let removed = reg.remove_many(&[a, SwitchId::from_index(99), b]);

        assert_eq!(removed, 2);
        assert!(reg.is_empty());
    }

    #[test]
    fn test_iter_yields_entities_in_id_order() {
        let mut reg = Registry::new();
        register(&mut reg, "first");
        register(&mut reg, "second");
        register(&mut reg, "third");

        let labels: Vec<_> = reg.iter().map(|p| p.label).collect();
        assert_eq!(labels, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_clone_is_independent() {
        let mut reg = Registry::new();
        let id = register(&mut reg, "a");

        let mut copy = reg.clone();
        copy.remove(id);

        assert!(reg.contains(id), "removal from the clone must not affect the original");
        assert!(copy.is_empty());
    }
}
