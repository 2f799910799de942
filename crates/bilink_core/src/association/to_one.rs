//! Single-valued association end.

use crate::association::{AssociationEndpoint, Field, Member, OtherSide};
use log::{debug, trace};

/// Endpoint over an `Option<T>` field of owner `O`.
pub struct ToOne<W, O: Member, T> {
    field: Field<W, O, Option<T>>,
    owner: O,
    other_side: Option<OtherSide<W, O, T>>,
}

impl<W, O: Member, T: Member> ToOne<W, O, T> {
    /// Creates the accessor for one to-one end.
    ///
    /// `other_side` is `None` for unidirectional associations.
    pub fn new(
        field: Field<W, O, Option<T>>,
        owner: O,
        other_side: Option<OtherSide<W, O, T>>,
    ) -> Self {
        Self {
            field,
            owner,
            other_side,
        }
    }

    pub fn owner(&self) -> O {
        self.owner
    }

    fn set(&self, world: &mut W, value: Option<T>) {
        if let Some(slot) = self.field.write(world, self.owner) {
            *slot = value;
        }
    }
}

impl<W, O: Member, T: Member> Clone for ToOne<W, O, T> {
    fn clone(&self) -> Self {
        Self {
            field: self.field,
            owner: self.owner,
            other_side: self.other_side.clone(),
        }
    }
}

impl<W, O: Member, T: Member> AssociationEndpoint<W, T> for ToOne<W, O, T> {
    fn add(&self, world: &mut W, other: T) {
        if !self.is_bound(world) {
            debug!(
                "event=association_add module=association status=skipped arity=to_one reason=unbound_owner owner={:?}",
                self.owner
            );
            return;
        }
        let current = self.get_one(world);
        if current == Some(other) {
            return;
        }

        let Some(other_side) = &self.other_side else {
            self.set(world, Some(other));
            return;
        };

        let there = other_side.endpoint(other);
        if !there.is_bound(world) {
            debug!(
                "event=association_add module=association status=skipped arity=to_one reason=unbound_target target={:?}",
                other
            );
            return;
        }

        // Own side must hold the new value before either opposite end runs.
        self.set(world, Some(other));
        if let Some(previous) = current {
            other_side.endpoint(previous).remove(world, self.owner);
        }
        there.add(world, self.owner);
        trace!(
            "event=association_add module=association status=ok arity=to_one owner={:?} target={:?}",
            self.owner,
            other
        );
    }

    fn add_all(&self, world: &mut W, others: &[T]) {
        if let Some(first) = others.first() {
            self.add(world, *first);
        }
    }

    fn remove(&self, world: &mut W, other: T) {
        if self.get_one(world) != Some(other) {
            return;
        }
        self.set(world, None);
        if let Some(other_side) = &self.other_side {
            other_side.endpoint(other).remove(world, self.owner);
        }
        trace!(
            "event=association_remove module=association status=ok arity=to_one owner={:?} target={:?}",
            self.owner,
            other
        );
    }

    fn get_one(&self, world: &W) -> Option<T> {
        self.field.read(world, self.owner).copied().flatten()
    }

    fn get_all(&self, world: &W) -> Vec<T> {
        self.get_one(world).into_iter().collect()
    }

    fn remove_all(&self, world: &mut W) {
        if let Some(current) = self.get_one(world) {
            self.remove(world, current);
        }
    }

    fn is_bound(&self, world: &W) -> bool {
        self.field.read(world, self.owner).is_some()
    }

    fn contains(&self, world: &W, other: T) -> bool {
        self.get_one(world) == Some(other)
    }
}
