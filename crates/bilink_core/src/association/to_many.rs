//! Multi-valued association end.

use crate::association::{AssociationEndpoint, Field, Member, OtherSide};
use log::{debug, trace};
use std::collections::HashSet;

/// Endpoint over a `HashSet<T>` field of owner `O`.
pub struct ToMany<W, O: Member, T> {
    field: Field<W, O, HashSet<T>>,
    owner: O,
    other_side: Option<OtherSide<W, O, T>>,
}

impl<W, O: Member, T: Member> ToMany<W, O, T> {
    /// Creates the accessor for one to-many end.
    ///
    /// `other_side` is `None` for unidirectional associations.
    pub fn new(
        field: Field<W, O, HashSet<T>>,
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
}

impl<W, O: Member, T: Member> Clone for ToMany<W, O, T> {
    fn clone(&self) -> Self {
        Self {
            field: self.field,
            owner: self.owner,
            other_side: self.other_side.clone(),
        }
    }
}

impl<W, O: Member, T: Member> AssociationEndpoint<W, T> for ToMany<W, O, T> {
    fn add(&self, world: &mut W, other: T) {
        match self.field.read(world, self.owner) {
            None => {
                debug!(
                    "event=association_add module=association status=skipped arity=to_many reason=unbound_owner owner={:?}",
                    self.owner
                );
                return;
            }
            Some(members) if members.contains(&other) => return,
            Some(_) => {}
        }

        let there = match &self.other_side {
            Some(other_side) => {
                let there = other_side.endpoint(other);
                if !there.is_bound(world) {
                    debug!(
                        "event=association_add module=association status=skipped arity=to_many reason=unbound_target target={:?}",
                        other
                    );
                    return;
                }
                Some(there)
            }
            None => None,
        };

        if let Some(members) = self.field.write(world, self.owner) {
            members.insert(other);
        }
        if let Some(there) = there {
            there.add(world, self.owner);
        }
        trace!(
            "event=association_add module=association status=ok arity=to_many owner={:?} target={:?}",
            self.owner,
            other
        );
    }

    fn add_all(&self, world: &mut W, others: &[T]) {
        for other in others {
            self.add(world, *other);
        }
    }

    fn remove(&self, world: &mut W, other: T) {
        let removed = self
            .field
            .write(world, self.owner)
            .is_some_and(|members| members.remove(&other));
        if !removed {
            return;
        }
        if let Some(other_side) = &self.other_side {
            other_side.endpoint(other).remove(world, self.owner);
        }
        trace!(
            "event=association_remove module=association status=ok arity=to_many owner={:?} target={:?}",
            self.owner,
            other
        );
    }

    fn get_one(&self, world: &W) -> Option<T> {
        self.field
            .read(world, self.owner)
            .and_then(|members| members.iter().next().copied())
    }

    fn get_all(&self, world: &W) -> Vec<T> {
        self.field
            .read(world, self.owner)
            .map(|members| members.iter().copied().collect())
            .unwrap_or_default()
    }

    fn remove_all(&self, world: &mut W) {
        // Detach the whole set before touching opposite ends; they call back
        // into `remove` on this end.
        let former = match self.field.write(world, self.owner) {
            Some(members) => std::mem::take(members),
            None => return,
        };
        if let Some(other_side) = &self.other_side {
            for other in &former {
                other_side.endpoint(*other).remove(world, self.owner);
            }
        }
        trace!(
            "event=association_remove_all module=association status=ok arity=to_many owner={:?} count={}",
            self.owner,
            former.len()
        );
    }

    fn is_bound(&self, world: &W) -> bool {
        self.field.read(world, self.owner).is_some()
    }

    fn contains(&self, world: &W, other: T) -> bool {
        self.field
            .read(world, self.owner)
            .is_some_and(|members| members.contains(&other))
    }

    fn len(&self, world: &W) -> usize {
        self.field
            .read(world, self.owner)
            .map_or(0, HashSet::len)
    }
}
