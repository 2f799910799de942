//! Bidirectional association endpoints.
//!
//! # Responsibility
//! - Define the uniform endpoint contract shared by to-one and to-many ends.
//! - Keep both ends of a relationship consistent by updating the opposite
//!   end through an `OtherSide` resolver.
//!
//! # Invariants
//! - After every mutating call, if `b` is reachable from `a` through an end
//!   with a resolver, `a` is reachable from `b` through the opposite end.
//! - A to-many end never holds the same member twice.
//! - Re-adding a present member or removing an absent one is a no-op.
//! - Members whose entity is missing from the world are never stored when a
//!   resolver is configured.
//!
//! Endpoints never fail: invalid input is ignored, not reported. Resolvers
//! that do not point back at the owner type are a caller error and are not
//! detected here; `check` offers an opt-in read-only verification.

pub mod check;
pub mod to_many;
pub mod to_one;

use std::fmt::Debug;
use std::hash::Hash;
use std::rc::Rc;

/// Values that can be stored at an association end.
///
/// Blanket-implemented; in practice these are `Handle<E>` values.
pub trait Member: Copy + Eq + Hash + Debug + 'static {}

impl<T> Member for T where T: Copy + Eq + Hash + Debug + 'static {}

/// Uniform access to one end of an association.
///
/// `W` is the caller's world holding every entity; reads borrow it shared,
/// writes borrow it mutably so one call can update both ends.
pub trait AssociationEndpoint<W, T: Member> {
    /// Associates `other` with the owner, and the owner with `other` when a
    /// resolver is configured.
    fn add(&self, world: &mut W, other: T);

    /// Adds each member in order. A to-one end applies only the first one.
    fn add_all(&self, world: &mut W, others: &[T]);

    /// Dissociates `other` from the owner on both ends.
    fn remove(&self, world: &mut W, other: T);

    /// Returns an arbitrary associated member.
    fn get_one(&self, world: &W) -> Option<T>;

    /// Returns a snapshot of all associated members.
    ///
    /// The returned vector is owned by the caller; changing it has no effect
    /// on the association.
    fn get_all(&self, world: &W) -> Vec<T>;

    /// Dissociates every member, updating each opposite end.
    fn remove_all(&self, world: &mut W);

    /// Returns whether the owner is present in `world`.
    fn is_bound(&self, world: &W) -> bool;

    fn contains(&self, world: &W, other: T) -> bool {
        self.get_all(world).contains(&other)
    }

    fn len(&self, world: &W) -> usize {
        self.get_all(world).len()
    }

    fn is_empty(&self, world: &W) -> bool {
        self.len(world) == 0
    }

    /// Iterator flavour of `add_all`.
    fn extend<I>(&self, world: &mut W, others: I)
    where
        Self: Sized,
        I: IntoIterator<Item = T>,
    {
        let others = others.into_iter().collect::<Vec<_>>();
        self.add_all(world, &others);
    }
}

/// Read and write access to one relationship field of an owner.
///
/// Both accessors return `None` when the owner is not present in the world.
pub struct Field<W, O, F> {
    read: fn(&W, O) -> Option<&F>,
    write: fn(&mut W, O) -> Option<&mut F>,
}

impl<W, O, F> Field<W, O, F> {
    pub fn new(read: fn(&W, O) -> Option<&F>, write: fn(&mut W, O) -> Option<&mut F>) -> Self {
        Self { read, write }
    }

    pub fn read<'w>(&self, world: &'w W, owner: O) -> Option<&'w F> {
        (self.read)(world, owner)
    }

    pub fn write<'w>(&self, world: &'w mut W, owner: O) -> Option<&'w mut F> {
        (self.write)(world, owner)
    }
}

impl<W, O, F> Clone for Field<W, O, F> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<W, O, F> Copy for Field<W, O, F> {}

/// Resolver from a target to that target's own endpoint back toward `O`.
pub struct OtherSide<W, O: Member, T> {
    resolve: Rc<dyn Fn(T) -> Box<dyn AssociationEndpoint<W, O>>>,
}

impl<W, O: Member, T> OtherSide<W, O, T> {
    pub fn new<R>(resolve: R) -> Self
    where
        R: Fn(T) -> Box<dyn AssociationEndpoint<W, O>> + 'static,
    {
        Self {
            resolve: Rc::new(resolve),
        }
    }

    /// Builds the opposite endpoint owned by `target`.
    pub fn endpoint(&self, target: T) -> Box<dyn AssociationEndpoint<W, O>> {
        (self.resolve)(target)
    }
}

impl<W, O: Member, T> Clone for OtherSide<W, O, T> {
    fn clone(&self) -> Self {
        Self {
            resolve: Rc::clone(&self.resolve),
        }
    }
}
