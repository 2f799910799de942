//! Opt-in, read-only symmetry verification.
//!
//! Endpoints never validate their resolvers. These helpers walk an existing
//! association and report the first member whose opposite end does not point
//! back at the owner, e.g. after a relationship field was mutated directly or
//! a resolver was wired to the wrong end.

use crate::association::{AssociationEndpoint, Member, OtherSide};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Symmetry violations found by `verify_symmetry`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SymmetryError {
    /// The member's entity is not present in the world.
    DanglingTarget { owner: String, target: String },
    /// The member exists but its opposite end does not contain the owner.
    MissingBackReference { owner: String, target: String },
}

impl Display for SymmetryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DanglingTarget { owner, target } => {
                write!(f, "owner {owner} references missing target {target}")
            }
            Self::MissingBackReference { owner, target } => write!(
                f,
                "target {target} does not reference owner {owner} back"
            ),
        }
    }
}

impl Error for SymmetryError {}

/// Verifies that every member of `endpoint` points back at `owner`.
///
/// # Errors
/// - `DanglingTarget` when a member's opposite endpoint is unbound.
/// - `MissingBackReference` when a member's opposite end lacks `owner`.
pub fn verify_symmetry<W, O, T, E>(
    world: &W,
    owner: O,
    endpoint: &E,
    other_side: &OtherSide<W, O, T>,
) -> Result<(), SymmetryError>
where
    O: Member + Display,
    T: Member + Display,
    E: AssociationEndpoint<W, T> + ?Sized,
{
    for target in endpoint.get_all(world) {
        let there = other_side.endpoint(target);
        if !there.is_bound(world) {
            return Err(SymmetryError::DanglingTarget {
                owner: owner.to_string(),
                target: target.to_string(),
            });
        }
        if !there.contains(world, owner) {
            return Err(SymmetryError::MissingBackReference {
                owner: owner.to_string(),
                target: target.to_string(),
            });
        }
    }
    Ok(())
}

/// Runs `verify_symmetry` for every owner, stopping at the first violation.
pub fn verify_registry<W, O, T, I, F>(
    world: &W,
    owners: I,
    endpoint_of: F,
    other_side: &OtherSide<W, O, T>,
) -> Result<(), SymmetryError>
where
    O: Member + Display,
    T: Member + Display,
    I: IntoIterator<Item = O>,
    F: Fn(O) -> Box<dyn AssociationEndpoint<W, T>>,
{
    for owner in owners {
        let endpoint = endpoint_of(owner);
        verify_symmetry(world, owner, &*endpoint, other_side)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{verify_registry, verify_symmetry, SymmetryError};
    use crate::association::to_many::ToMany;
    use crate::association::to_one::ToOne;
    use crate::association::{AssociationEndpoint, Field, OtherSide};
    use std::collections::{HashMap, HashSet};

    #[derive(Default)]
    struct Fleet {
        garages: HashMap<u32, HashSet<u32>>,
        cars: HashMap<u32, Option<u32>>,
    }

    fn garage_read(world: &Fleet, key: u32) -> Option<&HashSet<u32>> {
        world.garages.get(&key)
    }

    fn garage_write(world: &mut Fleet, key: u32) -> Option<&mut HashSet<u32>> {
        world.garages.get_mut(&key)
    }

    fn car_read(world: &Fleet, key: u32) -> Option<&Option<u32>> {
        world.cars.get(&key)
    }

    fn car_write(world: &mut Fleet, key: u32) -> Option<&mut Option<u32>> {
        world.cars.get_mut(&key)
    }

    fn garage_side() -> OtherSide<Fleet, u32, u32> {
        OtherSide::new(|car| Box::new(garage_of(car)))
    }

    fn cars_of(garage: u32) -> ToMany<Fleet, u32, u32> {
        ToMany::new(
            Field::new(garage_read, garage_write),
            garage,
            Some(OtherSide::new(|car| Box::new(garage_of(car)))),
        )
    }

    fn garage_of(car: u32) -> ToOne<Fleet, u32, u32> {
        ToOne::new(
            Field::new(car_read, car_write),
            car,
            Some(OtherSide::new(|garage| Box::new(cars_of(garage)))),
        )
    }

    fn fleet() -> Fleet {
        let mut world = Fleet::default();
        world.garages.insert(1, HashSet::new());
        world.garages.insert(2, HashSet::new());
        for car in 10..13 {
            world.cars.insert(car, None);
        }
        world
    }

    #[test]
    fn passes_after_endpoint_mutations() {
        let mut world = fleet();
        cars_of(1).add_all(&mut world, &[10, 11]);
        garage_of(12).add(&mut world, 2);
        garage_of(10).add(&mut world, 2);

        let result = verify_registry(
            &world,
            [1, 2],
            |garage| Box::new(cars_of(garage)),
            &garage_side(),
        );
        assert_eq!(result, Ok(()));
    }

    #[test]
    fn reports_field_mutated_behind_endpoint() {
        let mut world = fleet();
        cars_of(1).add(&mut world, 10);
        world.cars.insert(10, None);

        let err = verify_symmetry(&world, 1, &cars_of(1), &garage_side()).unwrap_err();
        assert_eq!(
            err,
            SymmetryError::MissingBackReference {
                owner: "1".to_string(),
                target: "10".to_string(),
            }
        );
    }

    #[test]
    fn reports_removed_target_as_dangling() {
        let mut world = fleet();
        cars_of(2).add(&mut world, 11);
        world.cars.remove(&11);

        let err = verify_symmetry(&world, 2, &cars_of(2), &garage_side()).unwrap_err();
        assert!(matches!(err, SymmetryError::DanglingTarget { .. }));
        assert!(err.to_string().contains("missing target 11"));
    }
}
