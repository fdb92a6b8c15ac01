use std::collections::{BTreeMap, BTreeSet};

use crate::domain::schema::Entity;

/// Outcome of pairing two ordered entity collections by id.
#[derive(Debug)]
pub struct Matched<'a, T> {
    /// New-side entities with no old counterpart, in new order.
    pub created: Vec<&'a T>,
    /// `(old, new)` pairs sharing an id whose values differ, in new order.
    pub changed: Vec<(&'a T, &'a T)>,
    /// Old-side entities with no new counterpart, in old order.
    pub deleted: Vec<&'a T>,
}

/// Pair `old` and `new` by id.
///
/// `unchanged` decides whether two entities sharing an id are equal; equal
/// pairs are dropped. Ids are expected to be unique per collection; should a
/// duplicate slip through, the first occurrence on the old side wins.
pub fn match_entities<'a, T, F>(old: &'a [T], new: &'a [T], unchanged: F) -> Matched<'a, T>
where
    T: Entity,
    F: Fn(&T, &T) -> bool,
{
    let mut old_index: BTreeMap<&str, &T> = BTreeMap::new();
    for entity in old {
        old_index.entry(entity.id()).or_insert(entity);
    }
    let new_ids: BTreeSet<&str> = new.iter().map(|entity| entity.id()).collect();

    let mut created = Vec::new();
    let mut changed = Vec::new();
    for entity in new {
        match old_index.get(entity.id()) {
            None => created.push(entity),
            Some(&previous) if !unchanged(previous, entity) => changed.push((previous, entity)),
            Some(_) => {}
        }
    }

    let deleted = old
        .iter()
        .filter(|entity| !new_ids.contains(entity.id()))
        .collect();

    Matched {
        created,
        changed,
        deleted,
    }
}
