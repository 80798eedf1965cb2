//! Reference-counted registry of ancestors whose clipping is disabled.
//!
//! A zoomed element usually overflows its ancestors. Any ancestor that clips
//! its overflow gets `overflow: visible` while at least one target beneath it
//! is zoomed, and its original inline value back once the last one closes.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use core::fmt;
use core::hash::Hash;

use crate::host::{Element, TargetId};

/// Overflow value applied to clipping ancestors.
pub const UNCLIPPED: &str = "visible";

#[derive(Clone, Debug)]
struct Held {
    holders: usize,
    original: String,
}

/// Tracks which ancestors are unclipped and by how many targets.
#[derive(Clone, Debug)]
pub struct ClipRegistry<A> {
    held: HashMap<A, Held>,
    owners: HashMap<TargetId, Vec<A>>,
}

impl<A> Default for ClipRegistry<A> {
    fn default() -> Self {
        Self {
            held: HashMap::new(),
            owners: HashMap::new(),
        }
    }
}

impl<A: Clone + Eq + Hash + fmt::Debug> ClipRegistry<A> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Unclip every clipping ancestor of `el` on behalf of `owner`.
    ///
    /// Ancestors already unclipped by another owner gain a holder instead of
    /// being re-read, so their recorded original stays the pre-zoom value.
    /// Repeated calls by the same owner are no-ops.
    pub fn disable<E>(&mut self, owner: TargetId, el: &mut E)
    where
        E: Element<Ancestor = A>,
    {
        if self.owners.contains_key(&owner) {
            return;
        }

        let mut taken = Vec::new();
        for ancestor in el.ancestors() {
            match self.held.entry(ancestor.clone()) {
                Entry::Occupied(mut e) => e.get_mut().holders += 1,
                Entry::Vacant(e) => {
                    if !el.clips(&ancestor) {
                        continue;
                    }
                    let original = el.ancestor_overflow(&ancestor);
                    el.set_ancestor_overflow(&ancestor, UNCLIPPED);
                    log::trace!("unclipped ancestor {ancestor:?} (was {original:?})");
                    e.insert(Held {
                        holders: 1,
                        original,
                    });
                }
            }
            taken.push(ancestor);
        }
        self.owners.insert(owner, taken);
    }

    /// Release every ancestor `owner` holds, restoring the original overflow
    /// of those no other owner still holds. No-op if `owner` holds nothing.
    pub fn enable<E>(&mut self, owner: TargetId, el: &mut E)
    where
        E: Element<Ancestor = A>,
    {
        let Some(taken) = self.owners.remove(&owner) else {
            return;
        };
        for ancestor in taken {
            let Entry::Occupied(mut e) = self.held.entry(ancestor) else {
                continue;
            };
            e.get_mut().holders -= 1;
            if e.get().holders == 0 {
                let (ancestor, held) = e.remove_entry();
                el.set_ancestor_overflow(&ancestor, &held.original);
                log::trace!("restored ancestor {ancestor:?} to {:?}", held.original);
            }
        }
    }

    /// Number of owners holding `ancestor` unclipped.
    pub fn holders(&self, ancestor: &A) -> usize {
        self.held.get(ancestor).map_or(0, |h| h.holders)
    }

    /// Whether `owner` currently holds any ancestors.
    pub fn is_holding(&self, owner: TargetId) -> bool {
        self.owners.contains_key(&owner)
    }

    pub fn is_empty(&self) -> bool {
        self.held.is_empty()
    }
}
