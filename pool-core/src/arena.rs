//! Generational storage for bodies.
//!
//! Bodies live in a [`SlotMap`] addressed by [`BodyHandle`]. Removing a body
//! bumps the slot's version, so a handle held by a constraint or a host never
//! aliases a different body that later reuses the slot.
//!
//! Iteration walks slots in index order, which keeps the pair sweep in the
//! world deterministic.

use slotmap::{new_key_type, Key, KeyData, SlotMap};

use crate::body::Body;

new_key_type! {
    /// Stable identity of a body registered with a world.
    pub struct BodyHandle;
}

impl BodyHandle {
    /// Pack into a single integer for hosts that cannot hold a struct.
    pub fn to_bits(&self) -> u64 {
        self.data().as_ffi()
    }

    pub fn from_bits(bits: u64) -> Self {
        KeyData::from_ffi(bits).into()
    }
}

/// Slot map owning every body in a world.
pub type BodyArena = SlotMap<BodyHandle, Body>;

/// Empty `map`, freeing the highest slot first.
///
/// The free list is LIFO, so later inserts reuse slots in ascending order and
/// a rebuilt table iterates exactly like a fresh one. Every old key goes
/// stale.
pub(crate) fn clear_in_slot_order<K: Key, V>(map: &mut SlotMap<K, V>) {
    let keys: Vec<K> = map.keys().collect();
    for key in keys.into_iter().rev() {
        map.remove(key);
    }
}

// =============================================================================
// Tests
// =============================================================================
