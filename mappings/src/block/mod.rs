pub(crate) mod init;
mod state;
mod state_hash;

pub use state::*;

use state_hash::StateHash;
use std::collections::HashMap;

/// A type alias for the numeric block state type, currently `u32`.
pub type StateID = u32;

/// Every block state of the catalog, indexed both by runtime ID and by name and properties.
///
/// Runtime IDs are the positions of the states in the catalog, so they are dense and start at zero.
pub struct BlockStateIndex {
    runtime_ids: HashMap<StateHash, StateID>,
    // The global palette, indexed by runtime ID
    states: Box<[BlockState]>,
    collisions: usize,
}

impl BlockStateIndex {
    /// Returns the runtime ID of the state with the given name and properties, in any order.
    pub fn runtime_id<'a, K, I>(&self, name: &str, properties: I) -> Option<StateID>
    where
        K: AsRef<str>,
        I: IntoIterator<Item = (K, &'a PropertyValue)>,
    {
        self.runtime_ids
            .get(&StateHash::new(name, properties))
            .copied()
    }

    /// Returns the state with the given runtime ID.
    #[inline]
    pub fn state(&self, id: StateID) -> Option<&BlockState> {
        self.states.get(id as usize)
    }

    /// Returns the number of states in the catalog.
    #[inline]
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Returns whether the catalog holds no states at all.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Returns how many states replaced an earlier state with the same name and property key. A
    /// replaced state keeps its runtime ID, but looking it up by name and properties finds the later one.
    #[inline]
    pub fn collisions(&self) -> usize {
        self.collisions
    }

    /// Returns an iterator over all states and their runtime IDs, in runtime ID order.
    pub fn iter(&self) -> impl Iterator<Item = (StateID, &BlockState)> + '_ {
        self.states
            .iter()
            .enumerate()
            .map(|(id, state)| (id as StateID, state))
    }
}
