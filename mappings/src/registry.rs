use crate::{
    block::{self, BlockState, BlockStateIndex, PropertyValue, StateID},
    config::{CatalogFormat, MappingsConfig},
    item::{self, ItemID, ItemIndex},
    LoadError,
};
use log::{debug, info};
use static_assertions::assert_impl_all;
use std::fs;

/// The block state and item mappings of one catalog.
///
/// A `Mappings` is fully built by the time a constructor returns and never changes afterwards, so it
/// can be shared between threads behind an `Arc` and queried without any locking.
pub struct Mappings {
    block_states: BlockStateIndex,
    items: ItemIndex,
}

assert_impl_all!(Mappings: Send, Sync);

impl Mappings {
    /// Reads the catalog files named in the given config.
    pub fn load(config: &MappingsConfig) -> Result<Self, LoadError> {
        debug!(
            "Reading catalog from {} and {}",
            config.item_runtime_ids.display(),
            config.block_states.display()
        );

        let items = fs::read(&config.item_runtime_ids)?;
        let block_states = fs::read(&config.block_states)?;
        Self::from_bytes(&items, &block_states, &config.format)
    }

    /// Builds the mappings from an item table and a block state stream held in memory.
    pub fn from_bytes(
        item_data: &[u8],
        block_state_data: &[u8],
        format: &CatalogFormat,
    ) -> Result<Self, LoadError> {
        info!("Loading item runtime IDs");
        let items = item::init::load_items(format.compression.reader(item_data), format.encoding)?;

        info!("Loading block states");
        let block_states = block::init::load_block_states(
            format.compression.reader(block_state_data),
            format.encoding,
            format.decode_policy,
        )?;

        info!(
            "Loaded {} block states and {} items",
            block_states.len(),
            items.len()
        );

        Ok(Mappings {
            block_states,
            items,
        })
    }

    /// Converts a block name and its state properties to a runtime ID. The properties may be given in any
    /// order.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use tedac_mappings::{Mappings, MappingsConfig, PropertyValue};
    /// # let mappings = Mappings::load(&MappingsConfig::default()).unwrap();
    /// let properties = [
    ///     ("open_bit", PropertyValue::Bool(true)),
    ///     ("direction", PropertyValue::Int(2)),
    /// ];
    /// let id = mappings.state_to_runtime_id(
    ///     "minecraft:trapdoor",
    ///     properties.iter().map(|(name, value)| (name, value)),
    /// );
    /// ```
    pub fn state_to_runtime_id<'a, K, I>(&self, name: &str, properties: I) -> Option<StateID>
    where
        K: AsRef<str>,
        I: IntoIterator<Item = (K, &'a PropertyValue)>,
    {
        self.block_states.runtime_id(name, properties)
    }

    /// Converts a runtime ID to the block state it was assigned to.
    #[inline]
    pub fn runtime_id_to_state(&self, runtime_id: StateID) -> Option<&BlockState> {
        self.block_states.state(runtime_id)
    }

    /// Converts an item runtime ID to its string ID.
    #[inline]
    pub fn item_runtime_id_to_name(&self, runtime_id: ItemID) -> Option<&str> {
        self.items.name(runtime_id)
    }

    /// Converts an item string ID to its runtime ID.
    #[inline]
    pub fn item_name_to_runtime_id(&self, name: &str) -> Option<ItemID> {
        self.items.runtime_id(name)
    }

    /// Returns the number of block states, which is also one past the highest state runtime ID.
    #[inline]
    pub fn state_count(&self) -> usize {
        self.block_states.len()
    }

    /// Returns the number of item string IDs.
    #[inline]
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Returns an iterator over all block states and their runtime IDs, in runtime ID order.
    pub fn states(&self) -> impl Iterator<Item = (StateID, &BlockState)> + '_ {
        self.block_states.iter()
    }

    /// Returns an iterator over all item string IDs and their runtime IDs in arbitrary order.
    pub fn items(&self) -> impl Iterator<Item = (&str, ItemID)> + '_ {
        self.items.iter()
    }

    /// Returns the block state index.
    #[inline]
    pub fn block_states(&self) -> &BlockStateIndex {
        &self.block_states
    }

    /// Returns the item index.
    #[inline]
    pub fn item_index(&self) -> &ItemIndex {
        &self.items
    }
}
