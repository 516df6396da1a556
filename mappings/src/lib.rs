#![deny(rust_2018_idioms)]
#![warn(missing_docs)]

//! Translates between the block states and items of the game and the compact runtime IDs the network
//! protocol refers to them by.
//!
//! The catalog consists of two buffers: a stream of block state compounds, whose position in the stream
//! is their runtime ID, and a single compound mapping item string IDs to item runtime IDs. Both are
//! decoded once into an immutable [`Mappings`] value which can then be queried from any thread.

/// Block states and the index mapping them to runtime IDs.
pub mod block;
/// The JSON configuration naming the catalog files and their layout.
pub mod config;
mod error;
mod hash;
/// The item index mapping item string IDs to runtime IDs.
pub mod item;
mod registry;

pub use block::{BlockState, BlockStateIndex, Properties, PropertyValue, StateID, UnsupportedPropertyError};
pub use config::{load_config, CatalogFormat, DecodePolicy, MappingsConfig};
pub use error::LoadError;
pub use item::{ItemID, ItemIndex};
pub use registry::Mappings;
pub use tedac_nbt::{Compression, Encoding};
