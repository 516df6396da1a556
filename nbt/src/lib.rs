#![deny(rust_2018_idioms)]
#![warn(missing_docs)]

//! Provides support for encoding and decoding the game's NBT format in the little-endian network and
//! disk layouts as well as the classic big-endian layout. Streams may optionally be gzip or zlib
//! compressed, and back-to-back root compounds can be decoded lazily with [`NbtDecoder`].

mod encoding;
mod repr;
mod tag;

/// Contains utilities for reading NBT data.
pub mod read;
/// Contains utilities for writing NBT data.
pub mod write;

pub use encoding::{Compression, Encoding};
pub use read::{read_nbt, read_nbt_compressed, NbtDecoder};
pub use repr::{NbtRepr, NbtReprError, NbtStructureError};
pub use tag::{NbtCompound, NbtList, NbtTag};
pub use write::{write_nbt, write_nbt_compressed};
