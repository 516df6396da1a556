use crate::block::UnsupportedPropertyError;
use std::{
    error::Error,
    fmt::{self, Display, Formatter},
    io::Error as IoError,
};
use tedac_nbt::NbtReprError;

/// A fatal problem encountered while loading the catalog. Any of these leaves the mappings unusable.
#[derive(Debug)]
pub enum LoadError {
    /// A catalog or config file could not be read or written.
    StdIo(IoError),
    /// The config file is not valid JSON for [`MappingsConfig`](crate::MappingsConfig).
    Config(serde_json::Error),
    /// The item table could not be decoded.
    ItemTable(IoError),
    /// An item table entry is not an integer.
    InvalidItemEntry {
        /// The item's string ID.
        name: String,
        /// The tag type found in place of an integer.
        found: &'static str,
    },
    /// The block state stream is corrupt at the given record.
    StateRecord {
        /// The zero-based position of the record in the stream.
        index: usize,
        /// The underlying decode fault.
        source: IoError,
    },
    /// A block state record decoded, but does not describe a valid state.
    InvalidState {
        /// The zero-based position of the record in the stream.
        index: usize,
        /// What is wrong with the record.
        source: NbtReprError<UnsupportedPropertyError>,
    },
    /// The stream holds more states than runtime IDs can address.
    TooManyStates,
}

impl Display for LoadError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::StdIo(error) => Display::fmt(error, f),
            LoadError::Config(error) => write!(f, "Invalid config JSON: {}", error),
            LoadError::ItemTable(error) => write!(f, "Malformed item table: {}", error),
            LoadError::InvalidItemEntry { name, found } =>
                write!(f, "Item {} has a runtime ID of type {}, expected an integer", name, found),
            LoadError::StateRecord { index, source } =>
                write!(f, "Corrupt block state record {}: {}", index, source),
            LoadError::InvalidState { index, source } =>
                write!(f, "Invalid block state record {}: {}", index, source),
            LoadError::TooManyStates => write!(f, "Block state count exceeds the runtime ID range"),
        }
    }
}

impl Error for LoadError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            LoadError::StdIo(error) => Some(error),
            LoadError::Config(error) => Some(error),
            LoadError::ItemTable(error) => Some(error),
            LoadError::StateRecord { source, .. } => Some(source),
            LoadError::InvalidState { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<IoError> for LoadError {
    fn from(x: IoError) -> Self {
        LoadError::StdIo(x)
    }
}

impl From<serde_json::Error> for LoadError {
    fn from(x: serde_json::Error) -> Self {
        LoadError::Config(x)
    }
}
