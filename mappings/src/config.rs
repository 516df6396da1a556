use crate::LoadError;
use log::info;
use serde::{Deserialize, Serialize};
use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};
use tedac_nbt::{Compression, Encoding};

/// What to do when the block state stream turns out to be corrupt part way through.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecodePolicy {
    /// Fail loading with the decode error.
    #[default]
    Strict,
    /// Keep the states decoded before the fault and log a warning. Property types outside the catalog
    /// format still fail loading.
    Tolerant,
}

/// How the catalog buffers are laid out.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogFormat {
    /// The NBT encoding of both buffers, defaults to the network little-endian encoding.
    pub encoding: Encoding,
    /// The compression wrapped around both buffers, defaults to none.
    pub compression: Compression,
    /// How to handle a corrupt block state stream, defaults to strict.
    pub decode_policy: DecodePolicy,
}

/// Where to find the catalog and how to read it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingsConfig {
    /// The block state stream, defaults to "block_states.nbt".
    #[serde(default = "MappingsConfig::default_block_states")]
    pub block_states: PathBuf,
    /// The item runtime ID table, defaults to "item_runtime_ids.nbt".
    #[serde(default = "MappingsConfig::default_item_runtime_ids")]
    pub item_runtime_ids: PathBuf,
    /// The layout shared by both files.
    #[serde(flatten)]
    pub format: CatalogFormat,
}

impl MappingsConfig {
    fn default_block_states() -> PathBuf {
        PathBuf::from("block_states.nbt")
    }

    fn default_item_runtime_ids() -> PathBuf {
        PathBuf::from("item_runtime_ids.nbt")
    }

    /// Returns a copy of this config with relative catalog paths resolved against the given directory.
    pub fn relative_to(&self, dir: &Path) -> Self {
        MappingsConfig {
            block_states: dir.join(&self.block_states),
            item_runtime_ids: dir.join(&self.item_runtime_ids),
            format: self.format,
        }
    }
}

// Instantiate a config with default values
impl Default for MappingsConfig {
    fn default() -> Self {
        MappingsConfig {
            block_states: Self::default_block_states(),
            item_runtime_ids: Self::default_item_runtime_ids(),
            format: CatalogFormat::default(),
        }
    }
}

/// Attempts to parse the mappings configuration at the given path. The config should be in JSON format.
///
/// If no file exists at the path, one is created holding the default configuration, which is returned.
pub fn load_config(path: &Path) -> Result<MappingsConfig, LoadError> {
    if path.exists() {
        let json = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    } else {
        info!("Config file not found, creating {}", path.display());
        use_default(path)
    }
}

fn use_default(path: &Path) -> Result<MappingsConfig, LoadError> {
    let default = MappingsConfig::default();

    let json = serde_json::to_string_pretty(&default)?;
    let mut file = File::create(path)?;
    file.write_all(json.as_bytes())?;

    Ok(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let config: MappingsConfig =
            serde_json::from_str(r#"{ "compression": "gzip", "decode_policy": "tolerant" }"#).unwrap();

        assert_eq!(config.block_states, PathBuf::from("block_states.nbt"));
        assert_eq!(config.format.encoding, Encoding::NetworkLittleEndian);
        assert_eq!(config.format.compression, Compression::Gzip);
        assert_eq!(config.format.decode_policy, DecodePolicy::Tolerant);
    }

    #[test]
    fn default_config_serializes_flat() {
        let json = serde_json::to_value(MappingsConfig::default()).unwrap();

        assert_eq!(json["encoding"], "network_little_endian");
        assert_eq!(json["compression"], "none");
        assert_eq!(json["decode_policy"], "strict");
        assert_eq!(json["item_runtime_ids"], "item_runtime_ids.nbt");
    }

    #[test]
    fn unknown_encoding_is_rejected() {
        let result = serde_json::from_str::<MappingsConfig>(r#"{ "encoding": "middle_endian" }"#);
        assert!(result.is_err());
    }
}
