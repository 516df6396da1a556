use super::{ItemID, ItemIndex};
use crate::{hash::NumHasher, LoadError};
use log::debug;
use std::{collections::HashMap, io::Read};
use tedac_nbt::{read_nbt, Encoding, NbtTag};

/// Reads the item table, a single compound mapping every item string ID to its runtime ID.
pub(crate) fn load_items<R: Read>(mut source: R, encoding: Encoding) -> Result<ItemIndex, LoadError> {
    let (table, _) = read_nbt(&mut source, encoding).map_err(LoadError::ItemTable)?;

    let mut runtime_ids = HashMap::with_capacity(table.len());
    let mut names = HashMap::with_capacity_and_hasher(table.len(), NumHasher);

    for (name, tag) in table {
        let id: ItemID = match tag {
            NbtTag::Int(id) => id,
            NbtTag::Short(id) => id.into(),
            NbtTag::Byte(id) => id.into(),
            other =>
                return Err(LoadError::InvalidItemEntry {
                    name,
                    found: other.type_name(),
                }),
        };

        names.insert(id, name.clone());
        runtime_ids.insert(name, id);
    }

    if names.len() != runtime_ids.len() {
        debug!(
            "{} item string IDs share {} runtime IDs",
            runtime_ids.len(),
            names.len()
        );
    }

    Ok(ItemIndex { runtime_ids, names })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tedac_nbt::{write_nbt, NbtCompound};

    fn table(entries: NbtCompound) -> Vec<u8> {
        let mut bytes = Vec::new();
        write_nbt(&mut bytes, Encoding::NetworkLittleEndian, "", &entries).unwrap();
        bytes
    }

    #[test]
    fn maps_both_directions() {
        let mut entries = NbtCompound::new();
        entries.insert_int("minecraft:stone".to_owned(), 1);
        entries.insert_int("minecraft:netherite_block".to_owned(), -270);
        entries.insert_short("minecraft:apple".to_owned(), 257);

        let items = load_items(table(entries).as_slice(), Encoding::NetworkLittleEndian).unwrap();

        assert_eq!(items.len(), 3);
        assert_eq!(items.runtime_id("minecraft:netherite_block"), Some(-270));
        assert_eq!(items.name(-270), Some("minecraft:netherite_block"));
        assert_eq!(items.runtime_id("minecraft:apple"), Some(257));
        assert_eq!(items.name(1), Some("minecraft:stone"));
        assert_eq!(items.runtime_id("minecraft:dirt"), None);
        assert_eq!(items.name(2), None);
    }

    #[test]
    fn non_integer_entry_is_fatal() {
        let mut entries = NbtCompound::new();
        entries.insert_string("minecraft:stone".to_owned(), "1".to_owned());

        match load_items(table(entries).as_slice(), Encoding::NetworkLittleEndian) {
            Err(LoadError::InvalidItemEntry { name, found }) => {
                assert_eq!(name, "minecraft:stone");
                assert_eq!(found, "TAG_String");
            }
            other => panic!("Expected an invalid entry error, got {:?}", other.map(|i| i.len())),
        }
    }

    #[test]
    fn malformed_table_is_fatal() {
        let mut bytes = table(NbtCompound::new());
        bytes[0] = 0x08;

        assert!(matches!(
            load_items(bytes.as_slice(), Encoding::NetworkLittleEndian),
            Err(LoadError::ItemTable(_))
        ));
        assert!(matches!(
            load_items(&[][..], Encoding::NetworkLittleEndian),
            Err(LoadError::ItemTable(_))
        ));
    }
}
