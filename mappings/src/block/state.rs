use std::{
    collections::HashMap,
    error::Error,
    fmt::{self, Display, Formatter},
};
use tedac_nbt::{NbtCompound, NbtRepr, NbtReprError, NbtTag};

/// The property map of a block state. Its iteration order carries no meaning.
pub type Properties = HashMap<String, PropertyValue>;

/// The value of a single block state property.
///
/// The catalog only ever stores bytes, ints and strings. Booleans exist so callers can describe
/// bit properties naturally: `Bool(true)` is interchangeable with `Byte(1)` when looking up a runtime ID.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum PropertyValue {
    /// A boolean, stored as a byte of 0 or 1.
    Bool(bool),
    /// An unsigned byte.
    Byte(u8),
    /// A 32-bit signed integer.
    Int(i32),
    /// A string.
    String(String),
}

impl PropertyValue {
    /// Appends the canonical encoding of this value to the given key.
    pub(crate) fn encode_into(&self, key: &mut Vec<u8>) {
        match self {
            PropertyValue::Bool(value) => key.push(*value as u8),
            PropertyValue::Byte(value) => key.push(*value),
            PropertyValue::Int(value) => key.extend_from_slice(&value.to_le_bytes()),
            PropertyValue::String(value) => key.extend_from_slice(value.as_bytes()),
        }
    }
}

impl Display for PropertyValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            PropertyValue::Bool(value) => Display::fmt(value, f),
            PropertyValue::Byte(value) => Display::fmt(value, f),
            PropertyValue::Int(value) => Display::fmt(value, f),
            PropertyValue::String(value) => f.write_str(value),
        }
    }
}

impl From<bool> for PropertyValue {
    fn from(value: bool) -> Self {
        PropertyValue::Bool(value)
    }
}

impl From<u8> for PropertyValue {
    fn from(value: u8) -> Self {
        PropertyValue::Byte(value)
    }
}

impl From<i32> for PropertyValue {
    fn from(value: i32) -> Self {
        PropertyValue::Int(value)
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        PropertyValue::String(value)
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        PropertyValue::String(value.to_owned())
    }
}

impl From<&PropertyValue> for NbtTag {
    fn from(value: &PropertyValue) -> Self {
        match value {
            PropertyValue::Bool(value) => NbtTag::Byte(*value as i8),
            PropertyValue::Byte(value) => NbtTag::Byte(*value as i8),
            PropertyValue::Int(value) => NbtTag::Int(*value),
            PropertyValue::String(value) => NbtTag::String(value.clone()),
        }
    }
}

/// A block state property whose value has a type the catalog format does not allow.
///
/// Encountering one means the catalog was written with a different format than the one being read.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct UnsupportedPropertyError {
    /// The name of the block state holding the property.
    pub state: String,
    /// The name of the property.
    pub property: String,
    /// The tag type of the property's value.
    pub found: &'static str,
}

impl Display for UnsupportedPropertyError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Invalid block property type {} for property {} of {}",
            self.found, self.property, self.state
        )
    }
}

impl Error for UnsupportedPropertyError {}

/// A block name together with the properties selecting one of its variants, and the catalog version
/// the state was recorded in. The version is carried along but plays no part in identifying a state.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct BlockState {
    /// The namespaced name of the block, such as `minecraft:stone`.
    pub name: String,
    /// The properties of this state.
    pub properties: Properties,
    /// The version of the block state.
    pub version: i32,
}

impl BlockState {
    /// Creates a state with the given name, properties and version.
    pub fn new(name: impl Into<String>, properties: Properties, version: i32) -> Self {
        BlockState {
            name: name.into(),
            properties,
            version,
        }
    }

    /// Returns the value of the property with the given name.
    #[inline]
    pub fn property(&self, name: &str) -> Option<&PropertyValue> {
        self.properties.get(name)
    }
}

impl Display for BlockState {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;

        if !self.properties.is_empty() {
            let mut properties = self.properties.iter().collect::<Vec<_>>();
            properties.sort_by(|(a, _), (b, _)| a.cmp(b));

            write!(
                f,
                "[{}]",
                properties
                    .into_iter()
                    .map(|(property, value)| format!("{}={}", property, value))
                    .collect::<Vec<String>>()
                    .join(",")
            )?;
        }

        Ok(())
    }
}

impl NbtRepr for BlockState {
    type Error = NbtReprError<UnsupportedPropertyError>;

    fn from_nbt(nbt: &NbtCompound) -> Result<Self, Self::Error> {
        let name = nbt.try_get_string("name")?.to_owned();

        // Stateless blocks may leave the compound out entirely
        let properties = match nbt.get("states") {
            Some(_) => nbt
                .try_get_compound("states")?
                .iter()
                .map(|(property, tag)| {
                    let value = match tag {
                        NbtTag::Byte(value) => PropertyValue::Byte(*value as u8),
                        NbtTag::Int(value) => PropertyValue::Int(*value),
                        NbtTag::String(value) => PropertyValue::String(value.clone()),
                        other =>
                            return Err(NbtReprError::conversion(UnsupportedPropertyError {
                                state: name.clone(),
                                property: property.clone(),
                                found: other.type_name(),
                            })),
                    };

                    Ok((property.clone(), value))
                })
                .collect::<Result<Properties, _>>()?,
            None => Properties::new(),
        };

        let version = match nbt.get("version") {
            Some(_) => nbt.try_get_int("version")?,
            None => 0,
        };

        Ok(BlockState {
            name,
            properties,
            version,
        })
    }

    fn write_nbt(&self, nbt: &mut NbtCompound) {
        nbt.insert_string("name".to_owned(), self.name.clone());
        nbt.insert_compound(
            "states".to_owned(),
            self.properties
                .iter()
                .map(|(property, value)| (property.clone(), NbtTag::from(value)))
                .collect(),
        );
        nbt.insert_int("version".to_owned(), self.version);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tedac_nbt::NbtStructureError;

    fn door() -> BlockState {
        let mut properties = Properties::new();
        properties.insert("direction".to_owned(), PropertyValue::Int(3));
        properties.insert("door_hinge_bit".to_owned(), PropertyValue::Byte(0));
        properties.insert("open_bit".to_owned(), PropertyValue::Byte(1));
        properties.insert("minecraft:cardinal_direction".to_owned(), "north".into());
        BlockState::new("minecraft:wooden_door", properties, 18_100_737)
    }

    #[test]
    fn reads_back_its_own_nbt() {
        let state = door();
        assert_eq!(BlockState::from_nbt(&state.to_nbt()), Ok(state));
    }

    #[test]
    fn booleans_are_written_as_bytes() {
        let mut properties = Properties::new();
        properties.insert("open_bit".to_owned(), PropertyValue::Bool(true));
        let nbt = BlockState::new("minecraft:trapdoor", properties, 1).to_nbt();

        let states = nbt.get_compound("states").unwrap();
        assert_eq!(states.get_byte("open_bit"), Some(1));
    }

    #[test]
    fn missing_states_and_version_default() {
        let mut nbt = NbtCompound::new();
        nbt.insert_string("name".to_owned(), "minecraft:stone".to_owned());

        let state = BlockState::from_nbt(&nbt).unwrap();
        assert!(state.properties.is_empty());
        assert_eq!(state.version, 0);
    }

    #[test]
    fn missing_name_is_a_structure_error() {
        let error = BlockState::from_nbt(&NbtCompound::new()).unwrap_err();
        assert_eq!(
            error,
            NbtReprError::Structure(NbtStructureError::MissingTag("name".to_owned()))
        );
    }

    #[test]
    fn unsupported_property_type_is_rejected() {
        let mut states = NbtCompound::new();
        states.insert_long("age".to_owned(), 3);

        let mut nbt = NbtCompound::new();
        nbt.insert_string("name".to_owned(), "minecraft:wheat".to_owned());
        nbt.insert_compound("states".to_owned(), states);

        match BlockState::from_nbt(&nbt) {
            Err(NbtReprError::Conversion(error)) => {
                assert_eq!(error.state, "minecraft:wheat");
                assert_eq!(error.property, "age");
                assert_eq!(error.found, "TAG_Long");
            }
            other => panic!("Expected an unsupported property error, got {:?}", other),
        }
    }

    #[test]
    fn display_sorts_properties() {
        assert_eq!(
            door().to_string(),
            "minecraft:wooden_door[direction=3,door_hinge_bit=0,minecraft:cardinal_direction=north,open_bit=1]"
        );
        assert_eq!(
            BlockState::new("minecraft:stone", Properties::new(), 0).to_string(),
            "minecraft:stone"
        );
    }
}
