use crate::{NbtCompound, NbtTag};
use std::{
    error::Error,
    fmt::{self, Display, Formatter},
};

/// A compound did not have the shape a typed record expected.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum NbtStructureError {
    /// A tag was present but held the wrong type.
    TypeMismatch {
        /// The name of the offending tag.
        name: String,
        /// The type that was expected.
        expected: &'static str,
        /// The type that was found.
        found: &'static str,
    },
    /// A tag in a [`NbtCompound`](crate::NbtCompound) was absent.
    MissingTag(String),
}

impl NbtStructureError {
    /// Creates a [`TypeMismatch`](NbtStructureError::TypeMismatch) for the tag with the given name.
    pub fn type_mismatch(name: &str, expected: &'static str, found: &NbtTag) -> Self {
        NbtStructureError::TypeMismatch {
            name: name.to_owned(),
            expected,
            found: found.type_name(),
        }
    }
}

impl Display for NbtStructureError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            NbtStructureError::TypeMismatch {
                name,
                expected,
                found,
            } => write!(f, "Expected {} for tag \"{}\", found {}", expected, name, found),
            NbtStructureError::MissingTag(name) => write!(f, "Missing tag \"{}\"", name),
        }
    }
}

impl Error for NbtStructureError {}

/// Why a compound could not be turned into a typed record: either its shape was wrong, or a value
/// failed the record's own validation.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum NbtReprError<E> {
    /// The compound has the wrong shape.
    Structure(NbtStructureError),
    /// A value was rejected by the record type.
    Conversion(E),
}

impl<E> NbtReprError<E> {
    /// Wraps a record-specific error.
    pub fn conversion(error: E) -> Self {
        NbtReprError::Conversion(error)
    }
}

impl<E: Display> Display for NbtReprError<E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            NbtReprError::Structure(error) => Display::fmt(error, f),
            NbtReprError::Conversion(error) => Display::fmt(error, f),
        }
    }
}

impl<E: Error + 'static> Error for NbtReprError<E> {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            NbtReprError::Structure(source) => Some(source),
            NbtReprError::Conversion(source) => Some(source),
        }
    }
}

impl<E> From<NbtStructureError> for NbtReprError<E> {
    fn from(error: NbtStructureError) -> Self {
        NbtReprError::Structure(error)
    }
}

/// A type stored as a single [`NbtCompound`], readable from and writable to one without loss.
pub trait NbtRepr: Sized {
    /// The error type returned if the [`from_nbt`](NbtRepr::from_nbt) function fails.
    type Error;

    /// Reads a value out of the given compound, which is left untouched.
    fn from_nbt(nbt: &NbtCompound) -> Result<Self, Self::Error>;

    /// Writes this value into the given compound such that [`from_nbt`](NbtRepr::from_nbt) reads back an
    /// equal value.
    fn write_nbt(&self, nbt: &mut NbtCompound);

    /// Converts this type into an owned [`NbtCompound`].
    #[inline]
    fn to_nbt(&self) -> NbtCompound {
        let mut nbt = NbtCompound::new();
        self.write_nbt(&mut nbt);
        nbt
    }
}

// Structured accessors for NbtRepr implementations
impl NbtCompound {
    /// Returns the tag with the given name, or a [`MissingTag`](NbtStructureError::MissingTag) error.
    pub fn try_get(&self, name: &str) -> Result<&NbtTag, NbtStructureError> {
        self.get(name)
            .ok_or_else(|| NbtStructureError::MissingTag(name.to_owned()))
    }

    /// Returns the string tag with the given name, failing if it is absent or of another type.
    pub fn try_get_string(&self, name: &str) -> Result<&str, NbtStructureError> {
        match self.try_get(name)? {
            NbtTag::String(value) => Ok(value),
            other => Err(NbtStructureError::type_mismatch(name, "TAG_String", other)),
        }
    }

    /// Returns the int tag with the given name, failing if it is absent or of another type.
    pub fn try_get_int(&self, name: &str) -> Result<i32, NbtStructureError> {
        match self.try_get(name)? {
            NbtTag::Int(value) => Ok(*value),
            other => Err(NbtStructureError::type_mismatch(name, "TAG_Int", other)),
        }
    }

    /// Returns the compound tag with the given name, failing if it is absent or of another type.
    pub fn try_get_compound(&self, name: &str) -> Result<&NbtCompound, NbtStructureError> {
        match self.try_get(name)? {
            NbtTag::Compound(value) => Ok(value),
            other => Err(NbtStructureError::type_mismatch(name, "TAG_Compound", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn structured_accessors_report_context() {
        let mut nbt = NbtCompound::new();
        nbt.insert_byte("version".to_owned(), 1);

        assert_eq!(
            nbt.try_get_string("name"),
            Err(NbtStructureError::MissingTag("name".to_owned()))
        );
        assert_eq!(
            nbt.try_get_int("version").unwrap_err().to_string(),
            "Expected TAG_Int for tag \"version\", found TAG_Byte"
        );
    }
}
