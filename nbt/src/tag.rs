use std::collections::{hash_map, HashMap};
use std::ops::Index;

use doc_comment::doc_comment;

/// The generic NBT tag type, containing all supported tag variants which wrap around a corresponding rust type.
#[derive(Clone, Debug, PartialEq)]
pub enum NbtTag {
    /// A signed, one-byte integer.
    Byte(i8),
    /// A signed, two-byte integer.
    Short(i16),
    /// A signed, four-byte integer.
    Int(i32),
    /// A signed, eight-byte integer.
    Long(i64),
    /// A 32-bit floating point value.
    Float(f32),
    /// A 64-bit floating point value.
    Double(f64),
    /// An array (vec) of signed, one-byte integers.
    ByteArray(Vec<i8>),
    /// A UTF-8 string.
    String(String),
    /// An NBT tag list.
    List(NbtList),
    /// An NBT tag compound.
    Compound(NbtCompound),
    /// An array (vec) of signed, four-byte integers.
    IntArray(Vec<i32>),
    /// An array (vec) of signed, eight-byte integers.
    LongArray(Vec<i64>),
}

impl NbtTag {
    /// The ID of `TAG_End`, which terminates compounds and marks empty lists.
    pub const END_ID: u8 = 0x0;
    /// The ID of `TAG_Compound`, which every root tag must have.
    pub const COMPOUND_ID: u8 = 0xA;

    /// Returns the numeric type ID written before this tag on the wire.
    pub fn id(&self) -> u8 {
        match self {
            NbtTag::Byte(_) => 0x1,
            NbtTag::Short(_) => 0x2,
            NbtTag::Int(_) => 0x3,
            NbtTag::Long(_) => 0x4,
            NbtTag::Float(_) => 0x5,
            NbtTag::Double(_) => 0x6,
            NbtTag::ByteArray(_) => 0x7,
            NbtTag::String(_) => 0x8,
            NbtTag::List(_) => 0x9,
            NbtTag::Compound(_) => 0xA,
            NbtTag::IntArray(_) => 0xB,
            NbtTag::LongArray(_) => 0xC,
        }
    }

    /// Returns the conventional name of this tag's type, such as `TAG_Int`.
    pub fn type_name(&self) -> &'static str {
        match self {
            NbtTag::Byte(_) => "TAG_Byte",
            NbtTag::Short(_) => "TAG_Short",
            NbtTag::Int(_) => "TAG_Int",
            NbtTag::Long(_) => "TAG_Long",
            NbtTag::Float(_) => "TAG_Float",
            NbtTag::Double(_) => "TAG_Double",
            NbtTag::ByteArray(_) => "TAG_Byte_Array",
            NbtTag::String(_) => "TAG_String",
            NbtTag::List(_) => "TAG_List",
            NbtTag::Compound(_) => "TAG_Compound",
            NbtTag::IntArray(_) => "TAG_Int_Array",
            NbtTag::LongArray(_) => "TAG_Long_Array",
        }
    }
}

// Implement the from trait for all the tag's internal types
macro_rules! tag_from {
    ($($type:ty, $tag:ident),*) => {
        $(
            impl From<$type> for NbtTag {
                fn from(value: $type) -> NbtTag {
                    NbtTag::$tag(value)
                }
            }
        )*
    };
}

tag_from!(
    i8, Byte,
    i16, Short,
    i32, Int,
    i64, Long,
    f32, Float,
    f64, Double,
    Vec<i8>, ByteArray,
    String, String,
    NbtList, List,
    NbtCompound, Compound,
    Vec<i32>, IntArray,
    Vec<i64>, LongArray
);

// String slices are a special case
impl From<&str> for NbtTag {
    fn from(value: &str) -> NbtTag {
        NbtTag::String(value.to_owned())
    }
}

impl From<bool> for NbtTag {
    fn from(value: bool) -> NbtTag {
        NbtTag::Byte(value as i8)
    }
}

/// A list of NBT tags. Lists are expected to be homogeneous, which is checked when the list is written.
#[repr(transparent)]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NbtList(Vec<NbtTag>);

impl NbtList {
    /// Returns a new, empty list.
    pub fn new() -> Self {
        NbtList(Vec::new())
    }

    /// Returns a new, empty list with the given capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        NbtList(Vec::with_capacity(capacity))
    }

    /// Returns an iterator over the tags in this list.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, NbtTag> {
        self.0.iter()
    }

    /// Returns the number of tags in this list.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns whether or not this list is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the tag at the given index, if there is one.
    pub fn get(&self, index: usize) -> Option<&NbtTag> {
        self.0.get(index)
    }

    /// Adds the given tag to the back of the list.
    pub fn add(&mut self, tag: impl Into<NbtTag>) {
        self.0.push(tag.into());
    }
}

impl Index<usize> for NbtList {
    type Output = NbtTag;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl<'a> IntoIterator for &'a NbtList {
    type IntoIter = std::slice::Iter<'a, NbtTag>;
    type Item = &'a NbtTag;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<NbtTag> for NbtList {
    fn from_iter<I: IntoIterator<Item = NbtTag>>(iter: I) -> Self {
        NbtList(iter.into_iter().collect())
    }
}

/// An unordered collection of named NBT tags.
#[repr(transparent)]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NbtCompound(HashMap<String, NbtTag>);

// Generates a get function for a compound returning None if
// the name is invalid or the types do not match
macro_rules! compound_get {
    ($type:ty, $method:ident, $tag:ident) => {
        doc_comment! {
            concat!(
                "
                Returns the value of the `", stringify!($tag), "` tag with the given name.
                If a tag with the given name cannot be found, or the tag is not a `", stringify!($tag), "` tag,
                then `None` is returned.
                "
            ),
            pub fn $method(&self, name: &str) -> Option<$type> {
                if let Some(NbtTag::$tag(value)) = self.0.get(name) {
                    Some(*value)
                } else {
                    None
                }
            }
        }
    };
}

// Same as above, but hands out a reference to the tag's value
macro_rules! compound_get_ref {
    ($type:ty, $method:ident, $tag:ident) => {
        doc_comment! {
            concat!(
                "
                Returns a shared reference to the value of the `", stringify!($tag), "` tag with the given name.
                If a tag with the given name cannot be found, or the tag is not a `", stringify!($tag), "` tag,
                then `None` is returned.
                "
            ),
            pub fn $method(&self, name: &str) -> Option<&$type> {
                if let Some(NbtTag::$tag(value)) = self.0.get(name) {
                    Some(value)
                } else {
                    None
                }
            }
        }
    };
}

macro_rules! compound_insert {
    ($type:ty, $method:ident) => {
        #[doc = "Inserts a tag with the given value into this compound with the given name. \
                 The value will be wrapped in a corresponding `NbtTag` variant."]
        pub fn $method(&mut self, name: String, value: $type) {
            self.0.insert(name, NbtTag::from(value));
        }
    };
}

impl NbtCompound {
    /// Returns a new, empty compound.
    pub fn new() -> Self {
        NbtCompound(HashMap::new())
    }

    /// Returns a new, empty compound with the given capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        NbtCompound(HashMap::with_capacity(capacity))
    }

    /// Returns an iterator over the name-tag pairs of this compound in arbitrary order.
    #[inline]
    pub fn iter(&self) -> hash_map::Iter<'_, String, NbtTag> {
        self.0.iter()
    }

    /// Returns the number of tags in this compound.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns whether or not this compound is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns whether or not this compound has a tag with the given name.
    #[inline]
    pub fn contains_key(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Returns the tag with the given name, if there is one.
    pub fn get(&self, name: &str) -> Option<&NbtTag> {
        self.0.get(name)
    }

    /// Inserts the given tag under the given name, returning the tag it replaced.
    pub fn insert(&mut self, name: String, tag: impl Into<NbtTag>) -> Option<NbtTag> {
        self.0.insert(name, tag.into())
    }

    /// Removes and returns the tag with the given name.
    pub fn remove(&mut self, name: &str) -> Option<NbtTag> {
        self.0.remove(name)
    }

    compound_get!(i8, get_byte, Byte);
    compound_get!(i16, get_short, Short);
    compound_get!(i32, get_int, Int);
    compound_get!(i64, get_long, Long);
    compound_get!(f32, get_float, Float);
    compound_get!(f64, get_double, Double);
    compound_get_ref!(Vec<i8>, get_byte_array, ByteArray);
    compound_get_ref!(str, get_string, String);
    compound_get_ref!(NbtList, get_list, List);
    compound_get_ref!(NbtCompound, get_compound, Compound);
    compound_get_ref!(Vec<i32>, get_int_array, IntArray);
    compound_get_ref!(Vec<i64>, get_long_array, LongArray);

    compound_insert!(i8, insert_byte);
    compound_insert!(i16, insert_short);
    compound_insert!(i32, insert_int);
    compound_insert!(i64, insert_long);
    compound_insert!(String, insert_string);
    compound_insert!(NbtList, insert_list);
    compound_insert!(NbtCompound, insert_compound);

    /// Inserts a boolean into this compound, stored as a `Byte` tag of 0 or 1.
    pub fn insert_bool(&mut self, name: String, value: bool) {
        self.0.insert(name, NbtTag::from(value));
    }
}

impl<'a> IntoIterator for &'a NbtCompound {
    type IntoIter = hash_map::Iter<'a, String, NbtTag>;
    type Item = (&'a String, &'a NbtTag);

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl IntoIterator for NbtCompound {
    type IntoIter = hash_map::IntoIter<String, NbtTag>;
    type Item = (String, NbtTag);

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<K: Into<String>, V: Into<NbtTag>> FromIterator<(K, V)> for NbtCompound {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        NbtCompound(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}
