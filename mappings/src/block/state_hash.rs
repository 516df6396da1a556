use super::PropertyValue;

/// The key block states are indexed by: the block name and the canonical encoding of its properties.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub(crate) struct StateHash {
    name: String,
    properties: Vec<u8>,
}

impl StateHash {
    pub(crate) fn new<'a, K, I>(name: &str, properties: I) -> Self
    where
        K: AsRef<str>,
        I: IntoIterator<Item = (K, &'a PropertyValue)>,
    {
        StateHash {
            name: name.to_owned(),
            properties: hash_properties(properties),
        }
    }
}

/// Encodes a property set into a key that does not depend on the order the properties are given in.
///
/// Values are appended in byte-wise order of their property names: booleans and bytes as one byte, ints
/// as four little-endian bytes, strings as their raw bytes. Nothing separates the values and property
/// names are not part of the key, so two different sets can share a key if their encodings happen to
/// concatenate to the same bytes. An empty set encodes to an empty key.
pub(crate) fn hash_properties<'a, K, I>(properties: I) -> Vec<u8>
where
    K: AsRef<str>,
    I: IntoIterator<Item = (K, &'a PropertyValue)>,
{
    let mut entries = properties.into_iter().collect::<Vec<_>>();
    entries.sort_by(|(a, _), (b, _)| a.as_ref().as_bytes().cmp(b.as_ref().as_bytes()));

    let mut key = Vec::with_capacity(entries.len() * 4);
    for (_, value) in entries {
        value.encode_into(&mut key);
    }

    key
}
