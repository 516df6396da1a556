use std::io::{self, Error, ErrorKind, Read};

use byteorder::{BigEndian, LittleEndian, ReadBytesExt};

use crate::encoding::{read_var_i32, read_var_i64, read_var_u32};
use crate::{Compression, Encoding, NbtCompound, NbtList, NbtTag};

/// The deepest nesting of lists and compounds a reader will follow before giving up.
pub const MAX_DEPTH: usize = 512;

// Corrupt length prefixes should not be able to reserve gigabytes up front
const MAX_PREALLOCATION: usize = 4096;

/// Reads a single named root compound from the given source.
///
/// Returns the compound together with its root name, which is usually empty.
pub fn read_nbt<R>(source: &mut R, encoding: Encoding) -> io::Result<(NbtCompound, String)>
where R: Read {
    let mut reader = NbtReader::new(source, encoding);
    let root_id = reader.source.read_u8()?;
    reader.read_root_with_id(root_id)
}

/// Reads a single named root compound from a compressed source.
pub fn read_nbt_compressed<R>(
    source: &mut R,
    encoding: Encoding,
    compression: Compression,
) -> io::Result<(NbtCompound, String)>
where
    R: Read,
{
    read_nbt(&mut compression.reader(source), encoding)
}

// Reads the body of NBT tags from a source using one particular encoding
pub(crate) struct NbtReader<R> {
    source: R,
    encoding: Encoding,
    depth: usize,
}

impl<R: Read> NbtReader<R> {
    pub(crate) fn new(source: R, encoding: Encoding) -> Self {
        NbtReader {
            source,
            encoding,
            depth: 0,
        }
    }

    fn read_root_with_id(&mut self, root_id: u8) -> io::Result<(NbtCompound, String)> {
        if root_id != NbtTag::COMPOUND_ID {
            return Err(Error::new(
                ErrorKind::InvalidData,
                format!(
                    "NBT data does not start with a compound type (found tag ID {:#x}).",
                    root_id
                ),
            ));
        }

        let root_name = self.read_string()?;
        let compound = self.read_compound_body()?;
        Ok((compound, root_name))
    }

    fn read_tag_body(&mut self, id: u8) -> io::Result<NbtTag> {
        let tag = match id {
            0x1 => NbtTag::Byte(self.source.read_i8()?),
            0x2 => NbtTag::Short(self.read_i16()?),
            0x3 => NbtTag::Int(self.read_i32()?),
            0x4 => NbtTag::Long(self.read_i64()?),
            0x5 => NbtTag::Float(self.read_f32()?),
            0x6 => NbtTag::Double(self.read_f64()?),
            0x7 => {
                let len = self.read_len()?;
                let mut bytes = Vec::with_capacity(len.min(MAX_PREALLOCATION));
                (&mut self.source).take(len as u64).read_to_end(&mut bytes)?;

                if bytes.len() != len {
                    return Err(Error::new(
                        ErrorKind::UnexpectedEof,
                        "Byte array ended early.",
                    ));
                }

                NbtTag::ByteArray(bytes.into_iter().map(|byte| byte as i8).collect())
            }
            0x8 => NbtTag::String(self.read_string()?),
            0x9 => {
                let type_id = self.source.read_u8()?;
                let len = self.read_len()?;

                // Make sure we don't have a list of TAG_End unless it's empty or an invalid type
                if type_id > 0xC || (type_id == NbtTag::END_ID && len > 0) {
                    return Err(Error::new(
                        ErrorKind::InvalidData,
                        format!("Invalid list type encountered: {:#x}.", type_id),
                    ));
                }

                self.descend()?;
                let mut list = NbtList::with_capacity(len.min(MAX_PREALLOCATION));
                for _ in 0 .. len {
                    list.add(self.read_tag_body(type_id)?);
                }
                self.depth -= 1;

                NbtTag::List(list)
            }
            0xA => NbtTag::Compound(self.read_compound_body()?),
            0xB => {
                let len = self.read_len()?;
                let mut array = Vec::with_capacity(len.min(MAX_PREALLOCATION));

                for _ in 0 .. len {
                    array.push(self.read_i32()?);
                }

                NbtTag::IntArray(array)
            }
            0xC => {
                let len = self.read_len()?;
                let mut array = Vec::with_capacity(len.min(MAX_PREALLOCATION));

                for _ in 0 .. len {
                    array.push(self.read_i64()?);
                }

                NbtTag::LongArray(array)
            }
            _ =>
                return Err(Error::new(
                    ErrorKind::InvalidData,
                    format!("Invalid tag type encountered: {:#x}.", id),
                )),
        };

        Ok(tag)
    }

    fn read_compound_body(&mut self) -> io::Result<NbtCompound> {
        self.descend()?;

        let mut compound = NbtCompound::new();
        let mut tag_id = self.source.read_u8()?;

        // Read until TAG_End
        while tag_id != NbtTag::END_ID {
            let name = self.read_string()?;
            let tag = self.read_tag_body(tag_id)?;
            compound.insert(name, tag);
            tag_id = self.source.read_u8()?;
        }

        self.depth -= 1;
        Ok(compound)
    }

    fn descend(&mut self) -> io::Result<()> {
        self.depth += 1;

        if self.depth > MAX_DEPTH {
            Err(Error::new(
                ErrorKind::InvalidData,
                format!("NBT nesting exceeds the maximum depth of {}.", MAX_DEPTH),
            ))
        } else {
            Ok(())
        }
    }

    fn read_string(&mut self) -> io::Result<String> {
        let len = match self.encoding {
            Encoding::NetworkLittleEndian => read_var_u32(&mut self.source)? as usize,
            Encoding::LittleEndian => self.source.read_u16::<LittleEndian>()? as usize,
            Encoding::BigEndian => self.source.read_u16::<BigEndian>()? as usize,
        };

        let mut bytes = Vec::with_capacity(len.min(MAX_PREALLOCATION));
        (&mut self.source).take(len as u64).read_to_end(&mut bytes)?;

        if bytes.len() != len {
            return Err(Error::new(ErrorKind::UnexpectedEof, "String ended early."));
        }

        String::from_utf8(bytes)
            .map_err(|_| Error::new(ErrorKind::InvalidData, "Invalid string encoding."))
    }

    // Lengths of lists and arrays share the encoding of TAG_Int
    fn read_len(&mut self) -> io::Result<usize> {
        let len = self.read_i32()?;

        if len < 0 {
            Err(Error::new(
                ErrorKind::InvalidData,
                format!("Negative length encountered: {}.", len),
            ))
        } else {
            Ok(len as usize)
        }
    }

    fn read_i16(&mut self) -> io::Result<i16> {
        match self.encoding {
            Encoding::NetworkLittleEndian | Encoding::LittleEndian =>
                self.source.read_i16::<LittleEndian>(),
            Encoding::BigEndian => self.source.read_i16::<BigEndian>(),
        }
    }

    fn read_i32(&mut self) -> io::Result<i32> {
        match self.encoding {
            Encoding::NetworkLittleEndian => read_var_i32(&mut self.source),
            Encoding::LittleEndian => self.source.read_i32::<LittleEndian>(),
            Encoding::BigEndian => self.source.read_i32::<BigEndian>(),
        }
    }

    fn read_i64(&mut self) -> io::Result<i64> {
        match self.encoding {
            Encoding::NetworkLittleEndian => read_var_i64(&mut self.source),
            Encoding::LittleEndian => self.source.read_i64::<LittleEndian>(),
            Encoding::BigEndian => self.source.read_i64::<BigEndian>(),
        }
    }

    fn read_f32(&mut self) -> io::Result<f32> {
        match self.encoding {
            Encoding::NetworkLittleEndian | Encoding::LittleEndian =>
                self.source.read_f32::<LittleEndian>(),
            Encoding::BigEndian => self.source.read_f32::<BigEndian>(),
        }
    }

    fn read_f64(&mut self) -> io::Result<f64> {
        match self.encoding {
            Encoding::NetworkLittleEndian | Encoding::LittleEndian =>
                self.source.read_f64::<LittleEndian>(),
            Encoding::BigEndian => self.source.read_f64::<BigEndian>(),
        }
    }
}

/// Decodes a stream of back-to-back root compounds, such as the game's block state table.
///
/// The stream ends cleanly when the source is exhausted exactly on a record boundary. Running out of
/// data part way through a record, or reading anything other than a compound at a boundary, is an
/// error. As an iterator the decoder yields each error once and then stops.
pub struct NbtDecoder<R> {
    reader: NbtReader<R>,
    records: usize,
    finished: bool,
}

impl<R: Read> NbtDecoder<R> {
    /// Creates a decoder over the given source.
    pub fn new(source: R, encoding: Encoding) -> Self {
        NbtDecoder {
            reader: NbtReader::new(source, encoding),
            records: 0,
            finished: false,
        }
    }

    /// Returns the number of root compounds decoded so far.
    #[inline]
    pub fn records(&self) -> usize {
        self.records
    }

    /// Decodes the next root compound, returning `Ok(None)` once the stream has cleanly ended.
    pub fn next_root(&mut self) -> io::Result<Option<(NbtCompound, String)>> {
        let root_id = match self.read_boundary()? {
            Some(id) => id,
            None => return Ok(None),
        };

        let root = self.reader.read_root_with_id(root_id).map_err(|error| {
            Error::new(
                error.kind(),
                format!("Failed to decode record {}: {}", self.records, error),
            )
        })?;

        self.records += 1;
        Ok(Some(root))
    }

    // Reads the ID byte opening the next record, or None if there is nothing left
    fn read_boundary(&mut self) -> io::Result<Option<u8>> {
        let mut id = [0_u8; 1];

        loop {
            match self.reader.source.read(&mut id) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(id[0])),
                Err(error) if error.kind() == ErrorKind::Interrupted => continue,
                Err(error) => return Err(error),
            }
        }
    }
}

impl<R: Read> Iterator for NbtDecoder<R> {
    type Item = io::Result<(NbtCompound, String)>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        match self.next_root() {
            Ok(Some(root)) => Some(Ok(root)),
            Ok(None) => {
                self.finished = true;
                None
            }
            Err(error) => {
                self.finished = true;
                Some(Err(error))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // {"": {name: "minecraft:air", version: 1}} in the network encoding, written out by hand
    const NETWORK_AIR: &[u8] = &[
        0x0A, 0x00, // root compound, empty name
        0x08, 0x04, b'n', b'a', b'm', b'e', 0x0D, b'm', b'i', b'n', b'e', b'c', b'r', b'a', b'f',
        b't', b':', b'a', b'i', b'r', // name
        0x03, 0x07, b'v', b'e', b'r', b's', b'i', b'o', b'n', 0x02, // version, zigzag 1
        0x00, // end
    ];

    #[test]
    fn reads_hand_written_network_compound() {
        let (root, name) = read_nbt(&mut &NETWORK_AIR[..], Encoding::NetworkLittleEndian).unwrap();

        assert!(name.is_empty());
        assert_eq!(root.get_string("name"), Some("minecraft:air"));
        assert_eq!(root.get_int("version"), Some(1));
    }

    #[test]
    fn decoder_distinguishes_end_of_stream_from_truncation() {
        let mut stream = NETWORK_AIR.to_vec();
        stream.extend_from_slice(NETWORK_AIR);

        let mut decoder = NbtDecoder::new(stream.as_slice(), Encoding::NetworkLittleEndian);
        assert!(decoder.next_root().unwrap().is_some());
        assert!(decoder.next_root().unwrap().is_some());
        assert!(decoder.next_root().unwrap().is_none(), "Exhausted stream should end cleanly.");
        assert_eq!(decoder.records(), 2);

        let truncated = &NETWORK_AIR[.. NETWORK_AIR.len() - 3];
        let mut decoder = NbtDecoder::new(truncated, Encoding::NetworkLittleEndian);
        let error = decoder.next_root().unwrap_err();
        assert_eq!(error.kind(), ErrorKind::UnexpectedEof);
    }

    #[test]
    fn iterator_stops_after_first_error() {
        let mut stream = NETWORK_AIR.to_vec();
        stream.push(0x03);

        let results = NbtDecoder::new(stream.as_slice(), Encoding::NetworkLittleEndian)
            .collect::<Vec<_>>();
        assert_eq!(results.len(), 2);
        assert!(results[0].is_ok());
        assert!(results[1].is_err());
    }

    #[test]
    fn rejects_non_compound_root() {
        let error = read_nbt(&mut &[0x08_u8, 0x00, 0x00][..], Encoding::LittleEndian).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::InvalidData);
    }

    #[test]
    fn rejects_excessive_nesting() {
        // A root compound followed by nested compounds with empty names, never closed
        let mut bytes = vec![0x0A, 0x00, 0x00];
        for _ in 0 .. MAX_DEPTH + 1 {
            bytes.extend_from_slice(&[0x0A, 0x00, 0x00]);
        }

        let error = read_nbt(&mut bytes.as_slice(), Encoding::LittleEndian).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::InvalidData);
    }
}
