use std::io::{self, BufRead, BufReader, Error, ErrorKind, Read, Write};

use byteorder::{ReadBytesExt, WriteBytesExt};
use flate2::bufread::ZlibDecoder;
use flate2::read::MultiGzDecoder;
use flate2::write::{GzEncoder, ZlibEncoder};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The byte layout used for the numeric fields and length prefixes of an NBT stream.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(rename_all = "snake_case"))]
pub enum Encoding {
    /// Little-endian layout where ints, longs and all length prefixes are zigzag varints and string
    /// lengths are unsigned varints. This is what the game sends over the network and what its
    /// bundled block state and item tables use.
    #[default]
    NetworkLittleEndian,
    /// Fixed-width little-endian layout used by world saves on disk.
    LittleEndian,
    /// Fixed-width big-endian layout with `u16` string lengths.
    BigEndian,
}

/// The compression wrapped around an NBT stream.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(rename_all = "snake_case"))]
pub enum Compression {
    /// The stream is stored as-is.
    #[default]
    None,
    /// The stream is gzip compressed.
    Gzip,
    /// The stream is zlib compressed.
    Zlib,
}

impl Compression {
    /// Wraps the given source in the matching decompressor. Gzip and zlib sources may hold several
    /// concatenated streams, which are read back to back. Bytes after a stream that do not start another
    /// stream are reported as an error.
    pub fn reader<'a, R: Read + 'a>(self, source: R) -> Box<dyn Read + 'a> {
        match self {
            Compression::None => Box::new(source),
            Compression::Gzip => Box::new(MultiGzDecoder::new(source)),
            Compression::Zlib => Box::new(MultiZlibDecoder::new(BufReader::new(source))),
        }
    }

    /// Wraps the given sink in the matching compressor. The compressed output is only complete once the
    /// returned writer is dropped, and errors raised while completing it are lost. Use
    /// [`write_nbt_compressed`](crate::write_nbt_compressed) to have them reported.
    pub fn writer<'a, W: Write + 'a>(self, sink: W) -> Box<dyn Write + 'a> {
        match self {
            Compression::None => Box::new(sink),
            Compression::Gzip => Box::new(GzEncoder::new(sink, flate2::Compression::default())),
            Compression::Zlib => Box::new(ZlibEncoder::new(sink, flate2::Compression::default())),
        }
    }
}

// Decodes consecutive zlib streams. The buffered decoder stops exactly at the end of each stream, so
// whatever follows is left in the source for the next one.
struct MultiZlibDecoder<R> {
    decoder: Option<ZlibDecoder<R>>,
}

impl<R: BufRead> MultiZlibDecoder<R> {
    fn new(source: R) -> Self {
        MultiZlibDecoder {
            decoder: Some(ZlibDecoder::new(source)),
        }
    }
}

impl<R: BufRead> Read for MultiZlibDecoder<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        loop {
            let read = match self.decoder.as_mut() {
                Some(decoder) => decoder.read(buf)?,
                None => return Ok(0),
            };

            if read > 0 || buf.is_empty() {
                return Ok(read);
            }

            let mut source = match self.decoder.take() {
                Some(decoder) => decoder.into_inner(),
                None => return Ok(0),
            };

            if source.fill_buf()?.is_empty() {
                return Ok(0);
            }

            self.decoder = Some(ZlibDecoder::new(source));
        }
    }
}

pub(crate) fn read_var_u32<R: Read>(source: &mut R) -> io::Result<u32> {
    let mut result: u32 = 0;

    for shift in (0 .. 35).step_by(7) {
        let next = source.read_u8()?;
        result |= ((next & 0x7F) as u32) << shift;

        if next & 0x80 == 0 {
            return Ok(result);
        }
    }

    Err(Error::new(
        ErrorKind::InvalidData,
        "Varint overflows a 32-bit integer.",
    ))
}

pub(crate) fn read_var_u64<R: Read>(source: &mut R) -> io::Result<u64> {
    let mut result: u64 = 0;

    for shift in (0 .. 70).step_by(7) {
        let next = source.read_u8()?;
        result |= ((next & 0x7F) as u64) << shift;

        if next & 0x80 == 0 {
            return Ok(result);
        }
    }

    Err(Error::new(
        ErrorKind::InvalidData,
        "Varint overflows a 64-bit integer.",
    ))
}

#[inline]
pub(crate) fn read_var_i32<R: Read>(source: &mut R) -> io::Result<i32> {
    let raw = read_var_u32(source)?;
    Ok((raw >> 1) as i32 ^ -((raw & 1) as i32))
}

#[inline]
pub(crate) fn read_var_i64<R: Read>(source: &mut R) -> io::Result<i64> {
    let raw = read_var_u64(source)?;
    Ok((raw >> 1) as i64 ^ -((raw & 1) as i64))
}

pub(crate) fn write_var_u32<W: Write>(writer: &mut W, mut value: u32) -> io::Result<()> {
    while value >= 0x80 {
        writer.write_u8((value as u8 & 0x7F) | 0x80)?;
        value >>= 7;
    }

    writer.write_u8(value as u8)
}

pub(crate) fn write_var_u64<W: Write>(writer: &mut W, mut value: u64) -> io::Result<()> {
    while value >= 0x80 {
        writer.write_u8((value as u8 & 0x7F) | 0x80)?;
        value >>= 7;
    }

    writer.write_u8(value as u8)
}

#[inline]
pub(crate) fn write_var_i32<W: Write>(writer: &mut W, value: i32) -> io::Result<()> {
    write_var_u32(writer, ((value << 1) ^ (value >> 31)) as u32)
}

#[inline]
pub(crate) fn write_var_i64<W: Write>(writer: &mut W, value: i64) -> io::Result<()> {
    write_var_u64(writer, ((value << 1) ^ (value >> 63)) as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zlib(data: &[u8]) -> Vec<u8> {
        let mut encoder = ZlibEncoder::new(Vec::new(), flate2::Compression::default());
        encoder.write_all(data).unwrap();
        encoder.finish().unwrap()
    }

    fn encode_i32(value: i32) -> Vec<u8> {
        let mut buf = Vec::new();
        write_var_i32(&mut buf, value).unwrap();
        buf
    }

    #[test]
    fn zigzag_varints_match_known_bytes() {
        assert_eq!(encode_i32(0), [0x00]);
        assert_eq!(encode_i32(-1), [0x01]);
        assert_eq!(encode_i32(1), [0x02]);
        assert_eq!(encode_i32(64), [0x80, 0x01]);
        assert_eq!(encode_i32(i32::MIN), [0xFF, 0xFF, 0xFF, 0xFF, 0x0F]);
    }

    #[test]
    fn varints_read_back_extremes() {
        for value in [0, 1, -1, 300, -300, i32::MAX, i32::MIN] {
            let buf = encode_i32(value);
            assert_eq!(read_var_i32(&mut buf.as_slice()).unwrap(), value);
        }

        for value in [0_i64, -7, i64::MAX, i64::MIN] {
            let mut buf = Vec::new();
            write_var_i64(&mut buf, value).unwrap();
            assert_eq!(read_var_i64(&mut buf.as_slice()).unwrap(), value);
        }
    }

    #[test]
    fn overlong_varint_is_rejected() {
        let bytes = [0xFF_u8; 6];
        let error = read_var_u32(&mut &bytes[..]).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::InvalidData);
    }

    #[test]
    fn zlib_reader_continues_into_following_streams() {
        let mut data = zlib(b"first ");
        data.extend(zlib(b"second"));

        let mut decoded = Vec::new();
        Compression::Zlib.reader(data.as_slice()).read_to_end(&mut decoded).unwrap();
        assert_eq!(decoded, b"first second");
    }

    #[test]
    fn zlib_reader_rejects_trailing_bytes() {
        let mut data = zlib(b"first");
        data.extend([0xDE, 0xAD, 0xBE, 0xEF]);

        let mut decoded = Vec::new();
        assert!(
            Compression::Zlib.reader(data.as_slice()).read_to_end(&mut decoded).is_err(),
            "Trailing garbage after a zlib stream was ignored."
        );
    }
}
