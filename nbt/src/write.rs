use std::io::{Error, ErrorKind, Result, Write};

use byteorder::{BigEndian, LittleEndian, WriteBytesExt};
use flate2::write::{GzEncoder, ZlibEncoder};

use crate::encoding::{write_var_i32, write_var_i64, write_var_u32};
use crate::{Compression, Encoding, NbtCompound, NbtTag};

/// Writes the given compound as a named root tag.
pub fn write_nbt<W>(writer: &mut W, encoding: Encoding, root_name: &str, root: &NbtCompound) -> Result<()>
where W: Write {
    let mut nbt_writer = NbtWriter { writer, encoding };
    nbt_writer.writer.write_u8(NbtTag::COMPOUND_ID)?;
    nbt_writer.write_string(root_name)?;
    nbt_writer.write_compound(root)
}

/// Writes the given compound as a named root tag through the given compression.
pub fn write_nbt_compressed<W>(
    writer: &mut W,
    encoding: Encoding,
    compression: Compression,
    root_name: &str,
    root: &NbtCompound,
) -> Result<()>
where
    W: Write,
{
    match compression {
        Compression::None => write_nbt(writer, encoding, root_name, root),
        Compression::Gzip => {
            let mut encoder = GzEncoder::new(writer, flate2::Compression::default());
            write_nbt(&mut encoder, encoding, root_name, root)?;
            encoder.finish().map(|_| ())
        }
        Compression::Zlib => {
            let mut encoder = ZlibEncoder::new(writer, flate2::Compression::default());
            write_nbt(&mut encoder, encoding, root_name, root)?;
            encoder.finish().map(|_| ())
        }
    }
}

struct NbtWriter<W> {
    writer: W,
    encoding: Encoding,
}

impl<W: Write> NbtWriter<W> {
    fn write_compound(&mut self, compound: &NbtCompound) -> Result<()> {
        for (name, tag) in compound.iter() {
            self.writer.write_u8(tag.id())?;
            self.write_string(name)?;
            self.write_tag_body(tag)?;
        }

        // TAG_End
        self.writer.write_u8(NbtTag::END_ID)
    }

    fn write_tag_body(&mut self, tag: &NbtTag) -> Result<()> {
        match tag {
            NbtTag::Byte(value) => self.writer.write_i8(*value),
            NbtTag::Short(value) => self.write_i16(*value),
            NbtTag::Int(value) => self.write_i32(*value),
            NbtTag::Long(value) => self.write_i64(*value),
            NbtTag::Float(value) => self.write_f32(*value),
            NbtTag::Double(value) => self.write_f64(*value),
            NbtTag::ByteArray(value) => {
                self.write_len(value.len())?;
                let bytes = value.iter().map(|&byte| byte as u8).collect::<Vec<_>>();
                self.writer.write_all(&bytes)
            }
            NbtTag::String(value) => self.write_string(value),
            NbtTag::List(value) => {
                if value.is_empty() {
                    // TAG_End element type and a zero length
                    self.writer.write_u8(NbtTag::END_ID)?;
                    return self.write_len(0);
                }

                let type_id = value[0].id();
                self.writer.write_u8(type_id)?;
                self.write_len(value.len())?;

                for sub_tag in value.iter() {
                    if sub_tag.id() != type_id {
                        return Err(Error::new(
                            ErrorKind::InvalidInput,
                            "Attempted to write NBT list with a non-homogenous type.",
                        ));
                    }

                    self.write_tag_body(sub_tag)?;
                }

                Ok(())
            }
            NbtTag::Compound(value) => self.write_compound(value),
            NbtTag::IntArray(value) => {
                self.write_len(value.len())?;

                for int in value.iter() {
                    self.write_i32(*int)?;
                }

                Ok(())
            }
            NbtTag::LongArray(value) => {
                self.write_len(value.len())?;

                for long in value.iter() {
                    self.write_i64(*long)?;
                }

                Ok(())
            }
        }
    }

    fn write_string(&mut self, string: &str) -> Result<()> {
        match self.encoding {
            Encoding::NetworkLittleEndian => {
                let len = u32::try_from(string.len())
                    .map_err(|_| Error::new(ErrorKind::InvalidInput, "String is too long."))?;
                write_var_u32(&mut self.writer, len)?;
            }
            Encoding::LittleEndian | Encoding::BigEndian => {
                let len = u16::try_from(string.len())
                    .map_err(|_| Error::new(ErrorKind::InvalidInput, "String is too long."))?;

                if self.encoding == Encoding::LittleEndian {
                    self.writer.write_u16::<LittleEndian>(len)?;
                } else {
                    self.writer.write_u16::<BigEndian>(len)?;
                }
            }
        }

        self.writer.write_all(string.as_bytes())
    }

    fn write_len(&mut self, len: usize) -> Result<()> {
        let len = i32::try_from(len)
            .map_err(|_| Error::new(ErrorKind::InvalidInput, "Collection is too long."))?;
        self.write_i32(len)
    }

    fn write_i16(&mut self, value: i16) -> Result<()> {
        match self.encoding {
            Encoding::NetworkLittleEndian | Encoding::LittleEndian =>
                self.writer.write_i16::<LittleEndian>(value),
            Encoding::BigEndian => self.writer.write_i16::<BigEndian>(value),
        }
    }

    fn write_i32(&mut self, value: i32) -> Result<()> {
        match self.encoding {
            Encoding::NetworkLittleEndian => write_var_i32(&mut self.writer, value),
            Encoding::LittleEndian => self.writer.write_i32::<LittleEndian>(value),
            Encoding::BigEndian => self.writer.write_i32::<BigEndian>(value),
        }
    }

    fn write_i64(&mut self, value: i64) -> Result<()> {
        match self.encoding {
            Encoding::NetworkLittleEndian => write_var_i64(&mut self.writer, value),
            Encoding::LittleEndian => self.writer.write_i64::<LittleEndian>(value),
            Encoding::BigEndian => self.writer.write_i64::<BigEndian>(value),
        }
    }

    fn write_f32(&mut self, value: f32) -> Result<()> {
        match self.encoding {
            Encoding::NetworkLittleEndian | Encoding::LittleEndian =>
                self.writer.write_f32::<LittleEndian>(value),
            Encoding::BigEndian => self.writer.write_f32::<BigEndian>(value),
        }
    }

    fn write_f64(&mut self, value: f64) -> Result<()> {
        match self.encoding {
            Encoding::NetworkLittleEndian | Encoding::LittleEndian =>
                self.writer.write_f64::<LittleEndian>(value),
            Encoding::BigEndian => self.writer.write_f64::<BigEndian>(value),
        }
    }
}
