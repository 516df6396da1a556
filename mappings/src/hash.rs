use std::hash::{BuildHasher, Hasher};

/// A hasher for maps keyed by primitive integers of at most 64 bits, such as item runtime IDs. This
/// hasher should not be used in any other context.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NumHasher;

impl BuildHasher for NumHasher {
    type Hasher = NumHashIsomorphism;

    fn build_hasher(&self) -> Self::Hasher {
        NumHashIsomorphism { state: 0 }
    }
}

/// Hashes an integer by multiplying it with an odd constant. Multiplication by an odd number is a
/// bijection on `u64`, so distinct integers never share a hash, while the high bits the table probes
/// with still vary between neighbouring IDs.
pub struct NumHashIsomorphism {
    state: u64,
}

const MULTIPLIER: u64 = 0x9E37_79B9_7F4A_7C15;

impl NumHashIsomorphism {
    #[inline]
    fn set(&mut self, value: u64) {
        self.state = value.wrapping_mul(MULTIPLIER);
    }
}

impl Hasher for NumHashIsomorphism {
    fn finish(&self) -> u64 {
        self.state
    }

    fn write(&mut self, bytes: &[u8]) {
        for chunk in bytes.chunks(8) {
            let mut buf = [0u8; 8];
            buf[.. chunk.len()].copy_from_slice(chunk);
            self.state ^= u64::from_le_bytes(buf).wrapping_mul(MULTIPLIER);
        }
    }

    fn write_i8(&mut self, i: i8) {
        self.set(i as u64);
    }

    fn write_u8(&mut self, i: u8) {
        self.set(i as u64);
    }

    fn write_i16(&mut self, i: i16) {
        self.set(i as u64);
    }

    fn write_u16(&mut self, i: u16) {
        self.set(i as u64);
    }

    fn write_i32(&mut self, i: i32) {
        self.set(i as u64);
    }

    fn write_u32(&mut self, i: u32) {
        self.set(i as u64);
    }

    fn write_i64(&mut self, i: i64) {
        self.set(i as u64);
    }

    fn write_u64(&mut self, i: u64) {
        self.set(i);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn distinct_ids_hash_distinctly() {
        let hash = |id: i32| {
            let mut hasher = NumHasher.build_hasher();
            hasher.write_i32(id);
            hasher.finish()
        };

        assert_ne!(hash(0), hash(1));
        assert_ne!(hash(-1), hash(1));
        assert_eq!(hash(257), hash(257));
    }

    #[test]
    fn works_as_map_hasher() {
        let mut map: HashMap<i32, &str, NumHasher> = HashMap::with_hasher(NumHasher);
        map.insert(-255, "minecraft:netherite_block");
        map.insert(1, "minecraft:stone");

        assert_eq!(map.get(&-255), Some(&"minecraft:netherite_block"));
        assert_eq!(map.get(&1), Some(&"minecraft:stone"));
        assert_eq!(map.get(&2), None);
    }
}
