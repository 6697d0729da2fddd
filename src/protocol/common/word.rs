/// Converts register words between their numeric value and the byte sequence
/// sent over the wire.
///
/// The debugger expects register contents in the _target's_ byte order,
/// rendered as hex pairs. On a big-endian target that is simply the value
/// printed most-significant byte first; on a little-endian target the bytes
/// are swapped first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WordCodec {
    size: usize,
    big_endian: bool,
}

impl WordCodec {
    /// `size` must be within `1..=8`. This is checked by the builder.
    pub fn new(size: usize, big_endian: bool) -> WordCodec {
        debug_assert!((1..=8).contains(&size));
        WordCodec { size, big_endian }
    }

    /// Width of a word in bytes.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Width of a word once hex encoded.
    pub fn hex_len(&self) -> usize {
        self.size * 2
    }

    /// Lay out `val` in wire order. Bits beyond the word size are dropped.
    pub fn to_wire(&self, val: u64, out: &mut [u8; 8]) -> usize {
        if self.big_endian {
            let bytes = val.to_be_bytes();
            out[..self.size].copy_from_slice(&bytes[8 - self.size..]);
        } else {
            let bytes = val.to_le_bytes();
            out[..self.size].copy_from_slice(&bytes[..self.size]);
        }
        self.size
    }

    /// Inverse of [`to_wire`](Self::to_wire). `bytes` must hold exactly one
    /// word.
    pub fn from_wire(&self, bytes: &[u8]) -> u64 {
        let fold = |acc: u64, b: &u8| (acc << 8) | u64::from(*b);
        if self.big_endian {
            bytes.iter().fold(0, fold)
        } else {
            bytes.iter().rev().fold(0, fold)
        }
    }
}
