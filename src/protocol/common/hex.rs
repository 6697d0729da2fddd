use num_traits::{CheckedAdd, CheckedMul, FromPrimitive, Zero};

/// Lowercase hex digits, indexed by nibble value.
const HEX_CHARS: &[u8; 16] = b"0123456789abcdef";

#[derive(Debug, PartialEq, Eq)]
pub enum DecodeHexError {
    NotAscii,
    Empty,
    Overflow,
    InvalidOutput,
}

/// Decode a hex string into the specified integer.
pub fn decode_hex<I>(buf: &[u8]) -> Result<I, DecodeHexError>
where
    I: FromPrimitive + Zero + CheckedAdd + CheckedMul,
{
    use DecodeHexError::*;

    let radix = I::from_u8(16).ok_or(InvalidOutput)?;

    if buf.is_empty() {
        return Err(Empty);
    }

    let mut result = I::zero();

    for &digit in buf {
        let x = I::from_u8(ascii2byte(digit).ok_or(NotAscii)?).ok_or(InvalidOutput)?;
        result = result.checked_mul(&radix).ok_or(Overflow)?;
        result = result.checked_add(&x).ok_or(Overflow)?
    }

    Ok(result)
}

/// Decode the longest run of hex digits at the start of `buf`, ignoring
/// whatever follows. Returns `None` if `buf` doesn't start with a hex digit.
pub fn decode_hex_prefix<I>(buf: &[u8]) -> Option<I>
where
    I: FromPrimitive + Zero + CheckedAdd + CheckedMul,
{
    let len = buf.iter().take_while(|&&b| is_hex(b)).count();
    decode_hex(&buf[..len]).ok()
}

/// Decode a pair of hex chars (most-significant nibble first) into a byte.
pub fn decode_hex_byte(hi: u8, lo: u8) -> Option<u8> {
    Some(ascii2byte(hi)? << 4 | ascii2byte(lo)?)
}

/// Convert a single ascii hex char into its nibble value.
pub fn ascii2byte(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

/// Check if the byte `c` is a valid hex digit `[0-9][a-f][A-F]`
pub fn is_hex(c: u8) -> bool {
    ascii2byte(c).is_some()
}

/// Convert the low nibble of `nybble` into its (lowercase) ascii hex char.
#[inline]
pub fn nybble2ascii(nybble: u8) -> u8 {
    HEX_CHARS[(nybble & 0xf) as usize]
}

/// Encode a byte as a pair of lowercase hex chars, high nibble first.
#[inline]
pub fn encode_hex_byte(byte: u8) -> [u8; 2] {
    [nybble2ascii(byte >> 4), nybble2ascii(byte)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_hex_simple() {
        assert_eq!(decode_hex::<u64>(b"1000"), Ok(0x1000));
        assert_eq!(decode_hex::<u64>(b"DeadBeef"), Ok(0xdead_beef));
        assert_eq!(decode_hex::<u8>(b"0"), Ok(0));
    }

    #[test]
    fn decode_hex_errors() {
        assert_eq!(decode_hex::<u64>(b""), Err(DecodeHexError::Empty));
        assert_eq!(decode_hex::<u64>(b"12g4"), Err(DecodeHexError::NotAscii));
        assert_eq!(decode_hex::<u8>(b"100"), Err(DecodeHexError::Overflow));
    }

    #[test]
    fn decode_prefix_stops_at_non_hex() {
        assert_eq!(decode_hex_prefix::<u64>(b"80000000;junk"), Some(0x8000_0000));
        assert_eq!(decode_hex_prefix::<u64>(b"zz"), None);
        assert_eq!(decode_hex_prefix::<u64>(b""), None);
    }

    #[test]
    fn byte_pairs() {
        assert_eq!(decode_hex_byte(b'd', b'E'), Some(0xde));
        assert_eq!(decode_hex_byte(b'0', b'#'), None);
        assert_eq!(&encode_hex_byte(0xbe), b"be");
        assert_eq!(&encode_hex_byte(0x07), b"07");
    }
}
