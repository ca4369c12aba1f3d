// ABOUTME: Hex dump helper for logging and for reading test vectors
// ABOUTME: Formats octets as upper-case hex and parses hex strings back

use crate::codec::CodecError;
use std::fmt;

/// Displays a byte slice as upper-case hex.
pub struct HexData<'a>(pub &'a [u8]);

impl fmt::Display for HexData<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for b in self.0 {
            write!(f, "{b:02X}")?;
        }
        Ok(())
    }
}

impl HexData<'_> {
    /// Parses a hex string; ASCII whitespace is ignored and case does not matter.
    pub fn decode(data: &str) -> Result<Vec<u8>, CodecError> {
        let digits: Vec<u8> = data
            .bytes()
            .filter(|b| !b.is_ascii_whitespace())
            .collect();
        if digits.len() % 2 != 0 {
            return Err(CodecError::InvalidHex(format!(
                "odd number of hex digits ({})",
                digits.len()
            )));
        }
        digits
            .chunks(2)
            .map(|pair| {
                std::str::from_utf8(pair)
                    .ok()
                    .and_then(|s| u8::from_str_radix(s, 16).ok())
                    .ok_or_else(|| {
                        CodecError::InvalidHex(format!(
                            "{:?} is not a hex octet",
                            String::from_utf8_lossy(pair)
                        ))
                    })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_round_trip() {
        let bytes = HexData::decode("00 03 10 0a ff").unwrap();
        assert_eq!(bytes, vec![0x00, 0x03, 0x10, 0x0A, 0xFF]);
        assert_eq!(HexData(&bytes).to_string(), "0003100AFF");
    }

    #[test]
    fn test_hex_rejects_garbage() {
        assert!(matches!(HexData::decode("0g"), Err(CodecError::InvalidHex(_))));
        assert!(matches!(HexData::decode("abc"), Err(CodecError::InvalidHex(_))));
    }
}
