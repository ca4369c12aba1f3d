//! Character-set codec for the user data payload.
//!
//! A payload is the bit string following the `num_fields` octet of the user
//! data sub-parameter, re-aligned to octet boundaries. When a user data
//! header is present it occupies the first octets of the payload and the
//! text follows it. How the text is laid out after the header, and what
//! `num_fields` counts, depends on the encoding:
//!
//! | encoding          | unit            | `num_fields` counts                    |
//! |-------------------|-----------------|----------------------------------------|
//! | 7-bit ASCII, IA5  | 7 bits, MSB first | text characters                      |
//! | GSM 7-bit         | septet, LSB first | header septets + text septets        |
//! | UTF-16            | 16-bit code unit  | header code units + text code units  |
//! | octet and 8-bit   | octet             | text octets                          |

pub mod gsm_alphabet;

use crate::bits::{BitReader, BitWriter};
use crate::codec::CodecError;
use crate::datatypes::MessageEncoding;
use bytes::{BufMut, Bytes, BytesMut};
use encoding::all::{ISO_8859_8, UTF_16BE, WINDOWS_31J, WINDOWS_949};
use encoding::{DecoderTrap, EncoderTrap, Encoding, EncodingRef};
use tracing::debug;

/// Code substituted for characters 7-bit ASCII cannot carry.
const UNENCODABLE_7BIT: u8 = 0x20;

/// Text packed into a payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedPayload {
    pub payload: Bytes,
    /// Significant bits in `payload`; the rest of the last octet is padding.
    pub bits: usize,
    pub num_fields: u8,
}

/// Text recovered from a payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedText {
    pub text: String,
    /// Octets of the payload covered by the header and text.
    pub used: usize,
}

/// Whether every character of `text` is representable in `encoding`
/// without substitution.
pub fn can_encode(encoding: MessageEncoding, text: &str) -> bool {
    match encoding {
        MessageEncoding::Ascii7Bit | MessageEncoding::Ia5 => {
            text.chars().all(|ch| ascii_code(ch).is_some())
        }
        MessageEncoding::Gsm7Bit => gsm_alphabet::try_encode(text).is_some(),
        MessageEncoding::Unicode16 => true,
        MessageEncoding::Octet | MessageEncoding::Latin => {
            text.chars().all(|ch| u8::try_from(ch).is_ok())
        }
        MessageEncoding::ShiftJis | MessageEncoding::Korean | MessageEncoding::LatinHebrew => {
            multibyte_charset(encoding)
                .is_some_and(|charset| charset.encode(text, EncoderTrap::Strict).is_ok())
        }
        MessageEncoding::Is91ExtendedProtocol
        | MessageEncoding::GsmDcs
        | MessageEncoding::Reserved(_) => false,
    }
}

/// Packs `header` (its length octet included, or empty) and `text`.
/// Characters the encoding cannot carry are substituted.
pub fn encode(
    encoding: MessageEncoding,
    text: &str,
    header: &[u8],
) -> Result<EncodedPayload, CodecError> {
    match encoding {
        MessageEncoding::Ascii7Bit | MessageEncoding::Ia5 => encode_7bit_ascii(text, header),
        MessageEncoding::Gsm7Bit => encode_gsm_7bit(text, header),
        MessageEncoding::Unicode16 => encode_utf16(text, header),
        MessageEncoding::Octet | MessageEncoding::Latin => {
            let octets: Vec<u8> = text
                .chars()
                .map(|ch| u8::try_from(ch).unwrap_or(b'?'))
                .collect();
            encode_octets(&octets, header)
        }
        MessageEncoding::ShiftJis | MessageEncoding::Korean | MessageEncoding::LatinHebrew => {
            let charset =
                multibyte_charset(encoding).ok_or(CodecError::UnsupportedEncoding(encoding))?;
            let octets = charset
                .encode(text, EncoderTrap::Replace)
                .map_err(|_| CodecError::UnsupportedEncoding(encoding))?;
            encode_octets(&octets, header)
        }
        MessageEncoding::Is91ExtendedProtocol
        | MessageEncoding::GsmDcs
        | MessageEncoding::Reserved(_) => Err(CodecError::UnsupportedEncoding(encoding)),
    }
}

/// Recovers the text that follows a `header_len`-octet header.
pub fn decode(
    encoding: MessageEncoding,
    payload: &[u8],
    header_len: usize,
    num_fields: u8,
) -> Result<DecodedText, CodecError> {
    let count = usize::from(num_fields);
    match encoding {
        MessageEncoding::Ascii7Bit | MessageEncoding::Ia5 => {
            let mut reader = BitReader::new(payload);
            reader.skip(header_len * 8)?;
            let mut text = String::with_capacity(count);
            for _ in 0..count {
                text.push(ascii_char(reader.read_u8(7)?));
            }
            Ok(DecodedText {
                text,
                used: header_len + (count * 7).div_ceil(8),
            })
        }
        MessageEncoding::Gsm7Bit => {
            let offset = gsm_header_septets(header_len);
            let text_septets = count.saturating_sub(offset);
            let septets = gsm_alphabet::unpack(payload, offset, text_septets)?;
            Ok(DecodedText {
                text: gsm_alphabet::decode(&septets),
                used: gsm_alphabet::packed_len(offset + text_septets),
            })
        }
        MessageEncoding::Unicode16 => {
            let units = count.saturating_sub(header_len.div_ceil(2));
            let octets = take(payload, header_len, units * 2)?;
            let text = UTF_16BE
                .decode(octets, DecoderTrap::Replace)
                .map_err(|e| CodecError::FieldValidation {
                    field: "user_data",
                    reason: e.into_owned(),
                })?;
            Ok(DecodedText {
                text,
                used: (header_len + units * 2).max(count * 2),
            })
        }
        MessageEncoding::Octet | MessageEncoding::Latin => {
            let octets = take(payload, header_len, count)?;
            Ok(DecodedText {
                text: octets.iter().map(|&b| char::from(b)).collect(),
                used: header_len + count,
            })
        }
        MessageEncoding::ShiftJis | MessageEncoding::Korean | MessageEncoding::LatinHebrew => {
            let charset =
                multibyte_charset(encoding).ok_or(CodecError::UnsupportedEncoding(encoding))?;
            let octets = take(payload, header_len, count)?;
            let text = charset
                .decode(octets, DecoderTrap::Replace)
                .map_err(|e| CodecError::FieldValidation {
                    field: "user_data",
                    reason: e.into_owned(),
                })?;
            Ok(DecodedText {
                text,
                used: header_len + count,
            })
        }
        MessageEncoding::Is91ExtendedProtocol
        | MessageEncoding::GsmDcs
        | MessageEncoding::Reserved(_) => Err(CodecError::UnsupportedEncoding(encoding)),
    }
}

fn multibyte_charset(encoding: MessageEncoding) -> Option<EncodingRef> {
    match encoding {
        MessageEncoding::ShiftJis => Some(WINDOWS_31J),
        MessageEncoding::Korean => Some(WINDOWS_949),
        MessageEncoding::LatinHebrew => Some(ISO_8859_8),
        _ => None,
    }
}

fn take(payload: &[u8], start: usize, len: usize) -> Result<&[u8], CodecError> {
    payload.get(start..start + len).ok_or(CodecError::Underflow {
        wanted: (start + len) * 8,
        remaining: payload.len() * 8,
    })
}

fn num_fields(count: usize) -> Result<u8, CodecError> {
    u8::try_from(count).map_err(|_| CodecError::FieldValidation {
        field: "num_fields",
        reason: format!("{count} characters exceed 255"),
    })
}

/// Septets spanned by a header, rounded up to a septet boundary.
fn gsm_header_septets(header_len: usize) -> usize {
    (header_len * 8).div_ceil(7)
}

fn ascii_code(ch: char) -> Option<u8> {
    match ch {
        ' '..='~' | '\n' | '\r' => Some(ch as u8),
        _ => None,
    }
}

fn ascii_char(code: u8) -> char {
    match code {
        0x20..=0x7E | 0x0A | 0x0D => char::from(code),
        _ => ' ',
    }
}

fn encode_7bit_ascii(text: &str, header: &[u8]) -> Result<EncodedPayload, CodecError> {
    let mut writer = BitWriter::new();
    writer.write_bytes(header, header.len() * 8);
    let mut count = 0;
    for ch in text.chars() {
        let code = ascii_code(ch).unwrap_or_else(|| {
            debug!("Substituting space for {:?} in 7-bit ASCII", ch);
            UNENCODABLE_7BIT
        });
        writer.write(u32::from(code), 7);
        count += 1;
    }
    let bits = writer.bit_len();
    Ok(EncodedPayload {
        payload: writer.into_bytes(),
        bits,
        num_fields: num_fields(count)?,
    })
}

fn encode_gsm_7bit(text: &str, header: &[u8]) -> Result<EncodedPayload, CodecError> {
    let septets = gsm_alphabet::encode_lossy(text);
    let offset = gsm_header_septets(header.len());
    let total = offset + septets.len();

    let mut payload = vec![0u8; gsm_alphabet::packed_len(total)];
    payload[..header.len()].copy_from_slice(header);
    gsm_alphabet::pack(&mut payload, offset, &septets);

    Ok(EncodedPayload {
        payload: Bytes::from(payload),
        bits: total * 7,
        num_fields: num_fields(total)?,
    })
}

fn encode_utf16(text: &str, header: &[u8]) -> Result<EncodedPayload, CodecError> {
    let units = UTF_16BE
        .encode(text, EncoderTrap::Strict)
        .map_err(|_| CodecError::UnsupportedEncoding(MessageEncoding::Unicode16))?;

    let mut buf = BytesMut::with_capacity(header.len() + units.len() + 1);
    buf.put_slice(header);
    buf.put_slice(&units);
    if header.len() % 2 == 1 {
        buf.put_u8(0);
    }
    let bits = buf.len() * 8;
    Ok(EncodedPayload {
        num_fields: num_fields(buf.len() / 2)?,
        payload: buf.freeze(),
        bits,
    })
}

fn encode_octets(octets: &[u8], header: &[u8]) -> Result<EncodedPayload, CodecError> {
    let mut buf = BytesMut::with_capacity(header.len() + octets.len());
    buf.put_slice(header);
    buf.put_slice(octets);
    let bits = buf.len() * 8;
    Ok(EncodedPayload {
        num_fields: num_fields(octets.len())?,
        payload: buf.freeze(),
        bits,
    })
}
