// ABOUTME: GSM 03.38 default alphabet with its escape extension table
// ABOUTME: Converts text to septets and packs septets least significant bit first

use crate::codec::CodecError;

/// Escape to the extension table.
pub const ESCAPE: u8 = 0x1B;
/// Septet for a space, substituted for characters outside the alphabet.
pub const SPACE: u8 = 0x20;

#[rustfmt::skip]
const BASIC: [char; 128] = [
    '@', '£', '$', '¥', 'è', 'é', 'ù', 'ì', 'ò', 'Ç', '\n', 'Ø', 'ø', '\r', 'Å', 'å',
    'Δ', '_', 'Φ', 'Γ', 'Λ', 'Ω', 'Π', 'Ψ', 'Σ', 'Θ', 'Ξ', '\u{A0}', 'Æ', 'æ', 'ß', 'É',
    ' ', '!', '"', '#', '¤', '%', '&', '\'', '(', ')', '*', '+', ',', '-', '.', '/',
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', ':', ';', '<', '=', '>', '?',
    '¡', 'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M', 'N', 'O',
    'P', 'Q', 'R', 'S', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z', 'Ä', 'Ö', 'Ñ', 'Ü', '§',
    '¿', 'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i', 'j', 'k', 'l', 'm', 'n', 'o',
    'p', 'q', 'r', 's', 't', 'u', 'v', 'w', 'x', 'y', 'z', 'ä', 'ö', 'ñ', 'ü', 'à',
];

const EXTENSION: [(char, u8); 10] = [
    ('\u{0C}', 0x0A),
    ('^', 0x14),
    ('{', 0x28),
    ('}', 0x29),
    ('\\', 0x2F),
    ('[', 0x3C),
    ('~', 0x3D),
    (']', 0x3E),
    ('|', 0x40),
    ('€', 0x65),
];

/// Septets for one character: one from the basic table or an escape pair.
fn encode_char(ch: char, dest: &mut Vec<u8>) -> bool {
    if ch.is_ascii_alphanumeric() {
        dest.push(ch as u8);
        return true;
    }
    // 0x1B is the escape slot, never a character
    if let Some(code) = BASIC
        .iter()
        .enumerate()
        .position(|(code, &c)| c == ch && code != usize::from(ESCAPE))
    {
        dest.push(code as u8);
        return true;
    }
    if let Some(&(_, code)) = EXTENSION.iter().find(|(c, _)| *c == ch) {
        dest.push(ESCAPE);
        dest.push(code);
        return true;
    }
    false
}

/// Converts text to unpacked septets, or `None` if a character is outside
/// the alphabet.
pub fn try_encode(text: &str) -> Option<Vec<u8>> {
    let mut septets = Vec::with_capacity(text.len());
    for ch in text.chars() {
        if !encode_char(ch, &mut septets) {
            return None;
        }
    }
    Some(septets)
}

/// Converts text to unpacked septets, substituting a space for characters
/// outside the alphabet.
pub fn encode_lossy(text: &str) -> Vec<u8> {
    let mut septets = Vec::with_capacity(text.len());
    for ch in text.chars() {
        if !encode_char(ch, &mut septets) {
            septets.push(SPACE);
        }
    }
    septets
}

/// Converts unpacked septets to text. An escape followed by a code with no
/// extension entry yields the basic character for that code.
pub fn decode(septets: &[u8]) -> String {
    let mut text = String::with_capacity(septets.len());
    let mut iter = septets.iter().map(|s| s & 0x7F);
    while let Some(septet) = iter.next() {
        if septet == ESCAPE {
            let Some(code) = iter.next() else {
                break;
            };
            match EXTENSION.iter().find(|(_, c)| *c == code) {
                Some(&(ch, _)) => text.push(ch),
                None => text.push(BASIC[usize::from(code)]),
            }
        } else {
            text.push(BASIC[usize::from(septet)]);
        }
    }
    text
}

/// Packs septets into `buf` starting at septet index `offset`. The buffer
/// must already be long enough; bits outside the written septets are kept.
pub fn pack(buf: &mut [u8], offset: usize, septets: &[u8]) {
    for (i, &septet) in septets.iter().enumerate() {
        let bit = (offset + i) * 7;
        let index = bit / 8;
        let shift = bit % 8;
        let septet = septet & 0x7F;
        buf[index] |= septet << shift;
        if shift > 1 {
            buf[index + 1] |= septet >> (8 - shift);
        }
    }
}

/// Octets needed to hold `septets` septets.
pub fn packed_len(septets: usize) -> usize {
    (septets * 7).div_ceil(8)
}

/// Unpacks `count` septets starting at septet index `offset`.
pub fn unpack(buf: &[u8], offset: usize, count: usize) -> Result<Vec<u8>, CodecError> {
    let needed = packed_len(offset + count);
    if needed > buf.len() {
        return Err(CodecError::Underflow {
            wanted: (offset + count) * 7,
            remaining: buf.len() * 8,
        });
    }
    let mut septets = Vec::with_capacity(count);
    for i in offset..offset + count {
        let bit = i * 7;
        let index = bit / 8;
        let shift = bit % 8;
        let mut septet = buf[index] >> shift;
        if shift > 1 {
            septet |= buf[index + 1] << (8 - shift);
        }
        septets.push(septet & 0x7F);
    }
    Ok(septets)
}
