// ABOUTME: CDMA user data message encodings (the 5-bit MSG_ENCODING field)
// ABOUTME: Knows each encoding's unit width, charset name and whether it carries a message type octet

use crate::codec::{BitField, CodecError};
use std::fmt;

/// User data message encoding.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageEncoding {
    /// Raw octets
    Octet,
    /// IS-91 extended protocol; followed by an IS-91 message type octet
    Is91ExtendedProtocol,
    /// 7-bit ASCII
    Ascii7Bit,
    /// IA5 (ITU-T T.50), packed like 7-bit ASCII
    Ia5,
    /// UTF-16 big-endian code units
    Unicode16,
    ShiftJis,
    Korean,
    /// ISO-8859-8
    LatinHebrew,
    /// ISO-8859-1
    Latin,
    /// GSM 03.38 default alphabet, septet packed
    Gsm7Bit,
    /// GSM data coding scheme; followed by the GSM DCS octet
    GsmDcs,
    /// Reserved value
    Reserved(u8),
}

impl MessageEncoding {
    pub fn from_byte(value: u8) -> Self {
        match value {
            0x00 => MessageEncoding::Octet,
            0x01 => MessageEncoding::Is91ExtendedProtocol,
            0x02 => MessageEncoding::Ascii7Bit,
            0x03 => MessageEncoding::Ia5,
            0x04 => MessageEncoding::Unicode16,
            0x05 => MessageEncoding::ShiftJis,
            0x06 => MessageEncoding::Korean,
            0x07 => MessageEncoding::LatinHebrew,
            0x08 => MessageEncoding::Latin,
            0x09 => MessageEncoding::Gsm7Bit,
            0x0A => MessageEncoding::GsmDcs,
            _ => MessageEncoding::Reserved(value),
        }
    }

    pub fn to_byte(&self) -> u8 {
        match self {
            MessageEncoding::Octet => 0x00,
            MessageEncoding::Is91ExtendedProtocol => 0x01,
            MessageEncoding::Ascii7Bit => 0x02,
            MessageEncoding::Ia5 => 0x03,
            MessageEncoding::Unicode16 => 0x04,
            MessageEncoding::ShiftJis => 0x05,
            MessageEncoding::Korean => 0x06,
            MessageEncoding::LatinHebrew => 0x07,
            MessageEncoding::Latin => 0x08,
            MessageEncoding::Gsm7Bit => 0x09,
            MessageEncoding::GsmDcs => 0x0A,
            MessageEncoding::Reserved(value) => *value,
        }
    }

    /// IS-91 and GSM DCS payloads are preceded by an 8-bit message type.
    pub fn has_message_type(&self) -> bool {
        matches!(
            self,
            MessageEncoding::Is91ExtendedProtocol | MessageEncoding::GsmDcs
        )
    }

    /// True for encodings whose payload is converted to and from text.
    pub fn is_text(&self) -> bool {
        !matches!(
            self,
            MessageEncoding::Is91ExtendedProtocol
                | MessageEncoding::GsmDcs
                | MessageEncoding::Reserved(_)
        )
    }

    pub fn charset_name(&self) -> &'static str {
        match self {
            MessageEncoding::Octet => "Octet",
            MessageEncoding::Is91ExtendedProtocol => "IS-91 Extended Protocol",
            MessageEncoding::Ascii7Bit => "7-bit ASCII",
            MessageEncoding::Ia5 => "IA5",
            MessageEncoding::Unicode16 => "UTF-16",
            MessageEncoding::ShiftJis => "Shift-JIS",
            MessageEncoding::Korean => "KSC5601",
            MessageEncoding::LatinHebrew => "ISO-8859-8",
            MessageEncoding::Latin => "ISO-8859-1",
            MessageEncoding::Gsm7Bit => "GSM 7-bit Default",
            MessageEncoding::GsmDcs => "GSM DCS",
            MessageEncoding::Reserved(_) => "Reserved",
        }
    }
}

impl BitField for MessageEncoding {
    const WIDTH: u32 = 5;

    fn from_raw(raw: u32) -> Result<Self, CodecError> {
        Ok(Self::from_byte(raw as u8))
    }

    fn into_raw(self) -> u32 {
        u32::from(self.to_byte())
    }
}

impl fmt::Display for MessageEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageEncoding::Reserved(value) => write!(f, "Reserved (0x{value:02X})"),
            _ => write!(f, "{}", self.charset_name()),
        }
    }
}

impl fmt::Debug for MessageEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageEncoding::Reserved(value) => write!(f, "MessageEncoding::Reserved(0x{value:02X})"),
            _ => write!(
                f,
                "MessageEncoding::{} (0x{:02X})",
                self.charset_name().replace([' ', '-'], ""),
                self.to_byte()
            ),
        }
    }
}

impl From<u8> for MessageEncoding {
    fn from(value: u8) -> Self {
        Self::from_byte(value)
    }
}

impl From<MessageEncoding> for u8 {
    fn from(encoding: MessageEncoding) -> Self {
        encoding.to_byte()
    }
}
