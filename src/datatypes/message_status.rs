// ABOUTME: Message status sub-parameter (0x14) reported with delivery acknowledgements
// ABOUTME: Splits into a 2-bit error class and a 6-bit status code

use crate::bits::{BitReader, BitWriter};
use crate::codec::{BitField, CodecError, Decodable, Encodable};
use num_enum::{IntoPrimitive, TryFromPrimitive};

#[derive(TryFromPrimitive, IntoPrimitive)]
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ErrorClass {
    NoError = 0,
    Reserved = 1,
    Temporary = 2,
    Permanent = 3,
}

impl_bit_field!(ErrorClass, 2);

/// Delivery outcome reported by the message center.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MessageStatus {
    pub error_class: ErrorClass,
    /// Six-bit status code; only the low six bits reach the wire.
    pub status_code: u8,
}

impl MessageStatus {
    pub const ACCEPTED: u8 = 0x00;
    pub const DEPOSITED_TO_INTERNET: u8 = 0x01;
    pub const DELIVERED: u8 = 0x02;
    pub const CANCELLED: u8 = 0x03;
    pub const NETWORK_CONGESTION: u8 = 0x04;
    pub const NETWORK_ERROR: u8 = 0x05;
    pub const CANCEL_FAILED: u8 = 0x06;
    pub const BLOCKED_DESTINATION: u8 = 0x07;
    pub const TEXT_TOO_LONG: u8 = 0x08;
    pub const DUPLICATE_MESSAGE: u8 = 0x09;
    pub const INVALID_DESTINATION: u8 = 0x0A;
    pub const MESSAGE_EXPIRED: u8 = 0x0D;
    pub const UNKNOWN_ERROR: u8 = 0x1F;

    pub fn new(error_class: ErrorClass, status_code: u8) -> Self {
        Self {
            error_class,
            status_code: status_code & 0x3F,
        }
    }

    pub fn is_delivered(&self) -> bool {
        self.error_class == ErrorClass::NoError && self.status_code == Self::DELIVERED
    }
}

impl Decodable for MessageStatus {
    fn decode(reader: &mut BitReader<'_>) -> Result<Self, CodecError> {
        let error_class = ErrorClass::read_from(reader)?;
        let status_code = reader.read_u8(6)?;
        Ok(Self {
            error_class,
            status_code,
        })
    }
}

impl Encodable for MessageStatus {
    fn encode(&self, writer: &mut BitWriter) -> Result<(), CodecError> {
        self.error_class.write_to(writer);
        writer.write(u32::from(self.status_code), 6);
        Ok(())
    }
}
