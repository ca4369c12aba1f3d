use num_enum::{IntoPrimitive, TryFromPrimitive};

/// CDMA address type of number (3 bits, carried only in 8-bit digit mode).
///
/// Values 1 and 2 are overloaded: for data-network addresses they mean an
/// internet protocol address and an email address respectively.
#[derive(TryFromPrimitive, IntoPrimitive)]
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TypeOfNumber {
    Unknown = 0b000,
    InternationalOrIp = 0b001,
    NationalOrEmail = 0b010,
    Network = 0b011,
    Subscriber = 0b100,
    Alphanumeric = 0b101,
    Abbreviated = 0b110,
    Reserved = 0b111,
}

impl Default for TypeOfNumber {
    fn default() -> Self {
        TypeOfNumber::Unknown
    }
}

impl_bit_field!(TypeOfNumber, 3);
