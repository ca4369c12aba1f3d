use num_enum::{IntoPrimitive, TryFromPrimitive};

/// Privacy indicator (sub-parameter 0x09).
#[derive(TryFromPrimitive, IntoPrimitive)]
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Privacy {
    NotRestricted = 0,
    Restricted = 1,
    Confidential = 2,
    Secret = 3,
}

impl_bit_field!(Privacy, 2);
