use num_enum::{IntoPrimitive, TryFromPrimitive};

/// Message display mode (sub-parameter 0x0F).
#[derive(TryFromPrimitive, IntoPrimitive)]
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DisplayMode {
    /// Show the message as soon as it arrives.
    Immediate = 0,
    /// Use the handset's default setting.
    Default = 1,
    /// Let the user's own setting decide.
    User = 2,
    Reserved = 3,
}

impl_bit_field!(DisplayMode, 2);
