use num_enum::{IntoPrimitive, TryFromPrimitive};

/// Alert on message delivery (sub-parameter 0x0C).
///
/// `Default` asks the handset to use its configured alert; the other levels
/// select a low, medium or high priority alert.
#[derive(TryFromPrimitive, IntoPrimitive)]
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Alert {
    Default = 0,
    Low = 1,
    Medium = 2,
    High = 3,
}

impl_bit_field!(Alert, 2);
