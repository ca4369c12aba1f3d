// ABOUTME: Bearer Data priority indicator (sub-parameter 0x08)
// ABOUTME: Two-bit urgency level requested by the originator

use num_enum::{IntoPrimitive, TryFromPrimitive};

/// Priority indicator.
///
/// The message center and the handset may use the level to order delivery
/// and to choose how insistently the user is notified.
#[derive(TryFromPrimitive, IntoPrimitive)]
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Priority {
    Normal = 0,
    Interactive = 1,
    Urgent = 2,
    Emergency = 3,
}

impl_bit_field!(Priority, 2);
