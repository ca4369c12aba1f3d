use num_enum::FromPrimitive;

/// CDMA address numbering plan (4 bits). Reserved codes are kept verbatim.
#[derive(FromPrimitive)]
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum NumberingPlan {
    Unknown = 0b0000,
    IsdnTelephony = 0b0001,
    Data = 0b0011,
    Telex = 0b0100,
    Private = 0b1001,
    #[num_enum(catch_all)]
    Reserved(u8),
}

impl From<NumberingPlan> for u8 {
    fn from(plan: NumberingPlan) -> Self {
        match plan {
            NumberingPlan::Unknown => 0b0000,
            NumberingPlan::IsdnTelephony => 0b0001,
            NumberingPlan::Data => 0b0011,
            NumberingPlan::Telex => 0b0100,
            NumberingPlan::Private => 0b1001,
            NumberingPlan::Reserved(raw) => raw,
        }
    }
}

impl Default for NumberingPlan {
    fn default() -> Self {
        NumberingPlan::Unknown
    }
}

impl_bit_field!(infallible NumberingPlan, 4);
