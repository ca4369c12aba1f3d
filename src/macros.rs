// ABOUTME: Macros that cut the boilerplate of fixed-width wire enumerations
// ABOUTME: Generates BitField implementations on top of the num_enum conversions

/// Implements [`BitField`](crate::codec::BitField) for a `#[repr(u8)]` enum.
///
/// The plain form is for `TryFromPrimitive` enums; a value with no variant
/// becomes a `FieldValidation` error, which the decoder treats as a dropped
/// field. The `infallible` form is for `FromPrimitive` enums carrying a
/// `catch_all` variant.
///
/// Both forms expect a `From<$ty> for u8` conversion, either derived with
/// `IntoPrimitive` or written by hand next to the enum.
macro_rules! impl_bit_field {
    ($ty:ident, $bits:expr) => {
        impl $crate::codec::BitField for $ty {
            const WIDTH: u32 = $bits;

            fn from_raw(raw: u32) -> Result<Self, $crate::codec::CodecError> {
                <$ty as num_enum::TryFromPrimitive>::try_from_primitive(raw as u8).map_err(|_| {
                    $crate::codec::CodecError::FieldValidation {
                        field: stringify!($ty),
                        reason: format!("no variant for value {raw:#x}"),
                    }
                })
            }

            fn into_raw(self) -> u32 {
                u32::from(u8::from(self))
            }
        }
    };
    (infallible $ty:ident, $bits:expr) => {
        impl $crate::codec::BitField for $ty {
            const WIDTH: u32 = $bits;

            fn from_raw(raw: u32) -> Result<Self, $crate::codec::CodecError> {
                Ok(<$ty as num_enum::FromPrimitive>::from_primitive(raw as u8))
            }

            fn into_raw(self) -> u32 {
                u32::from(u8::from(self))
            }
        }
    };
}
