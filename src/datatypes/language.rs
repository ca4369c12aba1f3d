use num_enum::FromPrimitive;

/// Language indicator (sub-parameter 0x0D).
///
/// Codes beyond the ones assigned here are carried as `Other` so that a
/// decoded record re-encodes unchanged.
#[derive(FromPrimitive)]
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Language {
    Unknown = 0x00,
    English = 0x01,
    French = 0x02,
    Spanish = 0x03,
    Japanese = 0x04,
    Korean = 0x05,
    Chinese = 0x06,
    Hebrew = 0x07,
    #[num_enum(catch_all)]
    Other(u8),
}

impl From<Language> for u8 {
    fn from(language: Language) -> Self {
        match language {
            Language::Unknown => 0x00,
            Language::English => 0x01,
            Language::French => 0x02,
            Language::Spanish => 0x03,
            Language::Japanese => 0x04,
            Language::Korean => 0x05,
            Language::Chinese => 0x06,
            Language::Hebrew => 0x07,
            Language::Other(code) => code,
        }
    }
}

impl_bit_field!(infallible Language, 8);
