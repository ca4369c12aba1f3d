// ABOUTME: CDMA SMS address codec used for the callback number and the transport envelope
// ABOUTME: Field widths and the presence of type/plan fields depend on the digit mode

use crate::bits::{BitReader, BitWriter};
use crate::codec::{BitField, CodecError, Decodable, Encodable};
use crate::datatypes::{NumberingPlan, TypeOfNumber};
use num_enum::{IntoPrimitive, TryFromPrimitive};
use std::fmt;

#[derive(TryFromPrimitive, IntoPrimitive)]
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DigitMode {
    /// Four-bit DTMF digit codes.
    Dtmf = 0,
    /// Eight-bit characters.
    EightBit = 1,
}

impl_bit_field!(DigitMode, 1);

#[derive(TryFromPrimitive, IntoPrimitive)]
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum NumberMode {
    /// Telephone number, numbering plan applies.
    NotDataNetwork = 0,
    /// Data network address such as an email or IP address.
    DataNetwork = 1,
}

impl_bit_field!(NumberMode, 1);

/// Which bit layout an address uses on the wire.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AddressLayout {
    /// Bearer Data callback number: `digit_mode(1) [ton(3) plan(4)] count(8) digits`.
    CallbackNumber,
    /// Transport layer originating/destination address:
    /// `digit_mode(1) number_mode(1) [ton(3)] [plan(4)] count(8) digits`.
    Transport,
}

/// Widths in bits for one digit-mode arm; zero means the field is absent.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
struct FieldWidths {
    type_of_number: u32,
    numbering_plan: u32,
    digit: u32,
}

impl DigitMode {
    pub const fn digit_bits(self) -> u32 {
        match self {
            DigitMode::Dtmf => 4,
            DigitMode::EightBit => 8,
        }
    }

    fn widths(self, layout: AddressLayout, number_mode: NumberMode) -> FieldWidths {
        match (self, layout) {
            (DigitMode::Dtmf, _) => FieldWidths {
                type_of_number: 0,
                numbering_plan: 0,
                digit: self.digit_bits(),
            },
            (DigitMode::EightBit, AddressLayout::CallbackNumber) => FieldWidths {
                type_of_number: TypeOfNumber::WIDTH,
                numbering_plan: NumberingPlan::WIDTH,
                digit: self.digit_bits(),
            },
            (DigitMode::EightBit, AddressLayout::Transport) => FieldWidths {
                type_of_number: TypeOfNumber::WIDTH,
                numbering_plan: match number_mode {
                    NumberMode::NotDataNetwork => NumberingPlan::WIDTH,
                    NumberMode::DataNetwork => 0,
                },
                digit: self.digit_bits(),
            },
        }
    }
}

/// A telephone number or data network address.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CdmaSmsAddress {
    pub digit_mode: DigitMode,
    pub number_mode: NumberMode,
    /// Only meaningful in 8-bit digit mode.
    pub ton: TypeOfNumber,
    /// Only meaningful in 8-bit digit mode with a telephone number.
    pub numbering_plan: NumberingPlan,
    pub address: String,
}

impl CdmaSmsAddress {
    /// A DTMF address; valid characters are `0-9`, `*` and `#`.
    pub fn dtmf(digits: &str) -> Self {
        Self {
            digit_mode: DigitMode::Dtmf,
            number_mode: NumberMode::NotDataNetwork,
            ton: TypeOfNumber::Unknown,
            numbering_plan: NumberingPlan::Unknown,
            address: digits.to_string(),
        }
    }

    /// An 8-bit character address.
    pub fn eight_bit(address: &str, ton: TypeOfNumber, numbering_plan: NumberingPlan) -> Self {
        Self {
            digit_mode: DigitMode::EightBit,
            number_mode: NumberMode::NotDataNetwork,
            ton,
            numbering_plan,
            address: address.to_string(),
        }
    }

    /// The digit count carried on the wire.
    pub fn number_of_digits(&self) -> usize {
        self.address.chars().count()
    }

    pub fn read(reader: &mut BitReader<'_>, layout: AddressLayout) -> Result<Self, CodecError> {
        let digit_mode = DigitMode::read_from(reader)?;
        let number_mode = match layout {
            AddressLayout::Transport => NumberMode::read_from(reader)?,
            AddressLayout::CallbackNumber => NumberMode::NotDataNetwork,
        };
        let widths = digit_mode.widths(layout, number_mode);

        let ton = if widths.type_of_number > 0 {
            TypeOfNumber::read_from(reader)?
        } else {
            TypeOfNumber::Unknown
        };
        let numbering_plan = if widths.numbering_plan > 0 {
            NumberingPlan::read_from(reader)?
        } else {
            NumberingPlan::Unknown
        };

        let count = reader.read(8)? as usize;
        let mut address = String::with_capacity(count);
        for _ in 0..count {
            let code = reader.read_u8(widths.digit)?;
            let ch = match digit_mode {
                DigitMode::Dtmf => dtmf_to_char(code).ok_or_else(|| CodecError::FieldValidation {
                    field: "address",
                    reason: format!("invalid DTMF digit code {code}"),
                })?,
                DigitMode::EightBit => char::from(code),
            };
            address.push(ch);
        }

        Ok(Self {
            digit_mode,
            number_mode,
            ton,
            numbering_plan,
            address,
        })
    }

    pub fn write(&self, writer: &mut BitWriter, layout: AddressLayout) -> Result<(), CodecError> {
        let codes = self.digit_codes()?;
        let count = u8::try_from(codes.len()).map_err(|_| CodecError::FieldValidation {
            field: "address",
            reason: format!("{} digits exceed 255", codes.len()),
        })?;
        let widths = self.digit_mode.widths(layout, self.number_mode);

        self.digit_mode.write_to(writer);
        if layout == AddressLayout::Transport {
            self.number_mode.write_to(writer);
        }
        if widths.type_of_number > 0 {
            self.ton.write_to(writer);
        }
        if widths.numbering_plan > 0 {
            self.numbering_plan.write_to(writer);
        }
        writer.write(u32::from(count), 8);
        for code in codes {
            writer.write(u32::from(code), widths.digit);
        }
        Ok(())
    }

    fn digit_codes(&self) -> Result<Vec<u8>, CodecError> {
        self.address
            .chars()
            .map(|ch| {
                let code = match self.digit_mode {
                    DigitMode::Dtmf => char_to_dtmf(ch),
                    DigitMode::EightBit => u8::try_from(ch).ok(),
                };
                code.ok_or_else(|| CodecError::FieldValidation {
                    field: "address",
                    reason: format!("{ch:?} cannot be sent in {:?} digit mode", self.digit_mode),
                })
            })
            .collect()
    }
}

impl Decodable for CdmaSmsAddress {
    fn decode(reader: &mut BitReader<'_>) -> Result<Self, CodecError> {
        Self::read(reader, AddressLayout::CallbackNumber)
    }
}

impl Encodable for CdmaSmsAddress {
    fn encode(&self, writer: &mut BitWriter) -> Result<(), CodecError> {
        self.write(writer, AddressLayout::CallbackNumber)
    }
}

impl fmt::Display for CdmaSmsAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.address)
    }
}

/// DTMF codes: 1-9 are the digits themselves, 10 is `0`, 11 is `*`, 12 is `#`.
fn dtmf_to_char(code: u8) -> Option<char> {
    match code {
        1..=9 => Some(char::from(b'0' + code)),
        10 => Some('0'),
        11 => Some('*'),
        12 => Some('#'),
        _ => None,
    }
}

fn char_to_dtmf(ch: char) -> Option<u8> {
    match ch {
        '1'..='9' => Some(ch as u8 - b'0'),
        '0' => Some(10),
        '*' => Some(11),
        '#' => Some(12),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn round_trip(address: &CdmaSmsAddress, layout: AddressLayout) -> CdmaSmsAddress {
        let mut writer = BitWriter::new();
        address.write(&mut writer, layout).unwrap();
        let bytes = writer.into_bytes();
        let mut reader = BitReader::new(&bytes);
        CdmaSmsAddress::read(&mut reader, layout).unwrap()
    }

    #[test]
    fn test_dtmf_digit_codes() {
        // 0x05 0x2d 0x4c 0x90 0xa5 0x50 0x80 from a callback number sub-parameter
        let data = [0x05, 0x2d, 0x4c, 0x90, 0xa5, 0x50, 0x80];
        let mut reader = BitReader::new(&data);
        let address = CdmaSmsAddress::decode(&mut reader).unwrap();
        assert_eq!(address.digit_mode, DigitMode::Dtmf);
        assert_eq!(address.address, "5099214001");
        assert_eq!(address.number_of_digits(), 10);
    }

    #[test]
    fn test_eight_bit_callback_layout() {
        let data = [0x91, 0x04, 0x31, 0x32, 0x33, 0x34];
        let mut reader = BitReader::new(&data);
        let address = CdmaSmsAddress::decode(&mut reader).unwrap();
        assert_eq!(address.digit_mode, DigitMode::EightBit);
        assert_eq!(address.ton, TypeOfNumber::InternationalOrIp);
        assert_eq!(address.numbering_plan, NumberingPlan::IsdnTelephony);
        assert_eq!(address.address, "1234");
        assert_eq!(address.to_bytes().unwrap().as_ref(), &data);
    }

    #[test]
    fn test_dtmf_round_trip_with_symbols() {
        let address = CdmaSmsAddress::dtmf("8*55#1012");
        let decoded = round_trip(&address, AddressLayout::CallbackNumber);
        assert_eq!(decoded, address);
        assert_eq!(decoded.number_of_digits(), 9);
    }

    #[test]
    fn test_eight_bit_round_trip() {
        let address = CdmaSmsAddress::eight_bit(
            "8005551212",
            TypeOfNumber::NationalOrEmail,
            NumberingPlan::IsdnTelephony,
        );
        let decoded = round_trip(&address, AddressLayout::CallbackNumber);
        assert_eq!(decoded, address);
    }

    #[test]
    fn test_transport_layout_data_network_has_no_plan() {
        let address = CdmaSmsAddress {
            digit_mode: DigitMode::EightBit,
            number_mode: NumberMode::DataNetwork,
            ton: TypeOfNumber::NationalOrEmail,
            numbering_plan: NumberingPlan::Unknown,
            address: "a@b.c".to_string(),
        };
        let mut writer = BitWriter::new();
        address.write(&mut writer, AddressLayout::Transport).unwrap();
        // 1 + 1 + 3 + 8 + 5 * 8
        assert_eq!(writer.bit_len(), 53);
        let decoded = round_trip(&address, AddressLayout::Transport);
        assert_eq!(decoded, address);
    }

    #[test]
    fn test_transport_layout_dtmf() {
        let address = CdmaSmsAddress::dtmf("911");
        let mut writer = BitWriter::new();
        address.write(&mut writer, AddressLayout::Transport).unwrap();
        assert_eq!(writer.bit_len(), 1 + 1 + 8 + 3 * 4);
        assert_eq!(round_trip(&address, AddressLayout::Transport), address);
    }

    #[test]
    fn test_invalid_dtmf_code_on_decode() {
        // one digit with code 13
        let data = [0x00, 0xE8];
        let mut reader = BitReader::new(&data);
        let err = CdmaSmsAddress::decode(&mut reader).unwrap_err();
        assert!(matches!(err, CodecError::FieldValidation { field: "address", .. }));
    }

    #[test]
    fn test_invalid_dtmf_char_on_encode() {
        let address = CdmaSmsAddress::dtmf("12a");
        assert!(matches!(
            address.to_bytes(),
            Err(CodecError::FieldValidation { field: "address", .. })
        ));
    }
}
