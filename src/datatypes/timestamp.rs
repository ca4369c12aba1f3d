// ABOUTME: BCD absolute timestamps and banded relative times used by Bearer Data
// ABOUTME: Covers the message center timestamp, validity period and deferred delivery time

use crate::bits::{BitReader, BitWriter};
use crate::codec::{CodecError, Decodable, Encodable};
use std::fmt;
use std::time::Duration;

/// Two-digit years at or above this value belong to the 1900s.
const CENTURY_PIVOT: u8 = 96;

/// An absolute time as carried on the wire: six BCD octets, `YY MM DD hh mm ss`.
///
/// The wire form has no time zone; callers treat it as the message center's
/// local time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Timestamp {
    /// Full year, 1996 through 2095.
    pub year: u16,
    /// Calendar month, 1 through 12.
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

impl Timestamp {
    pub const SIZE: usize = 6;

    pub fn new(
        year: u16,
        month: u8,
        day: u8,
        hour: u8,
        minute: u8,
        second: u8,
    ) -> Result<Self, CodecError> {
        let timestamp = Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
        };
        timestamp.validate()?;
        Ok(timestamp)
    }

    fn validate(&self) -> Result<(), CodecError> {
        check_range("year", u32::from(self.year), 1996, 2095)?;
        check_range("month", u32::from(self.month), 1, 12)?;
        check_range("day", u32::from(self.day), 1, 31)?;
        check_range("hour", u32::from(self.hour), 0, 23)?;
        check_range("minute", u32::from(self.minute), 0, 59)?;
        check_range("second", u32::from(self.second), 0, 59)
    }

    /// Parses the six BCD octets.
    pub fn from_bcd(octets: [u8; Self::SIZE]) -> Result<Self, CodecError> {
        let two_digit_year = bcd_to_u8("year", octets[0])?;
        let year = if two_digit_year >= CENTURY_PIVOT {
            1900 + u16::from(two_digit_year)
        } else {
            2000 + u16::from(two_digit_year)
        };
        Self::new(
            year,
            bcd_to_u8("month", octets[1])?,
            bcd_to_u8("day", octets[2])?,
            bcd_to_u8("hour", octets[3])?,
            bcd_to_u8("minute", octets[4])?,
            bcd_to_u8("second", octets[5])?,
        )
    }

    pub fn to_bcd(&self) -> Result<[u8; Self::SIZE], CodecError> {
        self.validate()?;
        Ok([
            u8_to_bcd((self.year % 100) as u8),
            u8_to_bcd(self.month),
            u8_to_bcd(self.day),
            u8_to_bcd(self.hour),
            u8_to_bcd(self.minute),
            u8_to_bcd(self.second),
        ])
    }
}

impl Decodable for Timestamp {
    fn decode(reader: &mut BitReader<'_>) -> Result<Self, CodecError> {
        let mut octets = [0u8; Self::SIZE];
        for octet in octets.iter_mut() {
            *octet = reader.read_u8(8)?;
        }
        Self::from_bcd(octets)
    }
}

impl Encodable for Timestamp {
    fn encode(&self, writer: &mut BitWriter) -> Result<(), CodecError> {
        for octet in self.to_bcd()? {
            writer.write(u32::from(octet), 8);
        }
        Ok(())
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02} {:02}:{:02}:{:02}",
            self.year, self.month, self.day, self.hour, self.minute, self.second
        )
    }
}

fn check_range(field: &'static str, value: u32, min: u32, max: u32) -> Result<(), CodecError> {
    if !(min..=max).contains(&value) {
        return Err(CodecError::FieldValidation {
            field,
            reason: format!("{value} outside {min}..={max}"),
        });
    }
    Ok(())
}

/// High nibble is the tens digit, low nibble the units digit.
fn bcd_to_u8(field: &'static str, octet: u8) -> Result<u8, CodecError> {
    let tens = octet >> 4;
    let units = octet & 0x0F;
    if tens > 9 || units > 9 {
        return Err(CodecError::FieldValidation {
            field,
            reason: format!("invalid BCD octet {octet:#04x}"),
        });
    }
    Ok(tens * 10 + units)
}

fn u8_to_bcd(value: u8) -> u8 {
    ((value / 10) << 4) | (value % 10)
}

/// A one-octet relative time.
///
/// | raw        | meaning                                  |
/// |------------|------------------------------------------|
/// | 0..=143    | `(raw + 1) * 5` minutes                  |
/// | 144..=167  | 12 hours + `(raw - 143) * 30` minutes    |
/// | 168..=196  | `raw - 166` days                         |
/// | 197..=244  | `raw - 192` weeks                        |
/// | 245        | indefinite                               |
/// | 246        | immediate                                |
/// | 247        | until the mobile becomes inactive        |
/// | 248        | until the registration area changes      |
/// | 249..=255  | reserved                                 |
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RelativeTime(pub u8);

impl RelativeTime {
    pub const INDEFINITE: Self = Self(245);
    pub const IMMEDIATE: Self = Self(246);
    pub const UNTIL_INACTIVE: Self = Self(247);
    pub const UNTIL_REGISTRATION_CHANGE: Self = Self(248);

    const MINUTE: u64 = 60;
    const HOUR: u64 = 60 * Self::MINUTE;
    const DAY: u64 = 24 * Self::HOUR;
    const WEEK: u64 = 7 * Self::DAY;

    /// The span this value stands for, or `None` for the special and
    /// reserved codes.
    pub fn to_duration(self) -> Option<Duration> {
        let v = u64::from(self.0);
        let secs = match self.0 {
            0..=143 => (v + 1) * 5 * Self::MINUTE,
            144..=167 => 12 * Self::HOUR + (v - 143) * 30 * Self::MINUTE,
            168..=196 => (v - 166) * Self::DAY,
            197..=244 => (v - 192) * Self::WEEK,
            _ => return None,
        };
        Some(Duration::from_secs(secs))
    }

    /// Smallest relative time that covers `duration`; `None` past 52 weeks.
    pub fn from_duration(duration: Duration) -> Option<Self> {
        let secs = duration.as_secs() + u64::from(duration.subsec_nanos() > 0);
        let minutes = secs.div_ceil(Self::MINUTE);
        let raw = if minutes <= 12 * 60 {
            minutes.div_ceil(5).max(1) - 1
        } else if minutes <= 24 * 60 {
            143 + (minutes - 12 * 60).div_ceil(30)
        } else {
            let days = secs.div_ceil(Self::DAY);
            if days <= 30 {
                166 + days
            } else {
                let weeks = days.div_ceil(7);
                if weeks > 52 {
                    return None;
                }
                192 + weeks
            }
        };
        Some(Self(raw as u8))
    }

    pub fn is_reserved(self) -> bool {
        self.0 >= 249
    }
}

impl Decodable for RelativeTime {
    fn decode(reader: &mut BitReader<'_>) -> Result<Self, CodecError> {
        Ok(Self(reader.read_u8(8)?))
    }
}

impl Encodable for RelativeTime {
    fn encode(&self, writer: &mut BitWriter) -> Result<(), CodecError> {
        writer.write(u32::from(self.0), 8);
        Ok(())
    }
}

/// Validity period or deferred delivery time. The standard offers an
/// absolute and a relative sub-parameter for each; a record holds at most one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimePeriod {
    Absolute(Timestamp),
    Relative(RelativeTime),
}
