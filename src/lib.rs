#[macro_use]
mod macros;

pub mod bits;
pub mod charset;
pub mod codec;
pub mod datatypes;
pub mod util;

#[cfg(test)]
mod tests;

// Re-export codec entry points and traits for direct access
pub use codec::{
    BitField, CodecError, Decodable, Encodable, SubparamLength, SubparamRegistry, decode, encode,
};

// Re-export the record and its field types
pub use datatypes::{
    Alert, BearerData, CdmaSmsAddress, ConcatRef, DigitMode, DisplayMode, ErrorClass, Language,
    MessageEncoding, MessageStatus, MessageType, NumberMode, NumberingPlan, PortAddrs, Priority,
    Privacy, RelativeTime, SubparamId, TimePeriod, Timestamp, TypeOfNumber, UserData,
    UserDataHeader,
};

pub use util::HexData;

/// A specialized `Result` type for Bearer Data operations.
///
/// # Examples
///
/// ## Decoding a received message
///
/// ```rust
/// use cdma_sms::{HexData, MessageEncoding, MessageType};
///
/// let pdu = HexData::decode("00031001d00109104539b4d052ebb3d0")?;
/// let record = cdma_sms::decode(&pdu)?;
///
/// assert_eq!(record.message_type, MessageType::Deliver);
/// assert_eq!(record.message_id, 0x001D);
/// assert_eq!(record.text(), Some("SMS Rulz"));
/// assert_eq!(
///     record.user_data.as_ref().and_then(|ud| ud.encoding),
///     Some(MessageEncoding::Ascii7Bit)
/// );
/// # Ok::<(), cdma_sms::CodecError>(())
/// ```
///
/// ## Building a message with options
///
/// Fields left unset are simply not sent. `pack` fills in what the encoder
/// derives, so the packed record equals its decoded wire form.
///
/// ```rust
/// use cdma_sms::{BearerData, CdmaSmsAddress, MessageType, Priority, UserData};
///
/// let mut record = BearerData::new(MessageType::Submit, 42);
/// record.priority = Some(Priority::Urgent);
/// record.delivery_ack_req = true;
/// record.callback_number = Some(CdmaSmsAddress::dtmf("5551212"));
/// record.user_data = Some(UserData::new("Call me back"));
///
/// let pdu = cdma_sms::encode(&record)?;
/// record.pack()?;
/// assert_eq!(cdma_sms::decode(&pdu)?, record);
/// # Ok::<(), cdma_sms::CodecError>(())
/// ```
pub type Result<T> = std::result::Result<T, CodecError>;
