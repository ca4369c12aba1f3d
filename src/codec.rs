// CDMA Bearer Data codec - drives the sub-parameter registry over the wire format
//
// This module separates the TLV framing of Bearer Data from the bit layouts
// of the individual sub-parameters. Each sub-parameter registers a decode
// routine, an encode routine and a presence check; the orchestrator walks
// the buffer on decode and the registry on encode.

use crate::bits::{BitReader, BitWriter};
use crate::datatypes::bearer_data::{self as layouts, BearerData};
use crate::datatypes::{MessageEncoding, SubparamId, TimePeriod};
use crate::util::HexData;
use bytes::{Buf, BufMut, Bytes, BytesMut};
use std::collections::BTreeMap;
use std::sync::LazyLock;
use thiserror::Error;
use tracing::{debug, warn};

/// Largest sub-parameter content a one-octet length can describe.
pub const MAX_SUBPARAM_LEN: usize = u8::MAX as usize;

/// Trait for types that write themselves into a bit stream
pub trait Encodable {
    fn encode(&self, writer: &mut BitWriter) -> Result<(), CodecError>;

    /// Encode into a fresh buffer, zero padding the last octet
    fn to_bytes(&self) -> Result<Bytes, CodecError> {
        let mut writer = BitWriter::new();
        self.encode(&mut writer)?;
        Ok(writer.into_bytes())
    }
}

/// Trait for types that read themselves from a bit stream
pub trait Decodable: Sized {
    fn decode(reader: &mut BitReader<'_>) -> Result<Self, CodecError>;
}

/// A wire enumeration occupying a fixed number of bits.
pub trait BitField: Sized + Copy {
    const WIDTH: u32;

    fn from_raw(raw: u32) -> Result<Self, CodecError>;

    fn into_raw(self) -> u32;

    fn read_from(reader: &mut BitReader<'_>) -> Result<Self, CodecError> {
        Self::from_raw(reader.read(Self::WIDTH)?)
    }

    fn write_to(self, writer: &mut BitWriter) {
        writer.write(self.into_raw(), Self::WIDTH);
    }
}

/// Codec errors with detailed context for debugging
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("Bit cursor underflow: wanted {wanted} bits, {remaining} remaining")]
    Underflow { wanted: usize, remaining: usize },

    #[error("Truncated PDU: subparameter {id:#04x} needs {declared} octets, {available} available")]
    TruncatedPdu {
        id: u8,
        declared: usize,
        available: usize,
    },

    #[error("Unsupported user data encoding: {0}")]
    UnsupportedEncoding(MessageEncoding),

    #[error("Field '{field}' validation failed: {reason}")]
    FieldValidation { field: &'static str, reason: String },

    #[error("Subparameter {id:?} content is {length} octets, limit is 255")]
    SubparamTooLong { id: SubparamId, length: usize },

    #[error("Invalid hex input: {0}")]
    InvalidHex(String),
}

impl CodecError {
    /// Fatal errors abort a decode; the rest only drop the offending field.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, CodecError::FieldValidation { .. })
    }
}

/// How a sub-parameter's content length is determined.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SubparamLength {
    /// Content always has this many octets.
    Fixed(u8),
    /// Content length depends on the value.
    Declared,
}

type DecodeFn = fn(&mut BitReader<'_>, &mut BearerData) -> Result<(), CodecError>;
type EncodeFn = fn(&BearerData, &mut BitWriter) -> Result<(), CodecError>;
type PresenceFn = fn(&BearerData) -> bool;

struct SubparamCodec {
    length: SubparamLength,
    decode: DecodeFn,
    encode: EncodeFn,
    is_present: PresenceFn,
}

/// Registry of sub-parameter codecs, keyed and iterated in id order.
pub struct SubparamRegistry {
    codecs: BTreeMap<SubparamId, SubparamCodec>,
}

impl SubparamRegistry {
    /// Create a registry with every supported sub-parameter registered
    pub fn new() -> Self {
        use SubparamId::*;
        use SubparamLength::*;

        let mut registry = Self {
            codecs: BTreeMap::new(),
        };

        registry.register(
            MessageIdentifier,
            Fixed(3),
            layouts::decode_message_identifier,
            layouts::encode_message_identifier,
            |_| true,
        );
        registry.register(
            UserData,
            Declared,
            layouts::decode_user_data,
            layouts::encode_user_data,
            |r| r.user_data.is_some(),
        );
        registry.register(
            UserResponseCode,
            Fixed(1),
            layouts::decode_user_response_code,
            layouts::encode_user_response_code,
            |r| r.user_response_code.is_some(),
        );
        registry.register(
            MessageCenterTimeStamp,
            Fixed(6),
            layouts::decode_msg_center_timestamp,
            layouts::encode_msg_center_timestamp,
            |r| r.msg_center_timestamp.is_some(),
        );

        // Validity period and deferred delivery each have an absolute and a
        // relative form sharing one record field.
        registry.register(
            ValidityPeriodAbsolute,
            Fixed(6),
            layouts::decode_validity_absolute,
            layouts::encode_validity_period,
            |r| matches!(r.validity_period, Some(TimePeriod::Absolute(_))),
        );
        registry.register(
            ValidityPeriodRelative,
            Fixed(1),
            layouts::decode_validity_relative,
            layouts::encode_validity_period,
            |r| matches!(r.validity_period, Some(TimePeriod::Relative(_))),
        );
        registry.register(
            DeferredDeliveryTimeAbsolute,
            Fixed(6),
            layouts::decode_deferred_absolute,
            layouts::encode_deferred_delivery_time,
            |r| matches!(r.deferred_delivery_time, Some(TimePeriod::Absolute(_))),
        );
        registry.register(
            DeferredDeliveryTimeRelative,
            Fixed(1),
            layouts::decode_deferred_relative,
            layouts::encode_deferred_delivery_time,
            |r| matches!(r.deferred_delivery_time, Some(TimePeriod::Relative(_))),
        );

        // Indicators
        registry.register(
            PriorityIndicator,
            Fixed(1),
            layouts::decode_priority,
            layouts::encode_priority,
            |r| r.priority.is_some(),
        );
        registry.register(
            PrivacyIndicator,
            Fixed(1),
            layouts::decode_privacy,
            layouts::encode_privacy,
            |r| r.privacy.is_some(),
        );
        registry.register(
            ReplyOption,
            Fixed(1),
            layouts::decode_reply_option,
            layouts::encode_reply_option,
            BearerData::has_reply_option,
        );
        registry.register(
            NumberOfMessages,
            Fixed(1),
            layouts::decode_number_of_messages,
            layouts::encode_number_of_messages,
            |r| r.number_of_messages.is_some(),
        );
        registry.register(
            AlertOnMessageDelivery,
            Fixed(1),
            layouts::decode_alert,
            layouts::encode_alert,
            |r| r.alert.is_some(),
        );
        registry.register(
            LanguageIndicator,
            Fixed(1),
            layouts::decode_language,
            layouts::encode_language,
            |r| r.language.is_some(),
        );
        registry.register(
            CallbackNumber,
            Declared,
            layouts::decode_callback_number,
            layouts::encode_callback_number,
            |r| r.callback_number.is_some(),
        );
        registry.register(
            MessageDisplayMode,
            Fixed(1),
            layouts::decode_display_mode,
            layouts::encode_display_mode,
            |r| r.display_mode.is_some(),
        );
        registry.register(
            MessageDepositIndex,
            Fixed(2),
            layouts::decode_deposit_index,
            layouts::encode_deposit_index,
            |r| r.deposit_index.is_some(),
        );
        registry.register(
            MessageStatus,
            Fixed(1),
            layouts::decode_message_status,
            layouts::encode_message_status,
            |r| r.message_status.is_some(),
        );

        registry
    }

    fn register(
        &mut self,
        id: SubparamId,
        length: SubparamLength,
        decode: DecodeFn,
        encode: EncodeFn,
        is_present: PresenceFn,
    ) {
        self.codecs.insert(
            id,
            SubparamCodec {
                length,
                decode,
                encode,
                is_present,
            },
        );
    }

    /// Decode one sub-parameter's content into `record`.
    ///
    /// Unknown ids and fields failing validation are logged and skipped;
    /// only fatal errors are returned.
    pub fn decode_subparam(
        &self,
        raw_id: u8,
        content: &[u8],
        record: &mut BearerData,
    ) -> Result<(), CodecError> {
        let Some((id, codec)) = SubparamId::try_from(raw_id)
            .ok()
            .and_then(|id| self.codecs.get(&id).map(|codec| (id, codec)))
        else {
            warn!(
                "Skipping unsupported subparameter {:#04x} ({} octets)",
                raw_id,
                content.len()
            );
            return Ok(());
        };

        if let SubparamLength::Fixed(len) = codec.length {
            if content.len() < usize::from(len) {
                return Err(CodecError::Underflow {
                    wanted: usize::from(len) * 8,
                    remaining: content.len() * 8,
                });
            }
        }

        debug!("Decoding {:?}: {}", id, HexData(content));
        let mut reader = BitReader::new(content);
        match (codec.decode)(&mut reader, record) {
            Ok(()) => Ok(()),
            Err(e) if !e.is_fatal() => {
                warn!("Dropping {:?}: {}", id, e);
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    /// Encode every present sub-parameter of `record` in id order.
    pub fn encode_subparams(
        &self,
        record: &BearerData,
        buf: &mut BytesMut,
    ) -> Result<(), CodecError> {
        for (&id, codec) in &self.codecs {
            if !(codec.is_present)(record) {
                continue;
            }

            let mut writer = BitWriter::new();
            (codec.encode)(record, &mut writer)?;
            let content = writer.into_bytes();
            if content.len() > MAX_SUBPARAM_LEN {
                return Err(CodecError::SubparamTooLong {
                    id,
                    length: content.len(),
                });
            }
            debug_assert!(
                !matches!(codec.length, SubparamLength::Fixed(n) if usize::from(n) != content.len()),
                "{id:?} wrote {} octets",
                content.len()
            );

            debug!("Encoded {:?}: {}", id, HexData(&content));
            buf.put_u8(id.into());
            buf.put_u8(content.len() as u8);
            buf.put_slice(&content);
        }
        Ok(())
    }

    /// Check if a sub-parameter id is registered
    pub fn is_registered(&self, id: SubparamId) -> bool {
        self.codecs.contains_key(&id)
    }

    /// Length kind of a registered sub-parameter
    pub fn length_of(&self, id: SubparamId) -> Option<SubparamLength> {
        self.codecs.get(&id).map(|codec| codec.length)
    }

    /// Get all registered ids, in emission order
    pub fn registered_subparams(&self) -> Vec<SubparamId> {
        self.codecs.keys().copied().collect()
    }
}

impl Default for SubparamRegistry {
    fn default() -> Self {
        Self::new()
    }
}

static REGISTRY: LazyLock<SubparamRegistry> = LazyLock::new(SubparamRegistry::new);

/// The process-wide registry used by [`decode`] and [`encode`].
pub fn registry() -> &'static SubparamRegistry {
    &REGISTRY
}

/// Decode a Bearer Data parameter.
///
/// Fails on a sub-parameter running past the end of `data` or on a field cut
/// short inside its declared span. Unknown sub-parameters and malformed
/// optional fields are skipped.
pub fn decode(data: &[u8]) -> Result<BearerData, CodecError> {
    let registry = registry();
    let mut record = BearerData::default();
    let mut buf = data;

    while buf.has_remaining() {
        let id = buf.get_u8();
        if !buf.has_remaining() {
            return Err(CodecError::TruncatedPdu {
                id,
                declared: 1,
                available: 0,
            });
        }
        let len = usize::from(buf.get_u8());
        if len > buf.remaining() {
            return Err(CodecError::TruncatedPdu {
                id,
                declared: len,
                available: buf.remaining(),
            });
        }
        let (content, rest) = buf.split_at(len);
        buf = rest;
        registry.decode_subparam(id, content, &mut record)?;
    }

    let has_header = record.has_user_data_header;
    if let Some(user_data) = record.user_data.as_mut() {
        if let Err(e) = user_data.unpack(has_header) {
            if e.is_fatal() {
                return Err(e);
            }
            warn!("Dropping user data: {}", e);
            record.user_data = None;
        }
    }

    // the flag follows the header actually carried
    let carries_header = record.carries_user_data_header();
    if record.has_user_data_header != carries_header {
        debug!("Header flag set without a user data header; clearing it");
        record.has_user_data_header = carries_header;
    }

    Ok(record)
}

/// Encode a Bearer Data parameter.
pub fn encode(record: &BearerData) -> Result<Bytes, CodecError> {
    let mut buf = BytesMut::with_capacity(64);
    registry().encode_subparams(record, &mut buf)?;
    Ok(buf.freeze())
}
