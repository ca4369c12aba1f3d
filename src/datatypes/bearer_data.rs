// ABOUTME: The Bearer Data record and the per-sub-parameter bit layouts
// ABOUTME: Each routine reads or writes the content of one sub-parameter; the registry drives them

use crate::bits::{BitReader, BitWriter};
use crate::codec::{self, BitField, CodecError, Decodable, Encodable};
use crate::datatypes::{
    Alert, CdmaSmsAddress, DisplayMode, Language, MessageStatus, MessageType, Priority, Privacy,
    RelativeTime, TimePeriod, Timestamp, UserData,
};
use bytes::Bytes;

/// A decoded Bearer Data parameter.
///
/// Optional fields are `None` when their sub-parameter was absent. Message
/// type and message id are always present on the wire.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BearerData {
    pub message_type: MessageType,
    pub message_id: u16,
    /// Header flag from the message identifier. Encoding derives it from
    /// `user_data.header`.
    pub has_user_data_header: bool,

    pub user_ack_req: bool,
    pub delivery_ack_req: bool,
    pub read_ack_req: bool,
    pub report_req: bool,

    pub priority: Option<Priority>,
    pub privacy: Option<Privacy>,
    pub language: Option<Language>,
    pub alert: Option<Alert>,
    pub display_mode: Option<DisplayMode>,
    /// Voicemail count or message count.
    pub number_of_messages: Option<u8>,
    pub deposit_index: Option<u16>,
    pub user_response_code: Option<u8>,
    pub msg_center_timestamp: Option<Timestamp>,
    pub validity_period: Option<TimePeriod>,
    pub deferred_delivery_time: Option<TimePeriod>,
    pub callback_number: Option<CdmaSmsAddress>,
    pub message_status: Option<MessageStatus>,
    pub user_data: Option<UserData>,
}

impl BearerData {
    pub fn new(message_type: MessageType, message_id: u16) -> Self {
        Self {
            message_type,
            message_id,
            ..Default::default()
        }
    }

    pub fn decode(data: &[u8]) -> Result<Self, CodecError> {
        codec::decode(data)
    }

    pub fn encode(&self) -> Result<Bytes, CodecError> {
        codec::encode(self)
    }

    /// Brings derived fields to the values decoding the encoded form yields:
    /// the user data is packed and the header flag follows the header.
    pub fn pack(&mut self) -> Result<(), CodecError> {
        if let Some(user_data) = self.user_data.as_mut() {
            user_data.pack()?;
        }
        self.has_user_data_header = self.carries_user_data_header();
        Ok(())
    }

    pub fn carries_user_data_header(&self) -> bool {
        self.user_data
            .as_ref()
            .is_some_and(|user_data| user_data.header.is_some())
    }

    pub fn has_reply_option(&self) -> bool {
        self.user_ack_req || self.delivery_ack_req || self.read_ack_req || self.report_req
    }

    /// The text of the user data, if any.
    pub fn text(&self) -> Option<&str> {
        self.user_data.as_ref().map(|user_data| user_data.text.as_str())
    }
}

// Message identifier: type(4) id(16) header(1) reserved(3)

pub(crate) fn decode_message_identifier(
    reader: &mut BitReader<'_>,
    record: &mut BearerData,
) -> Result<(), CodecError> {
    let message_type = MessageType::read_from(reader)?;
    let message_id = reader.read(16)? as u16;
    let has_header = reader.read_bool()?;
    record.message_type = message_type;
    record.message_id = message_id;
    record.has_user_data_header = has_header;
    Ok(())
}

pub(crate) fn encode_message_identifier(
    record: &BearerData,
    writer: &mut BitWriter,
) -> Result<(), CodecError> {
    record.message_type.write_to(writer);
    writer.write(u32::from(record.message_id), 16);
    writer.write_bool(record.carries_user_data_header());
    Ok(())
}

pub(crate) fn decode_user_data(
    reader: &mut BitReader<'_>,
    record: &mut BearerData,
) -> Result<(), CodecError> {
    record.user_data = Some(UserData::read_subparam(reader)?);
    Ok(())
}

pub(crate) fn encode_user_data(
    record: &BearerData,
    writer: &mut BitWriter,
) -> Result<(), CodecError> {
    match &record.user_data {
        Some(user_data) => user_data.write_subparam(writer),
        None => Ok(()),
    }
}

pub(crate) fn decode_user_response_code(
    reader: &mut BitReader<'_>,
    record: &mut BearerData,
) -> Result<(), CodecError> {
    record.user_response_code = Some(reader.read_u8(8)?);
    Ok(())
}

pub(crate) fn encode_user_response_code(
    record: &BearerData,
    writer: &mut BitWriter,
) -> Result<(), CodecError> {
    writer.write(u32::from(record.user_response_code.unwrap_or(0)), 8);
    Ok(())
}

pub(crate) fn decode_msg_center_timestamp(
    reader: &mut BitReader<'_>,
    record: &mut BearerData,
) -> Result<(), CodecError> {
    record.msg_center_timestamp = Some(Timestamp::decode(reader)?);
    Ok(())
}

pub(crate) fn encode_msg_center_timestamp(
    record: &BearerData,
    writer: &mut BitWriter,
) -> Result<(), CodecError> {
    match &record.msg_center_timestamp {
        Some(timestamp) => timestamp.encode(writer),
        None => Ok(()),
    }
}

fn encode_time_period(
    period: Option<&TimePeriod>,
    writer: &mut BitWriter,
) -> Result<(), CodecError> {
    match period {
        Some(TimePeriod::Absolute(timestamp)) => timestamp.encode(writer),
        Some(TimePeriod::Relative(relative)) => relative.encode(writer),
        None => Ok(()),
    }
}

pub(crate) fn decode_validity_absolute(
    reader: &mut BitReader<'_>,
    record: &mut BearerData,
) -> Result<(), CodecError> {
    record.validity_period = Some(TimePeriod::Absolute(Timestamp::decode(reader)?));
    Ok(())
}

pub(crate) fn decode_validity_relative(
    reader: &mut BitReader<'_>,
    record: &mut BearerData,
) -> Result<(), CodecError> {
    record.validity_period = Some(TimePeriod::Relative(RelativeTime::decode(reader)?));
    Ok(())
}

pub(crate) fn encode_validity_period(
    record: &BearerData,
    writer: &mut BitWriter,
) -> Result<(), CodecError> {
    encode_time_period(record.validity_period.as_ref(), writer)
}

pub(crate) fn decode_deferred_absolute(
    reader: &mut BitReader<'_>,
    record: &mut BearerData,
) -> Result<(), CodecError> {
    record.deferred_delivery_time = Some(TimePeriod::Absolute(Timestamp::decode(reader)?));
    Ok(())
}

pub(crate) fn decode_deferred_relative(
    reader: &mut BitReader<'_>,
    record: &mut BearerData,
) -> Result<(), CodecError> {
    record.deferred_delivery_time = Some(TimePeriod::Relative(RelativeTime::decode(reader)?));
    Ok(())
}

pub(crate) fn encode_deferred_delivery_time(
    record: &BearerData,
    writer: &mut BitWriter,
) -> Result<(), CodecError> {
    encode_time_period(record.deferred_delivery_time.as_ref(), writer)
}

pub(crate) fn decode_priority(
    reader: &mut BitReader<'_>,
    record: &mut BearerData,
) -> Result<(), CodecError> {
    record.priority = Some(Priority::read_from(reader)?);
    Ok(())
}

pub(crate) fn encode_priority(
    record: &BearerData,
    writer: &mut BitWriter,
) -> Result<(), CodecError> {
    if let Some(priority) = record.priority {
        priority.write_to(writer);
    }
    Ok(())
}

pub(crate) fn decode_privacy(
    reader: &mut BitReader<'_>,
    record: &mut BearerData,
) -> Result<(), CodecError> {
    record.privacy = Some(Privacy::read_from(reader)?);
    Ok(())
}

pub(crate) fn encode_privacy(
    record: &BearerData,
    writer: &mut BitWriter,
) -> Result<(), CodecError> {
    if let Some(privacy) = record.privacy {
        privacy.write_to(writer);
    }
    Ok(())
}

// Reply option: user(1) delivery(1) read(1) report(1) reserved(4)

pub(crate) fn decode_reply_option(
    reader: &mut BitReader<'_>,
    record: &mut BearerData,
) -> Result<(), CodecError> {
    record.user_ack_req = reader.read_bool()?;
    record.delivery_ack_req = reader.read_bool()?;
    record.read_ack_req = reader.read_bool()?;
    record.report_req = reader.read_bool()?;
    Ok(())
}

pub(crate) fn encode_reply_option(
    record: &BearerData,
    writer: &mut BitWriter,
) -> Result<(), CodecError> {
    writer.write_bool(record.user_ack_req);
    writer.write_bool(record.delivery_ack_req);
    writer.write_bool(record.read_ack_req);
    writer.write_bool(record.report_req);
    Ok(())
}

pub(crate) fn decode_number_of_messages(
    reader: &mut BitReader<'_>,
    record: &mut BearerData,
) -> Result<(), CodecError> {
    record.number_of_messages = Some(reader.read_u8(8)?);
    Ok(())
}

pub(crate) fn encode_number_of_messages(
    record: &BearerData,
    writer: &mut BitWriter,
) -> Result<(), CodecError> {
    writer.write(u32::from(record.number_of_messages.unwrap_or(0)), 8);
    Ok(())
}

pub(crate) fn decode_alert(
    reader: &mut BitReader<'_>,
    record: &mut BearerData,
) -> Result<(), CodecError> {
    record.alert = Some(Alert::read_from(reader)?);
    Ok(())
}

pub(crate) fn encode_alert(record: &BearerData, writer: &mut BitWriter) -> Result<(), CodecError> {
    if let Some(alert) = record.alert {
        alert.write_to(writer);
    }
    Ok(())
}

pub(crate) fn decode_language(
    reader: &mut BitReader<'_>,
    record: &mut BearerData,
) -> Result<(), CodecError> {
    record.language = Some(Language::read_from(reader)?);
    Ok(())
}

pub(crate) fn encode_language(
    record: &BearerData,
    writer: &mut BitWriter,
) -> Result<(), CodecError> {
    if let Some(language) = record.language {
        language.write_to(writer);
    }
    Ok(())
}

pub(crate) fn decode_callback_number(
    reader: &mut BitReader<'_>,
    record: &mut BearerData,
) -> Result<(), CodecError> {
    record.callback_number = Some(CdmaSmsAddress::decode(reader)?);
    Ok(())
}

pub(crate) fn encode_callback_number(
    record: &BearerData,
    writer: &mut BitWriter,
) -> Result<(), CodecError> {
    match &record.callback_number {
        Some(address) => address.encode(writer),
        None => Ok(()),
    }
}

pub(crate) fn decode_display_mode(
    reader: &mut BitReader<'_>,
    record: &mut BearerData,
) -> Result<(), CodecError> {
    record.display_mode = Some(DisplayMode::read_from(reader)?);
    Ok(())
}

pub(crate) fn encode_display_mode(
    record: &BearerData,
    writer: &mut BitWriter,
) -> Result<(), CodecError> {
    if let Some(display_mode) = record.display_mode {
        display_mode.write_to(writer);
    }
    Ok(())
}

pub(crate) fn decode_deposit_index(
    reader: &mut BitReader<'_>,
    record: &mut BearerData,
) -> Result<(), CodecError> {
    record.deposit_index = Some(reader.read(16)? as u16);
    Ok(())
}

pub(crate) fn encode_deposit_index(
    record: &BearerData,
    writer: &mut BitWriter,
) -> Result<(), CodecError> {
    writer.write(u32::from(record.deposit_index.unwrap_or(0)), 16);
    Ok(())
}

pub(crate) fn decode_message_status(
    reader: &mut BitReader<'_>,
    record: &mut BearerData,
) -> Result<(), CodecError> {
    record.message_status = Some(MessageStatus::decode(reader)?);
    Ok(())
}

pub(crate) fn encode_message_status(
    record: &BearerData,
    writer: &mut BitWriter,
) -> Result<(), CodecError> {
    match &record.message_status {
        Some(status) => status.encode(writer),
        None => Ok(()),
    }
}
