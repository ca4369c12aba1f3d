// ABOUTME: User data sub-parameter (0x01): encoding, character count and packed payload
// ABOUTME: Keeps the decoded text, the optional user data header and the raw payload together

use crate::bits::{BitReader, BitWriter};
use crate::charset::{self, EncodedPayload};
use crate::codec::{BitField, CodecError};
use crate::datatypes::{MessageEncoding, UserDataHeader};
use bytes::Bytes;
use tracing::debug;

/// Message text plus everything needed to put it on the wire.
///
/// For text encodings `text` (with `header`) is the source of truth and
/// `payload`/`num_fields` are derived from it on encode. IS-91, GSM DCS and
/// reserved encodings are carried opaquely in `payload`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UserData {
    /// `None` lets the encoder pick: 7-bit ASCII when the text allows it,
    /// UTF-16 otherwise.
    pub encoding: Option<MessageEncoding>,
    /// IS-91 message type or GSM data coding scheme octet.
    pub message_type: Option<u8>,
    pub header: Option<UserDataHeader>,
    pub text: String,
    /// Packed payload, header included.
    pub payload: Bytes,
    pub num_fields: u8,
}

impl UserData {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn with_encoding(text: impl Into<String>, encoding: MessageEncoding) -> Self {
        Self {
            encoding: Some(encoding),
            ..Self::new(text)
        }
    }

    /// Raw octets sent with the octet encoding.
    pub fn binary(octets: &[u8]) -> Self {
        Self {
            encoding: Some(MessageEncoding::Octet),
            text: octets.iter().map(|&b| char::from(b)).collect(),
            payload: Bytes::copy_from_slice(octets),
            num_fields: octets.len().min(usize::from(u8::MAX)) as u8,
            ..Default::default()
        }
    }

    pub fn with_header(mut self, header: UserDataHeader) -> Self {
        self.header = Some(header);
        self
    }

    /// The encoding the encoder will use.
    pub fn resolved_encoding(&self) -> MessageEncoding {
        match self.encoding {
            Some(encoding) => encoding,
            None if charset::can_encode(MessageEncoding::Ascii7Bit, &self.text) => {
                MessageEncoding::Ascii7Bit
            }
            None => MessageEncoding::Unicode16,
        }
    }

    /// Fills in the encoding, payload and character count exactly as the
    /// encoder computes them, so the value compares equal to its decoded form.
    pub fn pack(&mut self) -> Result<(), CodecError> {
        let (encoding, encoded) = self.encoded()?;
        self.encoding = Some(encoding);
        self.payload = encoded.payload;
        self.num_fields = encoded.num_fields;
        if encoding.is_text() {
            self.message_type = None;
        }
        Ok(())
    }

    fn encoded(&self) -> Result<(MessageEncoding, EncodedPayload), CodecError> {
        let encoding = self.resolved_encoding();
        match encoding {
            MessageEncoding::Is91ExtendedProtocol | MessageEncoding::GsmDcs => {
                Ok((
                    encoding,
                    EncodedPayload {
                        payload: self.payload.clone(),
                        bits: self.payload.len() * 8,
                        num_fields: self.num_fields,
                    },
                ))
            }
            _ => {
                let header = self
                    .header
                    .as_ref()
                    .map(UserDataHeader::to_bytes)
                    .transpose()?
                    .unwrap_or_default();
                let encoded = charset::encode(encoding, &self.text, &header)?;
                Ok((encoding, encoded))
            }
        }
    }

    /// Writes the sub-parameter content:
    /// `encoding(5) [message_type(8)] num_fields(8) payload`.
    pub(crate) fn write_subparam(&self, writer: &mut BitWriter) -> Result<(), CodecError> {
        let (encoding, encoded) = self.encoded()?;
        encoding.write_to(writer);
        if encoding.has_message_type() {
            writer.write(u32::from(self.message_type.unwrap_or(0)), 8);
        }
        writer.write(u32::from(encoded.num_fields), 8);
        writer.write_bytes(&encoded.payload, encoded.bits);
        debug!(
            "Encoded user data: {}, {} fields, {} payload bits",
            encoding, encoded.num_fields, encoded.bits
        );
        Ok(())
    }

    /// Reads the sub-parameter content. The payload stays packed until
    /// [`UserData::unpack`] runs, because the header flag lives in the
    /// message identifier, which may come later.
    pub(crate) fn read_subparam(reader: &mut BitReader<'_>) -> Result<Self, CodecError> {
        let encoding = MessageEncoding::read_from(reader)?;
        let message_type = if encoding.has_message_type() {
            Some(reader.read_u8(8)?)
        } else {
            None
        };
        let num_fields = reader.read_u8(8)?;
        let bits = if encoding.is_text() {
            reader.remaining()
        } else {
            // opaque payloads keep whole octets only
            reader.remaining() / 8 * 8
        };
        let payload = reader.read_bytes(bits)?;

        Ok(Self {
            encoding: Some(encoding),
            message_type,
            header: None,
            text: String::new(),
            payload: Bytes::from(payload),
            num_fields,
        })
    }

    /// Splits off the header and decodes the text, trimming the payload to
    /// the octets the header and text cover.
    pub(crate) fn unpack(&mut self, has_header: bool) -> Result<(), CodecError> {
        let encoding = self.resolved_encoding();
        let header_len = if has_header {
            let (header, len) = UserDataHeader::decode(&self.payload)?;
            self.header = Some(header);
            len
        } else {
            0
        };

        if !encoding.is_text() {
            debug!("Keeping {} payload opaque", encoding);
            return Ok(());
        }

        let decoded = charset::decode(encoding, &self.payload, header_len, self.num_fields)?;
        self.text = decoded.text;
        self.payload = self.payload.slice(..decoded.used.min(self.payload.len()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datatypes::ConcatRef;

    fn wire(user_data: &UserData) -> Bytes {
        let mut writer = BitWriter::new();
        user_data.write_subparam(&mut writer).unwrap();
        writer.into_bytes()
    }

    fn read_back(bytes: &[u8], has_header: bool) -> UserData {
        let mut reader = BitReader::new(bytes);
        let mut user_data = UserData::read_subparam(&mut reader).unwrap();
        user_data.unpack(has_header).unwrap();
        user_data
    }

    #[test]
    fn test_unset_encoding_prefers_ascii() {
        assert_eq!(
            UserData::new("plain text").resolved_encoding(),
            MessageEncoding::Ascii7Bit
        );
        assert_eq!(
            UserData::new("\u{160}u").resolved_encoding(),
            MessageEncoding::Unicode16
        );
    }

    #[test]
    fn test_ascii_subparam_content() {
        // encoding 2, num_fields 2, "hi"
        let bytes = wire(&UserData::with_encoding("hi", MessageEncoding::Ascii7Bit));
        assert_eq!(bytes.as_ref(), &[0x10, 0x16, 0x8D, 0x20]);
    }

    #[test]
    fn test_pack_matches_decoded_form() {
        let mut user_data = UserData::new("hello").with_header(UserDataHeader {
            concat_ref: Some(ConcatRef {
                ref_number: 7,
                msg_count: 3,
                seq_number: 1,
                is_eight_bits: true,
            }),
            ..Default::default()
        });
        let bytes = wire(&user_data);
        user_data.pack().unwrap();
        assert_eq!(read_back(&bytes, true), user_data);
    }

    #[test]
    fn test_gsm_dcs_payload_is_opaque() {
        let user_data = UserData {
            encoding: Some(MessageEncoding::GsmDcs),
            message_type: Some(0x08),
            payload: Bytes::from_static(&[0x00, 0x41, 0x00, 0x42]),
            num_fields: 2,
            ..Default::default()
        };
        let bytes = wire(&user_data);
        // 5 + 8 + 8 + 32 bits
        assert_eq!(bytes.len(), 7);
        assert_eq!(read_back(&bytes, false), user_data);
    }

    #[test]
    fn test_reserved_encoding_is_unsupported() {
        let user_data = UserData::with_encoding("x", MessageEncoding::Reserved(0x15));
        let mut writer = BitWriter::new();
        assert!(matches!(
            user_data.write_subparam(&mut writer),
            Err(CodecError::UnsupportedEncoding(MessageEncoding::Reserved(0x15)))
        ));
    }

    #[test]
    fn test_binary_payload() {
        let user_data = UserData::binary(&[0xDE, 0xAD, 0xBE, 0xEF]);
        let bytes = wire(&user_data);
        let decoded = read_back(&bytes, false);
        assert_eq!(decoded.payload.as_ref(), &[0xDE, 0xAD, 0xBE, 0xEF]);
        assert_eq!(decoded, user_data);
    }
}
