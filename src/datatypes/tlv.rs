use bytes::{BufMut, Bytes, BytesMut};

/// One user data header information element kept in its wire form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tlv {
    /// Information element identifier.
    pub tag: u8,

    /// Element content, without the identifier and length octets.
    /// At most 255 octets reach the wire.
    pub value: Bytes,
}

impl Tlv {
    pub fn new(tag: u8, value: impl Into<Bytes>) -> Self {
        Self {
            tag,
            value: value.into(),
        }
    }

    /// Octets this element occupies on the wire, identifier and length included.
    pub fn encoded_len(&self) -> usize {
        2 + self.value.len()
    }

    pub fn encode(&self, buf: &mut BytesMut) {
        buf.put_u8(self.tag);
        buf.put_u8(self.value.len() as u8);
        buf.put_slice(&self.value);
    }
}
