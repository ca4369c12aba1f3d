// ABOUTME: User data header codec: concatenation reference, port addressing and opaque elements
// ABOUTME: The header sits at the front of the user data payload, prefixed by its own length octet

use crate::codec::CodecError;
use crate::datatypes::{SubparamId, Tlv};
use bytes::{Buf, BufMut, Bytes, BytesMut};
use tracing::{trace, warn};

const IEI_CONCATENATED_8BIT: u8 = 0x00;
const IEI_APPLICATION_PORT_8BIT: u8 = 0x04;
const IEI_APPLICATION_PORT_16BIT: u8 = 0x05;
const IEI_CONCATENATED_16BIT: u8 = 0x08;

/// Concatenated message reference.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ConcatRef {
    pub ref_number: u16,
    pub msg_count: u8,
    /// One-based position of this part.
    pub seq_number: u8,
    /// Selects the 8-bit reference element; only the low octet of
    /// `ref_number` is sent.
    pub is_eight_bits: bool,
}

impl ConcatRef {
    pub fn is_valid(&self) -> bool {
        self.msg_count >= 1 && (1..=self.msg_count).contains(&self.seq_number)
    }
}

/// Application port addressing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PortAddrs {
    pub dest_port: u16,
    pub orig_port: u16,
    /// Selects the 8-bit port element; only the low octet of each port is sent.
    pub are_eight_bits: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UserDataHeader {
    pub concat_ref: Option<ConcatRef>,
    pub port_addrs: Option<PortAddrs>,
    /// Elements this codec does not interpret, in wire order.
    pub misc: Vec<Tlv>,
}

impl UserDataHeader {
    pub fn is_empty(&self) -> bool {
        self.concat_ref.is_none() && self.port_addrs.is_none() && self.misc.is_empty()
    }

    /// Parses a header from the front of `payload`.
    ///
    /// Returns the header and the number of octets it occupies, length octet
    /// included. Malformed elements are dropped; a declared header length
    /// running past the payload is an error.
    pub fn decode(payload: &[u8]) -> Result<(Self, usize), CodecError> {
        let Some(&declared) = payload.first() else {
            return Err(CodecError::Underflow {
                wanted: 8,
                remaining: 0,
            });
        };
        let total = 1 + usize::from(declared);
        if total > payload.len() {
            return Err(CodecError::TruncatedPdu {
                id: SubparamId::UserData.into(),
                declared: total,
                available: payload.len(),
            });
        }

        let mut header = UserDataHeader::default();
        let mut buf = &payload[1..total];
        while buf.has_remaining() {
            if buf.remaining() < 2 {
                warn!("User data header has {} stray octet(s)", buf.remaining());
                break;
            }
            let id = buf.get_u8();
            let len = usize::from(buf.get_u8());
            if len > buf.remaining() {
                warn!(
                    "User data header element {:#04x} declares {} octets, {} left",
                    id,
                    len,
                    buf.remaining()
                );
                break;
            }
            let mut value = buf.copy_to_bytes(len);
            trace!("User data header element {:#04x}, {} octets", id, len);
            header.apply_element(id, &mut value);
        }

        Ok((header, total))
    }

    fn apply_element(&mut self, id: u8, value: &mut Bytes) {
        let len = value.len();
        match (id, len) {
            (IEI_CONCATENATED_8BIT, 3) | (IEI_CONCATENATED_16BIT, 4) => {
                let is_eight_bits = id == IEI_CONCATENATED_8BIT;
                let ref_number = if is_eight_bits {
                    u16::from(value.get_u8())
                } else {
                    value.get_u16()
                };
                let concat = ConcatRef {
                    ref_number,
                    msg_count: value.get_u8(),
                    seq_number: value.get_u8(),
                    is_eight_bits,
                };
                if concat.is_valid() {
                    self.concat_ref = Some(concat);
                } else {
                    warn!(
                        "Dropping concatenation reference: part {} of {}",
                        concat.seq_number, concat.msg_count
                    );
                }
            }
            (IEI_APPLICATION_PORT_8BIT, 2) => {
                self.port_addrs = Some(PortAddrs {
                    dest_port: u16::from(value.get_u8()),
                    orig_port: u16::from(value.get_u8()),
                    are_eight_bits: true,
                });
            }
            (IEI_APPLICATION_PORT_16BIT, 4) => {
                self.port_addrs = Some(PortAddrs {
                    dest_port: value.get_u16(),
                    orig_port: value.get_u16(),
                    are_eight_bits: false,
                });
            }
            (
                IEI_CONCATENATED_8BIT
                | IEI_CONCATENATED_16BIT
                | IEI_APPLICATION_PORT_8BIT
                | IEI_APPLICATION_PORT_16BIT,
                _,
            ) => {
                warn!(
                    "Dropping user data header element {:#04x} with bad length {}",
                    id, len
                );
            }
            _ => self.misc.push(Tlv::new(id, value.clone())),
        }
    }

    /// Serializes the header, leading length octet included.
    pub fn to_bytes(&self) -> Result<Bytes, CodecError> {
        let misc_len: usize = self.misc.iter().map(Tlv::encoded_len).sum();
        let mut buf = BytesMut::with_capacity(13 + misc_len);
        buf.put_u8(0);

        if let Some(concat) = &self.concat_ref {
            if concat.is_eight_bits {
                buf.put_u8(IEI_CONCATENATED_8BIT);
                buf.put_u8(3);
                buf.put_u8(eight_bit_value("concat_ref", concat.ref_number)?);
            } else {
                buf.put_u8(IEI_CONCATENATED_16BIT);
                buf.put_u8(4);
                buf.put_u16(concat.ref_number);
            }
            buf.put_u8(concat.msg_count);
            buf.put_u8(concat.seq_number);
        }

        if let Some(ports) = &self.port_addrs {
            if ports.are_eight_bits {
                buf.put_u8(IEI_APPLICATION_PORT_8BIT);
                buf.put_u8(2);
                buf.put_u8(eight_bit_value("port_addrs", ports.dest_port)?);
                buf.put_u8(eight_bit_value("port_addrs", ports.orig_port)?);
            } else {
                buf.put_u8(IEI_APPLICATION_PORT_16BIT);
                buf.put_u8(4);
                buf.put_u16(ports.dest_port);
                buf.put_u16(ports.orig_port);
            }
        }

        for element in &self.misc {
            if element.value.len() > usize::from(u8::MAX) {
                return Err(CodecError::FieldValidation {
                    field: "user_data_header",
                    reason: format!(
                        "element {:#04x} has {} octets",
                        element.tag,
                        element.value.len()
                    ),
                });
            }
            element.encode(&mut buf);
        }

        let body_len = buf.len() - 1;
        buf[0] = u8::try_from(body_len).map_err(|_| CodecError::FieldValidation {
            field: "user_data_header",
            reason: format!("{body_len} octets exceed 255"),
        })?;
        Ok(buf.freeze())
    }
}

fn eight_bit_value(field: &'static str, value: u16) -> Result<u8, CodecError> {
    u8::try_from(value).map_err(|_| CodecError::FieldValidation {
        field,
        reason: format!("{value} does not fit the 8-bit element"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn concat(ref_number: u16, msg_count: u8, seq_number: u8, is_eight_bits: bool) -> ConcatRef {
        ConcatRef {
            ref_number,
            msg_count,
            seq_number,
            is_eight_bits,
        }
    }

    fn round_trip(header: &UserDataHeader) -> UserDataHeader {
        let bytes = header.to_bytes().unwrap();
        let (decoded, used) = UserDataHeader::decode(&bytes).unwrap();
        assert_eq!(used, bytes.len());
        decoded
    }

    #[test]
    fn test_concat_8bit_wire_form() {
        let header = UserDataHeader {
            concat_ref: Some(concat(0xEE, 2, 2, true)),
            ..Default::default()
        };
        let bytes = header.to_bytes().unwrap();
        assert_eq!(bytes.as_ref(), &[0x05, 0x00, 0x03, 0xEE, 0x02, 0x02]);
        assert_eq!(round_trip(&header), header);
    }

    #[test]
    fn test_concat_and_ports_16bit() {
        let header = UserDataHeader {
            concat_ref: Some(concat(0x34, 5, 2, false)),
            port_addrs: Some(PortAddrs {
                dest_port: 88,
                orig_port: 66,
                are_eight_bits: false,
            }),
            misc: Vec::new(),
        };
        let bytes = header.to_bytes().unwrap();
        assert_eq!(bytes.len(), 1 + 6 + 6);
        assert_eq!(round_trip(&header), header);
    }

    #[test]
    fn test_invalid_concat_decodes_absent() {
        for is_eight_bits in [true, false] {
            for (count, seq) in [(0, 2), (1, 2), (1, 0), (0, 0)] {
                let header = UserDataHeader {
                    concat_ref: Some(concat(0x12, count, seq, is_eight_bits)),
                    ..Default::default()
                };
                assert_eq!(round_trip(&header).concat_ref, None);
            }
            let valid = UserDataHeader {
                concat_ref: Some(concat(0x12, 2, 1, is_eight_bits)),
                ..Default::default()
            };
            assert_eq!(round_trip(&valid), valid);
        }
    }

    #[test]
    fn test_invalid_concat_does_not_hide_later_elements() {
        // concat 8-bit part 3 of 1, then 8-bit ports
        let data = [0x09, 0x00, 0x03, 0x01, 0x01, 0x03, 0x04, 0x02, 0x10, 0x20];
        let (header, used) = UserDataHeader::decode(&data).unwrap();
        assert_eq!(used, data.len());
        assert_eq!(header.concat_ref, None);
        assert_eq!(
            header.port_addrs,
            Some(PortAddrs {
                dest_port: 0x10,
                orig_port: 0x20,
                are_eight_bits: true,
            })
        );
    }

    #[test]
    fn test_unknown_elements_are_preserved() {
        let data = [0x07, 0x24, 0x01, 0x01, 0x0A, 0x02, 0xAB, 0xCD];
        let (header, _) = UserDataHeader::decode(&data).unwrap();
        assert_eq!(
            header.misc,
            vec![Tlv::new(0x24, vec![0x01]), Tlv::new(0x0A, vec![0xAB, 0xCD])]
        );
        assert_eq!(header.to_bytes().unwrap().as_ref(), &data);
    }

    #[test]
    fn test_element_overrunning_header_stops_parsing() {
        let data = [0x04, 0x00, 0x03, 0x01, 0x02, 0xFF];
        let (header, used) = UserDataHeader::decode(&data).unwrap();
        assert_eq!(used, 5);
        assert!(header.is_empty());
    }

    #[test]
    fn test_header_longer_than_payload() {
        let data = [0x08, 0x00, 0x03];
        assert!(matches!(
            UserDataHeader::decode(&data),
            Err(CodecError::TruncatedPdu { declared: 9, available: 3, .. })
        ));
    }

    #[test]
    fn test_eight_bit_elements_reject_wide_values() {
        let header = UserDataHeader {
            concat_ref: Some(concat(0x1234, 2, 1, true)),
            ..Default::default()
        };
        assert!(matches!(
            header.to_bytes(),
            Err(CodecError::FieldValidation { field: "concat_ref", .. })
        ));

        let header = UserDataHeader {
            port_addrs: Some(PortAddrs {
                dest_port: 0x0150,
                orig_port: 0x0203,
                are_eight_bits: true,
            }),
            ..Default::default()
        };
        assert!(matches!(
            header.to_bytes(),
            Err(CodecError::FieldValidation { field: "port_addrs", .. })
        ));

        let header = UserDataHeader {
            port_addrs: Some(PortAddrs {
                dest_port: 0x50,
                orig_port: 0x03,
                are_eight_bits: true,
            }),
            ..Default::default()
        };
        assert_eq!(round_trip(&header), header);
    }
}
