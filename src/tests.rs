//! Integration tests for Bearer Data encoding and decoding

use crate::codec::{self, CodecError};
use crate::datatypes::*;
use crate::util::HexData;

#[cfg(test)]
mod integration_tests {
    use super::*;

    fn decode_hex(hex: &str) -> BearerData {
        let pdu = HexData::decode(hex).unwrap();
        codec::decode(&pdu).unwrap()
    }

    /// Encodes, decodes and compares against the packed form of `record`.
    fn assert_feedback(mut record: BearerData) -> BearerData {
        let pdu = codec::encode(&record).unwrap();
        record.pack().unwrap();
        let decoded = codec::decode(&pdu).unwrap();
        assert_eq!(decoded, record, "pdu {}", HexData(&pdu));
        decoded
    }

    fn header_test_record(header: UserDataHeader, encoding: MessageEncoding) -> BearerData {
        let mut record = BearerData::new(MessageType::Deliver, 55);
        record.user_data = Some(
            UserData::with_encoding("User Data Header (UDH) feedback test", encoding)
                .with_header(header),
        );
        record
    }

    #[test]
    fn test_decode_gsm_standard_sms() {
        let record = decode_hex("00031040900112488ea794e074d69e1b7392c270326cde9e98");
        assert_eq!(record.message_type, MessageType::Deliver);
        assert_eq!(record.message_id, 0x0409);
        assert!(!record.has_user_data_header);
        let user_data = record.user_data.as_ref().unwrap();
        assert_eq!(user_data.encoding, Some(MessageEncoding::Gsm7Bit));
        assert_eq!(user_data.num_fields, 17);
        assert_eq!(user_data.text, "Test standard SMS");
    }

    #[test]
    fn test_decode_short_ascii() {
        let record = decode_hex("0003100160010610262d5ab500");
        assert_eq!(record.message_id, 0x0016);
        assert_eq!(record.text(), Some("bjjj"));
    }

    #[test]
    fn test_decode_ascii_and_ia5() {
        let ascii = decode_hex("00031001d00109104539b4d052ebb3d0");
        assert_eq!(ascii.text(), Some("SMS Rulz"));
        assert_eq!(
            ascii.user_data.as_ref().unwrap().encoding,
            Some(MessageEncoding::Ascii7Bit)
        );

        let ia5 = decode_hex("00031002100109184539b4d052ebb3d0");
        assert_eq!(ia5.message_id, 0x0021);
        assert_eq!(ia5.text(), Some("SMS Rulz"));
        assert_eq!(
            ia5.user_data.as_ref().unwrap().encoding,
            Some(MessageEncoding::Ia5)
        );
    }

    #[test]
    fn test_decode_every_common_subparam() {
        let record = decode_hex(
            "0003200010010410168d2002010503060812011101590501c706069706180000000701c10801c0\
             0901800a01e00b01030c01c00d01070e05039acc13880f018011020566",
        );

        assert_eq!(record.message_type, MessageType::Submit);
        assert_eq!(record.message_id, 1);
        assert_eq!(record.priority, Some(Priority::Emergency));
        assert_eq!(record.privacy, Some(Privacy::Confidential));
        assert!(record.user_ack_req);
        assert!(record.delivery_ack_req);
        assert!(record.read_ack_req);
        assert!(!record.report_req);
        assert_eq!(record.number_of_messages, Some(3));
        assert_eq!(record.alert, Some(Alert::High));
        assert_eq!(record.language, Some(Language::Hebrew));
        assert_eq!(record.display_mode, Some(DisplayMode::User));
        assert_eq!(record.deposit_index, Some(1382));
        assert_eq!(record.user_response_code, Some(5));
        assert_eq!(
            record.msg_center_timestamp,
            Some(Timestamp::new(2008, 12, 1, 11, 1, 59).unwrap())
        );
        assert_eq!(
            record.validity_period,
            Some(TimePeriod::Relative(RelativeTime(199)))
        );
        // absolute deferral is followed by a relative one; ids follow
        // C.S0015 (0x05 validity, 0x07 deferred), so 193 is the deferral
        // even though some published suites label it the validity period
        assert_eq!(
            record.deferred_delivery_time,
            Some(TimePeriod::Relative(RelativeTime(193)))
        );

        let callback = record.callback_number.as_ref().unwrap();
        assert_eq!(callback.digit_mode, DigitMode::Dtmf);
        assert_eq!(callback.address, "3598271");

        let user_data = record.user_data.as_ref().unwrap();
        assert_eq!(user_data.encoding, Some(MessageEncoding::Ascii7Bit));
        assert_eq!(user_data.num_fields, 2);
        assert_eq!(user_data.text, "hi");

        // re-encoding keeps every field
        let pdu = codec::encode(&record).unwrap();
        assert_eq!(codec::decode(&pdu).unwrap(), record);
    }

    #[test]
    fn test_decode_reply_option() {
        let record =
            decode_hex("0003104090011648b6a794e0705476bf77bceae934fe5f6d94d87450080a0180");
        assert_eq!(record.text(), Some("Test Acknowledgement 1"));
        assert!(record.user_ack_req);
        assert!(!record.delivery_ack_req);
        assert!(!record.read_ack_req);
        assert!(!record.report_req);
    }

    #[test]
    fn test_reply_option_flags_feedback() {
        for flag in 0..4 {
            let mut record = BearerData::new(MessageType::Submit, 0x0409);
            record.user_data = Some(UserData::with_encoding(
                "Test Acknowledgement",
                MessageEncoding::Gsm7Bit,
            ));
            match flag {
                0 => record.user_ack_req = true,
                1 => record.delivery_ack_req = true,
                2 => record.read_ack_req = true,
                _ => record.report_req = true,
            }
            let pdu = codec::encode(&record).unwrap();
            let expected = 0x80u8 >> flag;
            assert_eq!(&pdu[pdu.len() - 3..], &[0x0A, 0x01, expected]);
            assert_feedback(record);
        }
    }

    #[test]
    fn test_decode_voicemail_count() {
        let record =
            decode_hex("000310409001124896a794e07595f69f199540ea759a0dc8e00b0163");
        assert_eq!(record.text(), Some("Test Voice mail 99"));
        assert_eq!(record.number_of_messages, Some(99));

        let record =
            decode_hex("00031040900113489ea794e07595f69f199540ea759a0988c0600b0164");
        assert_eq!(record.text(), Some("Test Voice mail 100"));
        assert_eq!(record.number_of_messages, Some(100));
    }

    #[test]
    fn test_decode_eight_bit_callback_number() {
        let record = decode_hex(
            "00031040900112488ea794e070d436cb638bc5e035ce2f97900e06910431323334",
        );
        assert_eq!(record.text(), Some("Test Callback nbr"));
        let callback = record.callback_number.unwrap();
        assert_eq!(callback.digit_mode, DigitMode::EightBit);
        assert_eq!(callback.ton, TypeOfNumber::InternationalOrIp);
        assert_eq!(callback.numbering_plan, NumberingPlan::IsdnTelephony);
        assert_eq!(callback.address, "1234");
    }

    #[test]
    fn test_decode_dtmf_callback_number() {
        let record = decode_hex("00031002300109104539b4d052ebb3d00e07052d4c90a55080");
        assert_eq!(record.text(), Some("SMS Rulz"));
        let callback = record.callback_number.unwrap();
        assert_eq!(callback.digit_mode, DigitMode::Dtmf);
        assert_eq!(callback.number_of_digits(), 10);
        assert_eq!(callback.address, "5099214001");
    }

    #[test]
    fn test_callback_number_feedback() {
        let mut record = BearerData::new(MessageType::Deliver, 7);
        record.user_data = Some(UserData::new("Test Callback nbr"));

        record.callback_number = Some(CdmaSmsAddress::eight_bit(
            "8005551212",
            TypeOfNumber::NationalOrEmail,
            NumberingPlan::IsdnTelephony,
        ));
        assert_feedback(record.clone());

        record.callback_number = Some(CdmaSmsAddress::dtmf("8*55#1012"));
        let decoded = assert_feedback(record);
        assert_eq!(decoded.callback_number.unwrap().address, "8*55#1012");
    }

    #[test]
    fn test_invalid_dtmf_callback_is_dropped() {
        let record = decode_hex("00031000100109104539b4d052ebb3d00e0200e8");
        assert_eq!(record.callback_number, None);
        assert_eq!(record.text(), Some("SMS Rulz"));
    }

    #[test]
    fn test_decode_privacy_indicator() {
        let prefix = "0003104090010c485f4194dfea34becf61b840";
        for (suffix, expected) in [
            ("090140", Privacy::Restricted),
            ("090180", Privacy::Confidential),
            ("0901c0", Privacy::Secret),
        ] {
            let record = decode_hex(&format!("{prefix}{suffix}"));
            assert_eq!(record.privacy, Some(expected));
        }
    }

    #[test]
    fn test_secret_then_restricted_feedback() {
        let mut record = BearerData::new(MessageType::Deliver, 0);
        record.privacy = Some(Privacy::Secret);
        let mut decoded = assert_feedback(record);
        assert_eq!(decoded.privacy, Some(Privacy::Secret));

        decoded.privacy = Some(Privacy::Restricted);
        let pdu = codec::encode(&decoded).unwrap();
        assert_eq!(&pdu[pdu.len() - 3..], &[0x09, 0x01, 0x40]);
        let decoded = assert_feedback(decoded);
        assert_eq!(decoded.privacy, Some(Privacy::Restricted));
    }

    #[test]
    fn test_privacy_indicator_feedback() {
        let mut record = decode_hex("0003104090010c485f4194dfea34becf61b8400901c0");
        assert_eq!(record.privacy, Some(Privacy::Secret));
        record.privacy = Some(Privacy::Restricted);
        let decoded = assert_feedback(record);
        assert_eq!(decoded.privacy, Some(Privacy::Restricted));
    }

    #[test]
    fn test_decode_display_mode() {
        let prefix = "0003104090010c485f4194dfea34becf61b840";
        for (suffix, expected) in [
            ("0f0100", DisplayMode::Immediate),
            ("0f0140", DisplayMode::Default),
            ("0f0180", DisplayMode::User),
        ] {
            let record = decode_hex(&format!("{prefix}{suffix}"));
            assert_eq!(record.display_mode, Some(expected));
        }
        let record = decode_hex("00031002700109104539b4d052ebb3d00f0105");
        assert_eq!(record.display_mode, Some(DisplayMode::Immediate));
    }

    #[test]
    fn test_decode_alert_and_priority() {
        let record = decode_hex("0003104090010d4866a794e07055965b91d040300c0100");
        assert_eq!(record.text(), Some("Test Alert 0"));
        assert_eq!(record.alert, Some(Alert::Default));

        let record = decode_hex("00031002400109104539b4d052ebb3d00c0180");
        assert_eq!(record.alert, Some(Alert::Medium));

        let record = decode_hex("00031002500109104539b4d052ebb3d00801800901c0");
        assert_eq!(record.priority, Some(Priority::Urgent));
        assert_eq!(record.privacy, Some(Privacy::Secret));

        let record = decode_hex("00031002600109104539b4d052ebb3d00901400c01c0");
        assert_eq!(record.privacy, Some(Privacy::Restricted));
        assert_eq!(record.alert, Some(Alert::High));
    }

    #[test]
    fn test_decode_language_indicator() {
        let record = decode_hex(
            "0003104090011748bea794e0731436ef3bd7c2e0352eef27a1c263fe58080d0101",
        );
        assert_eq!(record.text(), Some("Test Language indicator"));
        assert_eq!(record.language, Some(Language::English));
    }

    #[test]
    fn test_gsm_feedback() {
        let mut record = BearerData::new(MessageType::Deliver, 0x1234);
        record.user_data = Some(UserData::with_encoding(
            "More @ testing\nis great^|^~woohoo",
            MessageEncoding::Gsm7Bit,
        ));
        let decoded = assert_feedback(record);
        let user_data = decoded.user_data.unwrap();
        assert_eq!(user_data.text, "More @ testing\nis great^|^~woohoo");
        // four extension characters take an escape septet each
        assert_eq!(user_data.num_fields, 33 + 4);
    }

    #[test]
    fn test_utf16_feedback() {
        let text = "\u{160}u\u{1E5B}\u{301}r\u{1ECF}g\u{1D41A}t\u{E9}\u{4E00}2\u{3042}";
        let mut record = BearerData::new(MessageType::Deliver, 0x1234);
        record.user_data = Some(UserData::new(text));
        let decoded = assert_feedback(record);
        let user_data = decoded.user_data.unwrap();
        assert_eq!(user_data.encoding, Some(MessageEncoding::Unicode16));
        assert_eq!(user_data.text, text);
        assert_eq!(
            usize::from(user_data.num_fields),
            text.encode_utf16().count()
        );
    }

    #[test]
    fn test_legacy_charset_feedback() {
        for (text, encoding) in [
            ("\u{5E9}\u{5DC}\u{5D5}\u{5DD} world", MessageEncoding::LatinHebrew),
            ("caf\u{E9} cr\u{E8}me", MessageEncoding::Latin),
            ("\u{3053}\u{3093}\u{306B}\u{3061}\u{306F}", MessageEncoding::ShiftJis),
            ("\u{C548}\u{B155}\u{D558}\u{C138}\u{C694}", MessageEncoding::Korean),
        ] {
            let mut record = BearerData::new(MessageType::Deliver, 9);
            record.user_data = Some(UserData::with_encoding(text, encoding));
            let decoded = assert_feedback(record);
            assert_eq!(decoded.text(), Some(text), "{encoding}");
        }
    }

    #[test]
    fn test_concat_header_feedback() {
        let header = UserDataHeader {
            concat_ref: Some(ConcatRef {
                ref_number: 0xEE,
                msg_count: 2,
                seq_number: 2,
                is_eight_bits: true,
            }),
            ..Default::default()
        };

        for encoding in [
            MessageEncoding::Ascii7Bit,
            MessageEncoding::Octet,
            MessageEncoding::Gsm7Bit,
            MessageEncoding::Unicode16,
        ] {
            let decoded = assert_feedback(header_test_record(header.clone(), encoding));
            assert!(decoded.has_user_data_header);
            let user_data = decoded.user_data.unwrap();
            assert_eq!(user_data.header.as_ref(), Some(&header));
            assert_eq!(user_data.text, "User Data Header (UDH) feedback test");
        }
    }

    #[test]
    fn test_mixed_header_feedback() {
        let header = UserDataHeader {
            concat_ref: Some(ConcatRef {
                ref_number: 0x34,
                msg_count: 5,
                seq_number: 2,
                is_eight_bits: false,
            }),
            port_addrs: Some(PortAddrs {
                dest_port: 88,
                orig_port: 66,
                are_eight_bits: false,
            }),
            misc: Vec::new(),
        };

        for encoding in [MessageEncoding::Gsm7Bit, MessageEncoding::Unicode16] {
            let decoded = assert_feedback(header_test_record(header.clone(), encoding));
            assert_eq!(decoded.user_data.unwrap().header, Some(header.clone()));
        }
    }

    #[test]
    fn test_unknown_header_element_survives() {
        let header = UserDataHeader {
            misc: vec![Tlv::new(0x24, vec![0x01])],
            ..Default::default()
        };
        let decoded = assert_feedback(header_test_record(header.clone(), MessageEncoding::Octet));
        assert_eq!(decoded.user_data.unwrap().header, Some(header));
    }

    #[test]
    fn test_full_record_feedback() {
        let mut record = BearerData::new(MessageType::Submit, 0xBEEF);
        record.user_ack_req = true;
        record.report_req = true;
        record.priority = Some(Priority::Interactive);
        record.privacy = Some(Privacy::NotRestricted);
        record.language = Some(Language::French);
        record.alert = Some(Alert::Low);
        record.display_mode = Some(DisplayMode::Default);
        record.number_of_messages = Some(42);
        record.deposit_index = Some(0xFFFF);
        record.user_response_code = Some(0);
        record.msg_center_timestamp = Some(Timestamp::new(1999, 2, 28, 23, 59, 0).unwrap());
        record.validity_period = Some(TimePeriod::Absolute(
            Timestamp::new(2030, 1, 1, 0, 0, 0).unwrap(),
        ));
        record.deferred_delivery_time = Some(TimePeriod::Relative(RelativeTime::IMMEDIATE));
        record.message_status = Some(MessageStatus::new(
            ErrorClass::Permanent,
            MessageStatus::BLOCKED_DESTINATION,
        ));
        record.user_data = Some(UserData::new("all fields"));
        assert_feedback(record);
    }

    #[test]
    fn test_message_status_on_delivery_ack() {
        let mut record = BearerData::new(MessageType::DeliveryAck, 3);
        record.message_status = Some(MessageStatus::new(
            ErrorClass::NoError,
            MessageStatus::DELIVERED,
        ));
        let pdu = codec::encode(&record).unwrap();
        assert_eq!(&pdu[pdu.len() - 3..], &[0x14, 0x01, 0x02]);
        let decoded = codec::decode(&pdu).unwrap();
        assert!(decoded.message_status.unwrap().is_delivered());
    }

    #[test]
    fn test_truncated_user_data_is_fatal() {
        let pdu = HexData::decode("00031001d00109104539b4d052ebb3").unwrap();
        assert!(matches!(
            codec::decode(&pdu),
            Err(CodecError::TruncatedPdu {
                id: 0x01,
                declared: 9,
                available: 8
            })
        ));
    }

    #[test]
    fn test_header_longer_than_payload_is_fatal() {
        // header flag set; octet payload [0x05, 0x00] declares a 5 octet header
        let pdu = HexData::decode("0003100018 010400102800").unwrap();
        assert!(matches!(
            codec::decode(&pdu),
            Err(CodecError::TruncatedPdu { id: 0x01, .. })
        ));
    }

    #[test]
    fn test_invalid_concat_ref_is_dropped() {
        let header = UserDataHeader {
            concat_ref: Some(ConcatRef {
                ref_number: 1,
                msg_count: 2,
                seq_number: 3,
                is_eight_bits: true,
            }),
            ..Default::default()
        };
        let record = header_test_record(header, MessageEncoding::Octet);
        let pdu = codec::encode(&record).unwrap();
        let decoded = codec::decode(&pdu).unwrap();
        assert!(decoded.has_user_data_header);
        let user_data = decoded.user_data.unwrap();
        assert_eq!(user_data.header, Some(UserDataHeader::default()));
        assert_eq!(user_data.text, "User Data Header (UDH) feedback test");
    }

    #[test]
    fn test_ia5_encode_feedback() {
        let mut record = BearerData::new(MessageType::Deliver, 0x0021);
        record.user_data = Some(UserData::with_encoding("SMS Rulz", MessageEncoding::Ia5));
        let pdu = codec::encode(&record).unwrap();
        assert_eq!(HexData(&pdu).to_string(), "00031002100109184539B4D052EBB3D0");
        let decoded = assert_feedback(record);
        assert_eq!(decoded.user_data.unwrap().num_fields, 8);
    }

    #[test]
    fn test_wide_eight_bit_header_values_are_rejected() {
        let header = UserDataHeader {
            concat_ref: Some(ConcatRef {
                ref_number: 0x1234,
                msg_count: 2,
                seq_number: 1,
                is_eight_bits: true,
            }),
            port_addrs: Some(PortAddrs {
                dest_port: 0x0150,
                orig_port: 0x0203,
                are_eight_bits: true,
            }),
            misc: Vec::new(),
        };
        let record = header_test_record(header, MessageEncoding::Octet);
        assert!(matches!(
            codec::encode(&record),
            Err(CodecError::FieldValidation { .. })
        ));
    }

    #[test]
    fn test_header_flag_alone_round_trips() {
        let record = decode_hex("0003100018");
        assert!(!record.has_user_data_header);
        let pdu = codec::encode(&record).unwrap();
        assert_eq!(codec::decode(&pdu).unwrap(), record);
    }

    #[test]
    fn test_empty_input_decodes_to_default() {
        assert_eq!(codec::decode(&[]).unwrap(), BearerData::default());
    }
}
