use mbus_telegen::payload::data_encoding::*;
use mbus_telegen::payload::size_table::{size_class, DataFormat, SizeClass, SIZE_TABLE};
use mbus_telegen::{Code, TelegenError};

#[test]
fn test_bcd_examples() {
    // (DIB, value, wire, truncated)
    let cases = [
        (0x09, 123_456, "56", "56"),
        (0x0A, 123_456, "56 34", "3456"),
        (0x0B, 123_456, "56 34 12", "123456"),
        (0x0C, 11_111_111, "11 11 11 11", "11111111"),
        (0x0C, 123_456, "56 34 12 00", "123456"),
        (0x0E, 11_111_112, "12 11 11 11 00 00", "11111112"),
        (0x09, 0, "00", "0"),
    ];

    for (dib, value, wire, truncated) in cases {
        let encoded = encode_data(Code(dib), value).unwrap();
        assert_eq!(encoded.wire(), wire, "DIB {dib:02X} value {value}");
        assert_eq!(encoded.truncated, truncated, "DIB {dib:02X} value {value}");
    }
}

#[test]
fn test_binary_examples() {
    let cases = [
        (0x01, 11_111_111, "6F", "111"),
        (0x02, 11_111_111, "67 2B", "11111"),
        (0x03, 11_111_111, "C7 8A A9", "11111111"),
        (0x04, 11_111_111, "C7 8A A9 00", "11111111"),
        (0x05, 255, "FF 00 00 00", "255"),
        (0x06, 1, "01 00 00 00 00 00", "1"),
        (0x07, 0x0102_0304_0506_0708, "08 07 06 05 04 03 02 01", "72623859790382856"),
    ];

    for (dib, value, wire, truncated) in cases {
        let encoded = encode_data(Code(dib), value).unwrap();
        assert_eq!(encoded.wire(), wire, "DIB {dib:02X} value {value}");
        assert_eq!(encoded.truncated, truncated, "DIB {dib:02X} value {value}");
    }
}

#[test]
fn test_binary_truncation_is_decimal_not_modulo() {
    // 256 % 256 would be 0; digit stripping gives 56
    let encoded = encode_binary(256, 1);
    assert_eq!(encoded.truncated, "56");
    assert_eq!(encoded.bytes, vec![56]);
}

#[test]
fn test_bcd_truncation_keeps_low_nibbles() {
    let encoded = encode_bcd(987_654_321, 2);
    assert_eq!(encoded.bytes, vec![0x21, 0x43]);
    assert_eq!(encoded.truncated, "4321");
}

#[test]
fn test_zero_width_classes() {
    for dib in [0x00u8, 0x08, 0x40, 0x88] {
        match encode_data(Code(dib), 123) {
            Err(TelegenError::ZeroWidthField(code)) => assert_eq!(code, Code(dib)),
            other => panic!("DIB {dib:02X}: unexpected {other:?}"),
        }
    }
}

#[test]
fn test_unsupported_classes() {
    for dib in [0x0Du8, 0x0F, 0x4D, 0x8F] {
        assert!(matches!(
            encode_data(Code(dib), 123),
            Err(TelegenError::UnsupportedSizeClass(_))
        ));
    }
}

#[test]
fn test_every_fixed_class_restores_truncated_value() {
    for value in [0u64, 7, 99, 256, 65_536, 11_111_111, 987_654_321_012, u64::MAX] {
        for (nibble, class) in SIZE_TABLE.iter().enumerate() {
            let SizeClass::Fixed { width, format } = *class else {
                continue;
            };
            let encoded = encode_data(Code(nibble as u8), value).unwrap();
            assert_eq!(encoded.bytes.len(), width);
            let restored = decode_field(&encoded.bytes, format).unwrap();
            assert_eq!(restored, encoded.truncated.parse::<u64>().unwrap());
        }
    }
}

#[test]
fn test_decode_field_rejects_invalid_bcd() {
    assert_eq!(decode_field(&[0x1A], DataFormat::Bcd), None);
    assert_eq!(decode_field(&[0x34, 0x12], DataFormat::Bcd), Some(1234));
    assert_eq!(decode_field(&[0x34, 0x12], DataFormat::Binary), Some(0x1234));
}

#[test]
fn test_size_class_lookup_masks_dib() {
    assert_eq!(
        size_class(Code(0x8C)),
        SizeClass::Fixed {
            width: 4,
            format: DataFormat::Bcd
        }
    );
}
