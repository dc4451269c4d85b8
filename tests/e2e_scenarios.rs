//! End-to-end generation scenarios
//!
//! These tests drive the public API the way the CLI does: build a config,
//! enumerate one axis, and check the telegrams and audit records produced.

use mbus_telegen::util::hex::parse_telegram;
use mbus_telegen::{
    generate, Code, GenerationMode, GeneratorConfig, RecordData, TelegenError,
};
use std::collections::BTreeSet;

fn codes(list: &[u8]) -> BTreeSet<Code> {
    list.iter().copied().map(Code).collect()
}

fn dib_scenario_config() -> GeneratorConfig {
    GeneratorConfig {
        data: 11_111_111,
        exclude_dib: codes(&[0x05, 0x06, 0x07, 0x0F, 0x0D]),
        header: String::new(),
        ..Default::default()
    }
}

#[test]
fn e2e_dib_enumeration_group_of_eight() {
    let batch = generate(&dib_scenario_config(), GenerationMode::Dib).unwrap();

    assert_eq!(
        batch.telegram_strings(),
        vec![
            "00 13 01 13 6F 02 13 67 2B 03 13 C7 8A A9 04 13 C7 8A A9 00",
            "08 13 09 13 12 0A 13 12 11 0B 13 12 11 11 0C 13 12 11 11 11 0E 13 12 11 11 11 00 00",
        ]
    );
    assert_eq!(batch.telegrams[0].payload, 11_111_111);
    assert_eq!(batch.telegrams[1].payload, 11_111_112);
    assert_eq!(
        batch.telegrams[0].audit().lines().nth(1),
        Some("DIB_2 = 01 VIB_2 = 13 Data_2 = 111")
    );
}

#[test]
fn e2e_dib_enumeration_single_group() {
    let config = GeneratorConfig {
        dib_group_size: 16,
        ..dib_scenario_config()
    };
    let batch = generate(&config, GenerationMode::Dib).unwrap();
    assert_eq!(batch.len(), 1);

    let records = batch.records()[0];
    let dibs: Vec<String> = records.iter().map(|r| r.dib.to_string()).collect();
    assert_eq!(
        dibs,
        vec!["00", "01", "02", "03", "04", "08", "09", "0A", "0B", "0C", "0E"]
    );

    let record = &records[9];
    assert_eq!(record.dib, Code(0x0C));
    assert_eq!(record.vib, Code(0x13));
    assert_eq!(
        record.data,
        RecordData::Encoded {
            bytes: vec![0x11, 0x11, 0x11, 0x11],
            value: "11111111".to_string()
        }
    );
    assert_eq!(record.wire(), "0C 13 11 11 11 11");
}

#[test]
fn e2e_vib_primary_with_default_header() {
    let batch = generate(&GeneratorConfig::default(), GenerationMode::VibPrimary).unwrap();

    // 0x00..=0x7F in groups of 8
    assert_eq!(batch.len(), 16);
    assert!(batch.telegrams[0]
        .wire
        .starts_with("20 7A 60 32 00 00 0C 00 11 11 11 11 0C 01 11 11 11 11"));
    assert!(batch.telegrams[15]
        .wire
        .ends_with("0C 7F 26 11 11 11"));
    for telegram in batch.iter() {
        assert_eq!(telegram.records.len(), 8);
        assert!(telegram.records.iter().all(|r| r.dib == Code(0x0C)));
    }
}

#[test]
fn e2e_payload_is_sequenced_per_telegram() {
    let config = GeneratorConfig {
        data: 500,
        ..Default::default()
    };
    let batch = generate(&config, GenerationMode::VibPrimary).unwrap();
    for (n, telegram) in batch.iter().enumerate() {
        assert_eq!(telegram.payload, 500 + n as u64);
    }
}

#[test]
fn e2e_extension_mode() {
    let mut config = GeneratorConfig {
        header: "{len} 44".to_string(),
        ..Default::default()
    };

    assert!(matches!(
        generate(&config, GenerationMode::VibExtension),
        Err(TelegenError::MissingExtension)
    ));

    config.extension = Some(Code(0x3C));
    let batch = generate(&config, GenerationMode::VibExtension).unwrap();
    assert_eq!(batch.len(), 16);
    // 8 records of DIB VIB EXT + 4 data bytes, plus the byte after the slot
    assert!(batch.telegrams[0]
        .wire
        .starts_with("39 44 0C 00 3C 11 11 11 11 0C 01 3C"));
    assert_eq!(
        batch.telegrams[0].audit().lines().next(),
        Some("DIB_1 = 0C VIB_1 = 00 3C Data_1 = 11111111")
    );
}

#[test]
fn e2e_unsupported_classes_do_not_stop_the_run() {
    let config = GeneratorConfig {
        dib_group_size: 16,
        header: "{len}".to_string(),
        ..Default::default()
    };
    let batch = generate(&config, GenerationMode::Dib).unwrap();
    assert_eq!(batch.len(), 1);

    let telegram = &batch.telegrams[0];
    assert_eq!(telegram.records.len(), 16);
    assert_eq!(telegram.flagged_records(), 2);
    assert_eq!(
        telegram
            .records
            .iter()
            .filter(|r| r.data == RecordData::ZeroWidth)
            .count(),
        2
    );

    // 32 DIB/VIB bytes + 44 data bytes
    let bytes = parse_telegram(&telegram.wire).unwrap();
    assert_eq!(bytes[0], 0x4C);
    assert_eq!(bytes.len(), 77);
}

#[test]
fn e2e_every_code_excluded_yields_no_telegrams() {
    let config = GeneratorConfig {
        exclude_dib: (0x00..=0x0F).map(Code).collect(),
        ..Default::default()
    };
    let batch = generate(&config, GenerationMode::Dib).unwrap();
    assert!(batch.is_empty());
}

#[test]
fn e2e_invalid_mode_string() {
    let result = "VIB_secondary".parse::<GenerationMode>();
    assert!(matches!(result, Err(TelegenError::InvalidMode(_))));
}

#[test]
fn e2e_batch_serializes_records() {
    let batch = generate(&dib_scenario_config(), GenerationMode::Dib).unwrap();
    let json = serde_json::to_value(&batch).unwrap();
    assert_eq!(json["mode"], "Dib");
    assert_eq!(json["telegrams"][1]["records"][4]["dib"], "0C");
    assert_eq!(json["telegrams"][1]["records"][4]["data"]["value"], "11111112");
    assert_eq!(json["telegrams"][0]["records"][0]["data"]["kind"], "zero_width");
}
