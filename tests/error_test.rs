mod common;

use common::*;
use esp_codec::{ErrorKind, EspError, ParseOptions, Plugin, Signature};
use std::sync::atomic::AtomicBool;

fn header_len() -> u64 {
    tes4().len() as u64
}

/// 一个 GLOB 组，返回 (数据, FLTV 子记录的绝对偏移)
fn glob_plugin() -> (Vec<u8>, u64) {
    let data = plugin_bytes(&[group(*b"GLOB", 0, &glob_record(0x800, "Abc", 2.0))]);
    // 组头 + 记录头 + EDID(10) + FNAM(7)
    let fltv = header_len() + 24 + 24 + 10 + 7;
    (data, fltv)
}

fn compressed_with_bad_prefix() -> Vec<u8> {
    let body = subrecord(b"EDID", &zstring("Broken"));
    let mut weap = compressed_record(b"WEAP", 0x900, &body);
    let claimed = (body.len() as u32 + 5).to_le_bytes();
    weap[24..28].copy_from_slice(&claimed);
    weap
}

#[test]
fn test_truncated_subrecord_offset() {
    let (data, fltv) = glob_plugin();
    let cut = &data[..(fltv + 8) as usize];

    match Plugin::parse(cut) {
        Err(EspError::TruncatedInput { offset, signature, .. }) => {
            assert_eq!(offset, fltv);
            assert_eq!(signature, Some(Signature::new(*b"GLOB")));
        }
        other => panic!("应为 TruncatedInput: {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_truncated_group_header() {
    let (data, _) = glob_plugin();
    let cut = &data[..(header_len() + 10) as usize];

    match Plugin::parse(cut) {
        Err(EspError::TruncatedInput { offset, needed, available, signature }) => {
            assert_eq!(offset, header_len());
            assert_eq!(needed, 24);
            assert_eq!(available, 10);
            assert_eq!(signature, Some(Signature::GRUP));
        }
        other => panic!("应为 TruncatedInput: {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_truncation_is_fatal_in_recover_mode() {
    let (data, fltv) = glob_plugin();
    let cut = &data[..(fltv + 8) as usize];
    let result = Plugin::parse_with_options(cut, &ParseOptions::recovering());
    assert!(matches!(result, Err(EspError::TruncatedInput { .. })));
}

#[test]
fn test_group_extends_past_input() {
    let (mut data, _) = glob_plugin();
    let group_size = header_len() as usize + 4;
    let declared = u32::from_le_bytes(data[group_size..group_size + 4].try_into().unwrap());
    data[group_size..group_size + 4].copy_from_slice(&(declared + 10).to_le_bytes());

    match Plugin::parse(&data) {
        Err(err @ EspError::TruncatedInput { .. }) => {
            assert!(err.to_string().contains("in GLOB"), "{}", err);
            match err {
                EspError::TruncatedInput { offset, needed, .. } => {
                    assert_eq!(offset, data.len() as u64);
                    assert_eq!(needed, 10);
                }
                _ => unreachable!(),
            }
        }
        other => panic!("应为 TruncatedInput: {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_empty_input() {
    assert!(matches!(
        Plugin::parse(&[]),
        Err(EspError::TruncatedInput { offset: 0, .. })
    ));
}

#[test]
fn test_invalid_format() {
    let data = group(*b"GLOB", 0, &[]);
    match Plugin::parse(&data) {
        Err(EspError::InvalidFormat(signature)) => assert_eq!(signature, Signature::GRUP),
        other => panic!("应为 InvalidFormat: {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_input_too_large() {
    let (data, _) = glob_plugin();
    let options = ParseOptions {
        max_input_size: 16,
        ..Default::default()
    };
    match Plugin::parse_with_options(&data, &options) {
        Err(EspError::InputTooLarge { size, limit }) => {
            assert_eq!(size, data.len() as u64);
            assert_eq!(limit, 16);
        }
        other => panic!("应为 InputTooLarge: {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_compression_size_mismatch() {
    let data = plugin_bytes(&[group(*b"WEAP", 0, &compressed_with_bad_prefix())]);
    let record_offset = header_len() + 24;

    let err = Plugin::parse(&data).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::CorruptRecord);
    assert_eq!(err.offset(), Some(record_offset + 24));
    assert!(err.to_string().contains("WEAP"));
}

#[test]
fn test_decompressed_size_limit() {
    let body = subrecord(b"EDID", &zstring("Weap10mmPistolLongName"));
    let data = plugin_bytes(&[group(*b"WEAP", 0, &compressed_record(b"WEAP", 0x1, &body))]);
    let options = ParseOptions {
        max_decompressed_size: 8,
        ..Default::default()
    };

    let err = Plugin::parse_with_options(&data, &options).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::CorruptRecord);
    assert!(Plugin::parse(&data).is_ok());
}

#[test]
fn test_corrupt_record_recovered() {
    let mut children = compressed_with_bad_prefix();
    children.extend(glob_record(0x901, "StillHere", 3.0));
    let data = plugin_bytes(&[group(*b"WEAP", 0, &children)]);

    let plugin = Plugin::parse_with_options(&data, &ParseOptions::recovering()).unwrap();
    assert_eq!(plugin.issues.len(), 1);
    let issue = &plugin.issues[0];
    assert_eq!(issue.kind, ErrorKind::CorruptRecord);
    assert_eq!(issue.offset, header_len() + 24);
    assert_eq!(issue.signature, Signature::new(*b"WEAP"));

    let weap = plugin.records().next().unwrap();
    assert!(weap.is_opaque());
    let glob = plugin.records().nth(1).unwrap();
    assert_eq!(glob.get_editor_id().as_deref(), Some("StillHere"));

    assert!(plugin.unparse().unwrap() == data);
}

fn malformed_weap() -> Vec<u8> {
    let mut payload = subrecord(b"EDID", &zstring("Abc"));
    // FULL 声明 20 字节，只剩 3 字节
    payload.extend_from_slice(b"FULL");
    payload.extend_from_slice(&20u16.to_le_bytes());
    payload.extend_from_slice(&[1, 2, 3]);
    record(b"WEAP", 0xA00, 0, &payload)
}

#[test]
fn test_malformed_record_strict() {
    let data = plugin_bytes(&[group(*b"WEAP", 0, &malformed_weap())]);

    match Plugin::parse(&data) {
        Err(EspError::MalformedRecord { offset, signature, declared, consumed }) => {
            assert_eq!(offset, header_len() + 24);
            assert_eq!(signature, Signature::new(*b"WEAP"));
            assert_eq!(declared, 19);
            assert_eq!(consumed, 36);
        }
        other => panic!("应为 MalformedRecord: {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_malformed_record_recovered() {
    let mut children = malformed_weap();
    children.extend(glob_record(0xA01, "Next", 1.0));
    let data = plugin_bytes(&[group(*b"WEAP", 0, &children)]);

    let plugin = Plugin::parse_with_options(&data, &ParseOptions::recovering()).unwrap();
    assert_eq!(plugin.issues.len(), 1);
    assert_eq!(plugin.issues[0].kind, ErrorKind::MalformedRecord);
    assert_eq!(plugin.records().count(), 2);
    assert!(plugin.records().next().unwrap().is_opaque());
    assert!(plugin.unparse().unwrap() == data);
}

/// 组内容30字节，其中的记录声明了100字节负载
fn crossing_group() -> Vec<u8> {
    let mut content = record(b"GLOB", 0xB00, 0, &[]);
    content[4..8].copy_from_slice(&100u32.to_le_bytes());
    content.extend_from_slice(&[0xAB; 6]);
    group(*b"GLOB", 0, &content)
}

#[test]
fn test_child_crossing_group_strict() {
    let data = plugin_bytes(&[crossing_group()]);

    match Plugin::parse(&data) {
        Err(EspError::MalformedGroup { offset, label, declared, consumed }) => {
            assert_eq!(offset, header_len());
            assert_eq!(label, Signature::new(*b"GLOB"));
            assert_eq!(declared, 54);
            assert_eq!(consumed, 24 + 24 + 100);
        }
        other => panic!("应为 MalformedGroup: {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_child_crossing_group_recovered() {
    let next = group(*b"GMST", 0, &glob_record(0xB01, "Fine", 0.5));
    let data = plugin_bytes(&[crossing_group(), next]);

    let plugin = Plugin::parse_with_options(&data, &ParseOptions::recovering()).unwrap();
    assert_eq!(plugin.issues.len(), 1);
    assert_eq!(plugin.issues[0].kind, ErrorKind::MalformedGroup);
    assert_eq!(plugin.issues[0].offset, header_len());

    let broken = plugin.nodes[0].as_group().unwrap();
    assert!(broken.is_opaque());
    assert_eq!(broken.raw_content.as_ref().map(|c| c.len()), Some(30));
    assert!(broken.children.is_empty());

    let fine = plugin.nodes[1].as_group().unwrap();
    assert_eq!(fine.children.len(), 1);
    assert!(plugin.unparse().unwrap() == data);

    let stats = plugin.get_stats();
    assert_eq!(stats.opaque_group_count, 1);
    assert_eq!(stats.issue_count, 1);
}

#[test]
fn test_group_smaller_than_header_is_fatal() {
    let mut bad = group(*b"GLOB", 0, &[]);
    bad[4..8].copy_from_slice(&10u32.to_le_bytes());
    let data = plugin_bytes(&[bad]);

    for options in [ParseOptions::default(), ParseOptions::recovering()] {
        match Plugin::parse_with_options(&data, &options) {
            Err(EspError::MalformedGroup { offset, declared, .. }) => {
                assert_eq!(offset, header_len());
                assert_eq!(declared, 10);
            }
            other => panic!("应为 MalformedGroup: {:?}", other.map(|_| ())),
        }
    }
}

#[test]
fn test_cancellation() {
    let data = sample_plugin();
    let cancel = AtomicBool::new(true);

    match Plugin::parse_cancellable(&data, &ParseOptions::default(), &cancel) {
        Err(EspError::Cancelled { offset }) => assert_eq!(offset, header_len()),
        other => panic!("应为 Cancelled: {:?}", other.map(|_| ())),
    }

    let running = AtomicBool::new(false);
    assert!(Plugin::parse_cancellable(&data, &ParseOptions::default(), &running).is_ok());
}

#[test]
fn test_error_kinds_serialize() {
    let err = EspError::MalformedGroup {
        offset: 1,
        label: Signature::new(*b"CELL"),
        declared: 24,
        consumed: 30,
    };
    assert!(err.is_recoverable());
    assert_eq!(serde_json::to_string(&err.kind()).unwrap(), "\"MalformedGroup\"");
}
