mod common;

use common::*;
use esp_codec::group::Node;
use esp_codec::{FieldValue, FormId, Plugin, RecordBody, Signature, SizeForm};

fn node_size(node: &Node) -> u64 {
    match node {
        Node::Record(record) => (HEADER_SIZE as u64) + record.declared_size() as u64,
        Node::Group(group) => group.declared_size() as u64,
    }
}

#[test]
fn test_round_trip_identity() {
    let data = sample_plugin();
    let plugin = Plugin::parse(&data).expect("解析失败");
    assert!(!plugin.has_issues());

    let rebuilt = plugin.unparse().expect("序列化失败");
    assert_eq!(rebuilt.len(), data.len());
    assert!(rebuilt == data, "重建后字节不一致");
}

#[test]
fn test_idempotent_reencode() {
    let data = sample_plugin();
    let first = Plugin::parse(&data).unwrap().unparse().unwrap();
    let second = Plugin::parse(&first).unwrap().unparse().unwrap();
    assert!(first == second);
}

#[test]
fn test_free_functions_match_methods() {
    let data = sample_plugin();
    let plugin = esp_codec::parse(&data).unwrap();
    assert!(esp_codec::unparse(&plugin).unwrap() == data);
}

#[test]
fn test_size_fields_consistent() {
    let data = sample_plugin();
    let plugin = Plugin::parse(&data).unwrap();

    let mut groups = 0;
    for (_, node) in plugin.walk() {
        if let Node::Group(group) = node {
            groups += 1;
            let content: u64 = group.children.iter().map(node_size).sum();
            assert_eq!(
                group.declared_size() as u64,
                HEADER_SIZE as u64 + content,
                "组 {} 大小不一致",
                group.get_label_signature()
            );
        }
    }
    assert_eq!(groups, 8);

    let top_level: u64 = plugin.nodes.iter().map(node_size).sum();
    let header = HEADER_SIZE as u64 + plugin.header.declared_size() as u64;
    assert_eq!(header + top_level, data.len() as u64);
}

#[test]
fn test_tree_shape_and_offsets() {
    let data = sample_plugin();
    let plugin = Plugin::parse(&data).unwrap();

    let labels: Vec<Signature> = plugin
        .nodes
        .iter()
        .filter_map(|n| n.as_group())
        .map(|g| g.get_label_signature())
        .collect();
    assert_eq!(
        labels,
        vec![
            Signature::new(*b"GMST"),
            Signature::new(*b"GLOB"),
            Signature::new(*b"WEAP"),
            Signature::new(*b"CELL"),
        ]
    );

    // 第一个组紧跟在 TES4 后面
    assert_eq!(plugin.nodes[0].offset(), Some(tes4().len() as u64));

    let refr = plugin.records().find(|r| r.signature() == Signature::new(*b"REFR")).unwrap();
    let depth = plugin
        .walk()
        .find(|(_, n)| n.as_record().map(|r| r.form_id().0) == Some(0x601))
        .map(|(depth, _)| depth)
        .unwrap();
    assert_eq!(depth, 5);
    assert_eq!(refr.form_id().0, 0x601);
}

#[test]
fn test_lazy_decode_is_transparent() {
    let data = sample_plugin();
    let mut plugin = Plugin::parse(&data).unwrap();

    // 解码所有字段，不修改
    let _ = plugin.summary();
    let _ = plugin.to_json().unwrap();
    let ctx = plugin.field_context();
    for record in plugin.records() {
        for subrecord in record.subrecords() {
            let _ = record.decode_subrecord(subrecord, ctx);
        }
    }
    // 可变访问但不修改也不应改变输出
    for record in plugin.records_mut() {
        let _ = record.get_field(Signature::EDID);
    }

    assert!(plugin.unparse().unwrap() == data);
}

#[test]
fn test_decoded_values() {
    let plugin = Plugin::parse(&sample_plugin()).unwrap();
    let find = |id: u32| plugin.records().find(|r| r.form_id().0 == id).unwrap();

    assert_eq!(find(0x100).get_field(Signature::new(*b"DATA")), Some(FieldValue::F32(64.0)));
    assert_eq!(
        find(0x101).get_field(Signature::new(*b"DATA")),
        Some(FieldValue::String("Save".into()))
    );
    assert_eq!(find(0x200).get_field(Signature::new(*b"FLTV")), Some(FieldValue::F32(1.5)));

    let weap = find(0x300);
    assert!(weap.is_compressed());
    assert_eq!(weap.get_editor_id().as_deref(), Some("Weap10mmPistol"));
    assert_eq!(
        weap.get_field(Signature::new(*b"FULL")),
        Some(FieldValue::String("10mm Pistol".into()))
    );

    let refr = find(0x601);
    assert_eq!(refr.get_field(Signature::new(*b"NAME")), Some(FieldValue::FormId(FormId(0x300))));
    match refr.get_field(Signature::new(*b"DATA")) {
        Some(FieldValue::Struct(values)) => assert_eq!(values[2], FieldValue::F32(3.0)),
        other => panic!("REFR DATA 解码错误: {:?}", other),
    }

    assert_eq!(plugin.author().as_deref(), Some("Tester"));
    assert_eq!(plugin.masters(), vec!["Fallout3.esm"]);
}

#[test]
fn test_zero_length_subrecord_preserved() {
    let data = sample_plugin();
    let plugin = Plugin::parse(&data).unwrap();
    let glob = plugin.records().find(|r| r.form_id().0 == 0x200).unwrap();

    let modl = glob.find_subrecord(Signature::new(*b"MODL")).unwrap();
    assert!(modl.data.is_empty());
    assert_eq!(glob.get_field(Signature::new(*b"MODL")), Some(FieldValue::Raw(Vec::new())));
    assert!(plugin.unparse().unwrap() == data);
}

#[test]
fn test_padding_preserved() {
    let plugin = Plugin::parse(&sample_plugin()).unwrap();
    let glob = plugin.records().find(|r| r.form_id().0 == 0x200).unwrap();
    match glob.body() {
        RecordBody::Subrecords { subrecords, padding } => {
            assert_eq!(subrecords.len(), 4);
            assert_eq!(padding, &vec![0, 0, 0]);
        }
        RecordBody::Opaque(_) => panic!("GLOB 不应为原始字节"),
    }
}

#[test]
fn test_unknown_record_passthrough() {
    let data = sample_plugin();
    let plugin = Plugin::parse(&data).unwrap();
    let unknown = plugin.records().find(|r| r.signature() == Signature::new(*b"ZZZZ")).unwrap();

    assert!(unknown.is_opaque());
    assert!(matches!(unknown.body(), RecordBody::Opaque(bytes) if bytes == &[0xDE, 0xAD, 0xBE, 0xEF, 0x01]));
    assert!(!plugin.has_issues());
    assert!(plugin.unparse().unwrap() == data);
}

#[test]
fn test_unknown_record_with_subrecords_is_sliced() {
    let unknown = record(b"QQQQ", 0x10, 0, &subrecord(b"EDID", &zstring("Odd")));
    let data = plugin_bytes(&[group(*b"QQQQ", 0, &unknown)]);
    let plugin = Plugin::parse(&data).unwrap();
    let record = plugin.records().next().unwrap();

    assert!(!record.is_opaque());
    assert_eq!(record.get_editor_id().as_deref(), Some("Odd"));
    assert!(plugin.unparse().unwrap() == data);
}

#[test]
fn test_extended_subrecord_round_trip() {
    let data = sample_plugin();
    let plugin = Plugin::parse(&data).unwrap();
    let land = plugin.records().find(|r| r.signature() == Signature::new(*b"LAND")).unwrap();

    let vhgt = land.find_subrecord(Signature::new(*b"VHGT")).unwrap();
    assert_eq!(vhgt.data.len(), 70_000);
    assert_eq!(vhgt.size_form, SizeForm::Extended { short: 0 });
    assert!(plugin.unparse().unwrap() == data);
}

#[test]
fn test_extended_form_kept_for_small_payload() {
    let payload = extended_subrecord(b"EDID", 9, &zstring("Small"));
    let data = plugin_bytes(&[group(*b"STAT", 0, &record(b"STAT", 0x20, 0, &payload))]);
    let plugin = Plugin::parse(&data).unwrap();
    let stat = plugin.records().next().unwrap();

    assert_eq!(stat.subrecords()[0].size_form, SizeForm::Extended { short: 9 });
    assert_eq!(stat.get_editor_id().as_deref(), Some("Small"));
    assert!(plugin.unparse().unwrap() == data);
}

#[test]
fn test_deep_nesting() {
    let depth = 20_000;
    let data = deep_plugin(depth);
    let plugin = Plugin::parse(&data).unwrap();

    let (max_depth, _) = plugin.walk().last().unwrap();
    assert_eq!(max_depth, depth);
    assert_eq!(plugin.records().count(), 1);
    assert_eq!(plugin.count_nodes() as usize, depth + 1);
    assert!(plugin.unparse().unwrap() == data);
    drop(plugin);
}

#[test]
fn test_header_only_plugin() {
    let data = tes4();
    let plugin = Plugin::parse(&data).unwrap();
    assert!(plugin.nodes.is_empty());
    assert_eq!(plugin.header_info().unwrap().num_records, 5);
    assert!(plugin.unparse().unwrap() == data);
}
