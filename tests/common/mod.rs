//! 手工拼装 ESP 字节的测试工具
#![allow(dead_code)]

use esp_codec::compression;
use esp_codec::Signature;

pub const HEADER_SIZE: usize = 24;

pub fn subrecord(signature: &[u8; 4], data: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(6 + data.len());
    out.extend_from_slice(signature);
    out.extend_from_slice(&(data.len() as u16).to_le_bytes());
    out.extend_from_slice(data);
    out
}

/// XXXX 扩展长度形式，`short` 为真实子记录头部中的16位长度
pub fn extended_subrecord(signature: &[u8; 4], short: u16, data: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(16 + data.len());
    out.extend_from_slice(b"XXXX");
    out.extend_from_slice(&4u16.to_le_bytes());
    out.extend_from_slice(&(data.len() as u32).to_le_bytes());
    out.extend_from_slice(signature);
    out.extend_from_slice(&short.to_le_bytes());
    out.extend_from_slice(data);
    out
}

pub fn zstring(text: &str) -> Vec<u8> {
    let mut out = text.as_bytes().to_vec();
    out.push(0);
    out
}

pub fn record(signature: &[u8; 4], form_id: u32, flags: u32, payload: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(HEADER_SIZE + payload.len());
    out.extend_from_slice(signature);
    out.extend_from_slice(&(payload.len() as u32).to_le_bytes());
    out.extend_from_slice(&flags.to_le_bytes());
    out.extend_from_slice(&form_id.to_le_bytes());
    // timestamp / version control / form version / unknown
    out.extend_from_slice(&[0x1A, 0x2B, 0x03, 0x00, 15, 0, 0x07, 0x00]);
    out.extend_from_slice(payload);
    out
}

/// 压缩记录：`body` 为解压后的子记录字节
pub fn compressed_record(signature: &[u8; 4], form_id: u32, body: &[u8]) -> Vec<u8> {
    let payload = compression::compress(body, Signature(*signature)).unwrap();
    record(signature, form_id, 0x0004_0000, &payload)
}

pub fn group(label: [u8; 4], group_type: i32, children: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(HEADER_SIZE + children.len());
    out.extend_from_slice(b"GRUP");
    out.extend_from_slice(&((HEADER_SIZE + children.len()) as u32).to_le_bytes());
    out.extend_from_slice(&label);
    out.extend_from_slice(&group_type.to_le_bytes());
    out.extend_from_slice(&[0x11, 0x22, 0x01, 0x00]);
    out.extend_from_slice(&0u32.to_le_bytes());
    out.extend_from_slice(children);
    out
}

pub fn tes4_payload() -> Vec<u8> {
    let mut hedr = Vec::new();
    hedr.extend_from_slice(&0.94f32.to_le_bytes());
    hedr.extend_from_slice(&5u32.to_le_bytes());
    hedr.extend_from_slice(&0x800u32.to_le_bytes());

    let mut payload = subrecord(b"HEDR", &hedr);
    payload.extend(subrecord(b"CNAM", &zstring("Tester")));
    payload.extend(subrecord(b"MAST", &zstring("Fallout3.esm")));
    payload.extend(subrecord(b"DATA", &[0; 8]));
    payload
}

pub fn tes4() -> Vec<u8> {
    record(b"TES4", 0, 0, &tes4_payload())
}

/// TES4 头部加上给定的顶层节点
pub fn plugin_bytes(nodes: &[Vec<u8>]) -> Vec<u8> {
    let mut out = tes4();
    for node in nodes {
        out.extend_from_slice(node);
    }
    out
}

pub fn glob_record(form_id: u32, editor_id: &str, value: f32) -> Vec<u8> {
    let mut payload = subrecord(b"EDID", &zstring(editor_id));
    payload.extend(subrecord(b"FNAM", b"f"));
    payload.extend(subrecord(b"FLTV", &value.to_le_bytes()));
    record(b"GLOB", form_id, 0, &payload)
}

/// 覆盖各种情况的示例插件：
/// GMST、GLOB、压缩的 WEAP、未知记录、零长度子记录、NULL 填充、
/// XXXX 扩展子记录和嵌套的 CELL 组。
pub fn sample_plugin() -> Vec<u8> {
    // GMST
    let mut gmst = Vec::new();
    let mut payload = subrecord(b"EDID", &zstring("fJumpHeightMin"));
    payload.extend(subrecord(b"DATA", &64.0f32.to_le_bytes()));
    gmst.extend(record(b"GMST", 0x100, 0, &payload));
    let mut payload = subrecord(b"EDID", &zstring("sSaveGame"));
    payload.extend(subrecord(b"DATA", &zstring("Save")));
    gmst.extend(record(b"GMST", 0x101, 0, &payload));

    // GLOB（含零长度子记录和3字节填充）
    let mut payload = subrecord(b"EDID", &zstring("GameDaysPassed"));
    payload.extend(subrecord(b"FNAM", b"f"));
    payload.extend(subrecord(b"FLTV", &1.5f32.to_le_bytes()));
    payload.extend(subrecord(b"MODL", &[]));
    payload.extend([0, 0, 0]);
    let glob = record(b"GLOB", 0x200, 0, &payload);

    // WEAP（压缩）
    let mut body = subrecord(b"EDID", &zstring("Weap10mmPistol"));
    body.extend(subrecord(b"FULL", &zstring("10mm Pistol")));
    body.extend(subrecord(b"DATA", &[1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15]));
    let weap = compressed_record(b"WEAP", 0x300, &body);

    // 未知记录，负载无法切分
    let unknown = record(b"ZZZZ", 0x400, 0, &[0xDE, 0xAD, 0xBE, 0xEF, 0x01]);

    // LAND 带 XXXX 扩展子记录
    let big = vec![0x5A; 70_000];
    let mut payload = extended_subrecord(b"VHGT", 0, &big);
    payload.extend(subrecord(b"DATA", &[1, 0, 0, 0]));
    let land = record(b"LAND", 0x500, 0, &payload);

    // CELL: 顶层 -> block -> sub-block -> CELL + cell children -> REFR
    let mut cell_payload = subrecord(b"EDID", &zstring("TestCell"));
    cell_payload.extend(subrecord(b"FULL", &zstring("Test Cell")));
    cell_payload.extend(subrecord(b"DATA", &[1]));
    let cell = record(b"CELL", 0x600, 0, &cell_payload);

    let mut refr_payload = subrecord(b"NAME", &0x300u32.to_le_bytes());
    let mut position = Vec::new();
    for v in [1.0f32, 2.0, 3.0, 0.0, 0.0, 1.5] {
        position.extend_from_slice(&v.to_le_bytes());
    }
    refr_payload.extend(subrecord(b"DATA", &position));
    let refr = record(b"REFR", 0x601, 0, &refr_payload);

    let temporary = group(0x600u32.to_le_bytes(), 9, &refr);
    let children = group(0x600u32.to_le_bytes(), 6, &temporary);
    let mut sub_block_content = cell;
    sub_block_content.extend(children);
    let sub_block = group(0u32.to_le_bytes(), 3, &sub_block_content);
    let block = group(0u32.to_le_bytes(), 2, &sub_block);

    let mut misc = weap;
    misc.extend(unknown);
    misc.extend(land);

    plugin_bytes(&[
        group(*b"GMST", 0, &gmst),
        group(*b"GLOB", 0, &glob),
        group(*b"WEAP", 0, &misc),
        group(*b"CELL", 0, &block),
    ])
}

/// 嵌套 `depth` 层的组，最内层包含一条 REFR
pub fn deep_plugin(depth: usize) -> Vec<u8> {
    let inner = record(b"REFR", 0x1, 0, &subrecord(b"NAME", &7u32.to_le_bytes()));
    let mut out = tes4();
    out.reserve(depth * HEADER_SIZE + inner.len());
    for level in 0..depth {
        let size = (depth - level) * HEADER_SIZE + inner.len();
        out.extend_from_slice(b"GRUP");
        out.extend_from_slice(&(size as u32).to_le_bytes());
        if level == 0 {
            out.extend_from_slice(b"CELL");
            out.extend_from_slice(&0i32.to_le_bytes());
        } else {
            out.extend_from_slice(&0u32.to_le_bytes());
            out.extend_from_slice(&9i32.to_le_bytes());
        }
        out.extend_from_slice(&[0; 8]);
    }
    out.extend(inner);
    out
}
