use crate::compression;
use crate::datatypes::{ByteCursor, ByteWriter, FormId, RawString, RecordFlags, Signature};
use crate::dispatch;
use crate::field::{self, FieldContext, FieldKind, FieldValue};
use crate::subrecord::{self, Subrecord};
use crate::utils::{EspError, Result};
use serde::Serialize;
use std::borrow::Cow;

/// 记录头部大小
pub const RECORD_HEADER_SIZE: usize = 24;

/// 24字节记录头部
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RecordHeader {
    pub signature: Signature,
    /// 头部声明的数据大小（压缩记录为磁盘上的长度，含4字节前缀）
    pub data_size: u32,
    pub flags: RecordFlags,
    pub form_id: FormId,
    pub timestamp: u16,
    pub version_control: u16,
    /// 内部版本
    pub form_version: u16,
    pub unknown: u16,
}

impl RecordHeader {
    pub fn new(signature: Signature, form_id: FormId) -> Self {
        RecordHeader {
            signature,
            data_size: 0,
            flags: RecordFlags::empty(),
            form_id,
            timestamp: 0,
            version_control: 0,
            form_version: 0,
            unknown: 0,
        }
    }

    /// 读取头部
    pub fn read(cursor: &mut ByteCursor<'_>) -> Result<Self> {
        cursor.ensure(RECORD_HEADER_SIZE)?;

        Ok(RecordHeader {
            signature: cursor.read_signature()?,
            data_size: cursor.read_u32()?,
            flags: RecordFlags::from_raw(cursor.read_u32()?),
            form_id: FormId(cursor.read_u32()?),
            timestamp: cursor.read_u16()?,
            version_control: cursor.read_u16()?,
            form_version: cursor.read_u16()?,
            unknown: cursor.read_u16()?,
        })
    }

    /// 写出头部，`data_size` 由调用方按实际负载计算
    pub fn write(&self, writer: &mut ByteWriter, data_size: u32) -> Result<()> {
        writer.write_signature(self.signature)?;
        writer.write_u32(data_size)?;
        writer.write_u32(self.flags.bits())?;
        writer.write_u32(self.form_id.0)?;
        writer.write_u16(self.timestamp)?;
        writer.write_u16(self.version_control)?;
        writer.write_u16(self.form_version)?;
        writer.write_u16(self.unknown)
    }

    pub fn is_compressed(&self) -> bool {
        self.flags.contains(RecordFlags::COMPRESSED)
    }
}

/// 已读出头部和磁盘负载、尚未解压和切分的记录
#[derive(Debug, Clone, Copy)]
pub struct RawRecord<'a> {
    pub header: RecordHeader,
    /// 记录头部的绝对偏移
    pub offset: u64,
    /// 磁盘上的负载（压缩记录含解压大小前缀）
    pub payload: &'a [u8],
}

impl<'a> RawRecord<'a> {
    /// 读取头部和声明大小的负载
    ///
    /// 负载被输入末尾截断时，报告第一个被截断的子记录的位置。
    pub fn read(cursor: &mut ByteCursor<'a>) -> Result<Self> {
        let offset = cursor.position();
        let header = RecordHeader::read(cursor).map_err(|e| match cursor.peek_signature() {
            Ok(signature) => e.with_signature(signature),
            Err(_) => e,
        })?;
        let payload_start = cursor.position();
        let needed = header.data_size as usize;

        if cursor.remaining() < needed {
            let partial = cursor.read_bytes(cursor.remaining())?;
            let cut = if header.is_compressed() {
                payload_start
            } else {
                subrecord::locate_truncation(partial, payload_start)
            };
            return Err(EspError::TruncatedInput {
                offset: cut,
                needed,
                available: partial.len(),
                signature: Some(header.signature),
            });
        }

        let payload = cursor.read_bytes(needed)?;
        log::trace!(
            "记录 {} [{}] at 0x{:X}: data_size={} flags=0x{:08X}",
            header.signature, header.form_id, offset, header.data_size, header.flags.bits()
        );

        Ok(RawRecord { header, offset, payload })
    }

    /// 记录结束位置（绝对偏移）
    pub fn end(&self) -> u64 {
        self.offset + (RECORD_HEADER_SIZE + self.payload.len()) as u64
    }

    pub fn is_known(&self) -> bool {
        self.header.signature == Signature::TES4 || dispatch::is_known_record(self.header.signature)
    }

    /// 解压并切分子记录
    ///
    /// 已知记录严格校验；未知记录无法切分时静默保留为不透明记录。
    pub fn materialize(self, max_decompressed_size: u64) -> Result<Record> {
        match self.slice(max_decompressed_size) {
            Ok(record) => Ok(record),
            Err(e) if !self.is_known() => {
                log::debug!("未知记录 {} (0x{:X}) 保留为原始字节: {}", self.header.signature, self.offset, e);
                Ok(self.into_opaque())
            }
            Err(e) => Err(e),
        }
    }

    fn slice(&self, max_decompressed_size: u64) -> Result<Record> {
        let payload_offset = self.offset + RECORD_HEADER_SIZE as u64;

        let (data, original_compressed) = if self.header.is_compressed() {
            let decompressed = compression::decompress(
                self.payload,
                payload_offset,
                self.header.signature,
                max_decompressed_size,
            )?;
            (Cow::Owned(decompressed), Some(self.payload.to_vec()))
        } else {
            (Cow::Borrowed(self.payload), None)
        };

        let sliced = subrecord::slice_subrecords(&data, payload_offset).map_err(|failure| {
            EspError::MalformedRecord {
                offset: self.offset,
                signature: self.header.signature,
                declared: data.len() as u64,
                consumed: failure.consumed,
            }
        })?;

        Ok(Record {
            header: self.header,
            body: RecordBody::Subrecords {
                subrecords: sliced.subrecords,
                padding: sliced.padding,
            },
            original_compressed,
            modified: false,
            offset: Some(self.offset),
        })
    }

    /// 不解释负载，原样保留
    pub fn into_opaque(self) -> Record {
        Record {
            header: self.header,
            body: RecordBody::Opaque(self.payload.to_vec()),
            original_compressed: None,
            modified: false,
            offset: Some(self.offset),
        }
    }
}

/// 记录体
#[derive(Debug, Clone, PartialEq)]
pub enum RecordBody {
    Subrecords {
        subrecords: Vec<Subrecord>,
        /// 末尾的 NULL 填充
        padding: Vec<u8>,
    },
    /// 无法或无需切分的磁盘字节，原样写回
    Opaque(Vec<u8>),
}

/// 记录结构
#[derive(Debug, Clone)]
pub struct Record {
    pub header: RecordHeader,
    /// 只能经由 `subrecords_mut` 等方法修改，以便维护 `modified`
    body: RecordBody,
    /// 原始压缩数据（内容未变时原样写回）
    original_compressed: Option<Vec<u8>>,
    /// 是否可能被修改过（写出时再按内容确认）
    modified: bool,
    offset: Option<u64>,
}

impl Record {
    /// 创建空记录
    pub fn new(signature: Signature, form_id: FormId) -> Self {
        Record {
            header: RecordHeader::new(signature, form_id),
            body: RecordBody::Subrecords {
                subrecords: Vec::new(),
                padding: Vec::new(),
            },
            original_compressed: None,
            modified: true,
            offset: None,
        }
    }

    /// 严格解析一条记录
    pub fn parse(cursor: &mut ByteCursor<'_>) -> Result<Self> {
        RawRecord::read(cursor)?.materialize(u64::MAX)
    }

    pub fn signature(&self) -> Signature {
        self.header.signature
    }

    pub fn form_id(&self) -> FormId {
        self.header.form_id
    }

    pub fn flags(&self) -> RecordFlags {
        self.header.flags
    }

    /// 解析时头部声明的数据大小
    pub fn declared_size(&self) -> u32 {
        self.header.data_size
    }

    /// 解析时的绝对偏移（新建记录为 None）
    pub fn offset(&self) -> Option<u64> {
        self.offset
    }

    pub fn is_compressed(&self) -> bool {
        self.header.is_compressed()
    }

    pub fn is_deleted(&self) -> bool {
        self.header.flags.contains(RecordFlags::DELETED)
    }

    pub fn is_modified(&self) -> bool {
        self.modified
    }

    pub fn is_opaque(&self) -> bool {
        matches!(self.body, RecordBody::Opaque(_))
    }

    /// 标记为已修改
    pub fn mark_modified(&mut self) {
        self.modified = true;
    }

    pub fn body(&self) -> &RecordBody {
        &self.body
    }

    /// 子记录列表（不透明记录为空）
    pub fn subrecords(&self) -> &[Subrecord] {
        match &self.body {
            RecordBody::Subrecords { subrecords, .. } => subrecords,
            RecordBody::Opaque(_) => &[],
        }
    }

    /// 可变子记录列表，同时标记记录为已修改
    pub fn subrecords_mut(&mut self) -> Result<&mut Vec<Subrecord>> {
        let signature = self.header.signature;
        match &mut self.body {
            RecordBody::Subrecords { subrecords, .. } => {
                self.modified = true;
                Ok(subrecords)
            }
            RecordBody::Opaque(_) => Err(opaque_error(signature)),
        }
    }

    /// 查找子记录
    pub fn find_subrecord(&self, signature: Signature) -> Option<&Subrecord> {
        self.subrecords().iter().find(|sr| sr.signature == signature)
    }

    /// 查找所有匹配的子记录
    pub fn find_subrecords(&self, signature: Signature) -> Vec<&Subrecord> {
        self.subrecords().iter().filter(|sr| sr.signature == signature).collect()
    }

    /// 获取编辑器ID
    pub fn get_editor_id(&self) -> Option<String> {
        self.find_subrecord(Signature::EDID)
            .map(|sr| RawString::parse_zstring(&sr.data).content)
    }

    fn editor_id_bytes(&self) -> Option<&[u8]> {
        self.find_subrecord(Signature::EDID).map(|sr| sr.data.as_slice())
    }

    /// 子记录的布局（GMST 按 EDID 解析）
    pub fn field_kind(&self, subrecord: &Subrecord, ctx: FieldContext) -> FieldKind {
        dispatch::field_kind(self.header.signature, subrecord.signature, subrecord.data.len(), ctx)
            .resolve_game_setting(self.editor_id_bytes())
    }

    /// 解码子记录，不改变模型
    pub fn decode_subrecord(&self, subrecord: &Subrecord, ctx: FieldContext) -> FieldValue {
        field::decode(self.field_kind(subrecord, ctx), &subrecord.data, ctx)
    }

    /// 解码第一个匹配字段（非本地化上下文）
    pub fn get_field(&self, signature: Signature) -> Option<FieldValue> {
        self.get_field_with(signature, FieldContext::default())
    }

    pub fn get_field_with(&self, signature: Signature, ctx: FieldContext) -> Option<FieldValue> {
        self.find_subrecord(signature)
            .map(|sr| self.decode_subrecord(sr, ctx))
    }

    /// 解码所有匹配字段
    pub fn get_fields(&self, signature: Signature, ctx: FieldContext) -> Vec<FieldValue> {
        self.find_subrecords(signature)
            .into_iter()
            .map(|sr| self.decode_subrecord(sr, ctx))
            .collect()
    }

    /// 编码字段值，校验失败时不修改模型
    fn encode_field(
        &self,
        signature: Signature,
        value: &FieldValue,
        existing: Option<&[u8]>,
        ctx: FieldContext,
    ) -> Result<Vec<u8>> {
        let ctx = match existing {
            Some(bytes) => ctx.with_encoding_of(bytes),
            None => ctx,
        };

        // 修改 EDID 本身时，GMST 类型由新值决定
        let editor_id = if signature == Signature::EDID {
            None
        } else {
            self.editor_id_bytes()
        };
        let kind = dispatch::kind_for_value(self.header.signature, signature, value, ctx)
            .resolve_game_setting(editor_id);

        field::encode(signature, kind, value, ctx)
    }

    /// 设置第一个匹配字段，不存在时追加
    pub fn set_field(&mut self, signature: Signature, value: FieldValue) -> Result<()> {
        self.set_field_with(signature, value, FieldContext::default())
    }

    pub fn set_field_with(&mut self, signature: Signature, value: FieldValue, ctx: FieldContext) -> Result<()> {
        if self.is_opaque() {
            return Err(opaque_error(self.header.signature));
        }

        let existing = self.subrecords().iter().position(|sr| sr.signature == signature);
        let data = self.encode_field(
            signature,
            &value,
            existing.map(|index| self.subrecords()[index].data.as_slice()),
            ctx,
        )?;

        if let Some(index) = existing {
            if self.subrecords()[index].data == data {
                return Ok(());
            }
        }

        let subrecords = self.subrecords_mut()?;
        match existing {
            Some(index) => subrecords[index].data = data,
            None => subrecords.push(Subrecord::new(signature, data)),
        }
        Ok(())
    }

    /// 按下标设置字段
    pub fn set_subrecord_field(&mut self, index: usize, value: FieldValue, ctx: FieldContext) -> Result<()> {
        if self.is_opaque() {
            return Err(opaque_error(self.header.signature));
        }

        let (signature, data) = match self.subrecords().get(index) {
            Some(sr) => (sr.signature, self.encode_field(sr.signature, &value, Some(&sr.data), ctx)?),
            None => {
                return Err(EspError::invalid_field(
                    self.header.signature,
                    format!("子记录下标 {} 越界（共 {} 个）", index, self.subrecords().len()),
                ))
            }
        };

        if self.subrecords()[index].data == data {
            return Ok(());
        }

        let subrecords = self.subrecords_mut()?;
        debug_assert_eq!(subrecords[index].signature, signature);
        subrecords[index].data = data;
        Ok(())
    }

    /// 追加原始子记录
    pub fn push_subrecord(&mut self, subrecord: Subrecord) -> Result<()> {
        self.subrecords_mut()?.push(subrecord);
        Ok(())
    }

    /// 删除所有匹配的子记录，返回删除数量
    pub fn remove_subrecords(&mut self, signature: Signature) -> Result<usize> {
        if self.is_opaque() {
            return Err(opaque_error(self.header.signature));
        }
        if self.find_subrecord(signature).is_none() {
            return Ok(0);
        }

        let subrecords = self.subrecords_mut()?;
        let before = subrecords.len();
        subrecords.retain(|sr| sr.signature != signature);
        Ok(before - subrecords.len())
    }

    /// 序列化未压缩的子记录数据
    pub fn body_bytes(&self) -> Result<Cow<'_, [u8]>> {
        match &self.body {
            RecordBody::Subrecords { subrecords, padding } => {
                let capacity = subrecords.iter().map(|sr| sr.encoded_len()).sum::<usize>() + padding.len();
                let mut writer = ByteWriter::with_capacity(capacity);
                subrecord::write_subrecords(subrecords, padding, &mut writer)?;
                Ok(Cow::Owned(writer.into_inner()))
            }
            RecordBody::Opaque(bytes) => Ok(Cow::Borrowed(bytes)),
        }
    }

    /// 头部之后要写出的磁盘字节
    ///
    /// 压缩记录的内容与原始数据一致时原样写回原始压缩数据，
    /// 否则（含新设置压缩标志的记录）重新压缩。
    pub fn payload_for_write(&self) -> Result<Cow<'_, [u8]>> {
        if self.is_opaque() {
            return self.body_bytes();
        }

        if !self.is_compressed() {
            return self.body_bytes();
        }

        let body = match &self.original_compressed {
            Some(original) if !self.modified => return Ok(Cow::Borrowed(original.as_slice())),
            Some(original) => {
                let body = self.body_bytes()?;
                if self.matches_original(original, &body)? {
                    return Ok(Cow::Borrowed(original.as_slice()));
                }
                body
            }
            None => self.body_bytes()?,
        };
        Ok(Cow::Owned(compression::compress(&body, self.header.signature)?))
    }

    /// 当前内容是否与原始压缩数据解压后相同
    fn matches_original(&self, original: &[u8], body: &[u8]) -> Result<bool> {
        let declared = ByteCursor::new(original).read_u32().ok();
        if declared != Some(body.len() as u32) {
            return Ok(false);
        }
        let unpacked = compression::decompress(
            original,
            self.offset.unwrap_or(0),
            self.header.signature,
            body.len() as u64,
        )?;
        Ok(unpacked == body)
    }

    /// 写出整条记录，数据大小按实际负载计算
    pub fn write(&self, writer: &mut ByteWriter) -> Result<()> {
        let payload = self.payload_for_write()?;
        let data_size = u32::try_from(payload.len()).map_err(|_| {
            EspError::invalid_field(
                self.header.signature,
                format!("记录数据过大: {} bytes", payload.len()),
            )
        })?;
        self.header.write(writer, data_size)?;
        writer.write_bytes(&payload)
    }
}

fn opaque_error(signature: Signature) -> EspError {
    EspError::invalid_field(signature, "记录体为原始字节，无法按字段编辑")
}

#[cfg(test)]
mod tests {
    use super::*;

    const WEAP: Signature = Signature::new(*b"WEAP");
    const FULL: Signature = Signature::new(*b"FULL");
    const DATA: Signature = Signature::new(*b"DATA");

    fn record_bytes(signature: &[u8; 4], flags: u32, payload: &[u8]) -> Vec<u8> {
        let mut out = Vec::new();
        out.extend_from_slice(signature);
        out.extend_from_slice(&(payload.len() as u32).to_le_bytes());
        out.extend_from_slice(&flags.to_le_bytes());
        out.extend_from_slice(&0x0001_0203u32.to_le_bytes());
        out.extend_from_slice(&[1, 0, 2, 0, 15, 0, 0, 0]);
        out.extend_from_slice(payload);
        out
    }

    fn weapon_payload() -> Vec<u8> {
        let mut payload = Vec::new();
        payload.extend_from_slice(b"EDID\x0a\x00IronSword\x00");
        payload.extend_from_slice(b"FULL\x0b\x00Iron Sword\x00");
        payload
    }

    #[test]
    fn test_parse_and_write_plain_record() {
        let bytes = record_bytes(b"WEAP", 0, &weapon_payload());
        let record = Record::parse(&mut ByteCursor::new(&bytes)).unwrap();

        assert_eq!(record.signature(), WEAP);
        assert_eq!(record.form_id(), FormId(0x0001_0203));
        assert_eq!(record.subrecords().len(), 2);
        assert_eq!(record.header.form_version, 15);

        let mut writer = ByteWriter::new();
        record.write(&mut writer).unwrap();
        assert_eq!(writer.into_inner(), bytes);
    }

    #[test]
    fn test_known_record_with_bad_subrecords_is_malformed() {
        let bytes = record_bytes(b"WEAP", 0, b"EDID\x10\x00abc");
        let err = Record::parse(&mut ByteCursor::new(&bytes)).unwrap_err();
        match err {
            EspError::MalformedRecord { offset, signature, declared, consumed } => {
                assert_eq!(offset, 0);
                assert_eq!(signature, WEAP);
                assert_eq!(declared, 9);
                assert_eq!(consumed, 22);
            }
            other => panic!("应该返回 MalformedRecord: {:?}", other),
        }
    }

    #[test]
    fn test_unknown_record_becomes_opaque() {
        let payload = [0xDE, 0xAD, 0xBE, 0xEF, 0x01, 0x02, 0x03];
        let bytes = record_bytes(b"ZZZZ", 0, &payload);
        let record = Record::parse(&mut ByteCursor::new(&bytes)).unwrap();
        assert!(record.is_opaque());

        let mut writer = ByteWriter::new();
        record.write(&mut writer).unwrap();
        assert_eq!(writer.into_inner(), bytes);
    }

    #[test]
    fn test_compressed_record_replays_original_bytes() {
        let compressed = compression::compress(&weapon_payload(), WEAP).unwrap();
        let bytes = record_bytes(b"WEAP", RecordFlags::COMPRESSED.bits(), &compressed);
        let record = Record::parse(&mut ByteCursor::new(&bytes)).unwrap();

        assert!(record.is_compressed());
        assert_eq!(record.get_editor_id().as_deref(), Some("IronSword"));

        let mut writer = ByteWriter::new();
        record.write(&mut writer).unwrap();
        assert_eq!(writer.into_inner(), bytes);
    }

    #[test]
    fn test_modified_compressed_record_is_recompressed() {
        let compressed = compression::compress(&weapon_payload(), WEAP).unwrap();
        let bytes = record_bytes(b"WEAP", RecordFlags::COMPRESSED.bits(), &compressed);
        let mut record = Record::parse(&mut ByteCursor::new(&bytes)).unwrap();

        record.set_field(FULL, FieldValue::String("Steel Sword".into())).unwrap();
        let mut writer = ByteWriter::new();
        record.write(&mut writer).unwrap();
        let written = writer.into_inner();

        let reparsed = Record::parse(&mut ByteCursor::new(&written)).unwrap();
        assert_eq!(reparsed.declared_size() as usize, written.len() - RECORD_HEADER_SIZE);
        assert_eq!(reparsed.get_field(FULL), Some(FieldValue::String("Steel Sword".into())));
    }

    /// 用与本库不同的压缩级别生成压缩负载
    fn fast_compressed(payload: &[u8]) -> Vec<u8> {
        use flate2::write::ZlibEncoder;
        use flate2::Compression;
        use std::io::Write;

        let mut encoder = ZlibEncoder::new(Vec::new(), Compression::fast());
        encoder.write_all(payload).unwrap();
        let mut out = (payload.len() as u32).to_le_bytes().to_vec();
        out.extend_from_slice(&encoder.finish().unwrap());
        out
    }

    fn written(record: &Record) -> Vec<u8> {
        let mut writer = ByteWriter::new();
        record.write(&mut writer).unwrap();
        writer.into_inner()
    }

    #[test]
    fn test_noop_edits_keep_original_compression() {
        let compressed = fast_compressed(&weapon_payload());
        assert_ne!(compressed, compression::compress(&weapon_payload(), WEAP).unwrap());
        let bytes = record_bytes(b"WEAP", RecordFlags::COMPRESSED.bits(), &compressed);
        let mut record = Record::parse(&mut ByteCursor::new(&bytes)).unwrap();

        assert_eq!(record.remove_subrecords(Signature::new(*b"ZZZZ")).unwrap(), 0);
        record.set_field(FULL, FieldValue::String("Iron Sword".into())).unwrap();
        record.set_subrecord_field(0, FieldValue::String("IronSword".into()), FieldContext::default()).unwrap();
        assert!(!record.is_modified());
        assert_eq!(written(&record), bytes);

        // 取得可变引用但未改动内容，仍按内容判断
        record.subrecords_mut().unwrap();
        assert!(record.is_modified());
        assert_eq!(written(&record), bytes);
    }

    #[test]
    fn test_direct_subrecord_edit_is_written() {
        let compressed = fast_compressed(&weapon_payload());
        let bytes = record_bytes(b"WEAP", RecordFlags::COMPRESSED.bits(), &compressed);
        let mut record = Record::parse(&mut ByteCursor::new(&bytes)).unwrap();

        record.subrecords_mut().unwrap()[1].data = b"Steel Sword\0".to_vec();
        let edited = written(&record);
        assert_ne!(edited, bytes);
        let reparsed = Record::parse(&mut ByteCursor::new(&edited)).unwrap();
        assert_eq!(reparsed.get_field(FULL), Some(FieldValue::String("Steel Sword".into())));

        // 改回原值后重新写回原始压缩数据
        record.subrecords_mut().unwrap()[1].data = b"Iron Sword\0".to_vec();
        assert_eq!(written(&record), bytes);
    }

    #[test]
    fn test_truncated_payload_reports_cut_subrecord() {
        let bytes = record_bytes(b"WEAP", 0, &weapon_payload());
        let cut = &bytes[..RECORD_HEADER_SIZE + 20];
        let err = Record::parse(&mut ByteCursor::new(cut)).unwrap_err();
        match err {
            EspError::TruncatedInput { offset, signature, .. } => {
                assert_eq!(offset, (RECORD_HEADER_SIZE + 16) as u64);
                assert_eq!(signature, Some(WEAP));
            }
            other => panic!("应该返回 TruncatedInput: {:?}", other),
        }
    }

    #[test]
    fn test_set_field_validates_before_mutation() {
        let bytes = record_bytes(b"WEAP", 0, &weapon_payload());
        let mut record = Record::parse(&mut ByteCursor::new(&bytes)).unwrap();

        let err = record.set_field(Signature::EDID, FieldValue::String("Bad\0Id".into()));
        assert!(matches!(err, Err(EspError::InvalidFieldValue { .. })));
        assert!(!record.is_modified());
        assert_eq!(record.get_editor_id().as_deref(), Some("IronSword"));
    }

    #[test]
    fn test_game_setting_follows_editor_id() {
        let mut record = Record::new(Signature::new(*b"GMST"), FormId(0x100));
        record.set_field(Signature::EDID, FieldValue::String("fJumpHeight".into())).unwrap();
        record.set_field(DATA, FieldValue::F32(2.5)).unwrap();
        assert_eq!(record.get_field(DATA), Some(FieldValue::F32(2.5)));
        assert!(record.set_field(DATA, FieldValue::I32(3)).is_err());
    }

    #[test]
    fn test_push_and_remove_subrecords() {
        let mut record = Record::new(WEAP, FormId(0x800));
        record.push_subrecord(Subrecord::new(Signature::new(*b"KWDA"), vec![1, 0, 0, 0])).unwrap();
        record.push_subrecord(Subrecord::new(Signature::new(*b"KWDA"), vec![2, 0, 0, 0])).unwrap();
        assert_eq!(record.find_subrecords(Signature::new(*b"KWDA")).len(), 2);
        assert_eq!(record.remove_subrecords(Signature::new(*b"KWDA")).unwrap(), 2);
        assert!(record.subrecords().is_empty());
    }

    #[test]
    fn test_opaque_record_rejects_edits() {
        let bytes = record_bytes(b"ZZZZ", 0, &[1, 2, 3]);
        let mut record = Record::parse(&mut ByteCursor::new(&bytes)).unwrap();
        assert!(record.set_field(Signature::EDID, FieldValue::String("x".into())).is_err());
        assert!(record.push_subrecord(Subrecord::new(DATA, vec![])).is_err());
    }
}
