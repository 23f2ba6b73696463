use super::Plugin;
use crate::datatypes::{FormId, RawString, RecordFlags, Signature};
use crate::field::{self, FieldContext, FieldKind, FieldValue};
use crate::record::Record;
use crate::subrecord::Subrecord;
use crate::utils::{EspError, Result};
use serde::Serialize;

const HEDR: Signature = Signature::new(*b"HEDR");
const CNAM: Signature = Signature::new(*b"CNAM");
const SNAM: Signature = Signature::new(*b"SNAM");
const MAST: Signature = Signature::new(*b"MAST");
const DATA: Signature = Signature::new(*b"DATA");

/// HEDR 子记录
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HeaderInfo {
    /// 0.94（FO3/FNV）、1.7（Skyrim）等
    pub version: f32,
    /// 记录和组的数量（不含 TES4 本身），仅供参考
    pub num_records: u32,
    /// 下一个可用的对象ID
    pub next_object_id: u32,
}

/// 新建 TES4 头部的参数
#[derive(Debug, Clone, PartialEq)]
pub struct HeaderOptions {
    pub version: f32,
    pub num_records: u32,
    pub next_object_id: u32,
    pub author: String,
    pub description: Option<String>,
    /// 主文件，按创建插件时的加载顺序
    pub masters: Vec<String>,
    pub flags: RecordFlags,
    pub form_version: u16,
}

impl Default for HeaderOptions {
    fn default() -> Self {
        HeaderOptions {
            version: 0.94,
            num_records: 0,
            next_object_id: 0x800,
            author: "DEFAULT".to_string(),
            description: None,
            masters: vec!["Fallout3.esm".to_string()],
            flags: RecordFlags::empty(),
            form_version: 15,
        }
    }
}

/// 按分派表编码后追加子记录（允许重复签名）
fn push_encoded(record: &mut Record, signature: Signature, kind: FieldKind, value: FieldValue) -> Result<()> {
    let data = field::encode(signature, kind, &value, FieldContext::default())?;
    record.push_subrecord(Subrecord::new(signature, data))
}

/// 创建 TES4 头部记录
pub fn create_header(options: &HeaderOptions) -> Result<Record> {
    let mut header = Record::new(Signature::TES4, FormId(0));
    header.header.flags = options.flags;
    header.header.form_version = options.form_version;

    header.set_field(
        HEDR,
        FieldValue::Struct(vec![
            FieldValue::F32(options.version),
            FieldValue::U32(options.num_records),
            FieldValue::U32(options.next_object_id),
        ]),
    )?;
    header.set_field(CNAM, FieldValue::String(options.author.clone()))?;
    if let Some(description) = &options.description {
        header.set_field(SNAM, FieldValue::String(description.clone()))?;
    }

    for master in &options.masters {
        push_encoded(&mut header, MAST, FieldKind::ZString { max_len: None }, FieldValue::String(master.clone()))?;
        push_encoded(&mut header, DATA, FieldKind::U64, FieldValue::U64(0))?;
    }

    Ok(header)
}

impl Plugin {
    /// 以新建的头部创建空文档
    pub fn new(options: &HeaderOptions) -> Result<Self> {
        Ok(Plugin::with_header(create_header(options)?))
    }

    /// 主文件列表
    pub fn masters(&self) -> Vec<String> {
        self.header
            .find_subrecords(MAST)
            .into_iter()
            .map(|sr| RawString::parse_zstring(&sr.data).content)
            .collect()
    }

    /// 作者（CNAM）
    pub fn author(&self) -> Option<String> {
        match self.header.get_field(CNAM)? {
            FieldValue::String(author) => Some(author),
            _ => None,
        }
    }

    /// 描述（SNAM）
    pub fn description(&self) -> Option<String> {
        match self.header.get_field(SNAM)? {
            FieldValue::String(description) => Some(description),
            _ => None,
        }
    }

    pub fn set_author(&mut self, author: &str) -> Result<()> {
        self.header.set_field(CNAM, FieldValue::String(author.to_string()))
    }

    pub fn set_description(&mut self, description: &str) -> Result<()> {
        self.header.set_field(SNAM, FieldValue::String(description.to_string()))
    }

    /// 读取 HEDR
    pub fn header_info(&self) -> Option<HeaderInfo> {
        match self.header.get_field(HEDR)? {
            FieldValue::Struct(values) => match values.as_slice() {
                [FieldValue::F32(version), FieldValue::U32(num_records), FieldValue::U32(next_object_id)] => {
                    Some(HeaderInfo {
                        version: *version,
                        num_records: *num_records,
                        next_object_id: *next_object_id,
                    })
                }
                _ => None,
            },
            _ => None,
        }
    }

    /// 检查是否为主文件
    pub fn is_master(&self) -> bool {
        self.header.flags().contains(RecordFlags::MASTER_FILE)
    }

    /// 检查是否本地化
    pub fn is_localized(&self) -> bool {
        self.header.flags().contains(RecordFlags::LOCALIZED)
    }

    /// 检查是否为轻量插件
    pub fn is_light(&self) -> bool {
        self.header.flags().contains(RecordFlags::LIGHT_MASTER)
    }

    /// 本文档的字段解码上下文
    pub fn field_context(&self) -> FieldContext {
        FieldContext::localized(self.is_localized())
    }

    /// 记录和组的实际数量（不含 TES4）
    pub fn count_nodes(&self) -> u32 {
        self.walk().count() as u32
    }

    /// 把 HEDR 中的记录数更新为实际数量
    pub fn refresh_record_count(&mut self) -> Result<u32> {
        let info = self.header_info().ok_or_else(|| {
            EspError::invalid_field(HEDR, "头部缺少可解析的 HEDR 子记录")
        })?;
        let count = self.count_nodes();

        if count != info.num_records {
            log::debug!("更新 HEDR 记录数: {} -> {}", info.num_records, count);
            self.header.set_field(
                HEDR,
                FieldValue::Struct(vec![
                    FieldValue::F32(info.version),
                    FieldValue::U32(count),
                    FieldValue::U32(info.next_object_id),
                ]),
            )?;
        }
        Ok(count)
    }
}
