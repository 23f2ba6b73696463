use crate::datatypes::{ByteCursor, ByteWriter, FormId, RawString, Signature};
use crate::utils::{EspError, Result};
use encoding_rs::Encoding;
use serde::Serialize;
use std::fmt;

/// 字段的二进制布局
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldKind {
    U8,
    I8,
    U16,
    I16,
    U32,
    I32,
    U64,
    F32,
    FormId,
    /// 以 null 结尾的字符串，`max_len` 不含终止符
    ZString { max_len: Option<usize> },
    /// 普通插件中为 Z字符串，本地化插件中为 u32 字符串表 ID
    LString { max_len: Option<usize> },
    /// 定长字节数组
    Bytes(usize),
    FormIdArray,
    /// 定长的混合结构，元素必须都是定长类型
    Struct(&'static [FieldKind]),
    /// 零长度标记
    Marker,
    /// GMST DATA：由 EDID 首字母决定实际类型
    GameSetting,
    Raw,
}

/// 解码后的字段值
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "value")]
pub enum FieldValue {
    U8(u8),
    I8(i8),
    U16(u16),
    I16(i16),
    U32(u32),
    I32(i32),
    U64(u64),
    F32(f32),
    FormId(FormId),
    String(String),
    StringId(u32),
    Bytes(Vec<u8>),
    FormIds(Vec<FormId>),
    Struct(Vec<FieldValue>),
    Marker,
    Raw(Vec<u8>),
}

/// 解码上下文
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldContext {
    /// 插件头部带有 LOCALIZED 标志
    pub localized: bool,
    /// 编码字符串时使用的文本编码
    pub encoding: &'static Encoding,
}

impl Default for FieldContext {
    fn default() -> Self {
        FieldContext {
            localized: false,
            encoding: encoding_rs::UTF_8,
        }
    }
}

impl FieldContext {
    pub fn localized(localized: bool) -> Self {
        FieldContext {
            localized,
            ..Default::default()
        }
    }

    pub fn with_encoding(self, encoding: &'static Encoding) -> Self {
        FieldContext { encoding, ..self }
    }

    /// 按现有字符串字段的字节推断编码
    pub fn with_encoding_of(self, existing: &[u8]) -> Self {
        let detected = RawString::parse_zstring(existing);
        let encoding = Encoding::for_label(detected.encoding.as_bytes()).unwrap_or(encoding_rs::UTF_8);
        self.with_encoding(encoding)
    }
}

impl FieldKind {
    /// 定长类型的宽度
    pub fn fixed_width(&self) -> Option<usize> {
        match self {
            FieldKind::U8 | FieldKind::I8 => Some(1),
            FieldKind::U16 | FieldKind::I16 => Some(2),
            FieldKind::U32 | FieldKind::I32 | FieldKind::F32 | FieldKind::FormId => Some(4),
            FieldKind::U64 => Some(8),
            FieldKind::Bytes(n) => Some(*n),
            FieldKind::Marker => Some(0),
            FieldKind::Struct(members) => members
                .iter()
                .try_fold(0usize, |acc, m| m.fixed_width().map(|w| acc + w)),
            _ => None,
        }
    }

    /// 负载长度是否符合此类型
    pub fn accepts(&self, len: usize, ctx: FieldContext) -> bool {
        if let Some(width) = self.fixed_width() {
            return len == width;
        }
        match self {
            FieldKind::ZString { max_len } => len >= 1 && max_len.map_or(true, |max| len - 1 <= max),
            FieldKind::LString { max_len } => {
                if ctx.localized {
                    len == 4
                } else {
                    FieldKind::ZString { max_len: *max_len }.accepts(len, ctx)
                }
            }
            FieldKind::FormIdArray => len % 4 == 0,
            FieldKind::GameSetting | FieldKind::Raw => true,
            _ => false,
        }
    }

    /// 值的形状是否与此类型对应（不做长度等细节校验）
    ///
    /// `Raw` 值只有在能按此类型解码时才对应。
    pub fn admits(&self, value: &FieldValue, ctx: FieldContext) -> bool {
        match (self, value) {
            (FieldKind::Raw, FieldValue::Raw(_)) => true,
            (kind, FieldValue::Raw(bytes)) => decode_strict(*kind, bytes, ctx).is_some(),
            (FieldKind::U8, FieldValue::U8(_))
            | (FieldKind::I8, FieldValue::I8(_))
            | (FieldKind::U16, FieldValue::U16(_))
            | (FieldKind::I16, FieldValue::I16(_))
            | (FieldKind::U32, FieldValue::U32(_))
            | (FieldKind::I32, FieldValue::I32(_))
            | (FieldKind::U64, FieldValue::U64(_))
            | (FieldKind::F32, FieldValue::F32(_))
            | (FieldKind::FormId, FieldValue::FormId(_))
            | (FieldKind::ZString { .. }, FieldValue::String(_))
            | (FieldKind::Bytes(_), FieldValue::Bytes(_))
            | (FieldKind::FormIdArray, FieldValue::FormIds(_))
            | (FieldKind::Marker, FieldValue::Marker) => true,
            (FieldKind::LString { .. }, FieldValue::String(_)) => !ctx.localized,
            (FieldKind::LString { .. }, FieldValue::StringId(_)) => ctx.localized,
            (FieldKind::Struct(members), FieldValue::Struct(values)) => {
                members.len() == values.len()
                    && members.iter().zip(values).all(|(m, v)| m.admits(v, ctx))
            }
            (FieldKind::GameSetting, _) => false,
            (FieldKind::Raw, FieldValue::Bytes(_)) => true,
            _ => false,
        }
    }

    /// 根据 EDID 解析 GMST 的实际类型
    ///
    /// `s` 字符串，`f` 浮点，`b`/`u` 无符号整数，其余为有符号整数。
    pub fn resolve_game_setting(self, editor_id: Option<&[u8]>) -> FieldKind {
        if self != FieldKind::GameSetting {
            return self;
        }
        match editor_id.and_then(|id| id.first()) {
            Some(b's') => FieldKind::LString { max_len: None },
            Some(b'f') => FieldKind::F32,
            Some(b'b') | Some(b'u') => FieldKind::U32,
            Some(_) => FieldKind::I32,
            None => FieldKind::Raw,
        }
    }
}

/// 解码字段
///
/// 总是成功：不符合布局的负载（宽度错误、缺少终止符、多余字节）解码为 `Raw`。
pub fn decode(kind: FieldKind, data: &[u8], ctx: FieldContext) -> FieldValue {
    decode_strict(kind, data, ctx).unwrap_or_else(|| FieldValue::Raw(data.to_vec()))
}

fn decode_strict(kind: FieldKind, data: &[u8], ctx: FieldContext) -> Option<FieldValue> {
    if !kind.accepts(data.len(), ctx) {
        return None;
    }

    let mut cursor = ByteCursor::new(data);
    let value = match kind {
        FieldKind::ZString { .. } => FieldValue::String(decode_zstring(data)?),
        FieldKind::LString { max_len } => {
            if ctx.localized {
                FieldValue::StringId(cursor.read_u32().ok()?)
            } else {
                return decode_strict(FieldKind::ZString { max_len }, data, ctx);
            }
        }
        FieldKind::FormIdArray => {
            let mut ids = Vec::with_capacity(data.len() / 4);
            while !cursor.is_empty() {
                ids.push(FormId(cursor.read_u32().ok()?));
            }
            FieldValue::FormIds(ids)
        }
        FieldKind::GameSetting | FieldKind::Raw => FieldValue::Raw(data.to_vec()),
        fixed => read_fixed(fixed, &mut cursor)?,
    };

    if !cursor.is_empty() && !matches!(kind, FieldKind::ZString { .. } | FieldKind::LString { .. }) {
        return None;
    }
    Some(value)
}

/// 恰好一个结尾 null、没有内部 null 的字符串
fn decode_zstring(data: &[u8]) -> Option<String> {
    let (last, text) = data.split_last()?;
    if *last != 0 || text.contains(&0) {
        return None;
    }
    Some(RawString::decode(text).content)
}

fn read_fixed(kind: FieldKind, cursor: &mut ByteCursor<'_>) -> Option<FieldValue> {
    let value = match kind {
        FieldKind::U8 => FieldValue::U8(cursor.read_u8().ok()?),
        FieldKind::I8 => FieldValue::I8(cursor.read_i8().ok()?),
        FieldKind::U16 => FieldValue::U16(cursor.read_u16().ok()?),
        FieldKind::I16 => FieldValue::I16(cursor.read_i16().ok()?),
        FieldKind::U32 => FieldValue::U32(cursor.read_u32().ok()?),
        FieldKind::I32 => FieldValue::I32(cursor.read_i32().ok()?),
        FieldKind::U64 => FieldValue::U64(cursor.read_u64().ok()?),
        FieldKind::F32 => FieldValue::F32(cursor.read_f32().ok()?),
        FieldKind::FormId => FieldValue::FormId(FormId(cursor.read_u32().ok()?)),
        FieldKind::Bytes(n) => FieldValue::Bytes(cursor.read_bytes(n).ok()?.to_vec()),
        FieldKind::Marker => FieldValue::Marker,
        FieldKind::Struct(members) => {
            let mut values = Vec::with_capacity(members.len());
            for member in members {
                values.push(read_fixed(*member, cursor)?);
            }
            FieldValue::Struct(values)
        }
        _ => return None,
    };
    Some(value)
}

/// 编码字段
///
/// 与 `decode` 互逆，写入模型之前完成全部校验。
/// `Raw` 值原样写出，但对非 `Raw` 类型必须是该类型的合法编码。
pub fn encode(signature: Signature, kind: FieldKind, value: &FieldValue, ctx: FieldContext) -> Result<Vec<u8>> {
    if let FieldValue::Raw(bytes) = value {
        if decode_strict(kind, bytes, ctx).is_none() {
            return Err(EspError::invalid_field(
                signature,
                format!("原始字节 {} 不是 {:?} 的合法编码", value, kind),
            ));
        }
        return Ok(bytes.clone());
    }

    let mut writer = ByteWriter::new();
    write_value(signature, kind, value, ctx, &mut writer)?;
    let bytes = writer.into_inner();

    if !kind.accepts(bytes.len(), ctx) {
        return Err(EspError::invalid_field(
            signature,
            format!("编码后的长度 {} 不符合 {:?}", bytes.len(), kind),
        ));
    }
    Ok(bytes)
}

fn mismatch(signature: Signature, kind: FieldKind, value: &FieldValue) -> EspError {
    EspError::invalid_field(signature, format!("值 {:?} 与字段类型 {:?} 不匹配", value, kind))
}

fn write_value(
    signature: Signature,
    kind: FieldKind,
    value: &FieldValue,
    ctx: FieldContext,
    writer: &mut ByteWriter,
) -> Result<()> {
    match (kind, value) {
        (FieldKind::U8, FieldValue::U8(v)) => writer.write_u8(*v),
        (FieldKind::I8, FieldValue::I8(v)) => writer.write_i8(*v),
        (FieldKind::U16, FieldValue::U16(v)) => writer.write_u16(*v),
        (FieldKind::I16, FieldValue::I16(v)) => writer.write_i16(*v),
        (FieldKind::U32, FieldValue::U32(v)) => writer.write_u32(*v),
        (FieldKind::I32, FieldValue::I32(v)) => writer.write_i32(*v),
        (FieldKind::U64, FieldValue::U64(v)) => writer.write_u64(*v),
        (FieldKind::F32, FieldValue::F32(v)) => writer.write_f32(*v),
        (FieldKind::FormId, FieldValue::FormId(id)) => writer.write_u32(id.0),
        (FieldKind::Marker, FieldValue::Marker) => Ok(()),
        (FieldKind::Bytes(n), FieldValue::Bytes(bytes)) => {
            if bytes.len() != n {
                return Err(EspError::invalid_field(
                    signature,
                    format!("字节数组长度应为 {}，实际 {}", n, bytes.len()),
                ));
            }
            writer.write_bytes(bytes)
        }
        (FieldKind::Raw, FieldValue::Bytes(bytes)) => writer.write_bytes(bytes),
        (FieldKind::FormIdArray, FieldValue::FormIds(ids)) => {
            for id in ids {
                writer.write_u32(id.0)?;
            }
            Ok(())
        }
        (FieldKind::ZString { max_len }, FieldValue::String(text)) => {
            write_zstring(signature, text, max_len, ctx, writer)
        }
        (FieldKind::LString { max_len }, FieldValue::String(text)) if !ctx.localized => {
            write_zstring(signature, text, max_len, ctx, writer)
        }
        (FieldKind::LString { .. }, FieldValue::StringId(id)) if ctx.localized => writer.write_u32(*id),
        (FieldKind::Struct(members), FieldValue::Struct(values)) => {
            if members.len() != values.len() {
                return Err(EspError::invalid_field(
                    signature,
                    format!("结构应有 {} 个成员，实际 {}", members.len(), values.len()),
                ));
            }
            for (member, value) in members.iter().zip(values) {
                write_value(signature, *member, value, ctx, writer)?;
            }
            Ok(())
        }
        _ => Err(mismatch(signature, kind, value)),
    }
}

fn write_zstring(
    signature: Signature,
    text: &str,
    max_len: Option<usize>,
    ctx: FieldContext,
    writer: &mut ByteWriter,
) -> Result<()> {
    if text.contains('\0') {
        return Err(EspError::invalid_field(signature, "字符串包含内部 null"));
    }
    let bytes = RawString::encode(text, ctx.encoding.name()).ok_or_else(|| {
        EspError::invalid_field(
            signature,
            format!("字符串 {:?} 无法用 {} 编码表示", text, ctx.encoding.name()),
        )
    })?;
    if let Some(max) = max_len {
        if bytes.len() > max {
            return Err(EspError::invalid_field(
                signature,
                format!("字符串长度 {} 超过上限 {}", bytes.len(), max),
            ));
        }
    }
    writer.write_zstring(&bytes)
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::U8(v) => write!(f, "{}", v),
            FieldValue::I8(v) => write!(f, "{}", v),
            FieldValue::U16(v) => write!(f, "{}", v),
            FieldValue::I16(v) => write!(f, "{}", v),
            FieldValue::U32(v) => write!(f, "{}", v),
            FieldValue::I32(v) => write!(f, "{}", v),
            FieldValue::U64(v) => write!(f, "{}", v),
            FieldValue::F32(v) => write!(f, "{}", v),
            FieldValue::FormId(id) => write!(f, "[{}]", id),
            FieldValue::String(s) => write!(f, "{:?}", s),
            FieldValue::StringId(id) => write!(f, "<lstring {:08X}>", id),
            FieldValue::Bytes(bytes) | FieldValue::Raw(bytes) => {
                if bytes.len() > 32 {
                    write!(f, "{:02X?}... ({} bytes)", &bytes[..32], bytes.len())
                } else {
                    write!(f, "{:02X?}", bytes)
                }
            }
            FieldValue::FormIds(ids) => {
                let parts: Vec<String> = ids.iter().map(|id| id.to_string()).collect();
                write!(f, "[{}]", parts.join(", "))
            }
            FieldValue::Struct(values) => {
                let parts: Vec<String> = values.iter().map(|v| v.to_string()).collect();
                write!(f, "({})", parts.join(", "))
            }
            FieldValue::Marker => write!(f, "<marker>"),
        }
    }
}
