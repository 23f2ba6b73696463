use crate::utils::{EspError, Result};
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use serde::{Serialize, Serializer};
use std::fmt;
use std::io::Cursor;

/// 4字节类型签名（记录、子记录、组标签）
///
/// 区分大小写，定长，不以 null 结尾。
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Signature(pub [u8; 4]);

impl Signature {
    pub const GRUP: Signature = Signature(*b"GRUP");
    pub const TES4: Signature = Signature(*b"TES4");
    pub const XXXX: Signature = Signature(*b"XXXX");
    pub const EDID: Signature = Signature(*b"EDID");

    pub const fn new(bytes: [u8; 4]) -> Self {
        Signature(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 4] {
        &self.0
    }

    /// 字符串形式（非 ASCII 字节按 lossy 处理）
    pub fn as_string(&self) -> String {
        String::from_utf8_lossy(&self.0).into_owned()
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.iter().all(|b| b.is_ascii_graphic() || *b == b' ') {
            write!(f, "{}", self.as_string())
        } else {
            write!(f, "{:02X?}", self.0)
        }
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Signature({})", self)
    }
}

impl From<[u8; 4]> for Signature {
    fn from(bytes: [u8; 4]) -> Self {
        Signature(bytes)
    }
}

impl From<&[u8; 4]> for Signature {
    fn from(bytes: &[u8; 4]) -> Self {
        Signature(*bytes)
    }
}

impl TryFrom<&str> for Signature {
    type Error = String;

    fn try_from(value: &str) -> std::result::Result<Self, Self::Error> {
        let bytes: [u8; 4] = value
            .as_bytes()
            .try_into()
            .map_err(|_| format!("签名必须恰好为4字节: {:?}", value))?;
        Ok(Signature(bytes))
    }
}

impl Serialize for Signature {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

/// FormID：32位不透明标识符，核心从不重新计算
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct FormId(pub u32);

impl FormId {
    /// 主文件索引（FormID 高字节）
    pub fn master_index(&self) -> u8 {
        (self.0 >> 24) as u8
    }

    pub fn is_null(&self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for FormId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:08X}", self.0)
    }
}

impl fmt::Debug for FormId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FormId({:08X})", self.0)
    }
}

impl From<u32> for FormId {
    fn from(value: u32) -> Self {
        FormId(value)
    }
}

impl Serialize for FormId {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

/// 只进的字节读取游标
///
/// 所有多字节标量均为小端序。每次读取前先检查剩余字节，
/// 不足时返回 `TruncatedInput`，不会产生部分读取。
/// `base` 是缓冲区起点在原文件中的绝对偏移，用于诊断信息。
#[derive(Debug, Clone)]
pub struct ByteCursor<'a> {
    inner: Cursor<&'a [u8]>,
    base: u64,
}

impl<'a> ByteCursor<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self::with_base(data, 0)
    }

    pub fn with_base(data: &'a [u8], base: u64) -> Self {
        ByteCursor {
            inner: Cursor::new(data),
            base,
        }
    }

    /// 当前绝对偏移
    pub fn position(&self) -> u64 {
        self.base + self.inner.position()
    }

    /// 缓冲区内的相对偏移
    pub fn relative_position(&self) -> usize {
        self.inner.position() as usize
    }

    pub fn len(&self) -> usize {
        self.inner.get_ref().len()
    }

    pub fn remaining(&self) -> usize {
        self.len().saturating_sub(self.relative_position())
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    pub fn get_ref(&self) -> &'a [u8] {
        *self.inner.get_ref()
    }

    /// 检查是否还有 `needed` 字节可读
    pub fn ensure(&self, needed: usize) -> Result<()> {
        let available = self.remaining();
        if needed > available {
            return Err(EspError::TruncatedInput {
                offset: self.position(),
                needed,
                available,
                signature: None,
            });
        }
        Ok(())
    }

    /// 预读签名，不移动位置
    pub fn peek_signature(&self) -> Result<Signature> {
        self.ensure(4)?;
        let start = self.relative_position();
        let mut bytes = [0u8; 4];
        bytes.copy_from_slice(&self.get_ref()[start..start + 4]);
        Ok(Signature(bytes))
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        self.ensure(1)?;
        Ok(self.inner.read_u8()?)
    }

    pub fn read_i8(&mut self) -> Result<i8> {
        self.ensure(1)?;
        Ok(self.inner.read_i8()?)
    }

    pub fn read_u16(&mut self) -> Result<u16> {
        self.ensure(2)?;
        Ok(self.inner.read_u16::<LittleEndian>()?)
    }

    pub fn read_i16(&mut self) -> Result<i16> {
        self.ensure(2)?;
        Ok(self.inner.read_i16::<LittleEndian>()?)
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        self.ensure(4)?;
        Ok(self.inner.read_u32::<LittleEndian>()?)
    }

    pub fn read_i32(&mut self) -> Result<i32> {
        self.ensure(4)?;
        Ok(self.inner.read_i32::<LittleEndian>()?)
    }

    pub fn read_u64(&mut self) -> Result<u64> {
        self.ensure(8)?;
        Ok(self.inner.read_u64::<LittleEndian>()?)
    }

    pub fn read_f32(&mut self) -> Result<f32> {
        self.ensure(4)?;
        Ok(self.inner.read_f32::<LittleEndian>()?)
    }

    pub fn read_signature(&mut self) -> Result<Signature> {
        Ok(Signature(self.read_array::<4>()?))
    }

    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.read_bytes(N)?);
        Ok(out)
    }

    /// 借用读取 `n` 字节
    pub fn read_bytes(&mut self, n: usize) -> Result<&'a [u8]> {
        self.ensure(n)?;
        let start = self.relative_position();
        let data: &'a [u8] = *self.inner.get_ref();
        self.inner.set_position((start + n) as u64);
        Ok(&data[start..start + n])
    }

    /// Z字符串（以null结尾），返回不含终止符的字节并消耗终止符
    pub fn read_zstring(&mut self) -> Result<&'a [u8]> {
        let start = self.relative_position();
        let data: &'a [u8] = *self.inner.get_ref();
        match data[start..].iter().position(|&b| b == 0) {
            Some(len) => {
                self.inner.set_position((start + len + 1) as u64);
                Ok(&data[start..start + len])
            }
            None => Err(EspError::TruncatedInput {
                offset: self.position(),
                needed: self.remaining() + 1,
                available: self.remaining(),
                signature: None,
            }),
        }
    }

    /// B字符串（u8 长度前缀）
    pub fn read_bstring(&mut self) -> Result<&'a [u8]> {
        let length = self.read_u8()? as usize;
        self.read_bytes(length)
    }

    /// W字符串（u16 长度前缀）
    pub fn read_wstring(&mut self) -> Result<&'a [u8]> {
        let length = self.read_u16()? as usize;
        self.read_bytes(length)
    }

    pub fn skip(&mut self, n: usize) -> Result<()> {
        self.read_bytes(n).map(|_| ())
    }

    /// 跳转到绝对偏移（只能在缓冲区范围内）
    pub fn seek_to(&mut self, absolute: u64) -> Result<()> {
        let relative = absolute.checked_sub(self.base).filter(|r| *r <= self.len() as u64);
        match relative {
            Some(relative) => {
                self.inner.set_position(relative);
                Ok(())
            }
            None => Err(EspError::TruncatedInput {
                offset: absolute,
                needed: 0,
                available: self.len(),
                signature: None,
            }),
        }
    }
}

/// 与 `ByteCursor` 对称的字节写入器
#[derive(Debug, Default, Clone)]
pub struct ByteWriter {
    buf: Vec<u8>,
}

impl ByteWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        ByteWriter {
            buf: Vec::with_capacity(capacity),
        }
    }

    pub fn position(&self) -> usize {
        self.buf.len()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.buf
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.buf
    }

    pub fn write_u8(&mut self, value: u8) -> Result<()> {
        Ok(self.buf.write_u8(value)?)
    }

    pub fn write_i8(&mut self, value: i8) -> Result<()> {
        Ok(self.buf.write_i8(value)?)
    }

    pub fn write_u16(&mut self, value: u16) -> Result<()> {
        Ok(self.buf.write_u16::<LittleEndian>(value)?)
    }

    pub fn write_i16(&mut self, value: i16) -> Result<()> {
        Ok(self.buf.write_i16::<LittleEndian>(value)?)
    }

    pub fn write_u32(&mut self, value: u32) -> Result<()> {
        Ok(self.buf.write_u32::<LittleEndian>(value)?)
    }

    pub fn write_i32(&mut self, value: i32) -> Result<()> {
        Ok(self.buf.write_i32::<LittleEndian>(value)?)
    }

    pub fn write_u64(&mut self, value: u64) -> Result<()> {
        Ok(self.buf.write_u64::<LittleEndian>(value)?)
    }

    pub fn write_f32(&mut self, value: f32) -> Result<()> {
        Ok(self.buf.write_f32::<LittleEndian>(value)?)
    }

    pub fn write_signature(&mut self, signature: Signature) -> Result<()> {
        self.write_bytes(&signature.0)
    }

    pub fn write_bytes(&mut self, data: &[u8]) -> Result<()> {
        self.buf.extend_from_slice(data);
        Ok(())
    }

    pub fn write_zstring(&mut self, data: &[u8]) -> Result<()> {
        self.write_bytes(data)?;
        self.write_u8(0)
    }

    pub fn write_bstring(&mut self, data: &[u8]) -> Result<()> {
        let length = u8::try_from(data.len()).map_err(|_| EspError::IoError(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            format!("B字符串过长: {} bytes", data.len()),
        )))?;
        self.write_u8(length)?;
        self.write_bytes(data)
    }

    pub fn write_wstring(&mut self, data: &[u8]) -> Result<()> {
        let length = u16::try_from(data.len()).map_err(|_| EspError::IoError(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            format!("W字符串过长: {} bytes", data.len()),
        )))?;
        self.write_u16(length)?;
        self.write_bytes(data)
    }

    /// 回填之前预留的 u32 大小字段
    pub fn patch_u32(&mut self, pos: usize, value: u32) {
        self.buf[pos..pos + 4].copy_from_slice(&value.to_le_bytes());
    }
}

// 支持的编码
const SUPPORTED_ENCODINGS: &[&str] = &["utf-8", "windows-1252", "windows-1250", "windows-1251"];

#[derive(Debug, Clone)]
pub struct RawString {
    pub content: String,
    pub encoding: String,
}

impl RawString {
    /// 尝试多种编码解码
    pub fn decode(data: &[u8]) -> Self {
        for encoding_name in SUPPORTED_ENCODINGS {
            if let Some(encoding) = encoding_rs::Encoding::for_label(encoding_name.as_bytes()) {
                let (decoded, had_errors) = encoding.decode_without_bom_handling(data);
                if !had_errors {
                    return RawString {
                        content: decoded.into_owned(),
                        encoding: encoding_name.to_string(),
                    };
                }
            }
        }

        // 回退到UTF-8，忽略错误
        RawString {
            content: String::from_utf8_lossy(data).into_owned(),
            encoding: "utf-8".to_string(),
        }
    }

    /// Z字符串解析(以null结尾)
    pub fn parse_zstring(data: &[u8]) -> Self {
        let null_pos = data.iter().position(|&b| b == 0).unwrap_or(data.len());
        Self::decode(&data[..null_pos])
    }

    /// 按指定编码编码文本，存在无法映射的字符时返回 None
    pub fn encode(text: &str, encoding: &str) -> Option<Vec<u8>> {
        let encoding = encoding_rs::Encoding::for_label(encoding.as_bytes())?;
        if encoding == encoding_rs::UTF_8 {
            return Some(text.as_bytes().to_vec());
        }
        let (encoded, _, had_unmappable) = encoding.encode(text);
        if had_unmappable {
            None
        } else {
            Some(encoded.into_owned())
        }
    }
}

// 记录标志位定义
bitflags::bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
    pub struct RecordFlags: u32 {
        const MASTER_FILE = 0x00000001;        // ESM标志
        const DELETED = 0x00000020;            // 已删除
        const LOCALIZED = 0x00000080;          // 本地化（仅TES4）
        const LIGHT_MASTER = 0x00000200;       // 轻量级主文件（仅TES4）
        const PERSISTENT = 0x00000400;         // 持久化
        const INITIALLY_DISABLED = 0x00000800; // 初始禁用
        const IGNORED = 0x00001000;            // 忽略
        const VISIBLE_DISTANT = 0x00008000;    // 远距离可见
        const COMPRESSED = 0x00040000;         // 压缩

        // 未命名位同样保留，写回时原样输出
        const _ = !0;
    }
}

impl RecordFlags {
    pub fn from_raw(bits: u32) -> Self {
        RecordFlags::from_bits_retain(bits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_reads_little_endian() {
        let data = [0x34, 0x12, 0x78, 0x56, 0x34, 0x12, b'A', b'B', 0x00];
        let mut cursor = ByteCursor::with_base(&data, 0x100);

        assert_eq!(cursor.read_u16().unwrap(), 0x1234);
        assert_eq!(cursor.read_u32().unwrap(), 0x12345678);
        assert_eq!(cursor.position(), 0x106);
        assert_eq!(cursor.read_zstring().unwrap(), b"AB");
        assert!(cursor.is_empty());
    }

    #[test]
    fn test_cursor_truncation_reports_offset() {
        let data = [1u8, 2, 3];
        let mut cursor = ByteCursor::with_base(&data, 10);
        cursor.read_u8().unwrap();

        match cursor.read_u32() {
            Err(EspError::TruncatedInput { offset, needed, available, signature }) => {
                assert_eq!(offset, 11);
                assert_eq!(signature, None);
                assert_eq!(needed, 4);
                assert_eq!(available, 2);
            }
            other => panic!("应该返回 TruncatedInput: {:?}", other),
        }
        // 失败的读取不移动位置
        assert_eq!(cursor.position(), 11);
    }

    #[test]
    fn test_peek_signature_does_not_consume() {
        let data = *b"GRUPxxxx";
        let mut cursor = ByteCursor::new(&data);
        assert_eq!(cursor.peek_signature().unwrap(), Signature::GRUP);
        assert_eq!(cursor.read_signature().unwrap(), Signature::GRUP);
        assert_eq!(cursor.position(), 4);
    }

    #[test]
    fn test_length_prefixed_strings() {
        let data = [3u8, b'a', b'b', b'c', 2, 0, b'x', b'y'];
        let mut cursor = ByteCursor::new(&data);
        assert_eq!(cursor.read_bstring().unwrap(), b"abc");
        assert_eq!(cursor.read_wstring().unwrap(), b"xy");
    }

    #[test]
    fn test_writer_mirrors_reader() {
        let mut writer = ByteWriter::new();
        writer.write_signature(Signature::new(*b"EDID")).unwrap();
        writer.write_u16(0xBEEF).unwrap();
        writer.write_f32(1.5).unwrap();
        writer.write_zstring(b"Sword").unwrap();
        writer.write_bstring(b"hi").unwrap();
        let bytes = writer.into_inner();

        let mut cursor = ByteCursor::new(&bytes);
        assert_eq!(cursor.read_signature().unwrap(), Signature::EDID);
        assert_eq!(cursor.read_u16().unwrap(), 0xBEEF);
        assert_eq!(cursor.read_f32().unwrap(), 1.5);
        assert_eq!(cursor.read_zstring().unwrap(), b"Sword");
        assert_eq!(cursor.read_bstring().unwrap(), b"hi");
        assert!(cursor.is_empty());
    }

    #[test]
    fn test_patch_u32() {
        let mut writer = ByteWriter::new();
        writer.write_u32(0).unwrap();
        writer.write_u8(9).unwrap();
        writer.patch_u32(0, 0xAABBCCDD);
        assert_eq!(writer.as_slice(), &[0xDD, 0xCC, 0xBB, 0xAA, 9]);
    }

    #[test]
    fn test_signature_conversions() {
        let sig = Signature::try_from("NPC_").unwrap();
        assert_eq!(sig, Signature::from(b"NPC_"));
        assert_eq!(sig.to_string(), "NPC_");
        assert!(Signature::try_from("TOOLONG").is_err());
    }

    #[test]
    fn test_flags_retain_unknown_bits() {
        let flags = RecordFlags::from_raw(0x0004_0021 | 0x8000_0000);
        assert!(flags.contains(RecordFlags::COMPRESSED));
        assert!(flags.contains(RecordFlags::DELETED));
        assert_eq!(flags.bits(), 0x8004_0021);
    }

    #[test]
    fn test_raw_string_round_trip_windows_1252() {
        let decoded = RawString::decode(&[0x43, 0x61, 0x66, 0xE9]);
        assert_eq!(decoded.content, "Café");
        assert_eq!(decoded.encoding, "windows-1252");
        assert_eq!(RawString::encode(&decoded.content, &decoded.encoding).unwrap(), vec![0x43, 0x61, 0x66, 0xE9]);
        assert!(RawString::encode("铁剑", "windows-1252").is_none());
    }
}
