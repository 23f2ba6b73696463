use crate::datatypes::{ByteCursor, ByteWriter, Signature};
use crate::utils::Result;
use serde::Serialize;

/// 子记录头部大小（4字节类型 + 2字节大小）
pub const SUBRECORD_HEADER_SIZE: usize = 6;

/// 子记录长度的编码方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SizeForm {
    /// 普通形式：u16 长度前缀
    Short,
    /// 扩展形式：前面有一个 `XXXX` 子记录携带真实的 u32 长度，
    /// `short` 是真实签名后面原样保留的 u16（通常为 0）
    Extended { short: u16 },
}

/// 子记录结构
#[derive(Debug, Clone, PartialEq)]
pub struct Subrecord {
    /// 4字符子记录类型
    pub signature: Signature,
    /// 原始数据（按需由字段编解码器解释）
    pub data: Vec<u8>,
    /// 长度编码方式
    pub size_form: SizeForm,
}

impl Subrecord {
    pub fn new(signature: Signature, data: Vec<u8>) -> Self {
        Subrecord {
            signature,
            data,
            size_form: SizeForm::Short,
        }
    }

    /// 获取子记录类型
    pub fn get_type(&self) -> Signature {
        self.signature
    }

    /// 获取数据
    pub fn get_data(&self) -> &[u8] {
        &self.data
    }

    /// 写出时是否需要 `XXXX` 扩展形式
    pub fn needs_extended(&self) -> bool {
        matches!(self.size_form, SizeForm::Extended { .. }) || self.data.len() > u16::MAX as usize
    }

    /// 写出后占用的字节数
    pub fn encoded_len(&self) -> usize {
        if self.needs_extended() {
            SUBRECORD_HEADER_SIZE * 2 + 4 + self.data.len()
        } else {
            SUBRECORD_HEADER_SIZE + self.data.len()
        }
    }

    /// 写出子记录
    ///
    /// 数据超过 u16 上限时自动切换为 `XXXX` 形式。
    pub fn write(&self, writer: &mut ByteWriter) -> Result<()> {
        if self.needs_extended() {
            let short = match self.size_form {
                SizeForm::Extended { short } => short,
                SizeForm::Short => 0,
            };
            writer.write_signature(Signature::XXXX)?;
            writer.write_u16(4)?;
            writer.write_u32(self.data.len() as u32)?;
            writer.write_signature(self.signature)?;
            writer.write_u16(short)?;
        } else {
            writer.write_signature(self.signature)?;
            writer.write_u16(self.data.len() as u16)?;
        }
        writer.write_bytes(&self.data)
    }
}

/// 切分后的记录负载
#[derive(Debug, Clone, PartialEq)]
pub struct SlicedPayload {
    pub subrecords: Vec<Subrecord>,
    /// 末尾不足一个子记录头部的 NULL 填充
    pub padding: Vec<u8>,
}

/// 切分失败的位置信息
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SliceFailure {
    /// 出错子记录在负载内的相对偏移
    pub at: usize,
    /// 按子记录头部计算，负载至少需要的字节数
    pub consumed: u64,
}

/// 单个子记录头部的解析结果
enum Header {
    Short { signature: Signature, len: usize },
    Extended { signature: Signature, short: u16, len: usize },
}

impl Header {
    fn header_len(&self) -> usize {
        match self {
            Header::Short { .. } => SUBRECORD_HEADER_SIZE,
            Header::Extended { .. } => SUBRECORD_HEADER_SIZE * 2 + 4,
        }
    }

    fn payload_len(&self) -> usize {
        match self {
            Header::Short { len, .. } | Header::Extended { len, .. } => *len,
        }
    }
}

/// 读取一个子记录头部；数据不足时返回 None
fn read_header(cursor: &mut ByteCursor<'_>) -> Option<Header> {
    let signature = cursor.read_signature().ok()?;
    let len = cursor.read_u16().ok()?;

    if signature != Signature::XXXX {
        return Some(Header::Short { signature, len: len as usize });
    }

    // XXXX 的负载固定为 4 字节真实长度
    if len != 4 {
        return None;
    }
    let real_len = cursor.read_u32().ok()?;
    let signature = cursor.read_signature().ok()?;
    let short = cursor.read_u16().ok()?;
    Some(Header::Extended {
        signature,
        short,
        len: real_len as usize,
    })
}

/// 把扁平负载切分为子记录
///
/// 负载必须被子记录恰好消耗，或者只剩下少于6字节的全 NULL 填充。
pub fn slice_subrecords(data: &[u8], base: u64) -> std::result::Result<SlicedPayload, SliceFailure> {
    let mut cursor = ByteCursor::with_base(data, base);
    let mut subrecords = Vec::new();

    while !cursor.is_empty() {
        let start = cursor.relative_position();
        let remaining = cursor.remaining();

        // 剩余字节 < 6，检查是否为 NULL 填充
        if remaining < SUBRECORD_HEADER_SIZE {
            let tail = &data[start..];
            if tail.iter().all(|&b| b == 0) {
                log::trace!("保留 {} 字节的 NULL 填充 (0x{:X})", remaining, cursor.position());
                return Ok(SlicedPayload {
                    subrecords,
                    padding: tail.to_vec(),
                });
            }
            return Err(SliceFailure {
                at: start,
                consumed: (start + SUBRECORD_HEADER_SIZE) as u64,
            });
        }

        let header = match read_header(&mut cursor) {
            Some(header) => header,
            // 只可能是 XXXX 后面缺少真实子记录
            None => {
                return Err(SliceFailure {
                    at: start,
                    consumed: (start + SUBRECORD_HEADER_SIZE * 2 + 4) as u64,
                })
            }
        };

        let end = start + header.header_len() + header.payload_len();
        let payload = match cursor.read_bytes(header.payload_len()) {
            Ok(payload) => payload,
            Err(_) => {
                return Err(SliceFailure {
                    at: start,
                    consumed: end as u64,
                })
            }
        };

        let subrecord = match header {
            Header::Short { signature, .. } => Subrecord::new(signature, payload.to_vec()),
            Header::Extended { signature, short, .. } => Subrecord {
                signature,
                data: payload.to_vec(),
                size_form: SizeForm::Extended { short },
            },
        };
        subrecords.push(subrecord);
    }

    Ok(SlicedPayload {
        subrecords,
        padding: Vec::new(),
    })
}

/// 在被截断的负载中找到第一个被截断的子记录的绝对偏移
///
/// 所有子记录都完整时返回负载末尾。
pub fn locate_truncation(partial: &[u8], base: u64) -> u64 {
    let mut cursor = ByteCursor::with_base(partial, base);

    while !cursor.is_empty() {
        let start = cursor.position();
        match read_header(&mut cursor) {
            Some(header) => {
                if cursor.skip(header.payload_len()).is_err() {
                    return start;
                }
            }
            None => return start,
        }
    }

    cursor.position()
}

/// 写出一组子记录和填充
pub fn write_subrecords(subrecords: &[Subrecord], padding: &[u8], writer: &mut ByteWriter) -> Result<()> {
    for subrecord in subrecords {
        subrecord.write(writer)?;
    }
    writer.write_bytes(padding)
}
