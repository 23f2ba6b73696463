//! IO 抽象层 - trait 定义
//!
//! 支持依赖注入和测试 mock。

use crate::utils::Result;
use memmap2::Mmap;
use std::path::Path;

/// ESP 文件原始数据
///
/// 可以是读入内存的字节，也可以是只读内存映射（零拷贝）。
#[derive(Debug)]
pub struct RawEspData {
    backing: Backing,
}

#[derive(Debug)]
enum Backing {
    Owned(Vec<u8>),
    Mapped(Mmap),
}

impl RawEspData {
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        RawEspData {
            backing: Backing::Owned(bytes),
        }
    }

    pub fn from_mmap(mmap: Mmap) -> Self {
        RawEspData {
            backing: Backing::Mapped(mmap),
        }
    }

    /// 文件的原始字节数据
    pub fn as_bytes(&self) -> &[u8] {
        match &self.backing {
            Backing::Owned(bytes) => bytes,
            Backing::Mapped(mmap) => &mmap[..],
        }
    }

    pub fn len(&self) -> usize {
        self.as_bytes().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_mapped(&self) -> bool {
        matches!(self.backing, Backing::Mapped(_))
    }
}

/// ESP 文件读取 trait
///
/// 只负责 IO，不负责解析。
pub trait EspReader {
    /// 读取 ESP 文件的原始数据
    fn read(&self, path: &Path) -> Result<RawEspData>;
}

/// ESP 文件写入 trait
///
/// 只负责 IO，不负责序列化。
pub trait EspWriter {
    /// 写入序列化后的数据
    fn write(&self, data: &[u8], path: &Path) -> Result<()>;
}
