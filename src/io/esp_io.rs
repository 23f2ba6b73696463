//! ESP 文件 IO 实现
//!
//! 提供基于文件系统的默认 ESP 文件读写实现
use super::traits::{EspReader, EspWriter, RawEspData};
use crate::utils::Result;
use memmap2::Mmap;
use std::path::Path;

/// 默认的 ESP 文件读取器（基于 std::fs）
#[derive(Debug, Clone, Default)]
pub struct DefaultEspReader;

impl EspReader for DefaultEspReader {
    fn read(&self, path: &Path) -> Result<RawEspData> {
        let bytes = std::fs::read(path)?;
        Ok(RawEspData::from_bytes(bytes))
    }
}

/// 内存映射读取器（零拷贝访问文件数据）
///
/// 空文件无法映射，退回普通读取。
#[derive(Debug, Clone, Default)]
pub struct MmapEspReader;

impl EspReader for MmapEspReader {
    fn read(&self, path: &Path) -> Result<RawEspData> {
        let file = std::fs::File::open(path)?;
        if file.metadata()?.len() == 0 {
            return Ok(RawEspData::from_bytes(Vec::new()));
        }
        // 映射期间文件不应被其他进程截断
        let mmap = unsafe { Mmap::map(&file)? };
        Ok(RawEspData::from_mmap(mmap))
    }
}

/// 默认的 ESP 文件写入器（基于 std::fs）
#[derive(Debug, Clone, Default)]
pub struct DefaultEspWriter;

impl EspWriter for DefaultEspWriter {
    fn write(&self, data: &[u8], path: &Path) -> Result<()> {
        // 确保父目录存在
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, data)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_esp_reader() {
        let temp_dir = tempfile::tempdir().unwrap();
        let test_file = temp_dir.path().join("test_esp_reader.esp");

        let test_data = b"TES4\x00\x00\x00\x00";
        std::fs::write(&test_file, test_data).unwrap();

        let result = DefaultEspReader.read(&test_file).unwrap();
        assert_eq!(result.as_bytes(), test_data);
        assert!(!result.is_mapped());
    }

    #[test]
    fn test_mmap_reader() {
        let temp_dir = tempfile::tempdir().unwrap();
        let test_file = temp_dir.path().join("mapped.esp");
        std::fs::write(&test_file, b"TES4").unwrap();

        let result = MmapEspReader.read(&test_file).unwrap();
        assert_eq!(result.as_bytes(), b"TES4");
        assert!(result.is_mapped());

        let empty = temp_dir.path().join("empty.esp");
        std::fs::write(&empty, b"").unwrap();
        assert!(MmapEspReader.read(&empty).unwrap().is_empty());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let temp_dir = tempfile::tempdir().unwrap();
        let err = MmapEspReader.read(&temp_dir.path().join("missing.esp")).unwrap_err();
        assert_eq!(err.kind(), crate::utils::ErrorKind::Io);
    }

    #[test]
    fn test_writer_creates_parent_dirs() {
        let temp_dir = tempfile::tempdir().unwrap();
        let test_file = temp_dir.path().join("nested").join("subdir").join("test.esp");

        DefaultEspWriter.write(&[1, 2, 3, 4], &test_file).unwrap();

        assert_eq!(std::fs::read(&test_file).unwrap(), vec![1, 2, 3, 4]);
    }
}
