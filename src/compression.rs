use crate::datatypes::{ByteCursor, Signature};
use crate::utils::{EspError, Result};
use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use flate2::Compression;
use std::io::{Read, Write};

/// 解压记录数据
///
/// 磁盘布局：4字节解压大小 + zlib 数据流。
/// 解压长度必须与前缀完全一致，否则返回 `CorruptRecord`。
pub fn decompress(
    data: &[u8],
    offset: u64,
    signature: Signature,
    max_size: u64,
) -> Result<Vec<u8>> {
    let corrupt = |reason: String| EspError::CorruptRecord { offset, signature, reason };

    if data.len() < 4 {
        return Err(corrupt(format!("压缩数据太短，无法包含解压大小: {} bytes", data.len())));
    }

    let mut cursor = ByteCursor::with_base(data, offset);
    let decompressed_size = cursor.read_u32()? as u64;

    if decompressed_size > max_size {
        return Err(corrupt(format!(
            "解压大小过大: {} bytes (上限 {} bytes)", decompressed_size, max_size
        )));
    }

    // 多读一个字节用来发现实际数据比前缀更长的情况
    let decoder = ZlibDecoder::new(&data[4..]);
    let mut decompressed = Vec::with_capacity(decompressed_size as usize);
    decoder
        .take(decompressed_size + 1)
        .read_to_end(&mut decompressed)
        .map_err(|e| corrupt(format!("zlib 解压失败: {}", e)))?;

    if decompressed.len() as u64 != decompressed_size {
        return Err(corrupt(format!(
            "解压大小不匹配: 期望 {} bytes，实际 {}{} bytes",
            decompressed_size,
            if decompressed.len() as u64 > decompressed_size { "超过 " } else { "" },
            decompressed.len()
        )));
    }

    log::debug!(
        "解压记录 {} (0x{:X}): {} -> {} bytes",
        signature, offset, data.len(), decompressed.len()
    );

    Ok(decompressed)
}

/// 压缩记录数据，返回带解压大小前缀的磁盘字节
pub fn compress(data: &[u8], signature: Signature) -> Result<Vec<u8>> {
    let size = u32::try_from(data.len()).map_err(|_| {
        EspError::invalid_field(signature, format!("记录数据过大，无法压缩: {} bytes", data.len()))
    })?;

    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    let compressed_data = encoder.finish()?;

    let mut result = Vec::with_capacity(compressed_data.len() + 4);
    result.extend_from_slice(&size.to_le_bytes());
    result.extend_from_slice(&compressed_data);

    log::debug!("重新压缩记录 {}: {} -> {} bytes", signature, data.len(), result.len());

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    const WEAP: Signature = Signature::new(*b"WEAP");

    #[test]
    fn test_compress_then_decompress() {
        let data = b"EDID\x06\x00Sword\x00FULL\x06\x00Sword\x00".repeat(8);
        let packed = compress(&data, WEAP).unwrap();

        assert_eq!(&packed[..4], &(data.len() as u32).to_le_bytes());
        assert_eq!(decompress(&packed, 0, WEAP, u64::MAX).unwrap(), data);
    }

    #[test]
    fn test_size_prefix_mismatch_is_corrupt() {
        let data = vec![7u8; 64];
        let mut packed = compress(&data, WEAP).unwrap();
        packed[..4].copy_from_slice(&63u32.to_le_bytes());

        let err = decompress(&packed, 0x20, WEAP, u64::MAX).unwrap_err();
        assert!(matches!(err, EspError::CorruptRecord { offset: 0x20, .. }), "{:?}", err);

        packed[..4].copy_from_slice(&65u32.to_le_bytes());
        assert!(matches!(
            decompress(&packed, 0, WEAP, u64::MAX),
            Err(EspError::CorruptRecord { .. })
        ));
    }

    #[test]
    fn test_garbage_stream_is_corrupt() {
        let packed = [4u8, 0, 0, 0, 0xFF, 0xEE, 0xDD];
        assert!(matches!(
            decompress(&packed, 0, WEAP, u64::MAX),
            Err(EspError::CorruptRecord { .. })
        ));
    }

    #[test]
    fn test_short_payload_is_corrupt() {
        assert!(matches!(
            decompress(&[1, 2], 0, WEAP, u64::MAX),
            Err(EspError::CorruptRecord { .. })
        ));
    }

    #[test]
    fn test_size_limit() {
        let packed = compress(&[0u8; 128], WEAP).unwrap();
        assert!(matches!(
            decompress(&packed, 0, WEAP, 64),
            Err(EspError::CorruptRecord { .. })
        ));
    }
}
