use crate::datatypes::Signature;
use serde::Serialize;
use thiserror::Error;
use std::path::Path;

/// 自定义错误类型
///
/// 结构性错误都携带发生位置（文件内绝对偏移）和签名上下文。
#[derive(Error, Debug)]
pub enum EspError {
    /// 数据在声明的结构中途结束
    #[error(
        "Truncated input{} at offset 0x{offset:X}: need {needed} bytes, {available} available",
        signature_context(.signature)
    )]
    TruncatedInput {
        offset: u64,
        needed: usize,
        available: usize,
        /// 正在读取的记录签名，组为 GRUP 或组标签
        signature: Option<Signature>,
    },

    /// 压缩数据损坏或解压大小与前缀不一致
    #[error("Corrupt record {signature} at offset 0x{offset:X}: {reason}")]
    CorruptRecord {
        offset: u64,
        signature: Signature,
        reason: String,
    },

    /// 子记录消耗的字节数与记录声明的大小不一致
    #[error("Malformed record {signature} at offset 0x{offset:X}: declared {declared} bytes, subrecords consume {consumed}")]
    MalformedRecord {
        offset: u64,
        signature: Signature,
        declared: u64,
        consumed: u64,
    },

    /// 组内容与组声明的大小不一致
    #[error("Malformed group '{label}' at offset 0x{offset:X}: declared {declared} bytes, content needs {consumed}")]
    MalformedGroup {
        offset: u64,
        label: Signature,
        declared: u64,
        consumed: u64,
    },

    /// 字段值无法用其固定编码表示
    #[error("Invalid value for field {signature}: {reason}")]
    InvalidFieldValue {
        signature: Signature,
        reason: String,
    },

    #[error("Invalid file format: expected TES4 header, found {0}")]
    InvalidFormat(Signature),

    #[error("Input too large: {size} bytes exceeds limit of {limit} bytes")]
    InputTooLarge { size: u64, limit: u64 },

    #[error("Parsing cancelled at offset 0x{offset:X}")]
    Cancelled { offset: u64 },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// 错误分类（用于恢复策略和报告）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ErrorKind {
    TruncatedInput,
    CorruptRecord,
    MalformedRecord,
    MalformedGroup,
    InvalidFieldValue,
    InvalidFormat,
    InputTooLarge,
    Cancelled,
    Io,
}

impl EspError {
    /// 获取错误分类
    pub fn kind(&self) -> ErrorKind {
        match self {
            EspError::TruncatedInput { .. } => ErrorKind::TruncatedInput,
            EspError::CorruptRecord { .. } => ErrorKind::CorruptRecord,
            EspError::MalformedRecord { .. } => ErrorKind::MalformedRecord,
            EspError::MalformedGroup { .. } => ErrorKind::MalformedGroup,
            EspError::InvalidFieldValue { .. } => ErrorKind::InvalidFieldValue,
            EspError::InvalidFormat(_) => ErrorKind::InvalidFormat,
            EspError::InputTooLarge { .. } => ErrorKind::InputTooLarge,
            EspError::Cancelled { .. } => ErrorKind::Cancelled,
            EspError::IoError(_) | EspError::JsonError(_) => ErrorKind::Io,
        }
    }

    /// 为截断错误补上签名上下文（已有时保留）
    pub(crate) fn with_signature(self, context: Signature) -> Self {
        match self {
            EspError::TruncatedInput { offset, needed, available, signature } => EspError::TruncatedInput {
                offset,
                needed,
                available,
                signature: signature.or(Some(context)),
            },
            other => other,
        }
    }

    /// 错误发生的偏移（如果有）
    pub fn offset(&self) -> Option<u64> {
        match self {
            EspError::TruncatedInput { offset, .. }
            | EspError::CorruptRecord { offset, .. }
            | EspError::MalformedRecord { offset, .. }
            | EspError::MalformedGroup { offset, .. }
            | EspError::Cancelled { offset } => Some(*offset),
            _ => None,
        }
    }

    /// 是否可以通过按声明大小跳过来恢复
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::CorruptRecord | ErrorKind::MalformedRecord | ErrorKind::MalformedGroup
        )
    }

    pub(crate) fn invalid_field(signature: Signature, reason: impl Into<String>) -> Self {
        EspError::InvalidFieldValue {
            signature,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, EspError>;

fn signature_context(signature: &Option<Signature>) -> String {
    match signature {
        Some(signature) => format!(" in {}", signature),
        None => String::new(),
    }
}

/// 创建文件备份
pub fn create_backup(file_path: &Path) -> Result<std::path::PathBuf> {
    if !file_path.exists() {
        return Err(EspError::IoError(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "原文件不存在"
        )));
    }

    let timestamp = chrono::Local::now().format("%Y-%m-%d-%H-%M-%S");
    let backup_path = file_path.with_extension(format!("{}.bak", timestamp));

    std::fs::copy(file_path, &backup_path)?;

    Ok(backup_path)
}
