use crate::datatypes::Signature;
use crate::group::{Node, Records, RecordsMut, Walk};
use crate::record::Record;
use crate::utils::{ErrorKind, EspError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

mod header;
mod parser;
mod stats;
mod summary;
mod writer;

pub use header::{create_header, HeaderInfo, HeaderOptions};
pub use stats::PluginStats;
pub use summary::{NodeSummary, PluginSummary};

/// 默认解压大小上限（50MB）
pub const DEFAULT_MAX_DECOMPRESSED_SIZE: u64 = 50_000_000;
/// 默认输入大小上限（4GB，u32 大小字段能表示的上限）
pub const DEFAULT_MAX_INPUT_SIZE: u64 = u32::MAX as u64;

/// 解析选项
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseOptions {
    /// 恢复模式：损坏的记录/组按声明大小跳过并保留原始字节
    pub recover: bool,
    /// 输入大小上限
    pub max_input_size: u64,
    /// 单条压缩记录的解压大小上限
    pub max_decompressed_size: u64,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            recover: false,
            max_input_size: DEFAULT_MAX_INPUT_SIZE,
            max_decompressed_size: DEFAULT_MAX_DECOMPRESSED_SIZE,
        }
    }
}

impl ParseOptions {
    /// 恢复模式的默认选项
    pub fn recovering() -> Self {
        ParseOptions {
            recover: true,
            ..Default::default()
        }
    }

    /// 从 JSON 配置文件加载，缺省字段使用默认值
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

/// 恢复模式下记录的问题
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParseIssue {
    /// 出问题的节点的绝对偏移
    pub offset: u64,
    pub signature: Signature,
    pub kind: ErrorKind,
    pub message: String,
}

impl ParseIssue {
    pub(crate) fn from_error(offset: u64, signature: Signature, error: &EspError) -> Self {
        ParseIssue {
            offset,
            signature,
            kind: error.kind(),
            message: error.to_string(),
        }
    }
}

/// ESP插件文档
///
/// 头部 TES4 记录加上按文件顺序排列的顶层节点。
#[derive(Debug, Clone)]
pub struct Plugin {
    /// 头部记录
    pub header: Record,
    /// 顶层节点（通常全部是组）
    pub nodes: Vec<Node>,
    /// 恢复模式下跳过的问题
    pub issues: Vec<ParseIssue>,
}

impl Plugin {
    /// 从头部创建空文档
    pub fn with_header(header: Record) -> Self {
        Plugin {
            header,
            nodes: Vec::new(),
            issues: Vec::new(),
        }
    }

    /// 深度优先遍历顶层之下的所有节点
    pub fn walk(&self) -> Walk<'_> {
        Walk::new(&self.nodes)
    }

    /// 所有记录（不含头部）
    pub fn records(&self) -> Records<'_> {
        Records::new(&self.nodes)
    }

    pub fn records_mut(&mut self) -> RecordsMut<'_> {
        RecordsMut::new(&mut self.nodes)
    }

    /// 按 FormID 查找记录
    pub fn find_record(&self, form_id: crate::datatypes::FormId) -> Option<&Record> {
        self.records().find(|r| r.form_id() == form_id)
    }

    pub fn find_record_mut(&mut self, form_id: crate::datatypes::FormId) -> Option<&mut Record> {
        self.records_mut().find(|r| r.form_id() == form_id)
    }

    /// 恢复模式下是否跳过了任何内容
    pub fn has_issues(&self) -> bool {
        !self.issues.is_empty()
    }
}

impl std::fmt::Display for Plugin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Plugin(author={:?}, masters={}, nodes={})",
            self.author().unwrap_or_default(),
            self.masters().len(),
            self.nodes.len()
        )
    }
}
