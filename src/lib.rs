pub mod datatypes;
pub mod utils;
pub mod compression;
pub mod subrecord;
pub mod field;
pub mod dispatch;
pub mod record;
pub mod group;
pub mod plugin;
pub mod io;
pub mod debug;

// 重新导出主要结构
pub use plugin::{HeaderOptions, ParseIssue, ParseOptions, Plugin, PluginStats};
pub use record::{Record, RecordBody, RecordHeader};
pub use group::{Group, GroupLabel, GroupType, Node};
pub use subrecord::{SizeForm, Subrecord};
pub use field::{FieldContext, FieldKind, FieldValue};
pub use datatypes::{FormId, RecordFlags, Signature};
pub use utils::{ErrorKind, EspError, Result};
pub use debug::EspDebugger;
pub use io::{DefaultEspReader, DefaultEspWriter, EspReader, EspWriter, MmapEspReader, RawEspData};

// 常量定义
pub const SUPPORTED_EXTENSIONS: &[&str] = &["esp", "esm", "esl"];

/// 使用默认选项解析整个文档
pub fn parse(data: &[u8]) -> Result<Plugin> {
    Plugin::parse(data)
}

/// 序列化整个文档
pub fn unparse(plugin: &Plugin) -> Result<Vec<u8>> {
    plugin.unparse()
}
