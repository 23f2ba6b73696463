use crate::field::FieldContext;
use crate::group::{Group, Node};
use crate::plugin::Plugin;
use crate::record::Record;
use crate::utils::Result;
use std::fmt::Write as _;
use std::path::Path;

/// ESP文件结构调试器
pub struct EspDebugger;

impl EspDebugger {
    /// 生成文本形式的结构 dump，每个节点一行，按深度缩进
    pub fn dump(plugin: &Plugin) -> String {
        let mut output = String::new();
        let ctx = plugin.field_context();

        let _ = writeln!(output, "=== ESP文件结构dump ===");
        let _ = writeln!(output, "主文件: {}", if plugin.is_master() { "是" } else { "否" });
        let _ = writeln!(output, "本地化: {}", if plugin.is_localized() { "是" } else { "否" });
        for (i, master) in plugin.masters().iter().enumerate() {
            let _ = writeln!(output, "主文件 {}: {}", i, master);
        }
        let _ = writeln!(output);

        Self::dump_record(&mut output, &plugin.header, 0, ctx);
        for (depth, node) in plugin.walk() {
            match node {
                Node::Record(record) => Self::dump_record(&mut output, record, depth, ctx),
                Node::Group(group) => Self::dump_group(&mut output, group, depth),
            }
        }

        if !plugin.issues.is_empty() {
            let _ = writeln!(output);
            let _ = writeln!(output, "=== 恢复跳过的问题 ({}) ===", plugin.issues.len());
            for issue in &plugin.issues {
                let _ = writeln!(output, "0x{:08X} {} {:?}: {}", issue.offset, issue.signature, issue.kind, issue.message);
            }
        }

        output
    }

    /// 把 dump 写入文件
    pub fn dump_to_file(plugin: &Plugin, output_path: &Path) -> Result<()> {
        std::fs::write(output_path, Self::dump(plugin))?;
        Ok(())
    }

    fn dump_group(output: &mut String, group: &Group, depth: usize) {
        let prefix = "  ".repeat(depth);
        let _ = write!(
            output,
            "{}GRUP {:?} type={:?}",
            prefix, group.label_value(), group.group_type
        );
        if let Some(offset) = group.offset() {
            let _ = write!(output, " @0x{:X} size={}", offset, group.declared_size());
        }
        if let Some(raw) = &group.raw_content {
            let _ = write!(output, " [原始字节 {} bytes]", raw.len());
        }
        let _ = writeln!(output);
    }

    fn dump_record(output: &mut String, record: &Record, depth: usize, ctx: FieldContext) {
        let prefix = "  ".repeat(depth);
        let _ = write!(output, "{}{} [{}] flags=0x{:08X}", prefix, record.signature(), record.form_id(), record.flags().bits());
        if record.is_compressed() {
            let _ = write!(output, " (压缩)");
        }
        if record.is_deleted() {
            let _ = write!(output, " (已删除)");
        }
        if record.is_opaque() {
            let _ = write!(output, " [原始字节 {} bytes]", record.declared_size());
        }
        let _ = writeln!(output);

        for subrecord in record.subrecords() {
            let value = record.decode_subrecord(subrecord, ctx);
            let _ = writeln!(output, "{}  {}: {}", prefix, subrecord.signature, value);
        }
    }
}

/// 第一个不同字节的位置；长度不同且前缀相同时返回较短一方的长度
pub fn first_difference(a: &[u8], b: &[u8]) -> Option<usize> {
    match a.iter().zip(b).position(|(x, y)| x != y) {
        Some(pos) => Some(pos),
        None if a.len() != b.len() => Some(a.len().min(b.len())),
        None => None,
    }
}

/// 指定位置附近的十六进制片段（用于比较输出）
pub fn hex_context(data: &[u8], offset: usize, radius: usize) -> String {
    let start = offset.saturating_sub(radius).min(data.len());
    let end = (offset + radius).min(data.len());
    format!("0x{:X}..0x{:X}: {:02X?}", start, end, &data[start..end])
}
