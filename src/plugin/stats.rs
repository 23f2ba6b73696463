use super::Plugin;
use crate::group::Node;
use serde::Serialize;
use std::collections::BTreeMap;

/// 插件统计信息
#[derive(Debug, Clone, Default, Serialize)]
pub struct PluginStats {
    pub is_master: bool,
    pub is_localized: bool,
    pub is_light: bool,
    pub master_count: usize,
    pub group_count: usize,
    pub record_count: usize,
    pub compressed_count: usize,
    pub deleted_count: usize,
    pub opaque_record_count: usize,
    pub opaque_group_count: usize,
    pub issue_count: usize,
    /// 各记录类型的数量
    pub signatures: BTreeMap<String, usize>,
}

impl std::fmt::Display for PluginStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== 插件统计信息 ===")?;
        writeln!(f, "主文件: {}", if self.is_master { "是" } else { "否" })?;
        writeln!(f, "本地化: {}", if self.is_localized { "是" } else { "否" })?;
        writeln!(f, "轻量插件: {}", if self.is_light { "是" } else { "否" })?;
        writeln!(f, "依赖主文件数: {}", self.master_count)?;
        writeln!(f, "组数量: {}", self.group_count)?;
        writeln!(f, "记录数量: {}", self.record_count)?;
        writeln!(f, "压缩记录: {}", self.compressed_count)?;
        writeln!(f, "已删除记录: {}", self.deleted_count)?;
        writeln!(f, "原始字节记录/组: {}/{}", self.opaque_record_count, self.opaque_group_count)?;
        if self.issue_count > 0 {
            writeln!(f, "恢复跳过的问题: {}", self.issue_count)?;
        }
        writeln!(f, "--- 记录类型 ---")?;
        for (signature, count) in &self.signatures {
            writeln!(f, "{}: {}", signature, count)?;
        }
        Ok(())
    }
}

impl Plugin {
    /// 获取统计信息
    pub fn get_stats(&self) -> PluginStats {
        let mut stats = PluginStats {
            is_master: self.is_master(),
            is_localized: self.is_localized(),
            is_light: self.is_light(),
            master_count: self.masters().len(),
            issue_count: self.issues.len(),
            ..Default::default()
        };

        for (_, node) in self.walk() {
            match node {
                Node::Group(group) => {
                    stats.group_count += 1;
                    if group.is_opaque() {
                        stats.opaque_group_count += 1;
                    }
                }
                Node::Record(record) => {
                    stats.record_count += 1;
                    stats.compressed_count += record.is_compressed() as usize;
                    stats.deleted_count += record.is_deleted() as usize;
                    stats.opaque_record_count += record.is_opaque() as usize;
                    *stats.signatures.entry(record.signature().to_string()).or_insert(0) += 1;
                }
            }
        }

        stats
    }
}
