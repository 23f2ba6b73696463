use super::{HeaderInfo, ParseIssue, Plugin};
use crate::datatypes::{FormId, Signature};
use crate::dispatch;
use crate::field::{FieldContext, FieldValue};
use crate::group::{Group, GroupLabel, GroupType, Node};
use crate::record::Record;
use crate::utils::Result;
use serde::Serialize;

/// 子记录摘要
#[derive(Debug, Clone, Serialize)]
pub struct FieldSummary {
    pub signature: Signature,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<&'static str>,
    pub value: FieldValue,
}

/// 节点摘要（平铺，按深度缩进）
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "node", rename_all = "lowercase")]
pub enum NodeSummary {
    Record {
        depth: usize,
        signature: Signature,
        form_id: FormId,
        flags: u32,
        #[serde(skip_serializing_if = "Option::is_none")]
        offset: Option<u64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        editor_id: Option<String>,
        compressed: bool,
        opaque: bool,
        fields: Vec<FieldSummary>,
    },
    Group {
        depth: usize,
        label: GroupLabel,
        group_type: GroupType,
        #[serde(skip_serializing_if = "Option::is_none")]
        offset: Option<u64>,
        opaque: bool,
        children: usize,
    },
}

/// 整个文档的摘要
#[derive(Debug, Clone, Serialize)]
pub struct PluginSummary {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header_info: Option<HeaderInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub masters: Vec<String>,
    pub header: NodeSummary,
    pub nodes: Vec<NodeSummary>,
    pub issues: Vec<ParseIssue>,
}

impl NodeSummary {
    pub fn of_record(record: &Record, depth: usize, ctx: FieldContext) -> Self {
        let fields = record
            .subrecords()
            .iter()
            .map(|sr| FieldSummary {
                signature: sr.signature,
                name: dispatch::field_name(record.signature(), sr.signature),
                value: record.decode_subrecord(sr, ctx),
            })
            .collect();

        NodeSummary::Record {
            depth,
            signature: record.signature(),
            form_id: record.form_id(),
            flags: record.flags().bits(),
            offset: record.offset(),
            editor_id: record.get_editor_id(),
            compressed: record.is_compressed(),
            opaque: record.is_opaque(),
            fields,
        }
    }

    pub fn of_group(group: &Group, depth: usize) -> Self {
        NodeSummary::Group {
            depth,
            label: group.label_value(),
            group_type: group.group_type,
            offset: group.offset(),
            opaque: group.is_opaque(),
            children: group.children.len(),
        }
    }

    pub fn of_node(node: &Node, depth: usize, ctx: FieldContext) -> Self {
        match node {
            Node::Record(record) => Self::of_record(record, depth, ctx),
            Node::Group(group) => Self::of_group(group, depth),
        }
    }
}

impl Plugin {
    /// 生成摘要（字段按需解码，不修改文档）
    pub fn summary(&self) -> PluginSummary {
        let ctx = self.field_context();
        PluginSummary {
            header_info: self.header_info(),
            author: self.author(),
            description: self.description(),
            masters: self.masters(),
            header: NodeSummary::of_record(&self.header, 0, ctx),
            nodes: self
                .walk()
                .map(|(depth, node)| NodeSummary::of_node(node, depth, ctx))
                .collect(),
            issues: self.issues.clone(),
        }
    }

    /// 摘要的 JSON 形式
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.summary())?)
    }
}
