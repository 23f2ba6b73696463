use crate::datatypes::{ByteCursor, ByteWriter, FormId, Signature};
use crate::record::Record;
use crate::utils::Result;
use serde::Serialize;
use std::fmt;

/// 组头部大小（组大小字段包含头部本身）
pub const GROUP_HEADER_SIZE: usize = 24;

/// 组类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GroupType {
    /// 顶层组，标签为记录类型
    TopLevel,
    /// 世界空间子组，标签为 WRLD FormID
    WorldChildren,
    /// 内部单元格块，标签为块编号
    InteriorCellBlock,
    InteriorCellSubBlock,
    /// 外部单元格块，标签为网格坐标 (Y, X)
    ExteriorCellBlock,
    ExteriorCellSubBlock,
    /// 单元格子组，标签为 CELL FormID
    CellChildren,
    /// 对话子组，标签为 DIAL FormID
    TopicChildren,
    CellPersistentChildren,
    CellTemporaryChildren,
    CellVisibleDistantChildren,
    /// 未知类型，原样保留
    Unknown(i32),
}

impl GroupType {
    /// 转换为i32值
    pub fn to_i32(self) -> i32 {
        match self {
            GroupType::TopLevel => 0,
            GroupType::WorldChildren => 1,
            GroupType::InteriorCellBlock => 2,
            GroupType::InteriorCellSubBlock => 3,
            GroupType::ExteriorCellBlock => 4,
            GroupType::ExteriorCellSubBlock => 5,
            GroupType::CellChildren => 6,
            GroupType::TopicChildren => 7,
            GroupType::CellPersistentChildren => 8,
            GroupType::CellTemporaryChildren => 9,
            GroupType::CellVisibleDistantChildren => 10,
            GroupType::Unknown(value) => value,
        }
    }
}

impl From<i32> for GroupType {
    fn from(value: i32) -> Self {
        match value {
            0 => GroupType::TopLevel,
            1 => GroupType::WorldChildren,
            2 => GroupType::InteriorCellBlock,
            3 => GroupType::InteriorCellSubBlock,
            4 => GroupType::ExteriorCellBlock,
            5 => GroupType::ExteriorCellSubBlock,
            6 => GroupType::CellChildren,
            7 => GroupType::TopicChildren,
            8 => GroupType::CellPersistentChildren,
            9 => GroupType::CellTemporaryChildren,
            10 => GroupType::CellVisibleDistantChildren,
            _ => GroupType::Unknown(value),
        }
    }
}

/// 按组类型解释的标签
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GroupLabel {
    Signature(Signature),
    FormId(FormId),
    Block(i32),
    Grid { x: i16, y: i16 },
    Raw([u8; 4]),
}

/// 24字节组头部
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupHeader {
    /// 组大小(包含头部24字节)
    pub size: u32,
    pub label: [u8; 4],
    pub group_type: GroupType,
    pub timestamp: u16,
    pub version_control: u16,
    pub unknown: u32,
}

impl GroupHeader {
    /// 读取组头部（包括 GRUP 签名）
    pub fn read(cursor: &mut ByteCursor<'_>) -> Result<Self> {
        cursor
            .ensure(GROUP_HEADER_SIZE)
            .map_err(|e| e.with_signature(Signature::GRUP))?;
        cursor.skip(4)?; // GRUP

        Ok(GroupHeader {
            size: cursor.read_u32()?,
            label: cursor.read_array::<4>()?,
            group_type: GroupType::from(cursor.read_i32()?),
            timestamp: cursor.read_u16()?,
            version_control: cursor.read_u16()?,
            unknown: cursor.read_u32()?,
        })
    }

    /// 写出头部，返回大小字段的位置以便回填
    pub fn write(&self, writer: &mut ByteWriter) -> Result<usize> {
        writer.write_signature(Signature::GRUP)?;
        let size_pos = writer.position();
        writer.write_u32(self.size)?;
        writer.write_bytes(&self.label)?;
        writer.write_i32(self.group_type.to_i32())?;
        writer.write_u16(self.timestamp)?;
        writer.write_u16(self.version_control)?;
        writer.write_u32(self.unknown)?;
        Ok(size_pos)
    }
}

/// 组结构
///
/// `Clone`、`Debug` 和 `Drop` 都不递归，任意深度的树都不会耗尽调用栈。
pub struct Group {
    pub label: [u8; 4],
    pub group_type: GroupType,
    pub timestamp: u16,
    pub version_control: u16,
    pub unknown: u32,
    /// 子节点
    pub children: Vec<Node>,
    /// 无法解析的组内容（恢复模式下），存在时原样写回并忽略 children
    pub raw_content: Option<Vec<u8>>,
    declared_size: u32,
    offset: Option<u64>,
}

/// 组或记录
#[derive(Debug, Clone)]
pub enum Node {
    Record(Record),
    Group(Box<Group>),
}

impl Node {
    /// 记录签名，组返回 GRUP
    pub fn signature(&self) -> Signature {
        match self {
            Node::Record(record) => record.signature(),
            Node::Group(_) => Signature::GRUP,
        }
    }

    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Node::Record(record) => Some(record),
            Node::Group(_) => None,
        }
    }

    pub fn as_group(&self) -> Option<&Group> {
        match self {
            Node::Group(group) => Some(group),
            Node::Record(_) => None,
        }
    }

    pub fn offset(&self) -> Option<u64> {
        match self {
            Node::Record(record) => record.offset(),
            Node::Group(group) => group.offset(),
        }
    }
}

impl From<Record> for Node {
    fn from(record: Record) -> Self {
        Node::Record(record)
    }
}

impl From<Group> for Node {
    fn from(group: Group) -> Self {
        Node::Group(Box::new(group))
    }
}

impl Group {
    /// 创建空组
    pub fn new(label: [u8; 4], group_type: GroupType) -> Self {
        Group {
            label,
            group_type,
            timestamp: 0,
            version_control: 0,
            unknown: 0,
            children: Vec::new(),
            raw_content: None,
            declared_size: GROUP_HEADER_SIZE as u32,
            offset: None,
        }
    }

    /// 顶层组
    pub fn top_level(signature: Signature) -> Self {
        Self::new(signature.0, GroupType::TopLevel)
    }

    /// 从已读取的头部创建（children 由解析器填充）
    pub(crate) fn from_header(header: GroupHeader, offset: u64) -> Self {
        Group {
            label: header.label,
            group_type: header.group_type,
            timestamp: header.timestamp,
            version_control: header.version_control,
            unknown: header.unknown,
            children: Vec::new(),
            raw_content: None,
            declared_size: header.size,
            offset: Some(offset),
        }
    }

    /// 写出用的头部（大小字段待回填）
    pub(crate) fn header(&self) -> GroupHeader {
        GroupHeader {
            size: 0,
            label: self.label,
            group_type: self.group_type,
            timestamp: self.timestamp,
            version_control: self.version_control,
            unknown: self.unknown,
        }
    }

    /// 解析时头部声明的组大小（含头部）
    pub fn declared_size(&self) -> u32 {
        self.declared_size
    }

    pub fn offset(&self) -> Option<u64> {
        self.offset
    }

    pub fn is_opaque(&self) -> bool {
        self.raw_content.is_some()
    }

    /// 获取标签签名
    pub fn get_label_signature(&self) -> Signature {
        Signature(self.label)
    }

    /// 按组类型解释标签
    pub fn label_value(&self) -> GroupLabel {
        let as_u32 = u32::from_le_bytes(self.label);
        match self.group_type {
            GroupType::TopLevel => GroupLabel::Signature(Signature(self.label)),
            GroupType::InteriorCellBlock | GroupType::InteriorCellSubBlock => {
                GroupLabel::Block(i32::from_le_bytes(self.label))
            }
            GroupType::ExteriorCellBlock | GroupType::ExteriorCellSubBlock => GroupLabel::Grid {
                y: i16::from_le_bytes([self.label[0], self.label[1]]),
                x: i16::from_le_bytes([self.label[2], self.label[3]]),
            },
            GroupType::WorldChildren
            | GroupType::CellChildren
            | GroupType::TopicChildren
            | GroupType::CellPersistentChildren
            | GroupType::CellTemporaryChildren
            | GroupType::CellVisibleDistantChildren => GroupLabel::FormId(FormId(as_u32)),
            GroupType::Unknown(_) => GroupLabel::Raw(self.label),
        }
    }

    /// 深度优先遍历所有后代节点
    pub fn walk(&self) -> Walk<'_> {
        Walk::new(&self.children)
    }

    /// 所有后代记录
    pub fn records(&self) -> Records<'_> {
        Records::new(&self.children)
    }

    pub fn records_mut(&mut self) -> RecordsMut<'_> {
        RecordsMut::new(&mut self.children)
    }
}

impl Group {
    /// 复制除子节点以外的字段
    fn shallow_clone(&self) -> Group {
        Group {
            label: self.label,
            group_type: self.group_type,
            timestamp: self.timestamp,
            version_control: self.version_control,
            unknown: self.unknown,
            children: Vec::with_capacity(self.children.len()),
            raw_content: self.raw_content.clone(),
            declared_size: self.declared_size,
            offset: self.offset,
        }
    }
}

impl Clone for Group {
    fn clone(&self) -> Self {
        // 每层一个帧：源子节点迭代器 + 正在填充的副本
        let mut stack: Vec<(std::slice::Iter<'_, Node>, Group)> =
            vec![(self.children.iter(), self.shallow_clone())];

        loop {
            let next = match stack.last_mut() {
                Some((children, _)) => children.next(),
                None => break,
            };
            match next {
                Some(Node::Record(record)) => {
                    if let Some((_, copy)) = stack.last_mut() {
                        copy.children.push(Node::Record(record.clone()));
                    }
                }
                Some(Node::Group(group)) => stack.push((group.children.iter(), group.shallow_clone())),
                None => {
                    let finished = match stack.pop() {
                        Some((_, finished)) => finished,
                        None => break,
                    };
                    match stack.last_mut() {
                        Some((_, parent)) => parent.children.push(finished.into()),
                        None => return finished,
                    }
                }
            }
        }
        self.shallow_clone()
    }
}

impl fmt::Debug for Group {
    // 只显示直接子节点数量
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Group")
            .field("label", &Signature(self.label))
            .field("group_type", &self.group_type)
            .field("timestamp", &self.timestamp)
            .field("version_control", &self.version_control)
            .field("unknown", &self.unknown)
            .field("children", &self.children.len())
            .field("raw_content", &self.raw_content.as_ref().map(Vec::len))
            .field("declared_size", &self.declared_size)
            .field("offset", &self.offset)
            .finish()
    }
}

impl Drop for Group {
    // 深层嵌套的树逐层拆开，避免递归析构
    fn drop(&mut self) {
        let mut pending: Vec<Node> = std::mem::take(&mut self.children);
        while let Some(node) = pending.pop() {
            if let Node::Group(mut group) = node {
                pending.append(&mut group.children);
            }
        }
    }
}

/// 深度优先遍历，产出 (深度, 节点)
pub struct Walk<'a> {
    stack: Vec<std::slice::Iter<'a, Node>>,
}

impl<'a> Walk<'a> {
    pub fn new(nodes: &'a [Node]) -> Self {
        Walk { stack: vec![nodes.iter()] }
    }
}

impl<'a> Iterator for Walk<'a> {
    type Item = (usize, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let depth = self.stack.len().checked_sub(1)?;
            let top = self.stack.last_mut()?;
            match top.next() {
                Some(node) => {
                    if let Node::Group(group) = node {
                        self.stack.push(group.children.iter());
                    }
                    return Some((depth, node));
                }
                None => {
                    self.stack.pop();
                }
            }
        }
    }
}

/// 深度优先遍历所有记录
pub struct Records<'a> {
    inner: Walk<'a>,
}

impl<'a> Records<'a> {
    pub fn new(nodes: &'a [Node]) -> Self {
        Records { inner: Walk::new(nodes) }
    }
}

impl<'a> Iterator for Records<'a> {
    type Item = &'a Record;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.by_ref().find_map(|(_, node)| node.as_record())
    }
}

/// 深度优先遍历所有记录（可变）
pub struct RecordsMut<'a> {
    stack: Vec<std::slice::IterMut<'a, Node>>,
}

impl<'a> RecordsMut<'a> {
    pub fn new(nodes: &'a mut [Node]) -> Self {
        RecordsMut { stack: vec![nodes.iter_mut()] }
    }
}

impl<'a> Iterator for RecordsMut<'a> {
    type Item = &'a mut Record;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let top = self.stack.last_mut()?;
            match top.next() {
                Some(Node::Record(record)) => return Some(record),
                Some(Node::Group(group)) => self.stack.push(group.children.iter_mut()),
                None => {
                    self.stack.pop();
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nested(depth: usize) -> Group {
        let mut root = Group::top_level(Signature::new(*b"CELL"));
        let mut leaf = Group::new([0; 4], GroupType::CellChildren);
        leaf.children.push(Record::new(Signature::new(*b"REFR"), FormId(1)).into());
        for _ in 1..depth {
            let mut parent = Group::new([0; 4], GroupType::CellTemporaryChildren);
            parent.children.push(leaf.into());
            leaf = parent;
        }
        root.children.push(leaf.into());
        root
    }

    #[test]
    fn test_group_type_round_trip() {
        for value in -1..12 {
            assert_eq!(GroupType::from(value).to_i32(), value);
        }
        assert_eq!(GroupType::from(42), GroupType::Unknown(42));
    }

    #[test]
    fn test_label_interpretation() {
        let mut group = Group::new(*b"WEAP", GroupType::TopLevel);
        assert_eq!(group.label_value(), GroupLabel::Signature(Signature::new(*b"WEAP")));

        group.group_type = GroupType::ExteriorCellBlock;
        group.label = [0xFF, 0xFF, 0x02, 0x00];
        assert_eq!(group.label_value(), GroupLabel::Grid { x: 2, y: -1 });

        group.group_type = GroupType::CellChildren;
        group.label = [0x3C, 0x00, 0x00, 0x01];
        assert_eq!(group.label_value(), GroupLabel::FormId(FormId(0x0100_003C)));

        group.group_type = GroupType::InteriorCellBlock;
        group.label = [3, 0, 0, 0];
        assert_eq!(group.label_value(), GroupLabel::Block(3));
    }

    #[test]
    fn test_header_round_trip() {
        let header = GroupHeader {
            size: 0x40,
            label: *b"NPC_",
            group_type: GroupType::TopLevel,
            timestamp: 0x1234,
            version_control: 7,
            unknown: 0xAABB,
        };
        let mut writer = ByteWriter::new();
        let size_pos = header.write(&mut writer).unwrap();
        assert_eq!(size_pos, 4);

        let bytes = writer.into_inner();
        assert_eq!(bytes.len(), GROUP_HEADER_SIZE);
        assert_eq!(GroupHeader::read(&mut ByteCursor::new(&bytes)).unwrap(), header);
    }

    #[test]
    fn test_walk_reports_depth() {
        let group = nested(3);
        let depths: Vec<(usize, Signature)> = group.walk().map(|(d, n)| (d, n.signature())).collect();
        assert_eq!(
            depths,
            vec![
                (0, Signature::GRUP),
                (1, Signature::GRUP),
                (2, Signature::GRUP),
                (3, Signature::new(*b"REFR")),
            ]
        );
    }

    #[test]
    fn test_records_mut_reaches_nested_records() {
        let mut group = nested(4);
        for record in group.records_mut() {
            record.header.form_id = FormId(0x42);
        }
        assert_eq!(group.records().map(|r| r.form_id()).collect::<Vec<_>>(), vec![FormId(0x42)]);
    }

    #[test]
    fn test_deep_tree_drops_without_recursion() {
        let group = nested(200_000);
        assert_eq!(group.records().count(), 1);
        drop(group);
    }

    #[test]
    fn test_deep_tree_clones_without_recursion() {
        let group = nested(200_000);
        let copy = group.clone();
        assert_eq!(copy.walk().count(), group.walk().count());
        assert_eq!(copy.records().map(|r| r.form_id()).collect::<Vec<_>>(), vec![FormId(1)]);

        let node = Node::from(copy);
        let text = format!("{:?}", node);
        assert!(text.contains("children: 1"), "{}", text);
        drop(node);
        drop(group);
    }

    #[test]
    fn test_clone_keeps_structure() {
        let mut group = nested(3);
        group.timestamp = 0x0102;
        group.raw_content = Some(vec![1, 2, 3]);
        let copy = group.clone();

        assert_eq!(copy.timestamp, 0x0102);
        assert_eq!(copy.raw_content, Some(vec![1, 2, 3]));
        let shape = |g: &Group| g.walk().map(|(d, n)| (d, n.signature())).collect::<Vec<_>>();
        assert_eq!(shape(&copy), shape(&group));
    }
}
