use super::{ParseIssue, ParseOptions, Plugin};
use crate::datatypes::{ByteCursor, Signature};
use crate::group::{Group, GroupHeader, Node, GROUP_HEADER_SIZE};
use crate::io::{EspReader, MmapEspReader};
use crate::record::{RawRecord, Record, RecordHeader, RECORD_HEADER_SIZE};
use crate::utils::{EspError, Result};
use rayon::prelude::*;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};

impl Plugin {
    /// 使用默认选项解析
    pub fn parse(data: &[u8]) -> Result<Self> {
        Self::parse_with_options(data, &ParseOptions::default())
    }

    pub fn parse_with_options(data: &[u8], options: &ParseOptions) -> Result<Self> {
        let never = AtomicBool::new(false);
        Self::parse_cancellable(data, options, &never)
    }

    /// 可取消的解析
    ///
    /// 在每个顶层节点之间检查 `cancel`，置位后返回 `Cancelled`。
    pub fn parse_cancellable(data: &[u8], options: &ParseOptions, cancel: &AtomicBool) -> Result<Self> {
        if data.len() as u64 > options.max_input_size {
            return Err(EspError::InputTooLarge {
                size: data.len() as u64,
                limit: options.max_input_size,
            });
        }

        let mut cursor = ByteCursor::new(data);
        let header = Self::parse_header(&mut cursor, options)?;

        let mut parser = TreeParser {
            data,
            cursor,
            options,
            cancel,
            stack: Vec::new(),
            nodes: Vec::new(),
            issues: Vec::new(),
        };
        parser.run()?;

        log::debug!(
            "解析完成: {} bytes, {} 个顶层节点, {} 个问题",
            data.len(), parser.nodes.len(), parser.issues.len()
        );

        Ok(Plugin {
            header,
            nodes: parser.nodes,
            issues: parser.issues,
        })
    }

    /// 并行解析多个互不相关的文档
    pub fn parse_batch(inputs: &[&[u8]], options: &ParseOptions) -> Vec<Result<Self>> {
        inputs
            .par_iter()
            .map(|data| Self::parse_with_options(data, options))
            .collect()
    }

    /// 解析 TES4 头部记录
    fn parse_header(cursor: &mut ByteCursor<'_>, options: &ParseOptions) -> Result<Record> {
        if cursor.remaining() >= 4 {
            let signature = cursor.peek_signature()?;
            if signature != Signature::TES4 {
                return Err(EspError::InvalidFormat(signature));
            }
        }
        RawRecord::read(cursor)?.materialize(options.max_decompressed_size)
    }

    /// 加载插件文件（内存映射）
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        Self::load_with_options(path, &ParseOptions::default())
    }

    pub fn load_with_options(path: impl AsRef<Path>, options: &ParseOptions) -> Result<Self> {
        Self::load_with_reader(path.as_ref(), &MmapEspReader, options)
    }

    /// 使用自定义 Reader 加载插件文件
    ///
    /// 通过依赖注入支持自定义 IO 实现（内存、网络等），便于测试和扩展。
    pub fn load_with_reader(path: &Path, reader: &dyn EspReader, options: &ParseOptions) -> Result<Self> {
        let raw_data = reader.read(path)?;
        log::info!("加载插件: {:?} ({} bytes)", path, raw_data.len());
        Self::parse_with_options(raw_data.as_bytes(), options)
    }
}

/// 尚未读完的组
struct OpenGroup {
    group: Group,
    start: u64,
    end: u64,
}

/// 用显式栈代替递归的树解析器
struct TreeParser<'a, 'o> {
    data: &'a [u8],
    cursor: ByteCursor<'a>,
    options: &'o ParseOptions,
    cancel: &'o AtomicBool,
    stack: Vec<OpenGroup>,
    nodes: Vec<Node>,
    issues: Vec<ParseIssue>,
}

impl<'a, 'o> TreeParser<'a, 'o> {
    fn run(&mut self) -> Result<()> {
        loop {
            self.close_finished_groups();

            match self.stack.last() {
                None => {
                    if self.cursor.is_empty() {
                        return Ok(());
                    }
                    if self.cancel.load(Ordering::Relaxed) {
                        return Err(EspError::Cancelled {
                            offset: self.cursor.position(),
                        });
                    }
                }
                // 组声明的结束位置超出了输入
                Some(open) if self.cursor.is_empty() => {
                    return Err(EspError::TruncatedInput {
                        offset: self.cursor.position(),
                        needed: (open.end - self.cursor.position()) as usize,
                        available: 0,
                        signature: Some(open.group.get_label_signature()),
                    });
                }
                Some(_) => {}
            }

            let start = self.cursor.position();
            if self.cursor.peek_signature()? == Signature::GRUP {
                self.open_group(start)?;
            } else {
                self.read_record(start)?;
            }
        }
    }

    fn close_finished_groups(&mut self) {
        while let Some(open) = self.stack.last() {
            if self.cursor.position() < open.end {
                break;
            }
            if let Some(open) = self.stack.pop() {
                log::trace!("组 '{}' 结束于 0x{:X}", open.group.get_label_signature(), open.end);
                self.attach(Node::from(open.group));
            }
        }
    }

    fn attach(&mut self, node: Node) {
        match self.stack.last_mut() {
            Some(parent) => parent.group.children.push(node),
            None => self.nodes.push(node),
        }
    }

    fn open_group(&mut self, start: u64) -> Result<()> {
        let header = GroupHeader::read(&mut self.cursor)?;
        let label = Signature(header.label);

        // 组大小包含头部，小于头部无法按声明大小跳过
        if (header.size as usize) < GROUP_HEADER_SIZE {
            return Err(EspError::MalformedGroup {
                offset: start,
                label,
                declared: header.size as u64,
                consumed: GROUP_HEADER_SIZE as u64,
            });
        }

        let end = start + header.size as u64;
        if self.crosses_parent(end)? {
            return Ok(());
        }

        log::trace!(
            "组 '{}' type={:?} at 0x{:X}: size={}",
            label, header.group_type, start, header.size
        );

        self.stack.push(OpenGroup {
            group: Group::from_header(header, start),
            start,
            end,
        });
        Ok(())
    }

    fn read_record(&mut self, start: u64) -> Result<()> {
        // 先只看头部，越过父组边界属于父组的错误
        let signature = self.cursor.peek_signature()?;
        let header = RecordHeader::read(&mut self.cursor.clone()).map_err(|e| e.with_signature(signature))?;
        let end = start + (RECORD_HEADER_SIZE as u64) + header.data_size as u64;
        if self.crosses_parent(end)? {
            return Ok(());
        }

        let raw = RawRecord::read(&mut self.cursor)?;
        match raw.materialize(self.options.max_decompressed_size) {
            Ok(record) => self.attach(Node::Record(record)),
            Err(e) if self.options.recover && e.is_recoverable() => {
                log::warn!("跳过损坏的记录 {} (0x{:X}): {}", raw.header.signature, start, e);
                self.issues.push(ParseIssue::from_error(start, raw.header.signature, &e));
                self.attach(Node::Record(raw.into_opaque()));
            }
            Err(e) => return Err(e),
        }
        Ok(())
    }

    /// 子节点结束位置越过了最内层父组的声明结束位置
    ///
    /// 恢复模式下把父组转为原始字节并返回 true，否则返回错误。
    fn crosses_parent(&mut self, child_end: u64) -> Result<bool> {
        let parent = match self.stack.last() {
            Some(parent) if child_end > parent.end => parent,
            _ => return Ok(false),
        };

        let error = EspError::MalformedGroup {
            offset: parent.start,
            label: parent.group.get_label_signature(),
            declared: parent.end - parent.start,
            consumed: child_end - parent.start,
        };

        if !self.options.recover || parent.end > self.data.len() as u64 {
            return Err(error);
        }

        let Some(mut open) = self.stack.pop() else {
            return Err(error);
        };
        let content_start = (open.start as usize) + GROUP_HEADER_SIZE;
        let content = self.data[content_start..open.end as usize].to_vec();

        log::warn!(
            "跳过损坏的组 '{}' (0x{:X}): {}",
            open.group.get_label_signature(), open.start, error
        );
        self.issues.push(ParseIssue::from_error(open.start, open.group.get_label_signature(), &error));

        open.group.children.clear();
        open.group.raw_content = Some(content);
        self.cursor.seek_to(open.end)?;
        self.attach(Node::from(open.group));
        Ok(true)
    }
}
