use super::Plugin;
use crate::datatypes::{ByteWriter, Signature};
use crate::group::Node;
use crate::io::{DefaultEspWriter, EspWriter};
use crate::utils::{EspError, Result};
use std::path::Path;
use std::slice::Iter;

impl Plugin {
    /// 序列化整个文档
    ///
    /// 记录大小按实际写出的负载计算，组大小在子节点写完后回填。
    pub fn unparse(&self) -> Result<Vec<u8>> {
        let mut writer = ByteWriter::new();
        self.header.write(&mut writer)?;
        write_nodes(&self.nodes, &mut writer)?;
        Ok(writer.into_inner())
    }

    /// 写入文件
    pub fn write_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        self.write_with_writer(path.as_ref(), &DefaultEspWriter)
    }

    /// 使用自定义 Writer 写入
    pub fn write_with_writer(&self, path: &Path, writer: &dyn EspWriter) -> Result<()> {
        let output = self.unparse()?;
        log::info!("写入插件: {:?} ({} bytes)", path, output.len());
        writer.write(&output, path)
    }
}

/// 写出栈帧
enum Frame<'a> {
    /// 正在写出的兄弟节点
    Nodes(Iter<'a, Node>),
    /// 子节点写完后回填组大小
    Close { size_pos: usize, start: usize, label: [u8; 4] },
}

/// 深度优先写出节点，不使用递归
pub(crate) fn write_nodes(nodes: &[Node], writer: &mut ByteWriter) -> Result<()> {
    let mut stack = vec![Frame::Nodes(nodes.iter())];

    while let Some(frame) = stack.last_mut() {
        let node = match frame {
            Frame::Nodes(iter) => iter.next(),
            Frame::Close { size_pos, start, label } => {
                let (size_pos, start, label) = (*size_pos, *start, *label);
                stack.pop();
                patch_group_size(writer, size_pos, start, label)?;
                continue;
            }
        };

        match node {
            None => {
                stack.pop();
            }
            Some(Node::Record(record)) => record.write(writer)?,
            Some(Node::Group(group)) => {
                let start = writer.position();
                let size_pos = group.header().write(writer)?;

                match &group.raw_content {
                    Some(raw) => {
                        writer.write_bytes(raw)?;
                        patch_group_size(writer, size_pos, start, group.label)?;
                    }
                    None => {
                        stack.push(Frame::Close { size_pos, start, label: group.label });
                        stack.push(Frame::Nodes(group.children.iter()));
                    }
                }
            }
        }
    }

    Ok(())
}

fn patch_group_size(writer: &mut ByteWriter, size_pos: usize, start: usize, label: [u8; 4]) -> Result<()> {
    let size = writer.position() - start;
    let size = u32::try_from(size).map_err(|_| {
        EspError::invalid_field(Signature(label), format!("组大小超过 u32 上限: {} bytes", size))
    })?;
    writer.patch_u32(size_pos, size);
    Ok(())
}
