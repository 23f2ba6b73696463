use anyhow::{bail, Context, Result};
use clap::Parser;
use esp_codec::debug::{first_difference, hex_context};
use esp_codec::group::Node;
use esp_codec::utils::create_backup;
use esp_codec::{EspDebugger, ParseOptions, Plugin, Signature, SUPPORTED_EXTENSIONS};
use rayon::prelude::*;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "esp_codec")]
#[command(about = "无损解析和重写 ESP/ESM/ESL 插件文件")]
#[command(version = "0.1.0")]
struct Cli {
    /// 输入ESP/ESM/ESL文件路径（可重复）
    #[arg(short, long, required = true)]
    input: Vec<PathBuf>,

    /// 输出文件路径（仅单个输入时有效）
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// 测试模式：解析后重新序列化并逐字节比较
    #[arg(long)]
    test_rebuild: bool,

    /// 显示插件统计信息
    #[arg(long)]
    stats: bool,

    /// 输出结构dump
    #[arg(long)]
    dump: bool,

    /// dump 使用 JSON 格式
    #[arg(long, requires = "dump")]
    json: bool,

    /// 对比两个ESP文件的结构差异
    #[arg(long)]
    compare_files: Option<PathBuf>,

    /// 修改作者（CNAM）
    #[arg(long)]
    set_author: Option<String>,

    /// 修改描述（SNAM）
    #[arg(long)]
    set_description: Option<String>,

    /// 恢复模式：跳过损坏的记录和组
    #[arg(long)]
    recover: bool,

    /// 解析选项 JSON 配置文件
    #[arg(long)]
    config: Option<PathBuf>,

    /// 静默模式(仅输出错误)
    #[arg(long)]
    quiet: bool,

    /// 输出调试日志
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logger(&cli);

    for input in &cli.input {
        validate_input(input)?;
    }
    if cli.output.is_some() && cli.input.len() > 1 {
        bail!("--output 只能和单个 --input 一起使用");
    }

    let options = load_options(&cli)?;

    if cli.test_rebuild {
        return handle_test_rebuild(&cli, &options);
    }

    if let Some(compare_file) = &cli.compare_files {
        return handle_file_comparison(&cli, compare_file, &options);
    }

    if cli.set_author.is_some() || cli.set_description.is_some() {
        return handle_header_edit(&cli, &options);
    }

    for input in &cli.input {
        let plugin = load_plugin(input, &options)?;
        report_issues(&cli, input, &plugin);

        if cli.dump {
            handle_dump(&cli, &plugin)?;
        }
        // 未指定其他操作时默认输出统计信息
        if cli.stats || !cli.dump {
            if cli.input.len() > 1 && !cli.quiet {
                println!("=== {:?} ===", input);
            }
            println!("{}", plugin.get_stats());
        }
    }

    Ok(())
}

fn init_logger(cli: &Cli) {
    let level = if cli.quiet {
        log::LevelFilter::Error
    } else if cli.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

/// 验证输入文件
fn validate_input(input: &Path) -> Result<()> {
    if !input.exists() {
        bail!("输入文件不存在: {:?}", input);
    }

    let extension = input
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase());

    if !SUPPORTED_EXTENSIONS.iter().any(|&ext| Some(ext) == extension.as_deref()) {
        bail!("输入文件必须是ESP、ESM或ESL文件: {:?}", input);
    }

    Ok(())
}

/// 配置文件优先，命令行 --recover 覆盖
fn load_options(cli: &Cli) -> Result<ParseOptions> {
    let mut options = match &cli.config {
        Some(path) => ParseOptions::from_json_file(path)
            .with_context(|| format!("读取配置文件失败: {:?}", path))?,
        None => ParseOptions::default(),
    };
    if cli.recover {
        options.recover = true;
    }
    Ok(options)
}

fn load_plugin(path: &Path, options: &ParseOptions) -> Result<Plugin> {
    Plugin::load_with_options(path, options).with_context(|| format!("解析插件失败: {:?}", path))
}

fn report_issues(cli: &Cli, path: &Path, plugin: &Plugin) {
    if cli.quiet || !plugin.has_issues() {
        return;
    }
    println!("{:?}: 恢复模式跳过了 {} 个问题", path, plugin.issues.len());
    for issue in &plugin.issues {
        println!("  0x{:08X} {} {:?}: {}", issue.offset, issue.signature, issue.kind, issue.message);
    }
}

/// 输出结构dump（文件或标准输出）
fn handle_dump(cli: &Cli, plugin: &Plugin) -> Result<()> {
    let content = if cli.json {
        plugin.to_json()?
    } else {
        EspDebugger::dump(plugin)
    };

    match &cli.output {
        Some(path) => {
            std::fs::write(path, content).with_context(|| format!("写入文件失败: {:?}", path))?;
            if !cli.quiet {
                println!("结果已写入: {:?}", path);
            }
        }
        None => println!("{}", content),
    }
    Ok(())
}

/// 修改头部作者/描述并写回
fn handle_header_edit(cli: &Cli, options: &ParseOptions) -> Result<()> {
    for input in &cli.input {
        let mut plugin = load_plugin(input, options)?;
        if let Some(author) = &cli.set_author {
            plugin.set_author(author)?;
        }
        if let Some(description) = &cli.set_description {
            plugin.set_description(description)?;
        }

        let output_path = match &cli.output {
            Some(path) => path.clone(),
            None => {
                let backup = create_backup(input)?;
                if !cli.quiet {
                    println!("已创建备份: {:?}", backup);
                }
                input.clone()
            }
        };

        plugin.write_to_file(&output_path)?;
        if !cli.quiet {
            println!("头部已更新，输出到: {:?}", output_path);
        }
    }
    Ok(())
}

/// 单个文件的重建结果
struct RebuildResult {
    path: PathBuf,
    original_size: usize,
    rebuilt_size: usize,
    difference: Option<usize>,
    context: Option<(String, String)>,
}

fn rebuild_file(path: &Path, options: &ParseOptions) -> Result<RebuildResult> {
    let original = std::fs::read(path).with_context(|| format!("读取文件失败: {:?}", path))?;
    let plugin = Plugin::parse_with_options(&original, options)
        .with_context(|| format!("解析插件失败: {:?}", path))?;
    let rebuilt = plugin.unparse()?;

    let difference = first_difference(&original, &rebuilt);
    let context = difference.map(|at| (hex_context(&original, at, 16), hex_context(&rebuilt, at, 16)));

    Ok(RebuildResult {
        path: path.to_path_buf(),
        original_size: original.len(),
        rebuilt_size: rebuilt.len(),
        difference,
        context,
    })
}

/// 处理测试重建模式（多个输入并行）
fn handle_test_rebuild(cli: &Cli, options: &ParseOptions) -> Result<()> {
    let results: Vec<Result<RebuildResult>> = cli
        .input
        .par_iter()
        .map(|path| rebuild_file(path, options))
        .collect();

    let mut failures = 0;
    for result in results {
        let result = result?;
        match (result.difference, &result.context) {
            (None, _) => {
                if !cli.quiet {
                    println!("✓ {:?}: {} 字节，重建一致", result.path, result.original_size);
                }
            }
            (Some(at), context) => {
                failures += 1;
                println!(
                    "⚠ {:?}: 第一个差异位于 0x{:X}（原文件 {} 字节，重建 {} 字节）",
                    result.path, at, result.original_size, result.rebuilt_size
                );
                if let Some((original, rebuilt)) = context {
                    println!("  原文件: {}", original);
                    println!("  重建:   {}", rebuilt);
                }
            }
        }
    }

    if let Some(output) = &cli.output {
        let input = &cli.input[0];
        let plugin = load_plugin(input, options)?;
        plugin.write_to_file(output)?;
        if !cli.quiet {
            println!("重建文件输出到: {:?}", output);
        }
    }

    if failures > 0 {
        bail!("{} 个文件重建后不一致", failures);
    }
    Ok(())
}

/// 处理文件对比
fn handle_file_comparison(cli: &Cli, compare_file: &Path, options: &ParseOptions) -> Result<()> {
    validate_input(compare_file)?;
    let input = &cli.input[0];

    if !cli.quiet {
        println!("正在对比文件结构:");
        println!("  文件1: {:?}", input);
        println!("  文件2: {:?}", compare_file);
    }

    let plugin1 = load_plugin(input, options)?;
    let plugin2 = load_plugin(compare_file, options)?;

    println!("\n=== 基本信息对比 ===");
    println!("顶层节点数量: {} vs {}", plugin1.nodes.len(), plugin2.nodes.len());
    println!("记录和组数量: {} vs {}", plugin1.count_nodes(), plugin2.count_nodes());

    if plugin1.nodes.len() != plugin2.nodes.len() {
        println!("⚠️ 顶层节点数量不匹配！");
        return Ok(());
    }

    println!("\n=== 顶层节点大小对比 ===");
    for (i, (node1, node2)) in plugin1.nodes.iter().zip(plugin2.nodes.iter()).enumerate() {
        let size1 = node_size(node1);
        let size2 = node_size(node2);
        if node_label(node1) != node_label(node2) {
            println!("⚠️ 节点 {}: 类型不匹配 ({} vs {})", i, node_label(node1), node_label(node2));
        } else if size1 != size2 {
            println!(
                "⚠️ 节点 {} ('{}'): {} vs {} (差异: {})",
                i, node_label(node1), size1, size2, size2 as i64 - size1 as i64
            );
        } else {
            println!("✓ 节点 {} ('{}'): {} 字节 - 匹配", i, node_label(node1), size1);
        }
    }

    Ok(())
}

/// 记录签名或组标签
fn node_label(node: &Node) -> Signature {
    match node {
        Node::Record(record) => record.signature(),
        Node::Group(group) => group.get_label_signature(),
    }
}

/// 节点的声明大小（组含头部，记录不含）
fn node_size(node: &Node) -> u32 {
    match node {
        Node::Record(record) => record.declared_size(),
        Node::Group(group) => group.declared_size(),
    }
}
