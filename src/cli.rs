//! # 命令行接口模块
//!
//! 使用 `clap` 定义了程序的命令行结构，包括子命令和参数。
//! 所有用户通过命令行与程序交互的入口点都在此模块中定义。

use clap::{ArgAction, Parser};
use std::path::PathBuf;

/// 基于 LSB (最低有效位) 隐写术的命令行工具，可将任意文件隐藏到无损格式图像 (如 PNG, BMP) 中，或从中恢复。
#[derive(Parser, Debug)]
#[command(
    version,
    about,
    long_about = "基于 LSB (最低有效位) 隐写术的命令行工具，可将任意文件隐藏到无损格式图像 (如 PNG, BMP) 中，或从中恢复。\n输出图像总是以 PNG 保存，任何有损重新压缩都会破坏隐藏的数据。"
)]
pub struct Cli {
    /// 提高日志详细程度 (-v 为 info，-vv 为 debug)。`RUST_LOG` 优先。
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令：capacity (容量)、insert (隐藏) 和 extract (恢复)。
#[derive(Parser, Debug)]
pub enum Commands {
    /// 查询图像可隐藏的最大字节数。
    Capacity(CapacityArgs),

    /// 将文件内容隐藏到图像中，结果保存为 PNG。
    Insert(InsertArgs),

    /// 从经过隐写的图像中恢复隐藏的文件。
    Extract(ExtractArgs),
}

/// 'capacity' 命令所需的参数。
#[derive(Parser, Debug)]
pub struct CapacityArgs {
    /// 要检查的图像文件路径。
    #[arg(short, long)]
    pub image: PathBuf,

    /// 以易读形式 (如 "1.2 MB") 输出容量，而不是字节数。
    #[arg(short, long)]
    pub formatted: bool,
}

/// 'insert' 命令所需的参数。
#[derive(Parser, Debug)]
pub struct InsertArgs {
    /// 作为载体的图像文件路径。
    #[arg(short, long)]
    pub image: PathBuf,

    /// 要隐藏的文件路径，内容可以是任意字节。
    #[arg(short, long)]
    pub payload: PathBuf,

    /// 结果图像的输出路径。缺省时为输入图像旁的 `doctored_<名称>.png`。
    #[arg(short, long)]
    pub dest: Option<PathBuf>,

    /// 输出文件已存在时强制覆盖。
    #[arg(long)]
    pub force: bool,
}

/// 'extract' 命令所需的参数。
#[derive(Parser, Debug)]
pub struct ExtractArgs {
    /// 已隐藏数据的图像文件路径。
    #[arg(short, long)]
    pub image: PathBuf,

    /// 恢复内容的输出路径。缺省时为输入图像旁的 `recovered_<名称>.bin`。
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// 输出文件已存在时强制覆盖。
    #[arg(long)]
    pub force: bool,
}
