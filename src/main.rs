use clap::Parser;
use env_logger::Builder;
use log::LevelFilter;
use std::io::Write;

use lsb_vessel::{
    cli::{Cli, Commands},
    handler::{handle_capacity, handle_extract, handle_insert},
};

/// 初始化日志：`[HH:MM:SS] [LEVEL] message`，级别由 `-v` 次数决定，`RUST_LOG` 可覆盖。
fn init_logger(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };

    Builder::new()
        .format(|buf, record| {
            writeln!(
                buf,
                "[{}] [{}] {}",
                chrono::Local::now().format("%H:%M:%S"),
                record.level(),
                record.args()
            )
        })
        .filter_level(level)
        .parse_default_env()
        .init();
}

/// 程序的主入口点
///
/// 负责解析命令行参数，并根据指定的子命令
/// 将执行分派到相应的处理函数
fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    match cli.command {
        Commands::Capacity(args) => handle_capacity(args),
        Commands::Insert(args) => handle_insert(args),
        Commands::Extract(args) => handle_extract(args),
    }
}
