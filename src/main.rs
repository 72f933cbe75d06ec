//! 字节流十六进制转储与还原工具主程序

mod app;
mod cli;
mod core;

use colored::*;

use app::error::types::HexdError;
use app::logging::setup::init_logging;

fn main() {
    // 初始化日志系统
    init_logging();

    // 运行命令行界面，按错误类别映射退出码
    if let Err(err) = cli::run_cli() {
        eprintln!("{} {}", "rhexd:".red().bold(), err);

        let code = err
            .downcast_ref::<HexdError>()
            .map_or(1, HexdError::exit_code);
        std::process::exit(code);
    }
}
