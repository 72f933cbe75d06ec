//! 命令行界面模块

pub mod args;

use std::io::{self, Write};
use std::path::Path;

use clap::Parser;
use colored::*;
use path_absolutize::Absolutize;

use crate::app::config::loader::{self, DumpDefaults};
use crate::app::error::types::Result;
use crate::core::dump::file_driver::FileDriver;
use crate::core::dump::stream_driver::StreamDriver;
use crate::core::dump::DumpDriver;
use crate::core::params::resolver::{RawFlags, SetFlags};

use self::args::CliArgs;

/// 运行命令行界面
pub fn run_cli() -> Result<()> {
    let args = CliArgs::parse();
    let defaults = loader::load_defaults();
    let (flags, set_flags) = merge_flags(&args, &defaults);

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match input_file(&args) {
        Some(file) => {
            let path = Path::new(file).absolutize()?.to_path_buf();

            // 检查文件是否存在
            if !path.exists() {
                eprintln!(
                    "{} {}: No such file or directory",
                    "rhexd:".red().bold(),
                    path.display()
                );
                std::process::exit(2);
            }

            FileDriver::new(path, flags, set_flags).run(&mut out)?;
        }
        None => {
            let stdin = io::stdin();
            StreamDriver::new(stdin.lock(), flags, set_flags).run(&mut out)?;
        }
    }

    out.flush()?;
    Ok(())
}

/// 位置参数：缺省或 "-" 表示标准输入
fn input_file(args: &CliArgs) -> Option<&str> {
    match args.file.as_deref() {
        None | Some("-") => None,
        Some(file) => Some(file),
    }
}

/// 合并命令行与配置文件，构建原始标志值与显式设置位
fn merge_flags(args: &CliArgs, defaults: &DumpDefaults) -> (RawFlags, SetFlags) {
    let group_size = args
        .group_size
        .clone()
        .or_else(|| defaults.group_size.map(|value| value.to_string()));
    let cols = args
        .cols
        .clone()
        .or_else(|| defaults.cols.map(|value| value.to_string()));

    let set_flags = SetFlags {
        group_size: group_size.is_some(),
        length: args.length.is_some(),
        columns: cols.is_some(),
        seek: args.seek.is_some(),
    };

    let flags = RawFlags {
        little_endian: args.little_endian || defaults.little_endian.unwrap_or(false),
        group_size: group_size.unwrap_or_else(|| "2".into()),
        length: args.length.clone().unwrap_or_else(|| "-1".into()),
        columns: cols.unwrap_or_else(|| "16".into()),
        seek: args.seek.clone().unwrap_or_else(|| "0".into()),
        revert: args.revert,
    };

    (flags, set_flags)
}
