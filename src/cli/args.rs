//! 命令行参数定义

use clap::Parser;

/// 字节流十六进制转储与还原工具
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct CliArgs {
    /// 以小端序反转每个分组的字节
    #[arg(short = 'e', long = "little-endian")]
    pub little_endian: bool,

    /// 每组字节数（数值字面量）
    #[arg(short = 'g', long = "group-size", value_name = "BYTES")]
    pub group_size: Option<String>,

    /// 转换的总字节数（数值字面量）
    #[arg(short = 'l', long = "length", value_name = "LEN")]
    pub length: Option<String>,

    /// 每行字节数（数值字面量）
    #[arg(short = 'c', long = "cols", value_name = "COLS")]
    pub cols: Option<String>,

    /// 起始字节偏移（数值字面量，负值相对输入末尾）
    #[arg(short = 's', long = "seek", value_name = "OFFSET")]
    pub seek: Option<String>,

    /// 从十六进制转储还原出原始字节
    #[arg(short = 'r', long = "revert")]
    pub revert: bool,

    /// 输入文件路径（缺省或 "-" 读取标准输入）
    #[arg(value_name = "FILE")]
    pub file: Option<String>,
}
