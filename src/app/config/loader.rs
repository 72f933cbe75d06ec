//! 默认显示参数加载

use std::fs;
use std::path::PathBuf;

use serde::Deserialize;

/// 配置文件中的显示默认值；
/// 配置值等同于显式给出的标志，命令行同名标志优先
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct DumpDefaults {
    /// 每行字节数
    pub cols: Option<i64>,
    /// 每组字节数
    pub group_size: Option<i64>,
    /// 小端序分组
    pub little_endian: Option<bool>,
}

/// 配置文件路径：<config_dir>/rhexd/config.toml
fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("rhexd").join("config.toml"))
}

/// 加载显示默认值；文件缺失或不可读时回退到内置默认
pub fn load_defaults() -> DumpDefaults {
    let Some(path) = config_path() else {
        return DumpDefaults::default();
    };

    match fs::read_to_string(&path) {
        Ok(text) => parse_defaults(&text, &path.display().to_string()),
        Err(_) => DumpDefaults::default(),
    }
}

fn parse_defaults(text: &str, origin: &str) -> DumpDefaults {
    match toml::from_str(text) {
        Ok(defaults) => defaults,
        Err(err) => {
            tracing::warn!("invalid config {}: {}", origin, err);
            DumpDefaults::default()
        }
    }
}
