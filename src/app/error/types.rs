//! 错误类型定义

use thiserror::Error;

/// 转储工具错误类型
#[derive(Error, Debug)]
pub enum HexdError {
    #[error("invalid length value")]
    InvalidLength,

    #[error("number of octets per group must be a power of 2 with -e.")]
    GroupNotPowerOfTwo,

    #[error("invalid number of columns")]
    InvalidColumns,

    #[error("Sorry, cannot seek.")]
    CannotSeek,

    #[error("{0}: No such file or directory")]
    FileNotFound(String),

    #[error("cannot seek to offset {0}")]
    SeekFailed(i64),

    #[error("error while decoding")]
    Decode { from_file: bool },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl HexdError {
    /// 错误对应的进程退出码
    pub fn exit_code(&self) -> i32 {
        match self {
            HexdError::InvalidLength
            | HexdError::GroupNotPowerOfTwo
            | HexdError::InvalidColumns => 1,
            HexdError::Decode { from_file } => {
                if *from_file {
                    2
                } else {
                    1
                }
            }
            HexdError::FileNotFound(_)
            | HexdError::SeekFailed(_)
            | HexdError::Io(_) => 2,
            HexdError::CannotSeek => 4,
        }
    }
}

/// 应用程序通用结果类型
pub type Result<T> = anyhow::Result<T>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_match_error_classes() {
        assert_eq!(HexdError::InvalidLength.exit_code(), 1);
        assert_eq!(HexdError::GroupNotPowerOfTwo.exit_code(), 1);
        assert_eq!(HexdError::InvalidColumns.exit_code(), 1);
        assert_eq!(HexdError::CannotSeek.exit_code(), 4);
        assert_eq!(HexdError::FileNotFound("x".into()).exit_code(), 2);
        assert_eq!(HexdError::SeekFailed(-3).exit_code(), 2);
        assert_eq!(HexdError::Decode { from_file: true }.exit_code(), 2);
        assert_eq!(HexdError::Decode { from_file: false }.exit_code(), 1);
    }
}
