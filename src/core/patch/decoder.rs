//! 转储文本还原解码

use std::io::{BufRead, Write};

use thiserror::Error;

/// 触发批量解码的累积十六进制位数阈值
const FLUSH_THRESHOLD: usize = 4096;

/// 还原过程中的错误
#[derive(Debug, Error)]
pub enum PatchError {
    /// 行中缺少偏移标签分隔符
    #[error("malformed dump line")]
    Malformed,

    #[error("error while decoding")]
    BadHex(#[from] hex::FromHexError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// 将转储格式文本还原为原始字节。
///
/// 每行丢弃首个 ':' 之前的偏移标签，以首个双空格切掉 ASCII 列，
/// 去除所有空白后把十六进制位累积起来；累积超过阈值即批量解码
/// 写出，输入耗尽后冲刷剩余部分。解码失败即中止，已写出的字节
/// 保持不变。
pub fn revert<R, W>(reader: R, writer: &mut W) -> Result<(), PatchError>
where
    R: BufRead,
    W: Write + ?Sized,
{
    let mut pending = String::new();

    for line in reader.lines() {
        let line = line?;
        pending.push_str(&hex_payload(&line)?);

        if pending.len() > FLUSH_THRESHOLD {
            flush_pending(&mut pending, writer)?;
        }
    }

    flush_pending(&mut pending, writer)
}

/// 提取一行中的十六进制负载
fn hex_payload(line: &str) -> Result<String, PatchError> {
    let (_, rest) = line.split_once(':').ok_or(PatchError::Malformed)?;
    let hex_text = match rest.split_once("  ") {
        Some((hex_text, _)) => hex_text,
        None => rest,
    };
    Ok(hex_text.split_whitespace().collect())
}

/// 解码累积的十六进制位并写出
fn flush_pending<W>(pending: &mut String, writer: &mut W) -> Result<(), PatchError>
where
    W: Write + ?Sized,
{
    if pending.is_empty() {
        return Ok(());
    }

    let decoded = hex::decode(pending.as_str())?;
    writer.write_all(&decoded)?;
    pending.clear();
    Ok(())
}
