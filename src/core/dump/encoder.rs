//! 转储行编码

use crate::core::params::resolver::ResolvedParams;

/// 将缓冲区编码为转储文本，每行 `columns` 字节。
///
/// 行基址 = `emission_offset * stride + columns * 行号 + seek`；
/// 流驱动的 `stride` 等于列数，文件驱动的 `stride` 等于读块长度，
/// 以保证偏移标签跨块连续。
pub fn encode_dump(
    buffer: &[u8],
    emission_offset: usize,
    stride: usize,
    params: &ResolvedParams,
) -> String {
    let mut output = String::new();

    for (row, row_bytes) in buffer.chunks(params.columns).enumerate() {
        let base = (emission_offset * stride + params.columns * row) as i64
            + params.seek;
        output.push_str(&format!("{:08x}: ", base as u64));

        // 分组十六进制；末组按行内剩余字节截断
        for group in row_bytes.chunks(params.group_size) {
            if params.little_endian {
                let reversed: Vec<u8> = group.iter().rev().copied().collect();
                output.push_str(&hex::encode(reversed));
            } else {
                output.push_str(&hex::encode(group));
            }
            output.push(' ');
        }

        // ASCII 列
        output.push(' ');
        for &byte in row_bytes {
            if (0x20..=0x7e).contains(&byte) {
                output.push(byte as char);
            } else {
                output.push('.');
            }
        }
        output.push('\n');
    }

    output
}
