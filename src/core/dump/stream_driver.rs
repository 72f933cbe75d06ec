//! 标准输入转储驱动

use std::io::{BufRead, Write};

use tracing::debug;

use crate::app::error::types::HexdError;
use crate::core::dump::{encoder, DumpDriver};
use crate::core::params::resolver::{self, RawFlags, SetFlags};
use crate::core::patch::decoder;

/// 未知总长输入的增量缓冲转储驱动。
///
/// 逐行读取并累积；长度未显式固定时每行用累积大小重建一次参数
/// 快照，固定长度只在首行解析。缓冲每凑满一行列宽就立即输出，
/// 已覆盖目标长度时单次编码收尾。
pub struct StreamDriver<R> {
    reader: R,
    flags: RawFlags,
    set_flags: SetFlags,
}

impl<R: BufRead> StreamDriver<R> {
    /// 创建新的流驱动
    pub fn new(reader: R, flags: RawFlags, set_flags: SetFlags) -> Self {
        Self {
            reader,
            flags,
            set_flags,
        }
    }

    /// 读取一行并剥掉行分隔符；行分隔符不属于数据负载。
    /// 返回是否读到了数据。
    fn next_line(&mut self, line: &mut Vec<u8>) -> Result<bool, HexdError> {
        line.clear();
        if self.reader.read_until(b'\n', line)? == 0 {
            return Ok(false);
        }
        if line.last() == Some(&b'\n') {
            line.pop();
        }
        if line.last() == Some(&b'\r') {
            line.pop();
        }
        Ok(true)
    }
}

impl<R: BufRead> DumpDriver for StreamDriver<R> {
    fn run(&mut self, out: &mut dyn Write) -> Result<(), HexdError> {
        // 还原模式：把读端交给补丁解码器
        if self.flags.revert {
            return decoder::revert(&mut self.reader, out)
                .map_err(|_| HexdError::Decode { from_file: false });
        }

        // 不可 seek 源上的负向 seek 请求直接致命
        if self.set_flags.seek
            && (self.flags.seek.starts_with("+-") || self.flags.seek.starts_with('-'))
        {
            return Err(HexdError::CannotSeek);
        }

        let mut input: Vec<u8> = Vec::new();
        let mut line: Vec<u8> = Vec::new();

        if !self.next_line(&mut line)? {
            return Ok(());
        }
        input.extend_from_slice(&line);

        let mut params =
            resolver::resolve(false, &self.flags, input.len() as u64, &self.set_flags)?;
        if params.seek < 0 {
            return Err(HexdError::CannotSeek);
        }
        let mut remaining = params.length;
        let mut emission_offset = 0;
        debug!(?params, "streaming dump");

        loop {
            let start = params.seek as usize;
            let available = input.len() as i64 - params.seek;
            let columns = params.columns as i64;

            // 缓冲不足一行且未达到目标长度：继续累积
            let below_target = (available <= remaining as i64 && !self.set_flags.length)
                || available < remaining as i64;
            if !(available < columns && below_target) {
                let full_line = available >= columns;
                let covered = available > remaining as i64
                    || (available == remaining as i64 && self.set_flags.length);

                if (full_line && covered) || !full_line {
                    // 缓冲已覆盖全部请求长度：单次编码并结束
                    let end = start + remaining as usize;
                    let text = encoder::encode_dump(
                        &input[start..end],
                        emission_offset,
                        params.columns,
                        &params,
                    );
                    out.write_all(text.as_bytes())?;
                    return Ok(());
                }

                // 逐整行输出，窗口随消费滑动
                while remaining >= params.columns as u64
                    && input.len() >= start + params.columns
                {
                    let text = encoder::encode_dump(
                        &input[start..start + params.columns],
                        emission_offset,
                        params.columns,
                        &params,
                    );
                    out.write_all(text.as_bytes())?;
                    input.drain(..params.columns);
                    remaining -= params.columns as u64;
                    emission_offset += 1;
                }
            }

            if !self.next_line(&mut line)? {
                break;
            }
            input.extend_from_slice(&line);

            if !self.set_flags.length {
                params = resolver::resolve(
                    false,
                    &self.flags,
                    input.len() as u64,
                    &self.set_flags,
                )?;
                if params.seek < 0 {
                    return Err(HexdError::CannotSeek);
                }
                remaining = params.length;
            }
        }

        // 输入耗尽：冲刷长度预算内的缓冲尾部短行
        let start = params.seek as usize;
        if input.len() > start && remaining > 0 {
            let end = (start + remaining as usize).min(input.len());
            let text =
                encoder::encode_dump(&input[start..end], emission_offset, params.columns, &params);
            out.write_all(text.as_bytes())?;
        }

        Ok(())
    }
}
