//! 文件转储驱动

use std::fs::File;
use std::io::{BufReader, ErrorKind, Read, Seek, SeekFrom, Write};
use std::path::PathBuf;

use tracing::debug;

use crate::app::error::types::HexdError;
use crate::core::dump::{chunk_len, encoder, DumpDriver};
use crate::core::params::resolver::{self, RawFlags, SetFlags};
use crate::core::patch::decoder::{self, PatchError};

/// 已知大小文件的分块转储驱动。
///
/// 以对齐到列数的固定块长读取，参数只解析一次；
/// `emission_offset` 每读一块递增一次，与编码器的块步长配合
/// 保持偏移标签连续。
pub struct FileDriver {
    path: PathBuf,
    flags: RawFlags,
    set_flags: SetFlags,
}

impl FileDriver {
    /// 创建新的文件驱动
    pub fn new(path: PathBuf, flags: RawFlags, set_flags: SetFlags) -> Self {
        Self {
            path,
            flags,
            set_flags,
        }
    }
}

impl DumpDriver for FileDriver {
    fn run(&mut self, out: &mut dyn Write) -> Result<(), HexdError> {
        let mut file = File::open(&self.path)
            .map_err(|_| HexdError::FileNotFound(self.path.display().to_string()))?;

        // 还原模式：整个文件交给补丁解码器
        if self.flags.revert {
            let reader = BufReader::new(file);
            return decoder::revert(reader, out).map_err(|err| match err {
                PatchError::Io(err) => HexdError::Io(err),
                _ => HexdError::Decode { from_file: true },
            });
        }

        let size = file.metadata()?.len();
        let params = resolver::resolve(true, &self.flags, size, &self.set_flags)?;
        let chunk = chunk_len(params.columns);
        debug!(size, chunk, ?params, "dumping file");

        let start = u64::try_from(params.seek)
            .map_err(|_| HexdError::SeekFailed(params.seek))?;
        file.seek(SeekFrom::Start(start))
            .map_err(|_| HexdError::SeekFailed(params.seek))?;

        let mut buffer = vec![0u8; chunk];
        let mut remaining = params.length;
        let mut emission_offset = 0;

        loop {
            let filled = read_full(&mut file, &mut buffer)?;
            if filled == 0 {
                break;
            }

            // 收紧到剩余长度预算
            let take = if remaining < filled as u64 {
                remaining as usize
            } else {
                remaining -= filled as u64;
                filled
            };

            let text = encoder::encode_dump(&buffer[..take], emission_offset, chunk, &params);
            out.write_all(text.as_bytes())?;

            if take < chunk {
                break;
            }
            emission_offset += 1;
        }

        Ok(())
    }
}

/// 读满缓冲区或到达文件末尾
fn read_full(reader: &mut impl Read, buffer: &mut [u8]) -> std::io::Result<usize> {
    let mut filled = 0;
    while filled < buffer.len() {
        match reader.read(&mut buffer[filled..]) {
            Ok(0) => break,
            Ok(read) => filled += read,
            Err(err) if err.kind() == ErrorKind::Interrupted => continue,
            Err(err) => return Err(err),
        }
    }
    Ok(filled)
}
