//! 参数解析与校验

use crate::app::error::types::HexdError;
use crate::core::params::numeric;

/// 未经校验的原始标志值，由命令行与配置合并而来
#[derive(Debug, Clone)]
pub struct RawFlags {
    pub little_endian: bool,
    pub group_size: String,
    pub length: String,
    pub columns: String,
    pub seek: String,
    pub revert: bool,
}

/// 记录哪些标志被显式给出；
/// 多条默认化规则在"显式给了零/负值"与"从未提及"之间有区别
#[derive(Debug, Clone, Copy, Default)]
pub struct SetFlags {
    pub group_size: bool,
    pub length: bool,
    pub columns: bool,
    pub seek: bool,
}

/// 校验后的数值参数集，驱动编码与解码的全部算法
#[derive(Debug, Clone)]
pub struct ResolvedParams {
    /// 每行字节数
    pub columns: usize,
    /// 每组字节数
    pub group_size: usize,
    /// 转换的总字节数
    pub length: u64,
    /// 起始字节偏移；负值表示越界 seek，由文件驱动报错
    pub seek: i64,
    /// 输入源是否具有已知总大小
    pub is_file: bool,
    /// 分组是否按小端序反转
    pub little_endian: bool,
    /// 是否运行还原解码
    pub revert: bool,
}

/// 将原始标志解析为完整默认化的参数集。
///
/// `size` 为文件大小或标准输入当前已累积的字节数。
pub fn resolve(
    is_file: bool,
    flags: &RawFlags,
    size: u64,
    set_flags: &SetFlags,
) -> Result<ResolvedParams, HexdError> {
    let length = resolve_length(flags, size, set_flags, is_file)?;
    let group_size = resolve_group_size(flags, set_flags)?;
    let columns = resolve_columns(flags, set_flags)?;
    let seek = resolve_seek(flags, size, set_flags, is_file)?;

    Ok(ResolvedParams {
        columns,
        group_size,
        length,
        seek,
        is_file,
        little_endian: flags.little_endian,
        revert: flags.revert,
    })
}

/// 长度：默认为剩余输入大小。显式零值或解析失败致命；
/// 负值回退到剩余大小；文件模式下超出文件大小时收紧，
/// 流模式容忍尚未到达的更大目标
fn resolve_length(
    flags: &RawFlags,
    size: u64,
    set_flags: &SetFlags,
    is_file: bool,
) -> Result<u64, HexdError> {
    if !set_flags.length {
        return Ok(size);
    }

    let value = numeric::parse_literal(&flags.length)
        .map_err(|_| HexdError::InvalidLength)?;
    if value == 0 {
        return Err(HexdError::InvalidLength);
    }

    if value < 0 || (is_file && value as u64 > size) {
        Ok(size)
    } else {
        Ok(value as u64)
    }
}

/// 分组大小：默认 2，小端序下默认 4。显式零值或解析失败取 16；
/// 负值回退到端序相关默认；小端序下要求 2 的幂，否则分组无法反转
fn resolve_group_size(
    flags: &RawFlags,
    set_flags: &SetFlags,
) -> Result<usize, HexdError> {
    let endian_default = if flags.little_endian { 4 } else { 2 };
    if !set_flags.group_size {
        return Ok(endian_default);
    }

    match numeric::parse_literal(&flags.group_size) {
        Err(_) | Ok(0) => Ok(16),
        Ok(value) if value < 0 => Ok(endian_default),
        Ok(value) => {
            if flags.little_endian && value & (value - 1) != 0 {
                return Err(HexdError::GroupNotPowerOfTwo);
            }
            Ok(value as usize)
        }
    }
}

/// 列数：默认 16。非正值（含解析失败得 0）一律按用法错误拒绝
fn resolve_columns(
    flags: &RawFlags,
    set_flags: &SetFlags,
) -> Result<usize, HexdError> {
    let value = if set_flags.columns {
        numeric::parse_literal(&flags.columns)
            .map_err(|_| HexdError::InvalidColumns)?
    } else {
        16
    };

    if value <= 0 {
        return Err(HexdError::InvalidColumns);
    }
    Ok(value as usize)
}

/// 偏移：默认 0。"-0" 对文件表示 seek 到末尾、对流致命；
/// 负值相对输入末尾解析且不做收紧；不可解析的值保留默认
fn resolve_seek(
    flags: &RawFlags,
    size: u64,
    set_flags: &SetFlags,
    is_file: bool,
) -> Result<i64, HexdError> {
    if !set_flags.seek {
        return Ok(0);
    }

    if !is_file && (flags.seek == "-0" || flags.seek.starts_with("+-")) {
        return Err(HexdError::CannotSeek);
    }
    if is_file && flags.seek == "-0" {
        return Ok(size as i64);
    }

    match numeric::parse_literal(&flags.seek) {
        Ok(value) if value < 0 => Ok(size as i64 + value),
        Ok(value) => Ok(value),
        Err(_) => Ok(0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw() -> RawFlags {
        RawFlags {
            little_endian: false,
            group_size: "2".into(),
            length: "-1".into(),
            columns: "16".into(),
            seek: "0".into(),
            revert: false,
        }
    }

    #[test]
    fn defaults_without_flags() {
        let params = resolve(true, &raw(), 100, &SetFlags::default()).unwrap();
        assert_eq!(params.columns, 16);
        assert_eq!(params.group_size, 2);
        assert_eq!(params.length, 100);
        assert_eq!(params.seek, 0);
        assert!(params.is_file);
    }

    #[test]
    fn little_endian_changes_default_group() {
        let mut flags = raw();
        flags.little_endian = true;
        let params = resolve(true, &flags, 10, &SetFlags::default()).unwrap();
        assert_eq!(params.group_size, 4);
    }

    #[test]
    fn explicit_zero_length_is_fatal() {
        let mut flags = raw();
        flags.length = "0".into();
        let set_flags = SetFlags { length: true, ..Default::default() };
        let err = resolve(true, &flags, 10, &set_flags).unwrap_err();
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn unparseable_length_is_fatal() {
        let mut flags = raw();
        flags.length = "bogus".into();
        let set_flags = SetFlags { length: true, ..Default::default() };
        assert!(resolve(true, &flags, 10, &set_flags).is_err());
    }

    #[test]
    fn negative_length_resets_to_size() {
        let mut flags = raw();
        flags.length = "-5".into();
        let set_flags = SetFlags { length: true, ..Default::default() };
        let params = resolve(true, &flags, 42, &set_flags).unwrap();
        assert_eq!(params.length, 42);
    }

    #[test]
    fn length_clamps_to_file_size_only() {
        let mut flags = raw();
        flags.length = "200".into();
        let set_flags = SetFlags { length: true, ..Default::default() };

        let file = resolve(true, &flags, 100, &set_flags).unwrap();
        assert_eq!(file.length, 100);

        // 流模式容忍尚未累积到的目标长度
        let stream = resolve(false, &flags, 10, &set_flags).unwrap();
        assert_eq!(stream.length, 200);
    }

    #[test]
    fn length_accepts_hex_and_octal() {
        let mut flags = raw();
        let set_flags = SetFlags { length: true, ..Default::default() };

        flags.length = "0x20".into();
        assert_eq!(resolve(false, &flags, 0, &set_flags).unwrap().length, 32);

        flags.length = "010".into();
        assert_eq!(resolve(false, &flags, 0, &set_flags).unwrap().length, 8);
    }

    #[test]
    fn group_zero_or_garbage_defaults_to_16() {
        let mut flags = raw();
        let set_flags = SetFlags { group_size: true, ..Default::default() };

        flags.group_size = "0".into();
        assert_eq!(resolve(true, &flags, 10, &set_flags).unwrap().group_size, 16);

        flags.group_size = "xyz".into();
        assert_eq!(resolve(true, &flags, 10, &set_flags).unwrap().group_size, 16);
    }

    #[test]
    fn negative_group_uses_endian_default() {
        let mut flags = raw();
        flags.group_size = "-3".into();
        let set_flags = SetFlags { group_size: true, ..Default::default() };
        assert_eq!(resolve(true, &flags, 10, &set_flags).unwrap().group_size, 2);

        flags.little_endian = true;
        assert_eq!(resolve(true, &flags, 10, &set_flags).unwrap().group_size, 4);
    }

    #[test]
    fn endian_rejects_non_power_of_two_groups() {
        let mut flags = raw();
        flags.little_endian = true;
        let set_flags = SetFlags { group_size: true, ..Default::default() };

        for bad in [3, 5, 6, 7, 9, 12] {
            flags.group_size = bad.to_string();
            let err = resolve(true, &flags, 10, &set_flags).unwrap_err();
            assert_eq!(err.exit_code(), 1, "group size {bad}");
        }

        for good in [1, 2, 4, 8, 16] {
            flags.group_size = good.to_string();
            let params = resolve(true, &flags, 10, &set_flags).unwrap();
            assert_eq!(params.group_size, good);
        }
    }

    #[test]
    fn non_endian_allows_any_positive_group() {
        let mut flags = raw();
        flags.group_size = "3".into();
        let set_flags = SetFlags { group_size: true, ..Default::default() };
        assert_eq!(resolve(true, &flags, 10, &set_flags).unwrap().group_size, 3);
    }

    #[test]
    fn non_positive_columns_rejected() {
        let mut flags = raw();
        let set_flags = SetFlags { columns: true, ..Default::default() };

        for bad in ["0", "-4", "junk"] {
            flags.columns = bad.into();
            let err = resolve(true, &flags, 10, &set_flags).unwrap_err();
            assert_eq!(err.exit_code(), 1, "columns {bad}");
        }

        flags.columns = "8".into();
        assert_eq!(resolve(true, &flags, 10, &set_flags).unwrap().columns, 8);
    }

    #[test]
    fn seek_negative_resolves_from_end() {
        let mut flags = raw();
        flags.seek = "-5".into();
        let set_flags = SetFlags { seek: true, ..Default::default() };
        assert_eq!(resolve(true, &flags, 20, &set_flags).unwrap().seek, 15);
    }

    #[test]
    fn seek_negative_beyond_size_stays_out_of_range() {
        let mut flags = raw();
        flags.seek = "-100".into();
        let set_flags = SetFlags { seek: true, ..Default::default() };
        assert_eq!(resolve(true, &flags, 10, &set_flags).unwrap().seek, -90);
    }

    #[test]
    fn seek_minus_zero_on_file_seeks_to_end() {
        let mut flags = raw();
        flags.seek = "-0".into();
        let set_flags = SetFlags { seek: true, ..Default::default() };
        assert_eq!(resolve(true, &flags, 20, &set_flags).unwrap().seek, 20);
    }

    #[test]
    fn seek_minus_zero_on_stream_is_fatal() {
        let mut flags = raw();
        flags.seek = "-0".into();
        let set_flags = SetFlags { seek: true, ..Default::default() };
        let err = resolve(false, &flags, 20, &set_flags).unwrap_err();
        assert_eq!(err.exit_code(), 4);
    }

    #[test]
    fn seek_plus_minus_on_stream_is_fatal() {
        let mut flags = raw();
        flags.seek = "+-4".into();
        let set_flags = SetFlags { seek: true, ..Default::default() };
        let err = resolve(false, &flags, 20, &set_flags).unwrap_err();
        assert_eq!(err.exit_code(), 4);

        // 文件可以 seek，前缀交给字面量解析
        assert_eq!(resolve(true, &flags, 20, &set_flags).unwrap().seek, 16);
    }

    #[test]
    fn unparseable_seek_keeps_default() {
        let mut flags = raw();
        flags.seek = "nowhere".into();
        let set_flags = SetFlags { seek: true, ..Default::default() };
        assert_eq!(resolve(true, &flags, 20, &set_flags).unwrap().seek, 0);
    }
}
