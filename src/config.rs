/// 未知或为0的元素数量提示下，缓冲类操作的默认初始容量。
pub(crate) const DEFAULT_CAPACITY: usize = 16;

/// 缓冲类操作预分配容量的上限，更多的元素在到达时按需扩容。
pub(crate) const MAX_RESERVE: usize = 1024;

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Config {
    /// 每次执行终结操作前以`info`级别输出完整的操作链。
    Verbose,
    /// 去重、排序、收集等缓冲类操作在元素数量未知时的初始容量，默认16。
    DefaultCapacity(usize),
}

#[inline]
pub(crate) fn is_verbose(configs: &[Config]) -> bool {
    configs.contains(&Config::Verbose)
}

/// 取最后一次指定的默认容量。
pub(crate) fn default_capacity(configs: &[Config]) -> usize {
    configs
        .iter()
        .rev()
        .find_map(|config| match config {
            Config::DefaultCapacity(capacity) => Some(*capacity),
            _ => None,
        })
        .unwrap_or(DEFAULT_CAPACITY)
}

/// 根据元素数量提示确定缓冲容量，提示未知或为0时使用默认容量，且不超过[`MAX_RESERVE`]。
#[inline]
pub(crate) fn capacity(size: Option<usize>, default: usize) -> usize {
    size.filter(|&n| n > 0).unwrap_or(default).min(MAX_RESERVE)
}
