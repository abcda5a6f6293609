//! 序号空间
//!
//! 序号取值 `0..size`，所有加减按模 `size` 进行。

/// 循环序号空间
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeqSpace {
    size: usize,
}

impl SeqSpace {
    pub(crate) fn new(size: usize) -> Self {
        debug_assert!(size > 0);
        Self { size }
    }

    pub fn size(self) -> usize {
        self.size
    }

    pub fn next(self, s: usize) -> usize {
        (s + 1) % self.size
    }

    /// `s - 1 (mod size)`，不经过有符号取模。
    pub fn prev(self, s: usize) -> usize {
        (s + self.size - 1) % self.size
    }

    /// 从 `from` 前进到 `to` 需要的步数
    pub fn distance(self, from: usize, to: usize) -> usize {
        (to + self.size - from) % self.size
    }

    /// 线路上的序号若落在空间内则转为下标
    pub fn index(self, wire: i32) -> Option<usize> {
        usize::try_from(wire).ok().filter(|&s| s < self.size)
    }
}
