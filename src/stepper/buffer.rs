//! 步骤缓冲区
//!
//! 按产生顺序记录驱动输出的步骤结果。下标 0 是空的初始条目，
//! 游标指向最近一次已应用的结果。

use crate::algorithm::AlgorithmStepResult;

#[derive(Debug, Clone)]
pub struct StepBuffer {
    results: Vec<AlgorithmStepResult>,
    cursor: usize,
}

impl Default for StepBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl StepBuffer {
    pub fn new() -> Self {
        Self {
            results: vec![AlgorithmStepResult::initial()],
            cursor: 0,
        }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// 缓冲的结果数量（含初始条目）
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// 只有初始条目
    pub fn is_empty(&self) -> bool {
        self.results.len() == 1
    }

    /// 游标处的结果
    pub fn current(&self) -> &AlgorithmStepResult {
        &self.results[self.cursor]
    }

    /// 游标之后的结果（重放用）
    pub fn next(&self) -> Option<&AlgorithmStepResult> {
        self.results.get(self.cursor + 1)
    }

    /// 游标是否位于缓冲区末尾
    pub fn at_end(&self) -> bool {
        self.cursor + 1 == self.results.len()
    }

    /// 最后一条结果是否为终止步骤
    pub fn is_complete(&self) -> bool {
        self.results.last().map_or(false, |r| r.done)
    }

    /// 追加新结果并前移游标
    pub(crate) fn push(&mut self, result: AlgorithmStepResult) {
        debug_assert!(self.at_end());
        self.results.push(result);
        self.cursor += 1;
    }

    pub(crate) fn advance(&mut self) -> bool {
        if self.at_end() {
            return false;
        }
        self.cursor += 1;
        true
    }

    pub(crate) fn retreat(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        true
    }

    /// 已应用的结果（不含初始条目），按应用顺序
    pub fn applied(&self) -> &[AlgorithmStepResult] {
        &self.results[1..=self.cursor]
    }

    /// 清空到只剩初始条目
    pub(crate) fn clear(&mut self) {
        self.results.truncate(1);
        self.cursor = 0;
    }

    pub fn iter(&self) -> impl Iterator<Item = &AlgorithmStepResult> {
        self.results.iter()
    }
}
