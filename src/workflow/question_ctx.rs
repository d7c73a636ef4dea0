//! 题块处理上下文
//!
//! 封装"我正在处理文档中的第几个题块"这一信息

use std::fmt::Display;

/// 题块处理上下文
#[derive(Debug, Clone, Copy)]
pub struct QuestionCtx {
    /// 题块在文档中的序号（从1开始，包含被跳过的题块）
    pub block_index: usize,

    /// 已输出的题目数量（不含当前题块）
    pub emitted_so_far: usize,
}

impl QuestionCtx {
    /// 创建新的题块上下文
    pub fn new(block_index: usize, emitted_so_far: usize) -> Self {
        Self {
            block_index,
            emitted_so_far,
        }
    }

    /// 若当前题块被输出，它的题号
    pub fn question_number(&self) -> usize {
        self.emitted_so_far + 1
    }
}

impl Display for QuestionCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[题块 #{}]", self.block_index)
    }
}
