//! 文档提取器 - 编排层
//!
//! ## 职责
//!
//! 本模块负责遍历整个文档的题块，是文档级别的编排器。
//!
//! ## 核心功能
//!
//! 1. **解析文档**：持有 `HtmlDocument`
//! 2. **读取标题**：缺失时使用默认标题
//! 3. **遍历题块**：按文档顺序交给 `QuestionFlow`
//! 4. **统计输出**：记录输出/跳过/兜底数量

use tracing::{debug, warn};

use crate::error::AppResult;
use crate::infrastructure::{dom, CompiledSelector, HtmlDocument};
use crate::models::{DocumentModel, MarkerSet};
use crate::workflow::{ProcessResult, QuestionCtx, QuestionFlow};

/// 题块提取统计
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ExtractionStats {
    pub blocks: usize,
    pub emitted: usize,
    pub skipped_no_prompt: usize,
    pub skipped_no_answers: usize,
    pub fallback_recoveries: usize,
    /// 输出的题目中没有任何正确选项的数量
    pub without_correct: usize,
    pub incorrect: usize,
}

impl ExtractionStats {
    pub fn skipped(&self) -> usize {
        self.skipped_no_prompt + self.skipped_no_answers
    }
}

/// 一次提取的结果
#[derive(Debug, Clone)]
pub struct Extraction {
    pub model: DocumentModel,
    pub stats: ExtractionStats,
}

/// 文档提取器
pub struct DocumentExtractor {
    flow: QuestionFlow,
    title: CompiledSelector,
    block: CompiledSelector,
}

impl DocumentExtractor {
    /// 创建提取器，词表中的选择器在这里编译，无效时返回错误
    pub fn new(markers: MarkerSet, verbose_logging: bool) -> AppResult<Self> {
        Ok(Self {
            title: CompiledSelector::class(&markers.title_class)?,
            block: CompiledSelector::class(&markers.question_block_class)?,
            flow: QuestionFlow::new(markers, verbose_logging)?,
        })
    }

    /// 从 HTML 提取文档模型
    ///
    /// 题块按文档顺序处理，不重排、不去重；坏题块直接跳过
    pub fn extract(&self, html: &str) -> AppResult<Extraction> {
        let document = HtmlDocument::parse(html);

        let title = document
            .select_first(&self.title)
            .map(dom::text_of)
            .unwrap_or_default();
        if title.is_empty() {
            warn!("⚠️ 未找到表单标题，使用默认标题");
        }

        let mut stats = ExtractionStats::default();
        let mut items = Vec::new();

        // ========== 遍历所有题块 ==========
        for (index, block) in document.select_all(&self.block).into_iter().enumerate() {
            stats.blocks += 1;
            let ctx = QuestionCtx::new(index + 1, items.len());

            match self.flow.run(block, &ctx) {
                ProcessResult::Emitted {
                    record,
                    used_fallback,
                } => {
                    if used_fallback {
                        stats.fallback_recoveries += 1;
                    }
                    if record.correct_count() == 0 {
                        stats.without_correct += 1;
                    }
                    if record.is_incorrect {
                        stats.incorrect += 1;
                    }
                    items.push(record);
                }
                ProcessResult::SkippedNoPrompt => stats.skipped_no_prompt += 1,
                ProcessResult::SkippedNoAnswers => stats.skipped_no_answers += 1,
            }
        }

        stats.emitted = items.len();
        debug!("提取统计: {:?}", stats);

        Ok(Extraction {
            model: DocumentModel::new(title, items),
            stats,
        })
    }
}

/// 使用给定词表提取文档模型
pub fn extract_document(html: &str, markers: &MarkerSet) -> AppResult<Extraction> {
    DocumentExtractor::new(markers.clone(), false)?.extract(html)
}
