//! 题块提取流程 - 流程层
//!
//! 核心职责：定义"一个题块"的完整提取流程
//!
//! 流程顺序：
//! 1. 题干 → 为空则跳过
//! 2. 解析（两层容器都存在才有内容）
//! 3. 选项 → 逐选项判定正误
//! 4. 没有任何正确选项 → 位置兜底
//! 5. 整题是否答错
//! 6. 题干非空且有选项 → 输出题目记录

use tracing::{debug, info};

use crate::error::AppResult;
use crate::infrastructure::{dom, CompiledSelector, Element};
use crate::models::{AnswerOption, MarkerSet, QuestionRecord};
use crate::services::{FeedbackNormalizer, MarkerResolver};
use crate::utils::logging::truncate_text;
use crate::workflow::question_ctx::QuestionCtx;

/// 题块处理结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessResult {
    /// 输出了一条题目记录
    Emitted {
        record: QuestionRecord,
        /// 是否依靠位置兜底找到了正确答案
        used_fallback: bool,
    },
    /// 跳过：没有题干
    SkippedNoPrompt,
    /// 跳过：没有选项
    SkippedNoAnswers,
}

/// 题块提取流程
///
/// - 编排单个题块的提取步骤
/// - 决定何时判定、何时兜底、何时丢弃
/// - 不持有 DOM，只接收题块元素
/// - 只依赖业务能力（services）
pub struct QuestionFlow {
    resolver: MarkerResolver,
    normalizer: FeedbackNormalizer,
    prompt: CompiledSelector,
    feedback_container: CompiledSelector,
    feedback_content: CompiledSelector,
    answer: CompiledSelector,
    verbose_logging: bool,
}

impl QuestionFlow {
    /// 创建新的题块提取流程
    pub fn new(markers: MarkerSet, verbose_logging: bool) -> AppResult<Self> {
        Ok(Self {
            prompt: CompiledSelector::parse(&markers.prompt_selector)?,
            feedback_container: CompiledSelector::class(&markers.feedback_container_class)?,
            feedback_content: CompiledSelector::class(&markers.feedback_content_class)?,
            answer: CompiledSelector::parse(&markers.answer_selector)?,
            normalizer: FeedbackNormalizer::new()?,
            resolver: MarkerResolver::new(markers)?,
            verbose_logging,
        })
    }

    /// 提取一个题块
    ///
    /// 单个题块无法提取时只会跳过，不会返回错误
    pub fn run(&self, block: Element<'_>, ctx: &QuestionCtx) -> ProcessResult {
        // ========== 1. 题干 ==========
        let question = dom::joined_text(self.prompt.within(block));
        if question.is_empty() {
            debug!("{} 没有题干，跳过", ctx);
            return ProcessResult::SkippedNoPrompt;
        }
        self.log_prompt(ctx, &question);

        // ========== 2. 解析 ==========
        let feedback = self.extract_feedback(block);

        // ========== 3. 选项 ==========
        let mut answers = Vec::new();
        for (index, option) in self.answer.within(block).enumerate() {
            let text = dom::text_of(option);
            let verdict = self.resolver.resolve_option(option);
            if let Some(tier) = verdict.tier {
                debug!("{} 选项 {} 由{}判定为正确", ctx, index + 1, tier.name());
            }
            answers.push(AnswerOption::new(text, verdict.is_correct));
        }

        if answers.is_empty() {
            debug!("{} 没有选项，跳过", ctx);
            return ProcessResult::SkippedNoAnswers;
        }

        // ========== 4. 位置兜底 ==========
        let used_fallback = if answers.iter().any(|a| a.is_correct) {
            false
        } else {
            let flipped = self.resolver.apply_positional_fallback(block, &mut answers);
            if !flipped.is_empty() {
                info!("{} 🔁 主判定未找到正确答案，位置兜底找到 {} 个", ctx, flipped.len());
            }
            !flipped.is_empty()
        };

        // ========== 5. 整题正误 ==========
        let is_incorrect = self.resolver.is_incorrect(block);
        if is_incorrect {
            debug!("{} 被标记为答错", ctx);
        }

        ProcessResult::Emitted {
            record: QuestionRecord {
                question,
                answers,
                feedback,
                is_incorrect,
            },
            used_fallback,
        }
    }

    /// 解析内容位于外层容器内的内容容器中，任一缺失则为空
    fn extract_feedback(&self, block: Element<'_>) -> String {
        self.feedback_container
            .within(block)
            .next()
            .and_then(|container| self.feedback_content.within(container).next())
            .map(|content| self.normalizer.normalize(&dom::inner_html(content)))
            .unwrap_or_default()
    }

    fn log_prompt(&self, ctx: &QuestionCtx, question: &str) {
        if self.verbose_logging {
            debug!("{} 题目 {}: {}", ctx, ctx.question_number(), question);
        } else {
            debug!(
                "{} 题目 {}: {}",
                ctx,
                ctx.question_number(),
                truncate_text(question, 40)
            );
        }
    }
}
