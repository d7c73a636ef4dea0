//! 正误标记判定服务 - 业务能力层
//!
//! 只负责"这个选项是不是正确答案"和"这道题是不是答错了"两个判断
//!
//! ## 判定层级
//!
//! 表单平台的"显示正确答案"界面类名随版本变化且会本地化，单一信号不可靠，
//! 因此按从具体到宽泛的顺序逐层尝试，第一个给出明确结论的层级生效：
//!
//! 1. `TextIndicator` - 选择容器内指示元素的文字是"正确"同义词
//! 2. `VisualMarker` - 选择容器内有对勾等正确图标类名
//! 3. `EmphasisClass` - 选项自身或直接父元素带有高亮样式类名
//!
//! 三层都没有结论则视为错误选项。整道题一个正确选项都没有时，
//! 再执行一次按位置回推的兜底（`PositionalFallback`）。

use std::collections::BTreeSet;

use regex::Regex;
use tracing::debug;

use crate::error::AppResult;
use crate::infrastructure::dom;
use crate::infrastructure::Element;
use crate::models::{AnswerOption, MarkerSet};

/// 判定层级
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DetectionTier {
    TextIndicator,
    VisualMarker,
    EmphasisClass,
    PositionalFallback,
}

impl DetectionTier {
    pub fn name(self) -> &'static str {
        match self {
            DetectionTier::TextIndicator => "文字指示",
            DetectionTier::VisualMarker => "图标标记",
            DetectionTier::EmphasisClass => "高亮样式",
            DetectionTier::PositionalFallback => "位置兜底",
        }
    }
}

/// 单个选项的判定上下文
#[derive(Debug, Clone, Copy)]
pub struct OptionContext<'a> {
    /// 选项文本元素
    pub option: Element<'a>,
    /// 最近的选择容器（可能不存在）
    pub container: Option<Element<'a>>,
    pub markers: &'a MarkerSet,
}

impl<'a> OptionContext<'a> {
    pub fn new(option: Element<'a>, markers: &'a MarkerSet) -> Self {
        Self {
            option,
            container: dom::closest_with_class(option, &markers.choice_container_class),
            markers,
        }
    }
}

/// 判定策略：`Some(true)` 表示明确判定为正确，`None` 表示本层无结论
pub type Detector = fn(&OptionContext<'_>) -> Option<bool>;

/// 按优先级排列的逐选项判定策略
pub const OPTION_DETECTORS: [(DetectionTier, Detector); 3] = [
    (DetectionTier::TextIndicator, detect_text_indicator),
    (DetectionTier::VisualMarker, detect_visual_marker),
    (DetectionTier::EmphasisClass, detect_emphasis_class),
];

/// 第 1 层：指示元素文字（trim + 小写）完全等于某个正确同义词
pub fn detect_text_indicator(ctx: &OptionContext<'_>) -> Option<bool> {
    let container = ctx.container?;
    let indicators = dom::descendant_elements(container)
        .filter(|e| dom::has_class(*e, &ctx.markers.indicator_class))
        .collect::<Vec<_>>();
    if indicators.is_empty() {
        return None;
    }
    let text = dom::joined_text(indicators.into_iter());
    ctx.markers.is_correct_word(&text).then_some(true)
}

/// 第 2 层：选择容器内存在正确图标类名，不看文字
pub fn detect_visual_marker(ctx: &OptionContext<'_>) -> Option<bool> {
    let container = ctx.container?;
    dom::has_descendant_with_any_class(container, &ctx.markers.positive_marker_classes)
        .then_some(true)
}

/// 第 3 层：选项自身或直接父元素带有高亮样式类名
pub fn detect_emphasis_class(ctx: &OptionContext<'_>) -> Option<bool> {
    let class = ctx.markers.emphasis_class.as_str();
    if class.is_empty() {
        return None;
    }
    let wrapped = dom::has_class(ctx.option, class)
        || dom::parent_element(ctx.option).is_some_and(|p| dom::has_class(p, class));
    wrapped.then_some(true)
}

/// 单个选项的判定结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptionVerdict {
    pub is_correct: bool,
    /// 给出结论的层级，三层都无结论时为 `None`
    pub tier: Option<DetectionTier>,
}

/// 正误标记判定服务
///
/// 职责：
/// - 判定单个选项是否为正确答案
/// - 对一道题执行位置兜底
/// - 判定一道题是否被标记为答错
/// - 不构造题目记录，不关心遍历顺序
pub struct MarkerResolver {
    markers: MarkerSet,
    /// 否定词整词匹配，词表为空时为 `None`
    negative: Option<Regex>,
}

impl MarkerResolver {
    /// 创建新的判定服务，否定词在这里编译为整词匹配的正则
    pub fn new(markers: MarkerSet) -> AppResult<Self> {
        let negative = negative_word_pattern(&markers.negative_words)?;
        Ok(Self { markers, negative })
    }

    /// 按层级判定单个选项
    pub fn resolve_option(&self, option: Element<'_>) -> OptionVerdict {
        let ctx = OptionContext::new(option, &self.markers);

        for (tier, detector) in OPTION_DETECTORS {
            if let Some(is_correct) = detector(&ctx) {
                return OptionVerdict {
                    is_correct,
                    tier: Some(tier),
                };
            }
        }

        OptionVerdict {
            is_correct: false,
            tier: None,
        }
    }

    /// 位置兜底
    ///
    /// 仅当题目有选项且逐选项判定一个正确都没有时执行：
    /// 找到题块内所有正确图标，取其最近的选择容器，
    /// 用容器在同类兄弟中的序号回推选项下标并标记为正确。
    ///
    /// # 返回
    /// 被翻转为正确的选项下标
    pub fn apply_positional_fallback(
        &self,
        block: Element<'_>,
        answers: &mut [AnswerOption],
    ) -> Vec<usize> {
        if answers.is_empty() || answers.iter().any(|a| a.is_correct) {
            return Vec::new();
        }

        let container_class = self.markers.choice_container_class.as_str();
        let indexes: BTreeSet<usize> = dom::descendant_elements(block)
            .filter(|e| dom::has_any_class(*e, &self.markers.positive_marker_classes))
            .filter_map(|marker| dom::closest_with_class(marker, container_class))
            .map(|container| dom::sibling_ordinal(container, container_class))
            .filter(|index| *index < answers.len())
            .collect();

        for &index in &indexes {
            debug!(
                "{}: 第 {} 个选项标记为正确",
                DetectionTier::PositionalFallback.name(),
                index + 1
            );
            answers[index].is_correct = true;
        }

        indexes.into_iter().collect()
    }

    /// 判定整道题是否被标记为答错
    ///
    /// 任一信号即可：
    /// - 带错误作答类名的元素，其文字或 `aria-label` 中出现完整的否定词
    /// - 题块内有元素带有额外的错误作答类名
    pub fn is_incorrect(&self, block: Element<'_>) -> bool {
        self.marked_wrong(block)
            || dom::has_any_class(block, &self.markers.extra_wrong_classes)
            || dom::has_descendant_with_any_class(block, &self.markers.extra_wrong_classes)
    }

    fn marked_wrong(&self, block: Element<'_>) -> bool {
        let wrong_class = self.markers.wrong_answer_class.as_str();
        let Some(negative) = self.negative.as_ref().filter(|_| !wrong_class.is_empty()) else {
            return false;
        };

        std::iter::once(block)
            .chain(dom::descendant_elements(block))
            .filter(|e| dom::has_class(*e, wrong_class))
            .any(|e| {
                let label = dom::attribute(e, "aria-label").unwrap_or_default();
                negative.is_match(&dom::text_of(e)) || negative.is_match(label)
            })
    }
}

/// `(?i)\b(?:w1|w2)\b`
fn negative_word_pattern(words: &[String]) -> AppResult<Option<Regex>> {
    let words: Vec<String> = words
        .iter()
        .map(|w| w.trim())
        .filter(|w| !w.is_empty())
        .map(regex::escape)
        .collect();
    if words.is_empty() {
        return Ok(None);
    }
    let pattern = format!(r"(?i)\b(?:{})\b", words.join("|"));
    Ok(Some(Regex::new(&pattern)?))
}
