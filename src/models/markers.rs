//! 表单页面标记词表
//!
//! 表单平台的类名没有语义、会随版本变化、还会本地化，
//! 所以所有类名和关键词都集中在这里，可以通过 TOML 文件覆盖。

use serde::{Deserialize, Serialize};

/// 提取与判定所用的类名和关键词
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkerSet {
    /// 表单标题
    pub title_class: String,
    /// 题块容器
    pub question_block_class: String,
    /// 题干元素（CSS 选择器）
    pub prompt_selector: String,
    /// 解析外层容器
    pub feedback_container_class: String,
    /// 解析内容容器（位于外层容器之内）
    pub feedback_content_class: String,
    /// 选项文本元素（CSS 选择器）
    pub answer_selector: String,
    /// 选项所在的选择容器
    pub choice_container_class: String,
    /// 选择容器内的文字指示元素
    pub indicator_class: String,
    /// 指示文字等于其中之一即为正确答案（忽略大小写）
    pub correct_words: Vec<String>,
    /// 正确答案图标（对勾等）的类名
    pub positive_marker_classes: Vec<String>,
    /// 正确答案高亮样式类名
    pub emphasis_class: String,
    /// 错误作答标记类名，需要与否定词同时出现
    pub wrong_answer_class: String,
    /// 否定词（每种语言一个）
    pub negative_words: Vec<String>,
    /// 单独出现即可判定作答错误的类名
    pub extra_wrong_classes: Vec<String>,
}

impl Default for MarkerSet {
    fn default() -> Self {
        Self {
            title_class: "F9yp7e".to_string(),
            question_block_class: "OxAavc".to_string(),
            prompt_selector: "span.M7eMe".to_string(),
            feedback_container_class: "PcXV5e".to_string(),
            feedback_content_class: "sIQxvc".to_string(),
            answer_selector: ".aDTYNe.snByac".to_string(),
            choice_container_class: "yUJIWb".to_string(),
            indicator_class: "fKfAyc".to_string(),
            correct_words: strings(&["tama", "correct", "right"]),
            positive_marker_classes: strings(&["RkYHRb", "zS667"]),
            emphasis_class: "D42QGf".to_string(),
            wrong_answer_class: "KYvWVd".to_string(),
            negative_words: strings(&["mali", "incorrect"]),
            extra_wrong_classes: strings(&["JBJNef", "WyIWE"]),
        }
    }
}

impl MarkerSet {
    /// 追加一个表示"正确"的词（用于新增语言）
    pub fn with_correct_word(mut self, word: impl Into<String>) -> Self {
        self.correct_words.push(word.into());
        self
    }

    /// 追加一个否定词
    pub fn with_negative_word(mut self, word: impl Into<String>) -> Self {
        self.negative_words.push(word.into());
        self
    }

    /// 指示文字是否表示正确（先 trim 再忽略大小写比较）
    pub fn is_correct_word(&self, text: &str) -> bool {
        let text = text.trim().to_lowercase();
        !text.is_empty()
            && self
                .correct_words
                .iter()
                .any(|w| w.trim().to_lowercase() == text)
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
