use serde::{Deserialize, Serialize};

/// 表单没有标题时使用的默认标题
pub const DEFAULT_TITLE: &str = "Form Questions and Answers";

/// 单个选项
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerOption {
    pub text: String,
    pub is_correct: bool,
}

impl AnswerOption {
    pub fn new(text: impl Into<String>, is_correct: bool) -> Self {
        Self {
            text: text.into(),
            is_correct,
        }
    }
}

/// 一道题目的提取结果
///
/// 只有题干非空且至少有一个选项时才会被创建
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionRecord {
    pub question: String,
    pub answers: Vec<AnswerOption>,
    /// 解析文本，没有时为空字符串
    #[serde(default)]
    pub feedback: String,
    /// 作答者的提交被标记为错误
    #[serde(default)]
    pub is_incorrect: bool,
}

impl QuestionRecord {
    pub fn has_feedback(&self) -> bool {
        !self.feedback.trim().is_empty()
    }

    /// 解析的非空行
    pub fn feedback_lines(&self) -> impl Iterator<Item = &str> {
        self.feedback
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
    }

    pub fn correct_count(&self) -> usize {
        self.answers.iter().filter(|a| a.is_correct).count()
    }
}

/// 与输出格式无关的文档模型
///
/// 每次请求构建一次，构建后不再修改，只交给一个渲染器使用
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentModel {
    pub title: String,
    pub items: Vec<QuestionRecord>,
}

impl DocumentModel {
    /// 创建文档模型，空标题回退为默认标题
    pub fn new(title: impl Into<String>, items: Vec<QuestionRecord>) -> Self {
        let title = title.into();
        let title = if title.trim().is_empty() {
            DEFAULT_TITLE.to_string()
        } else {
            title.trim().to_string()
        };
        Self { title, items }
    }

    pub fn question_count(&self) -> usize {
        self.items.len()
    }

    pub fn incorrect_count(&self) -> usize {
        self.items.iter().filter(|item| item.is_incorrect).count()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
