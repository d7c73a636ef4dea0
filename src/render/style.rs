//! 语义样式规则
//!
//! 每段文字先归为一个 `Role`，再由 `Role` 决定字形、字号和颜色。
//! PDF 与 DOCX 两个渲染器都从这里取样式，保证规则一致。

/// RGB 颜色
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// 十六进制表示（DOCX 使用），如 `008000`
    pub fn hex(self) -> String {
        format!("{:02X}{:02X}{:02X}", self.0, self.1, self.2)
    }

    /// 0.0–1.0 分量（PDF `rg` 操作符使用）
    pub fn unit(self) -> [f32; 3] {
        [
            self.0 as f32 / 255.0,
            self.1 as f32 / 255.0,
            self.2 as f32 / 255.0,
        ]
    }
}

pub const DEFAULT_COLOR: Rgb = Rgb(0, 0, 0);
/// 正确选项
pub const CORRECT_COLOR: Rgb = Rgb(0, 128, 0);
/// 答错题目与错误统计
pub const WARNING_COLOR: Rgb = Rgb(204, 0, 0);

/// 字形
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontFace {
    Regular,
    Bold,
    Italic,
}

/// 一段文字的完整样式
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub face: FontFace,
    /// 字号（磅）
    pub size: f32,
    pub color: Rgb,
}

impl TextStyle {
    /// 正文默认样式，也是重置后的样式
    pub const BODY: TextStyle = TextStyle {
        face: FontFace::Regular,
        size: 12.0,
        color: DEFAULT_COLOR,
    };

    pub fn with_face(self, face: FontFace) -> Self {
        Self { face, ..self }
    }

    pub fn with_size(self, size: f32) -> Self {
        Self { size, ..self }
    }

    pub fn with_color(self, color: Rgb) -> Self {
        Self { color, ..self }
    }

    pub fn is_bold(&self) -> bool {
        self.face == FontFace::Bold
    }

    pub fn is_italic(&self) -> bool {
        self.face == FontFace::Italic
    }

    /// DOCX 字号单位为半磅
    pub fn half_points(&self) -> usize {
        (self.size * 2.0).round() as usize
    }
}

/// 文字在文档中的语义角色
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Title,
    QuestionLabel { incorrect: bool },
    Prompt { incorrect: bool },
    Answer { correct: bool },
    FeedbackLabel,
    FeedbackLine,
    Total,
    IncorrectSummary,
}

impl Role {
    pub fn style(self) -> TextStyle {
        let body = TextStyle::BODY;
        match self {
            Role::Title => body.with_size(24.0),
            Role::QuestionLabel { incorrect } => body
                .with_face(FontFace::Bold)
                .with_size(14.0)
                .with_color(warning_if(incorrect)),
            Role::Prompt { incorrect } => body.with_color(warning_if(incorrect)),
            Role::Answer { correct: true } => {
                body.with_face(FontFace::Bold).with_color(CORRECT_COLOR)
            }
            Role::Answer { correct: false } => body,
            Role::FeedbackLabel | Role::FeedbackLine => body.with_face(FontFace::Italic),
            Role::Total => body.with_face(FontFace::Bold),
            Role::IncorrectSummary => body.with_face(FontFace::Bold).with_color(WARNING_COLOR),
        }
    }
}

fn warning_if(incorrect: bool) -> Rgb {
    if incorrect {
        WARNING_COLOR
    } else {
        DEFAULT_COLOR
    }
}
