//! DOCX 渲染器
//!
//! 先把文档模型转换为与 docx-rs 无关的段落计划（`DocxParagraph`），再写出 Word 文档。
//! DOCX 没有"当前颜色"，每个 run 都完整声明自己的字形、字号和颜色。

use std::io::Cursor;

use docx_rs::{AlignmentType, Docx, LineSpacing, Paragraph, Run, Style, StyleType};
use tracing::debug;

use crate::error::{AppError, AppResult};
use crate::models::{DocumentModel, OutputFormat, QuestionRecord};
use crate::render::labels;
use crate::render::style::{FontFace, Role, TextStyle};
use crate::render::DocumentRenderer;

/// 段落样式 ID
pub const HEADING_1: &str = "Heading1";
pub const HEADING_2: &str = "Heading2";
pub const HEADING_3: &str = "Heading3";

/// 段落间距（twip）
const SPACING_SMALL: u32 = 120;
const SPACING_LARGE: u32 = 240;

/// 一个文字片段
#[derive(Debug, Clone, PartialEq)]
pub struct DocxRun {
    pub text: String,
    pub style: TextStyle,
}

/// 一个段落
#[derive(Debug, Clone, PartialEq)]
pub struct DocxParagraph {
    pub style_id: Option<&'static str>,
    pub centered: bool,
    pub spacing_after: u32,
    pub runs: Vec<DocxRun>,
}

impl DocxParagraph {
    fn body(text: impl Into<String>, style: TextStyle) -> Self {
        Self {
            style_id: None,
            centered: false,
            spacing_after: SPACING_SMALL,
            runs: vec![DocxRun {
                text: text.into(),
                style,
            }],
        }
    }

    fn heading(style_id: &'static str, text: impl Into<String>, style: TextStyle) -> Self {
        Self {
            style_id: Some(style_id),
            ..Self::body(text, style)
        }
    }

    fn centered(mut self) -> Self {
        self.centered = true;
        self
    }

    fn spacing_after(mut self, twips: u32) -> Self {
        self.spacing_after = twips;
        self
    }

    /// 段落的纯文本
    pub fn text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }
}

/// DOCX 标题比 PDF 小，统一为 16 磅粗体
fn title_style() -> TextStyle {
    Role::Title
        .style()
        .with_face(FontFace::Bold)
        .with_size(16.0)
}

/// 构建段落计划
pub fn plan(model: &DocumentModel) -> Vec<DocxParagraph> {
    let mut paragraphs = vec![DocxParagraph::heading(HEADING_1, &model.title, title_style())
        .centered()
        .spacing_after(SPACING_LARGE)];

    for (index, item) in model.items.iter().enumerate() {
        plan_question(&mut paragraphs, index + 1, item);
    }

    paragraphs.push(DocxParagraph::body(
        labels::total_line(model.question_count()),
        Role::Total.style(),
    ));
    let incorrect = model.incorrect_count();
    if incorrect > 0 {
        paragraphs.push(DocxParagraph::body(
            labels::incorrect_line(incorrect),
            Role::IncorrectSummary.style(),
        ));
    }

    paragraphs
}

fn plan_question(paragraphs: &mut Vec<DocxParagraph>, number: usize, item: &QuestionRecord) {
    let incorrect = item.is_incorrect;

    paragraphs.push(DocxParagraph::heading(
        HEADING_2,
        labels::question_label(number, incorrect),
        Role::QuestionLabel { incorrect }.style(),
    ));
    paragraphs.push(
        DocxParagraph::body(&item.question, Role::Prompt { incorrect }.style())
            .spacing_after(SPACING_LARGE),
    );

    for (index, answer) in item.answers.iter().enumerate() {
        paragraphs.push(DocxParagraph::body(
            labels::answer_line(index, &answer.text),
            Role::Answer {
                correct: answer.is_correct,
            }
            .style(),
        ));
    }

    if item.has_feedback() {
        paragraphs.push(DocxParagraph::heading(
            HEADING_3,
            labels::FEEDBACK_LABEL,
            Role::FeedbackLabel.style(),
        ));
        for line in item.feedback_lines() {
            paragraphs.push(DocxParagraph::body(line, Role::FeedbackLine.style()));
        }
    }

    if let Some(last) = paragraphs.last_mut() {
        last.spacing_after = SPACING_LARGE;
    }
}

// ========== 写出 docx ==========

fn to_run(run: &DocxRun) -> Run {
    let mut out = Run::new()
        .add_text(&run.text)
        .size(run.style.half_points())
        .color(run.style.color.hex());
    if run.style.is_bold() {
        out = out.bold();
    }
    if run.style.is_italic() {
        out = out.italic();
    }
    out
}

fn to_paragraph(planned: &DocxParagraph) -> Paragraph {
    let mut paragraph = planned
        .runs
        .iter()
        .fold(Paragraph::new(), |p, run| p.add_run(to_run(run)))
        .line_spacing(LineSpacing::new().after(planned.spacing_after));
    if let Some(style_id) = planned.style_id {
        paragraph = paragraph.style(style_id);
    }
    if planned.centered {
        paragraph = paragraph.align(AlignmentType::Center);
    }
    paragraph
}

fn heading_styles() -> [Style; 3] {
    [
        Style::new(HEADING_1, StyleType::Paragraph)
            .name("Heading 1")
            .size(32)
            .bold(),
        Style::new(HEADING_2, StyleType::Paragraph)
            .name("Heading 2")
            .size(28)
            .bold(),
        Style::new(HEADING_3, StyleType::Paragraph)
            .name("Heading 3")
            .size(24)
            .italic(),
    ]
}

fn assemble(paragraphs: &[DocxParagraph]) -> AppResult<Vec<u8>> {
    let docx = heading_styles()
        .into_iter()
        .fold(Docx::new(), |docx, style| docx.add_style(style));
    let docx = paragraphs
        .iter()
        .fold(docx, |docx, p| docx.add_paragraph(to_paragraph(p)));

    let mut cursor = Cursor::new(Vec::new());
    docx.build()
        .pack(&mut cursor)
        .map_err(|e| AppError::render_failed("docx", e))?;
    Ok(cursor.into_inner())
}

/// DOCX 渲染器
#[derive(Debug, Default, Clone, Copy)]
pub struct DocxRenderer;

impl DocumentRenderer for DocxRenderer {
    fn format(&self) -> OutputFormat {
        OutputFormat::Docx
    }

    fn render(&self, model: &DocumentModel) -> AppResult<Vec<u8>> {
        let paragraphs = plan(model);
        debug!("DOCX 段落数: {}", paragraphs.len());
        assemble(&paragraphs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AnswerOption;
    use crate::render::style::{CORRECT_COLOR, DEFAULT_COLOR, WARNING_COLOR};
    use std::io::Read;

    fn quiz_a(is_incorrect: bool) -> DocumentModel {
        DocumentModel::new(
            "Quiz A",
            vec![QuestionRecord {
                question: "Capital of the Philippines?".to_string(),
                answers: vec![
                    AnswerOption::new("Cebu", false),
                    AnswerOption::new("Manila", true),
                ],
                feedback: "Manila is the capital.".to_string(),
                is_incorrect,
            }],
        )
    }

    fn find<'a>(paragraphs: &'a [DocxParagraph], text: &str) -> &'a DocxParagraph {
        paragraphs
            .iter()
            .find(|p| p.text() == text)
            .unwrap_or_else(|| panic!("找不到段落 {:?}", text))
    }

    fn document_xml(bytes: &[u8]) -> String {
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).expect("应该是合法的 zip");
        let mut xml = String::new();
        archive
            .by_name("word/document.xml")
            .unwrap()
            .read_to_string(&mut xml)
            .unwrap();
        xml
    }

    #[test]
    fn test_plan_round_trip() {
        let paragraphs = plan(&quiz_a(false));
        let texts: Vec<String> = paragraphs.iter().map(|p| p.text()).collect();
        assert_eq!(
            texts,
            vec![
                "Quiz A",
                "Question 1:",
                "Capital of the Philippines?",
                "A. Cebu",
                "B. Manila",
                "Feedback:",
                "Manila is the capital.",
                "Total Questions: 1",
            ]
        );

        let title = &paragraphs[0];
        assert_eq!(title.style_id, Some(HEADING_1));
        assert!(title.centered);
        assert_eq!(title.runs[0].style.half_points(), 32);
        assert!(title.runs[0].style.is_bold());

        assert_eq!(find(&paragraphs, "Question 1:").style_id, Some(HEADING_2));
        assert_eq!(find(&paragraphs, "Feedback:").style_id, Some(HEADING_3));

        let b = &find(&paragraphs, "B. Manila").runs[0].style;
        assert!(b.is_bold());
        assert_eq!(b.color, CORRECT_COLOR);
        assert_eq!(find(&paragraphs, "A. Cebu").runs[0].style, TextStyle::BODY);

        let feedback = &find(&paragraphs, "Manila is the capital.").runs[0].style;
        assert!(feedback.is_italic());
        assert_eq!(feedback.color, DEFAULT_COLOR);
    }

    #[test]
    fn test_plan_incorrect_question() {
        let paragraphs = plan(&quiz_a(true));
        let label = find(&paragraphs, "Question 1: [WRONG ANSWER]");
        assert_eq!(label.runs[0].style.color, WARNING_COLOR);
        assert_eq!(
            find(&paragraphs, "Capital of the Philippines?").runs[0].style.color,
            WARNING_COLOR
        );
        assert_eq!(
            find(&paragraphs, "Incorrect Answers: 1").runs[0].style.color,
            WARNING_COLOR
        );
        let markers = paragraphs
            .iter()
            .map(|p| p.text().matches(labels::WRONG_ANSWER_MARKER).count())
            .sum::<usize>();
        assert_eq!(markers, 1);
    }

    #[test]
    fn test_plan_skips_empty_feedback_and_blank_lines() {
        let mut model = quiz_a(false);
        model.items[0].feedback = "  ".to_string();
        assert!(plan(&model).iter().all(|p| p.text() != "Feedback:"));

        model.items[0].feedback = "Line1\n\nLine2".to_string();
        let texts: Vec<String> = plan(&model).iter().map(|p| p.text()).collect();
        let start = texts.iter().position(|t| t == "Feedback:").unwrap();
        assert_eq!(texts[start + 1..start + 3], ["Line1", "Line2"]);
    }

    #[test]
    fn test_every_run_declares_color_and_size() {
        let bytes = DocxRenderer.render(&quiz_a(false)).unwrap();
        let xml = document_xml(&bytes);

        assert!(xml.contains("Quiz A"));
        assert!(xml.contains("B. Manila"));
        assert!(xml.contains("Total Questions: 1"));
        assert!(!xml.contains("Incorrect Answers"));

        // 默认颜色也显式写出
        assert!(xml.contains(&format!("w:val=\"{}\"", CORRECT_COLOR.hex())));
        assert!(xml.contains(&format!("w:val=\"{}\"", DEFAULT_COLOR.hex())));
        assert!(xml.contains("<w:i />") || xml.contains("<w:i/>"));
    }

    #[test]
    fn test_empty_model_is_valid_docx() {
        let bytes = DocxRenderer
            .render(&DocumentModel::new("", Vec::new()))
            .unwrap();
        let xml = document_xml(&bytes);
        assert!(xml.contains("Form Questions and Answers"));
        assert!(xml.contains("Total Questions: 0"));
    }
}
