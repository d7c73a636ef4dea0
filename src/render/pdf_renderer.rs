//! PDF 渲染器
//!
//! 从上到下线性排版，超出页底自动分页。使用 PDF 标准 Type 1 字体（Times 系列），不嵌入字体。
//!
//! 内容流里的字体和颜色是"当前状态"，不会自动恢复。这里用显式的 `StyleState`
//! 贯穿整个排版过程：每道题开始前、每段解析开始前都必须调用 `reset_style()`，
//! 写题目和写解析的函数要求传入重置后得到的 `StyleReset`，漏掉重置无法通过编译。

use std::mem;

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};
use tracing::debug;

use crate::error::{AppError, AppResult};
use crate::models::{DocumentModel, OutputFormat, QuestionRecord};
use crate::render::labels;
use crate::render::style::{FontFace, Role, TextStyle};
use crate::render::DocumentRenderer;

/// A4
const PAGE_WIDTH: f32 = 595.0;
const PAGE_HEIGHT: f32 = 842.0;
const MARGIN: f32 = 72.0;
const LINE_SPACING: f32 = 1.2;
/// 平均字宽（相对字号），用于估算换行和居中
const GLYPH_WIDTH_EM: f32 = 0.5;

/// 字形 → (资源名, 标准字体名)
const FONTS: [(FontFace, &str, &str); 3] = [
    (FontFace::Regular, "F1", "Times-Roman"),
    (FontFace::Bold, "F2", "Times-Bold"),
    (FontFace::Italic, "F3", "Times-Italic"),
];

fn font_resource(face: FontFace) -> &'static str {
    FONTS
        .iter()
        .find(|(f, _, _)| *f == face)
        .map(|(_, name, _)| *name)
        .unwrap_or("F1")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Align {
    Left,
    Center,
}

/// 内容流当前的字体与颜色
#[derive(Debug, Default)]
struct StyleState {
    current: Option<TextStyle>,
}

/// 样式已重置的凭证
#[must_use]
struct StyleReset {
    _private: (),
}

impl StyleState {
    /// 切换到目标样式，只输出发生变化的操作符
    fn apply(&mut self, style: TextStyle, ops: &mut Vec<Operation>) {
        let previous = self.current;

        let font_changed = previous.map_or(true, |p| p.face != style.face || p.size != style.size);
        if font_changed {
            ops.push(Operation::new(
                "Tf",
                vec![
                    Object::Name(font_resource(style.face).as_bytes().to_vec()),
                    Object::Real(style.size),
                ],
            ));
        }

        if previous.map_or(true, |p| p.color != style.color) {
            let [r, g, b] = style.color.unit();
            ops.push(Operation::new(
                "rg",
                vec![Object::Real(r), Object::Real(g), Object::Real(b)],
            ));
        }

        self.current = Some(style);
    }

    /// 回到正文默认样式
    fn reset(&mut self, ops: &mut Vec<Operation>) -> StyleReset {
        self.apply(TextStyle::BODY, ops);
        StyleReset { _private: () }
    }

    /// 新页面的内容流从空状态开始
    fn invalidate(&mut self) {
        self.current = None;
    }
}

/// 分页排版流
struct PageFlow {
    pages: Vec<Vec<Operation>>,
    ops: Vec<Operation>,
    /// 下一行的上边沿
    y: f32,
    state: StyleState,
}

impl PageFlow {
    fn new() -> Self {
        Self {
            pages: Vec::new(),
            ops: Vec::new(),
            y: PAGE_HEIGHT - MARGIN,
            state: StyleState::default(),
        }
    }

    fn at_page_top(&self) -> bool {
        self.y >= PAGE_HEIGHT - MARGIN
    }

    fn break_page(&mut self) {
        self.pages.push(mem::take(&mut self.ops));
        self.y = PAGE_HEIGHT - MARGIN;
        self.state.invalidate();
    }

    fn reset_style(&mut self) -> StyleReset {
        self.state.reset(&mut self.ops)
    }

    /// 垂直留白，页首不留白
    fn gap(&mut self, amount: f32) {
        if self.at_page_top() {
            return;
        }
        if self.y - amount < MARGIN {
            self.break_page();
        } else {
            self.y -= amount;
        }
    }

    fn write_line(&mut self, text: &str, style: TextStyle, align: Align) {
        let height = style.size * LINE_SPACING;
        if self.y - height < MARGIN {
            self.break_page();
        }
        self.y -= height;

        self.state.apply(style, &mut self.ops);

        let x = match align {
            Align::Left => MARGIN,
            Align::Center => ((PAGE_WIDTH - estimate_width(text, style.size)) / 2.0).max(MARGIN),
        };

        self.ops.push(Operation::new("BT", vec![]));
        self.ops.push(Operation::new(
            "Td",
            vec![Object::Real(x), Object::Real(self.y)],
        ));
        self.ops.push(Operation::new(
            "Tj",
            vec![Object::string_literal(encode_win_ansi(text))],
        ));
        self.ops.push(Operation::new("ET", vec![]));
    }

    /// 写一个段落，超过栏宽自动换行
    fn paragraph(&mut self, text: &str, style: TextStyle, align: Align) {
        for line in textwrap::wrap(text, columns_for(style.size)) {
            self.write_line(&line, style, align);
        }
    }

    fn finish(mut self) -> Vec<Vec<Operation>> {
        if !self.ops.is_empty() || self.pages.is_empty() {
            self.pages.push(mem::take(&mut self.ops));
        }
        self.pages
    }
}

fn estimate_width(text: &str, size: f32) -> f32 {
    text.chars().count() as f32 * size * GLYPH_WIDTH_EM
}

fn columns_for(size: f32) -> usize {
    (((PAGE_WIDTH - 2.0 * MARGIN) / (size * GLYPH_WIDTH_EM)) as usize).max(1)
}

/// 标准字体使用 WinAnsiEncoding，无法表示的字符替换为 `?`
fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            '\t' | '\n' | '\r' => b' ',
            c if (c as u32) < 0x20 => b' ',
            c if (c as u32) < 0x80 => c as u8,
            c if (0xA0..=0xFF).contains(&(c as u32)) => c as u32 as u8,
            '€' => 0x80,
            '…' => 0x85,
            '‘' => 0x91,
            '’' => 0x92,
            '“' => 0x93,
            '”' => 0x94,
            '•' => 0x95,
            '–' => 0x96,
            '—' => 0x97,
            _ => b'?',
        })
        .collect()
}

// ========== 排版过程 ==========

fn layout(model: &DocumentModel) -> Vec<Vec<Operation>> {
    let mut flow = PageFlow::new();

    let reset = flow.reset_style();
    write_title(&mut flow, reset, &model.title);

    for (index, item) in model.items.iter().enumerate() {
        let reset = flow.reset_style();
        write_question(&mut flow, reset, index + 1, item);
    }

    let reset = flow.reset_style();
    write_summary(&mut flow, reset, model);

    flow.finish()
}

fn write_title(flow: &mut PageFlow, _reset: StyleReset, title: &str) {
    flow.paragraph(title, Role::Title.style(), Align::Center);
    flow.gap(24.0);
}

fn write_question(flow: &mut PageFlow, _reset: StyleReset, number: usize, item: &QuestionRecord) {
    let incorrect = item.is_incorrect;

    flow.paragraph(
        &labels::question_label(number, incorrect),
        Role::QuestionLabel { incorrect }.style(),
        Align::Left,
    );
    flow.gap(6.0);
    flow.paragraph(&item.question, Role::Prompt { incorrect }.style(), Align::Left);
    flow.gap(12.0);

    for (index, answer) in item.answers.iter().enumerate() {
        flow.paragraph(
            &labels::answer_line(index, &answer.text),
            Role::Answer {
                correct: answer.is_correct,
            }
            .style(),
            Align::Left,
        );
        flow.gap(6.0);
    }

    if item.has_feedback() {
        let reset = flow.reset_style();
        write_feedback(flow, reset, item);
    }

    flow.gap(12.0);
}

fn write_feedback(flow: &mut PageFlow, _reset: StyleReset, item: &QuestionRecord) {
    flow.gap(6.0);
    flow.paragraph(labels::FEEDBACK_LABEL, Role::FeedbackLabel.style(), Align::Left);
    flow.gap(6.0);
    for line in item.feedback_lines() {
        flow.paragraph(line, Role::FeedbackLine.style(), Align::Left);
    }
}

fn write_summary(flow: &mut PageFlow, _reset: StyleReset, model: &DocumentModel) {
    flow.gap(12.0);
    flow.paragraph(
        &labels::total_line(model.question_count()),
        Role::Total.style(),
        Align::Left,
    );

    let incorrect = model.incorrect_count();
    if incorrect > 0 {
        flow.paragraph(
            &labels::incorrect_line(incorrect),
            Role::IncorrectSummary.style(),
            Align::Left,
        );
    }
}

// ========== 组装 PDF ==========

fn assemble(title: &str, pages: Vec<Vec<Operation>>) -> Result<Vec<u8>, lopdf::Error> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let mut fonts = lopdf::Dictionary::new();
    for (_, resource, base_font) in FONTS {
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => base_font,
            "Encoding" => "WinAnsiEncoding",
        });
        fonts.set(resource, font_id);
    }
    let resources_id = doc.add_object(dictionary! {
        "Font" => fonts,
    });

    let mut kids = Vec::with_capacity(pages.len());
    for operations in pages {
        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(Object::Reference(page_id));
    }

    let count = kids.len() as i64;
    let pages_dict = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => count,
        "Resources" => resources_id,
        "MediaBox" => vec![0.into(), 0.into(), Object::Real(PAGE_WIDTH), Object::Real(PAGE_HEIGHT)],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    let info_id = doc.add_object(dictionary! {
        "Title" => Object::string_literal(encode_win_ansi(title)),
        "Producer" => Object::string_literal("form_quiz_export"),
    });
    doc.trailer.set("Root", catalog_id);
    doc.trailer.set("Info", info_id);
    doc.compress();

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer)?;
    Ok(buffer)
}

/// PDF 渲染器
#[derive(Debug, Default, Clone, Copy)]
pub struct PdfRenderer;

impl DocumentRenderer for PdfRenderer {
    fn format(&self) -> OutputFormat {
        OutputFormat::Pdf
    }

    fn render(&self, model: &DocumentModel) -> AppResult<Vec<u8>> {
        let pages = layout(model);
        debug!("PDF 排版完成: {} 页", pages.len());
        assemble(&model.title, pages).map_err(|e| AppError::render_failed("pdf", e))
    }
}
