//! 渲染层
//!
//! 把 `DocumentModel` 转换为二进制文档。两种格式共用 `labels` 中的文案和 `style` 中的样式规则。

pub mod docx_renderer;
pub mod labels;
pub mod pdf_renderer;
pub mod style;

pub use docx_renderer::DocxRenderer;
pub use pdf_renderer::PdfRenderer;

use crate::error::AppResult;
use crate::models::{DocumentModel, OutputFormat};

/// 文档渲染器
pub trait DocumentRenderer {
    fn format(&self) -> OutputFormat;

    /// 渲染完整文档，失败时不产生部分输出
    fn render(&self, model: &DocumentModel) -> AppResult<Vec<u8>>;
}

/// 按输出格式选择渲染器
pub fn renderer_for(format: OutputFormat) -> Box<dyn DocumentRenderer> {
    match format {
        OutputFormat::Pdf => Box::new(PdfRenderer),
        OutputFormat::Docx => Box::new(DocxRenderer),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_renderer_for_matches_format() {
        for format in [OutputFormat::Pdf, OutputFormat::Docx] {
            assert_eq!(renderer_for(format).format(), format);
        }
    }
}
