//! 提取并渲染
//!
//! 核心对外操作：HTML → 文档模型 → 二进制文档。获取 HTML 和打包结果由调用方负责。

use tracing::debug;

use crate::error::AppResult;
use crate::models::{MarkerSet, OutputFormat};
use crate::orchestrator::document_extractor::extract_document;
use crate::render::renderer_for;

/// 使用给定词表提取并渲染
pub fn extract_and_render_with(
    html: &str,
    format: OutputFormat,
    markers: &MarkerSet,
) -> AppResult<Vec<u8>> {
    let extraction = extract_document(html, markers)?;
    debug!(
        "提取到 {} 道题，渲染为 {}",
        extraction.model.question_count(),
        format
    );
    renderer_for(format).render(&extraction.model)
}

/// 使用默认词表提取并渲染
pub fn extract_and_render(html: &str, format: OutputFormat) -> AppResult<Vec<u8>> {
    extract_and_render_with(html, format, &MarkerSet::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_html_still_renders_both_formats() {
        let pdf = extract_and_render("", OutputFormat::Pdf).unwrap();
        assert!(pdf.starts_with(b"%PDF"));
        let docx = extract_and_render("", OutputFormat::Docx).unwrap();
        // zip 文件头
        assert!(docx.starts_with(b"PK"));
    }

    #[test]
    fn test_invalid_markers_fail_before_rendering() {
        let markers = MarkerSet {
            title_class: String::new(),
            ..MarkerSet::default()
        };
        assert!(extract_and_render_with("<p></p>", OutputFormat::Pdf, &markers).is_err());
    }
}
