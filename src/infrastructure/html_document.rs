//! HTML 文档 - 基础设施层
//!
//! 持有唯一的解析后 DOM，只暴露"查询"的能力

use scraper::element_ref::Select;
use scraper::{ElementRef, Html, Selector};

use crate::error::{AppError, AppResult};

/// DOM 中的一个元素
pub type Element<'a> = ElementRef<'a>;

/// 已解析的 HTML 文档
///
/// 职责：
/// - 持有唯一的 DOM 资源
/// - 暴露按选择器查询的能力
/// - 不认识题目 / 选项
/// - 不处理业务流程
pub struct HtmlDocument {
    html: Html,
}

impl HtmlDocument {
    /// 解析完整的 HTML 文档
    ///
    /// html5ever 对任意输入都能容错，不会失败
    pub fn parse(source: &str) -> Self {
        Self {
            html: Html::parse_document(source),
        }
    }

    /// 根元素（`<html>`）
    pub fn root(&self) -> Element<'_> {
        self.html.root_element()
    }

    /// 文档中所有匹配的元素，按文档顺序
    pub fn select_all<'a>(&'a self, selector: &CompiledSelector) -> Vec<Element<'a>> {
        selector.within(self.root()).collect()
    }

    /// 文档中第一个匹配的元素
    pub fn select_first<'a>(&'a self, selector: &CompiledSelector) -> Option<Element<'a>> {
        selector.within(self.root()).next()
    }
}

/// 编译好的 CSS 选择器
#[derive(Debug, Clone)]
pub struct CompiledSelector {
    selector: Selector,
}

impl CompiledSelector {
    /// 编译任意 CSS 选择器
    pub fn parse(raw: &str) -> AppResult<Self> {
        let selector = Selector::parse(raw)
            .map_err(|e| AppError::invalid_selector(raw, format!("{:?}", e)))?;
        Ok(Self { selector })
    }

    /// 按单个类名编译选择器
    pub fn class(class: &str) -> AppResult<Self> {
        let class = class.trim();
        if class.is_empty() || class.contains(char::is_whitespace) {
            return Err(AppError::invalid_selector(class, "类名不能为空或包含空白"));
        }
        Self::parse(&format!(".{}", class))
    }

    /// 在某个元素的后代中查询
    pub fn within<'a, 'b>(&'b self, scope: Element<'a>) -> Select<'a, 'b> {
        scope.select(&self.selector)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_all_keeps_document_order() {
        let doc = HtmlDocument::parse(
            r#"<div class="q">one</div><p><span class="q">two</span></p><div class="q">three</div>"#,
        );
        let selector = CompiledSelector::class("q").unwrap();
        let texts: Vec<String> = doc
            .select_all(&selector)
            .iter()
            .map(|e| e.text().collect::<String>())
            .collect();
        assert_eq!(texts, vec!["one", "two", "three"]);
    }

    #[test]
    fn test_invalid_selectors_are_rejected() {
        assert!(CompiledSelector::class("two words").is_err());
        assert!(CompiledSelector::class("").is_err());
        assert!(CompiledSelector::parse("span[").is_err());
    }

    #[test]
    fn test_malformed_html_still_parses() {
        let doc = HtmlDocument::parse("<div class='q'><span>unclosed");
        let selector = CompiledSelector::class("q").unwrap();
        assert!(doc.select_first(&selector).is_some());
    }
}
