//! DOM 查询原语
//!
//! 业务层只通过这些函数访问 DOM：类名判断、祖先/后代遍历、文本与内部 HTML

use scraper::ElementRef;

use super::html_document::Element;

/// 元素自身是否带有某个类名
pub fn has_class(element: Element<'_>, class: &str) -> bool {
    element.value().classes().any(|c| c == class)
}

/// 元素自身是否带有列表中任一类名
pub fn has_any_class(element: Element<'_>, classes: &[String]) -> bool {
    element
        .value()
        .classes()
        .any(|c| classes.iter().any(|wanted| wanted == c))
}

/// 最近的带有指定类名的祖先（包含自身），类似 jQuery 的 closest
pub fn closest_with_class<'a>(element: Element<'a>, class: &str) -> Option<Element<'a>> {
    if has_class(element, class) {
        return Some(element);
    }
    element
        .ancestors()
        .filter_map(ElementRef::wrap)
        .find(|ancestor| has_class(*ancestor, class))
}

/// 直接父元素
pub fn parent_element(element: Element<'_>) -> Option<Element<'_>> {
    element.parent().and_then(ElementRef::wrap)
}

/// 所有后代元素（不含自身），按文档顺序
pub fn descendant_elements<'a>(element: Element<'a>) -> impl Iterator<Item = Element<'a>> {
    element.descendants().skip(1).filter_map(ElementRef::wrap)
}

/// 是否存在带有列表中任一类名的后代
pub fn has_descendant_with_any_class(element: Element<'_>, classes: &[String]) -> bool {
    descendant_elements(element).any(|d| has_any_class(d, classes))
}

/// 元素在同类兄弟元素中的序号（从 0 开始）
pub fn sibling_ordinal(element: Element<'_>, class: &str) -> usize {
    element
        .prev_siblings()
        .filter_map(ElementRef::wrap)
        .filter(|sibling| has_class(*sibling, class))
        .count()
}

/// 元素的全部文本，去掉首尾空白
pub fn text_of(element: Element<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// 多个元素的文本拼接后去掉首尾空白
pub fn joined_text<'a>(elements: impl Iterator<Item = Element<'a>>) -> String {
    elements
        .flat_map(|e| e.text())
        .collect::<String>()
        .trim()
        .to_string()
}

/// 内部 HTML
pub fn inner_html(element: Element<'_>) -> String {
    element.inner_html()
}

/// 属性值
pub fn attribute<'a>(element: Element<'a>, name: &str) -> Option<&'a str> {
    element.value().attr(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::html_document::{CompiledSelector, HtmlDocument};

    const FRAGMENT: &str = r#"
        <div class="list">
          <div class="choice"><span class="label">A</span></div>
          <p class="noise"></p>
          <div class="choice"><span class="label">B</span><i class="icon check" aria-label="Correct"></i></div>
        </div>"#;

    fn find<'a>(doc: &'a HtmlDocument, selector: &str) -> Vec<Element<'a>> {
        doc.select_all(&CompiledSelector::parse(selector).unwrap())
    }

    #[test]
    fn test_closest_includes_self_and_ancestors() {
        let doc = HtmlDocument::parse(FRAGMENT);
        let icon = find(&doc, "i.icon")[0];
        let choice = closest_with_class(icon, "choice").unwrap();
        assert_eq!(text_of(choice), "B");
        assert!(closest_with_class(choice, "choice").is_some());
        assert!(closest_with_class(icon, "missing").is_none());
    }

    #[test]
    fn test_sibling_ordinal_counts_only_same_class() {
        let doc = HtmlDocument::parse(FRAGMENT);
        let choices = find(&doc, ".choice");
        assert_eq!(sibling_ordinal(choices[0], "choice"), 0);
        assert_eq!(sibling_ordinal(choices[1], "choice"), 1);
    }

    #[test]
    fn test_descendant_class_lookup() {
        let doc = HtmlDocument::parse(FRAGMENT);
        let choices = find(&doc, ".choice");
        let classes = vec!["check".to_string()];
        assert!(!has_descendant_with_any_class(choices[0], &classes));
        assert!(has_descendant_with_any_class(choices[1], &classes));
        assert!(!has_descendant_with_any_class(find(&doc, "i.icon")[0], &classes));
    }

    #[test]
    fn test_attribute_lookup() {
        let doc = HtmlDocument::parse(FRAGMENT);
        let icon = find(&doc, "i.icon")[0];
        assert_eq!(attribute(icon, "aria-label"), Some("Correct"));
        assert_eq!(attribute(icon, "title"), None);
    }

    #[test]
    fn test_joined_text() {
        let doc = HtmlDocument::parse(FRAGMENT);
        assert_eq!(joined_text(find(&doc, ".label").into_iter()), "AB");
    }
}
