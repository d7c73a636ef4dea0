//! 解析文本规整服务 - 业务能力层
//!
//! 只负责把一段解析 HTML 变成干净的多行纯文本，不做语义改写

use regex::Regex;

use crate::error::AppResult;

/// 解析文本规整服务
///
/// 处理顺序：
/// 1. 去掉 `<div>` / `</div>` 容器标签
/// 2. `<br>` 转换为换行
/// 3. 去掉其余标签，只保留文字（链接、加粗等）
/// 4. 解码 HTML 实体
/// 5. 每行 trim
/// 6. 三个及以上连续换行压缩为两个（只保留一个空行）
/// 7. 去掉首尾空行
pub struct FeedbackNormalizer {
    div_open: Regex,
    div_close: Regex,
    line_break: Regex,
    other_tag: Regex,
    blank_run: Regex,
}

impl FeedbackNormalizer {
    /// 创建新的规整服务
    pub fn new() -> AppResult<Self> {
        Ok(Self {
            div_open: Regex::new(r"(?i)<div[^>]*>")?,
            div_close: Regex::new(r"(?i)</div\s*>")?,
            line_break: Regex::new(r"(?i)<br\s*/?>")?,
            other_tag: Regex::new(r"<[^>]*>")?,
            blank_run: Regex::new(r"\n{3,}")?,
        })
    }

    /// 规整一段 HTML 片段，空输入返回空字符串
    pub fn normalize(&self, html: &str) -> String {
        if html.trim().is_empty() {
            return String::new();
        }

        let text = self.div_open.replace_all(html, "");
        let text = self.div_close.replace_all(&text, "");
        let text = self.line_break.replace_all(&text, "\n");
        let text = self.other_tag.replace_all(&text, "");
        let text = html_escape::decode_html_entities(&text);

        let trimmed = text.lines().map(str::trim).collect::<Vec<_>>().join("\n");
        let collapsed = self.blank_run.replace_all(&trimmed, "\n\n");

        collapsed.trim_matches('\n').to_string()
    }
}
