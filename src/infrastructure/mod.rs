//! 基础设施层
//!
//! 持有解析后的 DOM，只暴露查询能力

pub mod dom;
pub mod html_document;

pub use html_document::{CompiledSelector, Element, HtmlDocument};
