//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 本层负责文档级别的流程调度，是整个系统的"指挥中心"。
//!
//! ## 模块划分
//!
//! ### `app` - 导出应用
//! - 校验配置、加载标记词表
//! - 获取表单 HTML
//! - 写出文件，打印信封
//!
//! ### `document_extractor` - 文档提取器
//! - 读取标题
//! - 按文档顺序遍历题块，交给 `QuestionFlow`
//! - 输出提取统计
//!
//! ### `pipeline` - 提取并渲染
//! - HTML → 文档模型 → 二进制文档
//!
//! ## 层次关系
//!
//! ```text
//! app (一次导出)
//!     ↓
//! document_extractor (处理所有题块)
//!     ↓
//! workflow::QuestionFlow (处理单个题块)
//!     ↓
//! services (能力层：marker_resolver / feedback_normalizer)
//!     ↓
//! infrastructure (基础设施：HtmlDocument / dom)
//! ```

pub mod app;
pub mod document_extractor;
pub mod pipeline;

// 重新导出主要类型
pub use app::App;
pub use document_extractor::{extract_document, DocumentExtractor, Extraction, ExtractionStats};
pub use pipeline::{extract_and_render, extract_and_render_with};
