//! # Form Quiz Export
//!
//! 把已批改的问卷表单页面（HTML）导出为 PDF 或 DOCX 的 Rust 应用程序
//!
//! ## 架构设计
//!
//! 本系统采用严格的四层架构：
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 持有解析后的 DOM，只暴露查询能力
//! - `HtmlDocument` / `CompiledSelector` - 文档与预编译选择器
//! - `dom` - 祖先/后代遍历、class 判断、文本读取
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，只处理单个题块
//! - `MarkerResolver` - 判断选项是否正确、题目是否答错
//! - `FeedbackNormalizer` - 把解析 HTML 规整为纯文本
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义"一个题块"的完整处理流程
//! - `QuestionCtx` - 上下文封装（题块序号 + 已输出题数）
//! - `QuestionFlow` - 流程编排（题干 → 选项 → 正确答案 → 解析 → 答错标记）
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/document_extractor` - 遍历文档的所有题块
//! - `orchestrator/pipeline` - 提取并渲染
//! - `orchestrator/app` - 命令行导出：获取、写文件、打印信封
//!
//! 渲染层 `render/` 把 `DocumentModel` 转换为 PDF 或 DOCX。
//!
//! ## 模块结构

pub mod api;
pub mod clients;
pub mod config;
pub mod error;
pub mod infrastructure;
pub mod models;
pub mod orchestrator;
pub mod render;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use config::Config;
pub use error::{AppError, AppResult};
pub use models::{AnswerOption, DocumentModel, MarkerSet, OutputFormat, QuestionRecord};
pub use orchestrator::{extract_and_render, extract_and_render_with, extract_document, App};
pub use render::{renderer_for, DocumentRenderer};
pub use workflow::{ProcessResult, QuestionCtx, QuestionFlow};
