//! API 模块
//!
//! 负责与调用方约定的导出请求/响应结构

pub mod envelope;

// 重新导出常用类型
pub use envelope::{ExportRequest, ExportResponse};
