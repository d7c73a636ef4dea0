/// 日志工具模块
///
/// 提供日志初始化、格式化和输出的辅助函数
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::orchestrator::ExtractionStats;

/// 初始化日志
///
/// `RUST_LOG` 优先；否则默认 info，`verbose` 时为 debug。
/// 重复调用不会报错（测试中会多次调用）。
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// 记录程序启动信息
///
/// # 参数
/// - `source`: 表单地址
/// - `format`: 输出格式
pub fn log_startup(source: &str, format: &str) {
    info!("{}", "=".repeat(60));
    info!(
        "🚀 表单导出启动 - {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("🔗 表单: {}", truncate_text(source, 80));
    info!("📄 输出格式: {}", format);
    info!("{}", "=".repeat(60));
}

/// 记录提取统计
pub fn log_extraction_summary(stats: &ExtractionStats) {
    info!("\n{}", "─".repeat(60));
    info!(
        "✓ 提取完成: 题块 {} 个, 输出题目 {} 道",
        stats.blocks, stats.emitted
    );
    if stats.skipped() > 0 {
        info!(
            "⏭️ 跳过 {} 个题块 (无题干 {}, 无选项 {})",
            stats.skipped(),
            stats.skipped_no_prompt,
            stats.skipped_no_answers
        );
    }
    if stats.fallback_recoveries > 0 {
        info!("🔁 位置兜底恢复 {} 道题的正确答案", stats.fallback_recoveries);
    }
    if stats.without_correct > 0 {
        warn!("⚠️ {} 道题没有识别出正确答案", stats.without_correct);
    }
    if stats.incorrect > 0 {
        info!("❌ 答错题目: {} 道", stats.incorrect);
    }
    info!("{}", "─".repeat(60));
}

/// 记录导出完成信息
///
/// # 参数
/// - `path`: 输出文件路径
/// - `bytes`: 文件大小
pub fn log_export_complete(path: &str, bytes: usize) {
    info!("\n{}", "=".repeat(60));
    info!("📊 导出完成");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("✅ 文件: {} ({} 字节)", path, bytes);
    info!("{}", "=".repeat(60));
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
