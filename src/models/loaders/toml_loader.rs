use crate::models::markers::MarkerSet;
use anyhow::{Context, Result};
use std::path::Path;
use tokio::fs;

/// 从 TOML 文本解析标记词表，未出现的字段使用默认值
pub fn parse_marker_set(content: &str) -> Result<MarkerSet> {
    let markers: MarkerSet = toml::from_str(content).context("无法解析标记词表")?;
    Ok(markers)
}

/// 从 TOML 文件加载标记词表
pub async fn load_marker_set(toml_file_path: &Path) -> Result<MarkerSet> {
    if !toml_file_path.exists() {
        anyhow::bail!("标记词表文件不存在: {}", toml_file_path.display());
    }

    let content = fs::read_to_string(toml_file_path)
        .await
        .with_context(|| format!("无法读取TOML文件: {}", toml_file_path.display()))?;

    let markers = parse_marker_set(&content)
        .with_context(|| format!("无法解析TOML文件: {}", toml_file_path.display()))?;

    tracing::info!(
        "已加载标记词表: {} ({} 个正确词, {} 个否定词)",
        toml_file_path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy(),
        markers.correct_words.len(),
        markers.negative_words.len()
    );

    Ok(markers)
}
