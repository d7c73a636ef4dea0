//! 导出应用 - 编排层
//!
//! ## 职责
//!
//! 本模块是命令行程序的入口，负责一次完整的导出。
//!
//! ## 核心功能
//!
//! 1. **应用初始化**：校验配置、加载标记词表、创建表单客户端
//! 2. **获取表单**：远程链接或本地 HTML 文件
//! 3. **提取与渲染**：委托 `DocumentExtractor` 和渲染器
//! 4. **输出结果**：写入 `output_dir/file_name.ext`，按需打印 JSON 信封或文档模型

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::api::{ExportRequest, ExportResponse};
use crate::clients::FormClient;
use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::models::{load_marker_set, MarkerSet, OutputFormat};
use crate::orchestrator::document_extractor::DocumentExtractor;
use crate::render::renderer_for;
use crate::utils::logging;

/// 应用主结构
pub struct App {
    config: Config,
    format: OutputFormat,
    client: FormClient,
    markers: MarkerSet,
}

impl App {
    /// 初始化应用
    pub async fn initialize(config: Config) -> Result<Self> {
        config.validate()?;
        let format = config.output_format()?;

        logging::log_startup(&config.form_url, format.extension());

        let markers = match &config.markers_file {
            Some(path) => load_marker_set(Path::new(path))
                .await
                .with_context(|| format!("无法加载标记词表: {}", path))?,
            None => MarkerSet::default(),
        };

        let client = FormClient::new(&config);

        Ok(Self {
            config,
            format,
            client,
            markers,
        })
    }

    /// 运行应用主逻辑，返回输出文件路径
    pub async fn run(&self) -> Result<PathBuf> {
        let result = self.export().await;

        if self.config.emit_envelope {
            let request = ExportRequest::from_config(&self.config)?;
            let envelope = ExportResponse::from_result(&result, &request);
            println!("{}", serde_json::to_string(&envelope)?);
        }

        let bytes = result.context("表单导出失败")?;
        let path = self.write_output(&bytes).await?;

        logging::log_export_complete(&path.display().to_string(), bytes.len());
        Ok(path)
    }

    /// 获取 → 提取 → 渲染
    async fn export(&self) -> AppResult<Vec<u8>> {
        let html = self.client.fetch_html(&self.config.form_url).await?;

        let extractor = DocumentExtractor::new(self.markers.clone(), self.config.verbose_logging)?;
        let extraction = extractor.extract(&html)?;
        logging::log_extraction_summary(&extraction.stats);

        if extraction.model.is_empty() {
            warn!("⚠️ 没有提取到任何题目，仍然输出空文档");
        }

        if self.config.dump_model {
            println!("{}", serde_json::to_string_pretty(&extraction.model)?);
        }

        info!("🖨️ 正在渲染 {} 文档...", self.format);
        renderer_for(self.format).render(&extraction.model)
    }

    /// 写入输出文件
    async fn write_output(&self, bytes: &[u8]) -> AppResult<PathBuf> {
        let path = self.config.output_path()?;
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(dir)
                .await
                .map_err(|e| AppError::file_write_failed(dir.display().to_string(), e))?;
        }
        tokio::fs::write(&path, bytes)
            .await
            .map_err(|e| AppError::file_write_failed(path.display().to_string(), e))?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_initialize_rejects_missing_source() {
        let result = App::initialize(Config::default()).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_initialize_reports_missing_markers_file() {
        let config = Config {
            form_url: "page.html".to_string(),
            markers_file: Some("/nonexistent/markers.toml".to_string()),
            ..Default::default()
        };
        let err = App::initialize(config).await.err().unwrap();
        assert!(err.to_string().contains("标记词表"));
    }

    #[tokio::test]
    async fn test_run_fails_for_unreadable_source() {
        let config = Config {
            form_url: "/nonexistent/form.html".to_string(),
            ..Default::default()
        };
        let app = App::initialize(config).await.unwrap();
        let err = app.run().await.err().unwrap();
        let source = err.downcast_ref::<AppError>().unwrap();
        assert!(source.is_source_unavailable());
    }
}
