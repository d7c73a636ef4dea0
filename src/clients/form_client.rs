/// 表单页面客户端
///
/// 封装获取表单 HTML 的逻辑：远程链接走 HTTP，其余当作本地文件读取
use crate::config::Config;
use crate::error::{AppError, AppResult, SourceError};
use tracing::{debug, info};

/// 表单页面来源
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormSource {
    /// http / https 链接
    Remote(String),
    /// 本地保存的 HTML 文件
    Local(String),
}

impl FormSource {
    /// 根据地址判断来源类型
    pub fn detect(location: &str) -> Self {
        let location = location.trim();
        let lower = location.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            FormSource::Remote(location.to_string())
        } else if let Some(path) = location.strip_prefix("file://") {
            FormSource::Local(path.to_string())
        } else {
            FormSource::Local(location.to_string())
        }
    }
}

/// 表单客户端
pub struct FormClient {
    http: reqwest::Client,
    user_agent: String,
}

impl FormClient {
    /// 创建新的表单客户端
    pub fn new(config: &Config) -> Self {
        Self {
            http: reqwest::Client::new(),
            user_agent: config.user_agent.clone(),
        }
    }

    /// 获取表单 HTML
    ///
    /// # 参数
    /// - `location`: 表单链接或本地文件路径
    ///
    /// # 返回
    /// 返回页面原始 HTML；网络错误、非 2xx 状态、文件读取失败都归为 `SourceError`
    pub async fn fetch_html(&self, location: &str) -> AppResult<String> {
        match FormSource::detect(location) {
            FormSource::Remote(url) => self.fetch_remote(&url).await,
            FormSource::Local(path) => Self::read_local(&path).await,
        }
    }

    async fn fetch_remote(&self, url: &str) -> AppResult<String> {
        info!("🌐 正在获取表单: {}", url);

        let response = self
            .http
            .get(url)
            .header(reqwest::header::USER_AGENT, &self.user_agent)
            .send()
            .await
            .map_err(|e| AppError::source_request_failed(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::Source(SourceError::BadStatus {
                url: url.to_string(),
                status: status.as_u16(),
            }));
        }

        let body = response
            .text()
            .await
            .map_err(|e| AppError::source_request_failed(url, e))?;

        debug!("表单 HTML 长度: {} 字节", body.len());
        Ok(body)
    }

    async fn read_local(path: &str) -> AppResult<String> {
        info!("📄 正在读取本地页面: {}", path);
        let body = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| AppError::source_read_failed(path, e))?;
        debug!("页面 HTML 长度: {} 字节", body.len());
        Ok(body)
    }
}
