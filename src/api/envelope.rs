//! 导出请求/响应信封
//!
//! 与网页端约定的 JSON 结构（camelCase 字段）

use base64::{engine::general_purpose, Engine};
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::AppResult;
use crate::models::OutputFormat;

const DEFAULT_ERROR: &str = "An error occurred while processing the form";

/// 导出请求
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportRequest {
    pub form_link: String,
    pub file_name: String,
    pub file_type: OutputFormat,
}

impl ExportRequest {
    /// 从配置构造请求
    pub fn from_config(config: &Config) -> AppResult<Self> {
        Ok(Self {
            form_link: config.form_url.clone(),
            file_name: config.file_name.clone(),
            file_type: config.output_format()?,
        })
    }

    /// 带扩展名的下载文件名
    pub fn download_name(&self) -> String {
        self.file_type.file_name(&self.file_name)
    }
}

/// 导出响应
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportResponse {
    pub success: bool,
    /// base64 编码的文档
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ExportResponse {
    pub fn success(bytes: &[u8], file_name: impl Into<String>) -> Self {
        Self {
            success: true,
            data: Some(general_purpose::STANDARD.encode(bytes)),
            file_name: Some(file_name.into()),
            error: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            success: false,
            data: None,
            file_name: None,
            error: Some(if message.trim().is_empty() {
                DEFAULT_ERROR.to_string()
            } else {
                message
            }),
        }
    }

    /// 把一次导出的结果装进信封
    pub fn from_result(result: &AppResult<Vec<u8>>, request: &ExportRequest) -> Self {
        match result {
            Ok(bytes) => Self::success(bytes, request.download_name()),
            Err(e) => Self::failure(e.to_string()),
        }
    }

    /// 解码文档内容
    pub fn decode_data(&self) -> Option<Vec<u8>> {
        self.data
            .as_deref()
            .and_then(|d| general_purpose::STANDARD.decode(d).ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{AppError, ConfigError};

    fn request() -> ExportRequest {
        ExportRequest {
            form_link: "https://docs.google.com/forms/d/e/x/viewscore".to_string(),
            file_name: "quiz".to_string(),
            file_type: OutputFormat::Docx,
        }
    }

    #[test]
    fn test_request_parses_camel_case() {
        let json = r#"{"formLink":"https://example.com/f","fileName":"quiz","fileType":"pdf"}"#;
        let request: ExportRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.file_type, OutputFormat::Pdf);
        assert_eq!(request.download_name(), "quiz.pdf");
    }

    #[test]
    fn test_success_envelope() {
        let response = ExportResponse::from_result(&Ok(b"%PDF".to_vec()), &request());
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["data"], "JVBERg==");
        assert_eq!(json["fileName"], "quiz.docx");
        assert!(json.get("error").is_none());
        assert_eq!(response.decode_data().unwrap(), b"%PDF");
    }

    #[test]
    fn test_failure_envelope() {
        let result: AppResult<Vec<u8>> = Err(AppError::Config(ConfigError::MissingSource));
        let response = ExportResponse::from_result(&result, &request());
        assert!(!response.success);
        assert!(response.data.is_none());
        assert!(response.error.unwrap().contains("表单"));
        assert_eq!(
            ExportResponse::failure("").error.as_deref(),
            Some(DEFAULT_ERROR)
        );
    }
}
