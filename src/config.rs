use std::path::PathBuf;

use crate::error::{AppError, AppResult, ConfigError};
use crate::models::OutputFormat;

/// 程序配置文件
#[derive(Clone, Debug)]
pub struct Config {
    /// 表单地址（http/https 链接或本地 HTML 文件路径）
    pub form_url: String,
    /// 输出文件名（不含扩展名）
    pub file_name: String,
    /// 输出格式: pdf / docx
    pub file_type: String,
    /// 输出目录
    pub output_dir: String,
    /// 请求表单时使用的 User-Agent
    pub user_agent: String,
    /// 自定义标记词表 TOML 文件
    pub markers_file: Option<String>,
    /// 是否在标准输出打印 JSON 信封
    pub emit_envelope: bool,
    /// 是否在标准输出打印提取出的文档模型
    pub dump_model: bool,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            form_url: String::new(),
            file_name: "form_export".to_string(),
            file_type: "pdf".to_string(),
            output_dir: "output".to_string(),
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36".to_string(),
            markers_file: None,
            emit_envelope: false,
            dump_model: false,
            verbose_logging: false,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            form_url: std::env::var("FORM_URL").unwrap_or(default.form_url),
            file_name: std::env::var("FILE_NAME").unwrap_or(default.file_name),
            file_type: std::env::var("FILE_TYPE").unwrap_or(default.file_type),
            output_dir: std::env::var("OUTPUT_DIR").unwrap_or(default.output_dir),
            user_agent: std::env::var("USER_AGENT").unwrap_or(default.user_agent),
            markers_file: std::env::var("MARKERS_FILE").ok().filter(|v| !v.trim().is_empty()),
            emit_envelope: std::env::var("EMIT_ENVELOPE").ok().and_then(|v| v.parse().ok()).unwrap_or(default.emit_envelope),
            dump_model: std::env::var("DUMP_MODEL").ok().and_then(|v| v.parse().ok()).unwrap_or(default.dump_model),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
        }
    }

    /// 用命令行第一个参数覆盖表单地址
    pub fn with_form_url(mut self, form_url: Option<String>) -> Self {
        if let Some(url) = form_url.filter(|u| !u.trim().is_empty()) {
            self.form_url = url;
        }
        self
    }

    /// 解析输出格式
    pub fn output_format(&self) -> AppResult<OutputFormat> {
        self.file_type.parse()
    }

    /// 检查必填项
    pub fn validate(&self) -> AppResult<()> {
        if self.form_url.trim().is_empty() {
            return Err(AppError::Config(ConfigError::MissingSource));
        }
        self.output_format()?;
        Ok(())
    }

    /// 输出文件完整路径: output_dir/file_name.ext
    pub fn output_path(&self) -> AppResult<PathBuf> {
        let format = self.output_format()?;
        Ok(PathBuf::from(&self.output_dir).join(format.file_name(&self.file_name)))
    }
}
