use std::fmt;
use std::str::FromStr;

use crate::error::{AppError, ConfigError};

/// 输出格式枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// PDF 文档
    Pdf,
    /// Word 文档
    Docx,
}

impl OutputFormat {
    /// 文件扩展名
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Pdf => "pdf",
            OutputFormat::Docx => "docx",
        }
    }

    /// MIME 类型
    pub fn mime_type(self) -> &'static str {
        match self {
            OutputFormat::Pdf => "application/pdf",
            OutputFormat::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
        }
    }

    /// 拼接带扩展名的文件名
    pub fn file_name(self, stem: &str) -> String {
        format!("{}.{}", stem, self.extension())
    }
}

impl FromStr for OutputFormat {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pdf" => Ok(OutputFormat::Pdf),
            "docx" => Ok(OutputFormat::Docx),
            _ => Err(AppError::Config(ConfigError::UnknownFormat {
                value: s.to_string(),
            })),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(" PDF ".parse::<OutputFormat>().unwrap(), OutputFormat::Pdf);
        assert_eq!("Docx".parse::<OutputFormat>().unwrap(), OutputFormat::Docx);
        assert!("rtf".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_file_name() {
        assert_eq!(OutputFormat::Docx.file_name("quiz"), "quiz.docx");
        assert_eq!(OutputFormat::Pdf.to_string(), "pdf");
    }
}
