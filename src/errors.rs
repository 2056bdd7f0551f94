use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnaplinkError {
    InvalidUrl(String),
    InvalidCodeFormat(String),
    CodeConflict(String),
    AllocationExhausted(String),
    NotFound(String),
    StoreUnavailable(String),
    Config(String),
    FileOperation(String),
}

impl SnaplinkError {
    /// 获取错误代码
    pub fn code(&self) -> &'static str {
        match self {
            SnaplinkError::InvalidUrl(_) => "E001",
            SnaplinkError::InvalidCodeFormat(_) => "E002",
            SnaplinkError::CodeConflict(_) => "E003",
            SnaplinkError::AllocationExhausted(_) => "E004",
            SnaplinkError::NotFound(_) => "E005",
            SnaplinkError::StoreUnavailable(_) => "E006",
            SnaplinkError::Config(_) => "E007",
            SnaplinkError::FileOperation(_) => "E008",
        }
    }

    /// 获取错误类型名称
    pub fn error_type(&self) -> &'static str {
        match self {
            SnaplinkError::InvalidUrl(_) => "Invalid URL",
            SnaplinkError::InvalidCodeFormat(_) => "Invalid Code Format",
            SnaplinkError::CodeConflict(_) => "Code Conflict",
            SnaplinkError::AllocationExhausted(_) => "Allocation Exhausted",
            SnaplinkError::NotFound(_) => "Not Found",
            SnaplinkError::StoreUnavailable(_) => "Store Unavailable",
            SnaplinkError::Config(_) => "Configuration Error",
            SnaplinkError::FileOperation(_) => "File Operation Error",
        }
    }

    /// 获取错误详情
    pub fn message(&self) -> &str {
        match self {
            SnaplinkError::InvalidUrl(msg)
            | SnaplinkError::InvalidCodeFormat(msg)
            | SnaplinkError::CodeConflict(msg)
            | SnaplinkError::AllocationExhausted(msg)
            | SnaplinkError::NotFound(msg)
            | SnaplinkError::StoreUnavailable(msg)
            | SnaplinkError::Config(msg)
            | SnaplinkError::FileOperation(msg) => msg,
        }
    }

    /// HTTP status for the API layer.
    ///
    /// Only `StoreUnavailable` and the ambient kinds become a 500; everything
    /// else is a caller-visible outcome.
    #[cfg(feature = "server")]
    pub fn http_status(&self) -> actix_web::http::StatusCode {
        use actix_web::http::StatusCode;

        match self {
            SnaplinkError::InvalidUrl(_) | SnaplinkError::InvalidCodeFormat(_) => {
                StatusCode::BAD_REQUEST
            }
            SnaplinkError::CodeConflict(_) => StatusCode::CONFLICT,
            SnaplinkError::NotFound(_) => StatusCode::NOT_FOUND,
            SnaplinkError::AllocationExhausted(_) => StatusCode::SERVICE_UNAVAILABLE,
            SnaplinkError::StoreUnavailable(_)
            | SnaplinkError::Config(_)
            | SnaplinkError::FileOperation(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 是否为内部错误（对外只暴露通用提示）
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            SnaplinkError::StoreUnavailable(_)
                | SnaplinkError::Config(_)
                | SnaplinkError::FileOperation(_)
        )
    }

    /// 格式化为彩色输出（用于 Server 模式）
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        format!(
            "{} {} {}\n  {}",
            "[ERROR]".red().bold(),
            self.code().yellow(),
            self.error_type().red(),
            self.message().white()
        )
    }

    /// 格式化为简洁输出（用于 CLI 模式）
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for SnaplinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for SnaplinkError {}

// 便捷的构造函数
impl SnaplinkError {
    pub fn invalid_url<T: Into<String>>(msg: T) -> Self {
        SnaplinkError::InvalidUrl(msg.into())
    }

    pub fn invalid_code_format<T: Into<String>>(msg: T) -> Self {
        SnaplinkError::InvalidCodeFormat(msg.into())
    }

    pub fn code_conflict<T: Into<String>>(msg: T) -> Self {
        SnaplinkError::CodeConflict(msg.into())
    }

    pub fn allocation_exhausted<T: Into<String>>(msg: T) -> Self {
        SnaplinkError::AllocationExhausted(msg.into())
    }

    pub fn not_found<T: Into<String>>(msg: T) -> Self {
        SnaplinkError::NotFound(msg.into())
    }

    pub fn store_unavailable<T: Into<String>>(msg: T) -> Self {
        SnaplinkError::StoreUnavailable(msg.into())
    }

    pub fn config<T: Into<String>>(msg: T) -> Self {
        SnaplinkError::Config(msg.into())
    }

    pub fn file_operation<T: Into<String>>(msg: T) -> Self {
        SnaplinkError::FileOperation(msg.into())
    }
}

impl From<sea_orm::DbErr> for SnaplinkError {
    fn from(err: sea_orm::DbErr) -> Self {
        SnaplinkError::StoreUnavailable(err.to_string())
    }
}

impl From<std::io::Error> for SnaplinkError {
    fn from(err: std::io::Error) -> Self {
        SnaplinkError::FileOperation(err.to_string())
    }
}

impl From<config::ConfigError> for SnaplinkError {
    fn from(err: config::ConfigError) -> Self {
        SnaplinkError::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SnaplinkError>;
