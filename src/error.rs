use std::fmt;

/// 应用程序错误类型
#[derive(Debug)]
pub enum AppError {
    /// API 调用错误
    Api(ApiError),
    /// 配置错误
    Config(ConfigError),
    /// 其他错误（用于包装第三方库错误）
    Other(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Api(e) => write!(f, "API错误: {}", e),
            AppError::Config(e) => write!(f, "配置错误: {}", e),
            AppError::Other(msg) => write!(f, "错误: {}", msg),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Api(e) => Some(e),
            AppError::Config(e) => Some(e),
            AppError::Other(_) => None,
        }
    }
}

/// API 调用错误
#[derive(Debug)]
pub enum ApiError {
    /// 网络请求失败（连接、超时等，尚未拿到任何响应）
    RequestFailed {
        endpoint: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 远端返回非 2xx 状态码
    BadStatus {
        endpoint: String,
        status: u16,
    },
    /// JSON 解析失败
    JsonParseFailed {
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 远端在 2xx 响应体内返回了 error 字段
    RemoteError {
        endpoint: String,
        message: String,
    },
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::RequestFailed { endpoint, source } => {
                write!(f, "API请求失败 ({}): {}", endpoint, source)
            }
            ApiError::BadStatus { endpoint, status } => {
                write!(f, "API返回错误状态码 ({}): HTTP {}", endpoint, status)
            }
            ApiError::JsonParseFailed { source } => {
                write!(f, "JSON解析失败: {}", source)
            }
            ApiError::RemoteError { endpoint, message } => {
                write!(f, "远端服务返回错误 ({}): {}", endpoint, message)
            }
        }
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ApiError::RequestFailed { source, .. } | ApiError::JsonParseFailed { source } => {
                Some(source.as_ref() as &(dyn std::error::Error + 'static))
            }
            _ => None,
        }
    }
}

/// 配置错误
#[derive(Debug)]
pub enum ConfigError {
    /// HTTP 客户端构建失败
    HttpClientBuildFailed {
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::HttpClientBuildFailed { source } => {
                write!(f, "HTTP客户端构建失败: {}", source)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

// ========== 从常见错误类型转换 ==========
// 注意：不需要手动实现 From<AppError> for anyhow::Error，
// 因为 anyhow 已经为所有实现了 std::error::Error 的类型提供了自动实现

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Api(ApiError::JsonParseFailed {
            source: Box::new(err),
        })
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::Api(ApiError::RequestFailed {
            endpoint: String::new(), // reqwest 错误里不一定带完整 URL
            source: Box::new(err),
        })
    }
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建API请求失败错误
    pub fn api_request_failed(
        endpoint: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::Api(ApiError::RequestFailed {
            endpoint: endpoint.into(),
            source: Box::new(source),
        })
    }

    /// 创建非 2xx 状态码错误
    pub fn bad_status(endpoint: impl Into<String>, status: u16) -> Self {
        AppError::Api(ApiError::BadStatus {
            endpoint: endpoint.into(),
            status,
        })
    }

    /// 创建远端逻辑错误
    pub fn remote_error(endpoint: impl Into<String>, message: impl Into<String>) -> Self {
        AppError::Api(ApiError::RemoteError {
            endpoint: endpoint.into(),
            message: message.into(),
        })
    }

    /// 提取错误关联的 HTTP 状态码（仅 BadStatus 携带）
    pub fn status_code(&self) -> Option<u16> {
        match self {
            AppError::Api(ApiError::BadStatus { status, .. }) => Some(*status),
            _ => None,
        }
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type Result<T> = std::result::Result<T, AppError>;
