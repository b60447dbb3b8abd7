use crate::domain::model::CouponId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FanoutError {
    #[error("Invalid argument: {argument} must be provided")]
    InvalidArgument { argument: &'static str },

    #[error("Coupon not found: {coupon_id}")]
    NotFound { coupon_id: CouponId },

    #[error("HTTP request failed: {0}")]
    TransportError(#[from] reqwest::Error),

    #[error("Operation was cancelled")]
    Cancelled,

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    ConfigParseError(#[from] toml::de::Error),

    #[error("Invalid value for '{field}' ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required config field: {field}")]
    MissingConfigError { field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Lookup,
    Network,
    Cancelled,
    Configuration,
    System,
}

impl FanoutError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            FanoutError::InvalidArgument { .. } => ErrorCategory::Input,
            FanoutError::NotFound { .. } => ErrorCategory::Lookup,
            FanoutError::TransportError(_) => ErrorCategory::Network,
            FanoutError::Cancelled => ErrorCategory::Cancelled,
            FanoutError::ConfigParseError(_)
            | FanoutError::InvalidConfigValueError { .. }
            | FanoutError::MissingConfigError { .. } => ErrorCategory::Configuration,
            FanoutError::IoError(_) => ErrorCategory::System,
        }
    }

    /// Process exit code used by the binary.
    pub fn exit_code(&self) -> i32 {
        match self.category() {
            ErrorCategory::Configuration | ErrorCategory::Input => 2,
            ErrorCategory::Network | ErrorCategory::Lookup => 1,
            ErrorCategory::Cancelled => 130,
            ErrorCategory::System => 3,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            FanoutError::TransportError(e) => match e.url() {
                Some(url) => format!("Could not reach {}", url),
                None => "A request could not be sent".to_string(),
            },
            FanoutError::Cancelled => "Cancelled before all requests completed".to_string(),
            FanoutError::InvalidConfigValueError { field, reason, .. } => {
                format!("Bad value for {}: {}", field, reason)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, FanoutError>;
