use std::fmt;
use log::error as logError;
use ntex::{
    http::{error, StatusCode},
    web::{HttpResponse, WebResponseError},
};
use ntex_multipart::MultipartError;
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub enum CustomError {
    BadRequest(String),
    UnprocessableEntity(String),
    InternalServerError(String),
    ConfigError(String),
}

/// 所有错误统一返回的 json 结构
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    pub code: u16,
    pub message: String,
}

impl WebResponseError for CustomError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::UnprocessableEntity(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::ConfigError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self, _: &ntex::web::HttpRequest) -> HttpResponse {
        let status = self.status_code();
        let body = ErrorBody { code: status.as_u16(), message: self.to_string() };
        HttpResponse::build(status)
            .content_type("application/json; charset=utf-8")
            .json(&body)
    }
}

impl fmt::Display for CustomError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CustomError::BadRequest(e) => write!(f, "{e}"),
            CustomError::UnprocessableEntity(e) => write!(f, "{e}"),
            CustomError::InternalServerError(e) => write!(f, "{e}"),
            CustomError::ConfigError(e) => write!(f, "配置错误: {e}"),
        }
    }
}

impl std::error::Error for CustomError {}

impl From<std::io::Error> for CustomError {
    fn from(e: std::io::Error) -> Self {
        CustomError::InternalServerError(e.to_string())
    }
}

impl From<error::PayloadError> for CustomError {
    fn from(e: error::PayloadError) -> Self {
        logError!(target: "payload", "payload error: {:?}", e);
        CustomError::InternalServerError(e.to_string())
    }
}

// 表单本身不合法（缺少 boundary、格式损坏等）属于客户端错误
impl From<MultipartError> for CustomError {
    fn from(e: MultipartError) -> Self {
        match e {
            MultipartError::Payload(e) => e.into(),
            err => CustomError::BadRequest(format!("multipart 解析失败: {err}")),
        }
    }
}
