use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// 占位切片固定返回的提示
pub const SLICE_DONE_MESSAGE: &str = "Stub slice done.";

/// `POST /slice` 的表单结构，仅用于 openapi 文档
#[derive(Deserialize, ToSchema)]
pub struct UploadFile {
    /// 待切片的 STL 文件
    #[schema(format = "binary")]
    pub file: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SliceResponse {
    /// 上传时表单里的原始文件名
    pub filename: String,
    /// 文件字节数
    pub size_bytes: u64,
    pub message: String,
}

impl SliceResponse {
    pub fn stub(filename: String, contents: &[u8]) -> Self {
        Self {
            filename,
            size_bytes: contents.len() as u64,
            message: SLICE_DONE_MESSAGE.to_string(),
        }
    }
}
