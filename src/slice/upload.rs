use ntex::{
    http::header::CONTENT_DISPOSITION,
    util::{stream_recv, BytesMut},
    web::{types::Json, Responder},
};
use ntex_multipart::{Field, Multipart};

use crate::{
    errors::{CustomError, ErrorBody},
    models::slice::{SliceResponse, UploadFile},
    slice::disposition::Disposition,
};

/// 表单中文件字段的名字
pub const FILE_FIELD: &str = "file";

#[utoipa::path(
    post,
    path = "/slice",
    tag = "切片",
    summary = "上传 STL 文件，返回文件名与大小（占位实现）",
    request_body(content = UploadFile, content_type = "multipart/form-data"),
    responses(
        (status = 200, body = SliceResponse),
        (status = 400, body = ErrorBody),
        (status = 422, body = ErrorBody)
    )
)]
pub async fn slice_stl(mut payload: Multipart) -> Result<impl Responder, CustomError> {
    // 同名字段出现多次时以最后一个为准
    let mut last: Option<Result<SliceResponse, CustomError>> = None;

    // payload 是一个连续的 stream，按字段逐个读取
    while let Some(field) = stream_recv(&mut payload).await {
        let mut field = field?;
        let disposition = field_disposition(&field);

        if disposition.name.as_deref() != Some(FILE_FIELD) {
            drain(&mut field).await?;
            continue;
        }

        let Some(filename) = disposition.filename else {
            drain(&mut field).await?;
            last = Some(Err(CustomError::UnprocessableEntity(format!(
                "field `{FILE_FIELD}` is not a file upload"
            ))));
            continue;
        };

        let mut bytes = BytesMut::new();
        while let Some(chunk) = stream_recv(&mut field).await {
            bytes.extend_from_slice(&chunk?);
        }
        last = Some(Ok(SliceResponse::stub(filename, &bytes)));
    }

    let res = last.unwrap_or_else(|| {
        Err(CustomError::UnprocessableEntity(format!(
            "missing form field `{FILE_FIELD}`"
        )))
    })?;
    log::info!(target: "slice", "upload: {:?} ({} bytes)", res.filename, res.size_bytes);
    Ok(Json(res))
}

fn field_disposition(field: &Field) -> Disposition {
    field
        .headers()
        .get(CONTENT_DISPOSITION)
        .map(|v| Disposition::parse(v.as_bytes()))
        .unwrap_or_default()
}

async fn drain(field: &mut Field) -> Result<(), CustomError> {
    while let Some(chunk) = stream_recv(field).await {
        chunk?;
    }
    Ok(())
}
