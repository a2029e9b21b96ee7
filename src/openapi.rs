use std::sync::Arc;

use ntex::web::{HttpRequest, HttpResponse};
use utoipa::OpenApi;
use utoipa_swagger_ui::Config;

use crate::errors::{CustomError, ErrorBody};
use crate::models;
use crate::slice::upload::*;

pub const OPENAPI_JSON_PATH: &str = "/api-doc/openapi.json";

pub async fn openapi_json() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("application/json")
        .json(&ApiDoc::openapi())
}

// /swagger-ui/{tail} 的静态资源，页面加载 OPENAPI_JSON_PATH
pub async fn serve_swagger(req: HttpRequest) -> HttpResponse {
    let tail = req.match_info().get("tail").unwrap_or_default();
    let config = Arc::new(Config::new([OPENAPI_JSON_PATH]));

    match utoipa_swagger_ui::serve(tail, config) {
        Ok(Some(file)) => HttpResponse::Ok()
            .content_type(file.content_type.as_str())
            .body(file.bytes.into_owned()),
        Ok(None) => HttpResponse::NotFound().finish(),
        Err(e) => {
            log::error!(target: "swagger", "serve swagger ui failed: {e}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(slice_stl),
    components(
        schemas(models::slice::UploadFile, models::slice::SliceResponse),
        schemas(ErrorBody, CustomError)
    ),
    tags(
        (name = "切片", description = "STL 切片接口（占位）")
    )
)]
pub struct ApiDoc;
