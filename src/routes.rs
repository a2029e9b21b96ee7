use crate::{
    openapi::{ openapi_json, serve_swagger, OPENAPI_JSON_PATH },
    slice,
};
use ntex::web::{self, ErrorRenderer};
use ntex_cors::{ Cors, CorsFactory };

pub fn route(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope(OPENAPI_JSON_PATH).route("", web::get().to(openapi_json)))
        .service(web::scope("/swagger-ui").route("/{tail:.*}", web::get().to(serve_swagger)));

    // 切片（占位）
    cfg.service(
        web::scope("/slice").route("", web::post().to(slice::upload::slice_stl))
    );
}

/// 跨域：允许任意来源、方法与请求头，并允许携带凭证。
/// 携带凭证时不能返回 `*`，因此回显请求的 Origin。
pub fn cors<Err: ErrorRenderer>() -> CorsFactory<Err> {
    Cors::new().supports_credentials().max_age(3600).finish()
}
