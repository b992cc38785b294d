use axum::Router;
use registry::AppRegistry;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::openapi::ApiDoc;

/// /docs に Swagger UI、/api-docs/openapi.json に OpenAPI ドキュメントを出す
pub fn build_docs_routers() -> Router<AppRegistry> {
    Router::new().merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
