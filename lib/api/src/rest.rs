use actix_cors::Cors;
use actix_web::{web, App, HttpResponse, HttpServer, Result as ActixResult};
use recx_catalog::CatalogHandle;
use recx_core::{Recommendation, DEFAULT_SUGGESTIONS};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

/// Shared state for every worker
#[derive(Clone)]
pub struct ApiState {
    pub catalog: Arc<CatalogHandle>,
    /// Suggestions returned when the request does not ask for a count
    pub default_window: usize,
}

impl ApiState {
    pub fn new(catalog: Arc<CatalogHandle>) -> Self {
        Self {
            catalog,
            default_window: DEFAULT_SUGGESTIONS,
        }
    }

    pub fn with_default_window(mut self, window: usize) -> Self {
        self.default_window = window;
        self
    }
}

#[derive(Deserialize)]
struct RecommendQuery {
    q: Option<String>,
    limit: Option<usize>,
}

#[derive(Serialize)]
struct CatalogInfo {
    items: usize,
    vocabulary: usize,
    empty_index: bool,
    threshold: f32,
    max_suggestions: usize,
}

impl CatalogInfo {
    fn from_handle(catalog: &CatalogHandle) -> Self {
        let current = catalog.current();
        Self {
            items: current.items().len(),
            vocabulary: current.index().vocabulary_size(),
            empty_index: current.index().is_empty(),
            threshold: current.config().threshold,
            max_suggestions: current.config().max_suggestions,
        }
    }
}

pub struct RestApi;

impl RestApi {
    pub async fn start(state: ApiState, port: u16) -> std::io::Result<()> {
        HttpServer::new(move || {
            let cors = Cors::default()
                .allow_any_origin()
                .allow_any_method()
                .allow_any_header()
                .max_age(3600);

            App::new()
                .wrap(cors)
                .app_data(web::Data::new(state.clone()))
                .configure(configure)
        })
        .bind(("0.0.0.0", port))?
        .run()
        .await
    }
}

/// Route table, shared by the server and tests
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health))
        .route("/catalog", web::get().to(catalog_info))
        .route("/catalog/reload", web::post().to(reload_catalog))
        .route("/recommend", web::get().to(recommend));
}

async fn health() -> ActixResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    })))
}

async fn catalog_info(state: web::Data<ApiState>) -> ActixResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(CatalogInfo::from_handle(&state.catalog)))
}

async fn recommend(
    state: web::Data<ApiState>,
    query: web::Query<RecommendQuery>,
) -> ActixResult<HttpResponse> {
    let RecommendQuery { q, limit } = query.into_inner();
    let text = q.unwrap_or_default();
    if text.trim().is_empty() {
        return Ok(HttpResponse::Ok().json(Recommendation::NoQuery));
    }

    let window = limit.unwrap_or(state.default_window);
    let recommender = state.catalog.current();
    let result = web::block(move || recommender.recommend(&text, window))
        .await
        .map_err(actix_web::error::ErrorInternalServerError)?;

    debug!(matched = result.is_match(), "Served recommendation");
    Ok(HttpResponse::Ok().json(result))
}

async fn reload_catalog(state: web::Data<ApiState>) -> ActixResult<HttpResponse> {
    let catalog = state.catalog.clone();
    let reloaded = web::block(move || catalog.reload())
        .await
        .map_err(actix_web::error::ErrorInternalServerError)?;

    match reloaded {
        Ok(_) => Ok(HttpResponse::Ok().json(CatalogInfo::from_handle(&state.catalog))),
        Err(e) => Ok(HttpResponse::UnprocessableEntity().json(serde_json::json!({
            "error": e.to_string()
        }))),
    }
}
