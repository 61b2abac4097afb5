use axum::{handler::HandlerWithoutStateExt, routing::get, Router};
use service::person::PersonService;
use tower_http::{
    cors::CorsLayer,
    services::ServeDir,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

pub mod info;
pub mod persons;

/// Shared router state: the only thing handlers see of the store.
#[derive(Clone)]
pub struct AppState {
    pub persons: PersonService,
}

impl AppState {
    pub fn new(persons: PersonService) -> Self { Self { persons } }
}

/// Build the full application router: landing page, person API, static
/// files, and the unknown-endpoint fallback.
pub fn build_router(state: AppState, cors: CorsLayer, static_dir: &str) -> Router {
    // Anything that is neither an API route nor an existing file answers 404 JSON.
    let static_files = ServeDir::new(static_dir)
        .call_fallback_on_method_not_allowed(true)
        .not_found_service(persons::unknown_endpoint.into_service());

    let api = Router::new()
        .route("/", get(info::info).fallback(persons::unknown_endpoint))
        .route(
            "/api/persons",
            get(persons::list)
                .post(persons::create)
                .fallback(persons::unknown_endpoint),
        )
        .route(
            "/api/persons/:id",
            get(persons::get)
                .put(persons::update)
                .delete(persons::delete)
                .fallback(persons::unknown_endpoint),
        );

    api.fallback_service(static_files)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                // status code and latency per response
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
