//! API router with Swagger UI

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::FromRef,
    middleware,
    routing::{get, post},
    Router,
};
use sea_orm::DatabaseConnection;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::application::{
    BoardService, FiltersetService, JobPostService, ListingService, TaxonomyService,
};
use crate::config::SiteConfig;
use crate::domain::RepositoryProvider;
use crate::interfaces::http::common::{ApiResponse, EmptyData};
use crate::interfaces::http::modules::health::HealthState;
use crate::interfaces::http::modules::request_id::request_id_middleware;
use crate::interfaces::http::modules::{boards, filtersets, health, jobs, public, taxonomy};

/// Shared state of every route
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub boards: Arc<BoardService>,
    pub taxonomy: Arc<TaxonomyService>,
    pub jobs: Arc<JobPostService>,
    pub filtersets: Arc<FiltersetService>,
    pub listings: Arc<ListingService>,
    pub site: SiteConfig,
    pub started_at: Arc<Instant>,
}

impl AppState {
    pub fn new(db: DatabaseConnection, repos: Arc<dyn RepositoryProvider>, site: SiteConfig) -> Self {
        Self {
            db,
            boards: Arc::new(BoardService::new(repos.clone())),
            taxonomy: Arc::new(TaxonomyService::new(repos.clone())),
            jobs: Arc::new(JobPostService::new(repos.clone())),
            filtersets: Arc::new(FiltersetService::new(repos.clone())),
            listings: Arc::new(ListingService::new(repos)),
            site,
            started_at: Arc::new(Instant::now()),
        }
    }
}

impl FromRef<AppState> for HealthState {
    fn from_ref(s: &AppState) -> Self {
        HealthState {
            db: s.db.clone(),
            started_at: s.started_at.clone(),
        }
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health
        health::health_check,
        // Public
        public::index,
        public::filterset_page,
        public::view_job,
        // Boards
        boards::list_boards,
        boards::get_board,
        boards::create_board,
        // Taxonomy
        taxonomy::list_items,
        taxonomy::create_item,
        // Jobs
        jobs::list_jobs,
        jobs::create_job,
        jobs::get_job,
        // Filter sets
        filtersets::list_filtersets,
        filtersets::create_filterset,
        filtersets::get_filterset,
        filtersets::update_filterset,
        filtersets::delete_filterset,
        filtersets::lookup_filterset,
    ),
    components(
        schemas(
            ApiResponse<String>,
            EmptyData,
            health::HealthResponse,
            health::ComponentHealth,
            boards::BoardResponse,
            boards::CreateBoardRequest,
            taxonomy::TaxonomyItemResponse,
            taxonomy::CreateTaxonomyItemRequest,
            jobs::JobPostResponse,
            jobs::CreateJobPostRequest,
            filtersets::FilterCriteriaDto,
            filtersets::FiltersetRequest,
            filtersets::FiltersetResponse,
            public::BoardListingResponse,
            public::FiltersetPageResponse,
        )
    ),
    tags(
        (name = "Health", description = "Service health check"),
        (name = "Public", description = "Board listings resolved from the request host"),
        (name = "Boards", description = "Job boards"),
        (name = "Taxonomy", description = "Job types, categories, tags and employer domains"),
        (name = "Jobs", description = "Job posts"),
        (name = "Filter sets", description = "Saved, uniquely named job filters"),
    ),
    info(
        title = "Job Board API",
        version = "1.0.0",
        description = "Job boards with saved filter sets"
    )
)]
pub struct ApiDoc;

/// Build the full HTTP router
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let mut public_routes = Router::new()
        .route("/", get(public::index))
        .route("/f/{name}", get(public::filterset_page))
        .route("/view/{hashid}", get(public::view_job));
    for path in public::LEGACY_PATHS {
        public_routes = public_routes.route(path, get(public::legacy_redirect));
    }

    let api_routes = Router::new()
        .route("/api/v1/boards", get(boards::list_boards).post(boards::create_board))
        .route("/api/v1/boards/{board}", get(boards::get_board))
        .route(
            "/api/v1/taxonomy/{kind}",
            get(taxonomy::list_items).post(taxonomy::create_item),
        )
        .route(
            "/api/v1/boards/{board}/jobs",
            get(jobs::list_jobs).post(jobs::create_job),
        )
        .route("/api/v1/jobs/{hashid}", get(jobs::get_job))
        .route(
            "/api/v1/boards/{board}/filtersets",
            get(filtersets::list_filtersets).post(filtersets::create_filterset),
        )
        .route(
            "/api/v1/boards/{board}/filtersets/lookup",
            post(filtersets::lookup_filterset),
        )
        .route(
            "/api/v1/boards/{board}/filtersets/{name}",
            get(filtersets::get_filterset)
                .put(filtersets::update_filterset)
                .delete(filtersets::delete_filterset),
        );

    Router::new()
        .route("/health", get(health::health_check))
        .merge(public_routes)
        .merge(api_routes)
        .with_state(state)
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::application::services::testing::seeded_repos;
    use crate::infrastructure::database::repositories::testing::test_db;
    use crate::infrastructure::database::repositories::SeaOrmRepositoryProvider;

    async fn app() -> Router {
        let site = SiteConfig {
            server_name: "jobs.test".into(),
            root_board: "www".into(),
        };
        let repos = seeded_repos().await;
        // The seeded store owns its own connection; health only needs a live one
        let db = test_db().await;
        create_router(AppState::new(db, repos, site))
    }

    async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
        let resp = app.clone().oneshot(req).await.unwrap();
        let status = resp.status();
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, body)
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn ml_filterset() -> Value {
        json!({
            "title": "Machine learning jobs in Bangalore",
            "filters": {"k": ["Python", "Machine Learning"], "l": [1277333]}
        })
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let app = app().await;
        let (status, body) = send(&app, get("/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn responses_carry_request_id() {
        let app = app().await;
        let req = Request::builder()
            .uri("/health")
            .header("x-request-id", "abc-123")
            .body(Body::empty())
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.headers()["x-request-id"], "abc-123");
    }

    #[tokio::test]
    async fn legacy_paths_redirect_to_index() {
        let app = app().await;
        for path in public::LEGACY_PATHS {
            let resp = app.clone().oneshot(get(path)).await.unwrap();
            assert_eq!(resp.status(), StatusCode::FOUND, "{}", path);
            assert_eq!(resp.headers()[header::LOCATION], "/");
        }
    }

    #[tokio::test]
    async fn filterset_lifecycle() {
        let app = app().await;

        let (status, body) = send(
            &app,
            json_request("POST", "/api/v1/boards/www/filtersets", ml_filterset()),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED, "{}", body);
        let name = body["data"]["name"].as_str().unwrap().to_string();
        assert_eq!(name, "machine-learning-jobs-in-bangalore");
        assert_eq!(body["data"]["url"], format!("/f/{}", name));
        assert_eq!(body["data"]["filters"]["k"], json!(["machine-learning", "python"]));

        // Same criteria under another name
        let mut dup = ml_filterset();
        dup["name"] = json!("ml-blr");
        let (status, body) = send(
            &app,
            json_request("POST", "/api/v1/boards/www/filtersets", dup),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(
            body["error"],
            "There already exists a filter set with this filter criteria"
        );

        let (status, body) = send(
            &app,
            json_request(
                "POST",
                "/api/v1/boards/www/filtersets/lookup",
                json!({"k": ["python", "machine-learning"], "l": [1277333]}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["name"], name.as_str());

        let (status, _) = send(
            &app,
            json_request(
                "POST",
                "/api/v1/boards/www/filtersets/lookup",
                json!({"k": ["python"]}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, body) = send(&app, get(&format!("/f/{}", name))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["board"]["name"], "www");

        // Filter sets are scoped to the host's board
        let req = Request::builder()
            .uri(format!("/f/{}", name))
            .header(header::HOST, "rust.jobs.test")
            .body(Body::empty())
            .unwrap();
        let (status, _) = send(&app, req).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(
            &app,
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/v1/boards/www/filtersets/{}", name))
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (status, _) = send(&app, get(&format!("/f/{}", name))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn lookup_accepts_the_create_payload_filters() {
        let app = app().await;
        let (status, created) = send(
            &app,
            json_request("POST", "/api/v1/boards/www/filtersets", ml_filterset()),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, body) = send(
            &app,
            json_request(
                "POST",
                "/api/v1/boards/www/filtersets/lookup",
                ml_filterset()["filters"].clone(),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK, "{}", body);
        assert_eq!(body["data"]["id"], created["data"]["id"]);

        // Tag titles in the index query select the same filter set
        let (status, body) =
            send(&app, get("/?k=Python,Machine%20Learning&l=1277333")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["filterset"]["id"], created["data"]["id"]);
    }

    #[tokio::test]
    async fn job_pages_are_scoped_to_the_host_board() {
        let app = app().await;
        let (status, body) = send(
            &app,
            json_request(
                "POST",
                "/api/v1/boards/rust/jobs",
                json!({
                    "headline": "Rust engineer",
                    "job_type": "full-time",
                    "job_category": "programming"
                }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let path = format!("/view/{}", body["data"]["hashid"].as_str().unwrap());

        let (status, _) = send(&app, get(&path)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let req = Request::builder()
            .uri(&path)
            .header(header::HOST, "rust.jobs.test")
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(&app, req).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["headline"], "Rust engineer");
    }

    #[tokio::test]
    async fn invalid_filterset_requests() {
        let app = app().await;

        let (status, _) = send(
            &app,
            json_request("POST", "/api/v1/boards/www/filtersets", json!({"title": ""})),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

        let (status, _) = send(
            &app,
            json_request(
                "POST",
                "/api/v1/boards/www/filtersets",
                json!({"title": "Contract", "filters": {"t": ["internship"]}}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(
            &app,
            json_request("POST", "/api/v1/boards/nope/filtersets", ml_filterset()),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn jobs_are_listed_on_their_board() {
        let app = app().await;
        let (status, body) = send(
            &app,
            json_request(
                "POST",
                "/api/v1/boards/rust/jobs",
                json!({
                    "headline": "Rust engineer",
                    "job_type": "full-time",
                    "job_category": "programming",
                    "tags": ["Tokio"],
                    "remote_location": true
                }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED, "{}", body);
        let hashid = body["data"]["hashid"].as_str().unwrap().to_string();

        let (status, body) = send(&app, get(&format!("/api/v1/jobs/{}", hashid))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["tags"], json!(["tokio"]));

        let req = Request::builder()
            .uri("/?anywhere=1")
            .header(header::HOST, "rust.jobs.test")
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(&app, req).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["board"]["name"], "rust");
        assert_eq!(body["data"]["jobs"].as_array().unwrap().len(), 1);
        assert_eq!(body["data"]["filterset"], Value::Null);

        let (status, body) = send(&app, get("/")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["board"]["name"], "www");
        assert!(body["data"]["jobs"].as_array().unwrap().is_empty());

        let (status, body) =
            send(&app, get("/api/v1/boards/rust/jobs?t=contract")).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["data"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn boards_and_taxonomy() {
        let app = app().await;
        let (status, body) = send(
            &app,
            json_request(
                "POST",
                "/api/v1/boards",
                json!({"name": "design", "title": "Design jobs"}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["data"]["name"], "design");

        let (status, _) = send(
            &app,
            json_request(
                "POST",
                "/api/v1/boards",
                json!({"name": "design", "title": "Again"}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);

        let (status, body) = send(&app, get("/api/v1/boards")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"].as_array().unwrap().len(), 3);

        let (status, body) = send(
            &app,
            json_request(
                "POST",
                "/api/v1/taxonomy/job-types",
                json!({"title": "Internship"}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["data"]["name"], "internship");

        let (status, body) = send(&app, get("/api/v1/taxonomy/job-types")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"].as_array().unwrap().len(), 3);

        let (status, _) = send(&app, get("/api/v1/taxonomy/locations")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn openapi_document_is_served() {
        let app = app().await;
        let (status, body) = send(&app, get("/api-doc/openapi.json")).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["paths"]["/api/v1/boards/{board}/filtersets/lookup"].is_object());
    }
}
