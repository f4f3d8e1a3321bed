//! REST API for the load planning dashboard.
//!
//! Provides HTTP endpoints the dashboard and report exporters call.
//! Uses Axum as the web framework and supports CORS.

use std::sync::{Arc, OnceLock};

use axum::extract::rejection::JsonRejection;
use axum::extract::{Json, State};
use axum::{
    Router,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;
use utoipa::{OpenApi, ToSchema};

use crate::catalog::ContainerCatalog;
use crate::config::{ApiConfig, ProjectionConfig};
use crate::geometry::Rect;
use crate::model::{BoxSpec, ContainerSpec, ValidationError};
use crate::optimizer::{
    ArrangementResult, AxisCounts, CapacityStatus, ContainerCandidate, EvaluationEvent,
    RemainingSpace, compute_arrangement_with_progress, rank_containers,
};
use crate::orientation::Rotation;
use crate::projection::{
    CanvasConfig, PlaceholderReason, ProjectedViews, ViewCell, ViewKind, ViewLayout,
    project_views,
};
use crate::tier::EfficiencyTier;
use crate::types::{Vec3, validation};

#[derive(Clone)]
pub struct ApiState {
    catalog: Arc<ContainerCatalog>,
    canvas: CanvasConfig,
}

impl ApiState {
    pub fn new(catalog: ContainerCatalog, canvas: CanvasConfig) -> Self {
        Self {
            catalog: Arc::new(catalog),
            canvas,
        }
    }
}

static OPENAPI_DOC: OnceLock<utoipa::openapi::OpenApi> = OnceLock::new();

const SWAGGER_UI_HTML: &str = r##"<!DOCTYPE html>
<html lang="en">
    <head>
        <meta charset="utf-8" />
        <title>load-planner API Docs</title>
        <link
            rel="stylesheet"
            href="https://unpkg.com/swagger-ui-dist@5.17.14/swagger-ui.css"
            integrity="sha384-wxLW6kwyHktdDGr6Pv1zgm/VGJh99lfUbzSn6HNHBENZlCN7W602k9VkGdxuFvPn"
            crossorigin="anonymous"
        />
    </head>
    <body>
        <div id="swagger-ui"></div>
        <script
            src="https://unpkg.com/swagger-ui-dist@5.17.14/swagger-ui-bundle.js"
            integrity="sha384-wmyclcVGX/WhUkdkATwhaK1X1JtiNrr2EoYJ+diV3vj4v6OC5yCeSu+yW13SYJep"
            crossorigin="anonymous"
        ></script>
        <script>
            window.onload = function () {
                window.ui = SwaggerUIBundle({
                    url: "/docs/openapi.json",
                    dom_id: "#swagger-ui",
                });
            };
        </script>
    </body>
</html>"##;

fn openapi_doc() -> &'static utoipa::openapi::OpenApi {
    OPENAPI_DOC.get_or_init(ApiDoc::openapi)
}

/// Ad-hoc container definition for containers missing from the catalog.
#[derive(Deserialize, Clone, ToSchema)]
pub struct ContainerRequest {
    pub id: Option<String>,
    pub name: Option<String>,
    pub internal_length: f64,
    pub internal_width: f64,
    pub internal_height: f64,
    pub max_payload: f64,
}

impl ContainerRequest {
    fn into_spec(self) -> Result<ContainerSpec, ValidationError> {
        let id = self.id.unwrap_or_else(|| "custom".to_string());
        let name = self.name.unwrap_or_else(|| id.clone());
        ContainerSpec::new(
            id,
            name,
            (
                self.internal_length,
                self.internal_width,
                self.internal_height,
            ),
            self.max_payload,
        )
    }
}

/// Request for a single box type and container.
///
/// An inline `container` takes precedence over `container_id`.
#[derive(Deserialize, ToSchema)]
#[schema(
    example = json!({
        "box": {
            "length": 120.0,
            "width": 80.0,
            "height": 100.0,
            "weight": 350.0,
            "unit": "cm",
            "weight_unit": "kg",
            "quantity": 24
        },
        "container_id": "20ft-standard"
    })
)]
pub struct ArrangementRequest {
    #[serde(rename = "box")]
    pub box_spec: BoxSpec,
    #[serde(default)]
    pub container_id: Option<String>,
    #[serde(default)]
    pub container: Option<ContainerRequest>,
}

#[derive(Debug)]
struct ValidatedArrangementRequest {
    box_spec: BoxSpec,
    container: ContainerSpec,
}

impl ArrangementRequest {
    fn into_validated(
        self,
        catalog: &ContainerCatalog,
    ) -> Result<ValidatedArrangementRequest, ValidationError> {
        self.box_spec.validate()?;

        let container = match (self.container, self.container_id) {
            (Some(custom), _) => custom.into_spec()?,
            (None, Some(id)) => catalog.lookup(&id)?.clone(),
            (None, None) => return Err(ValidationError::MissingContainer),
        };

        Ok(ValidatedArrangementRequest {
            box_spec: self.box_spec,
            container,
        })
    }
}

/// Optional per-request canvas settings.
#[derive(Deserialize, Clone, Default, ToSchema)]
pub struct CanvasOverrides {
    pub target_span: Option<f64>,
    pub padding: Option<f64>,
}

impl CanvasOverrides {
    fn apply(&self, base: CanvasConfig) -> Result<CanvasConfig, ValidationError> {
        let mut builder = CanvasConfig::builder()
            .target_span(base.target_span)
            .padding(base.padding)
            .min_container_span(base.min_container_span);
        if let Some(span) = self.target_span {
            validation::validate_positive(span, "Canvas span")
                .map_err(ValidationError::InvalidDimension)?;
            builder = builder.target_span(span);
        }
        if let Some(padding) = self.padding {
            if !(padding.is_finite() && padding >= 0.0) {
                return Err(ValidationError::InvalidDimension(format!(
                    "Canvas padding must not be negative, got: {}",
                    padding
                )));
            }
            builder = builder.padding(padding);
        }
        Ok(builder.build())
    }
}

#[derive(Deserialize, ToSchema)]
pub struct ViewsRequest {
    #[serde(flatten)]
    pub arrangement: ArrangementRequest,
    #[serde(default)]
    pub canvas: Option<CanvasOverrides>,
}

#[derive(Deserialize, ToSchema)]
pub struct CompareRequest {
    #[serde(rename = "box")]
    pub box_spec: BoxSpec,
    /// Restricts the comparison to these catalog entries; all entries when absent.
    #[serde(default)]
    pub container_ids: Option<Vec<String>>,
}

/// Arrangement for one container. `arrangement` is null when no orientation is feasible.
#[derive(Serialize, ToSchema)]
pub struct ArrangementResponse {
    pub container: ContainerSpec,
    pub arrangement: Option<ArrangementResult>,
    pub tier: Option<EfficiencyTier>,
    pub below_capacity: bool,
    pub orientations: Vec<EvaluationEvent>,
}

#[derive(Serialize, ToSchema)]
pub struct ViewsResponse {
    pub tier: Option<EfficiencyTier>,
    pub views: ProjectedViews,
    pub validation_error: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct CompareResponse {
    pub candidates: Vec<ContainerCandidate>,
}

#[derive(Serialize, ToSchema)]
pub struct ContainersResponse {
    pub containers: Vec<ContainerSpec>,
}

#[derive(Serialize, ToSchema)]
struct ErrorResponse {
    error: String,
    details: String,
}

impl ErrorResponse {
    fn new(error: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: details.into(),
        }
    }
}

fn error_response(
    status: StatusCode,
    error: impl Into<String>,
    details: impl Into<String>,
) -> Response {
    (status, Json(ErrorResponse::new(error, details))).into_response()
}

fn json_deserialize_error(err: JsonRejection) -> Response {
    error_response(
        StatusCode::UNPROCESSABLE_ENTITY,
        "Invalid JSON data",
        err.to_string(),
    )
}

fn validation_error(err: &ValidationError) -> Response {
    error_response(
        StatusCode::UNPROCESSABLE_ENTITY,
        "Invalid input data",
        err.to_string(),
    )
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handle_arrangement,
        handle_views,
        handle_compare,
        handle_containers
    ),
    components(
        schemas(
            ArrangementRequest,
            ContainerRequest,
            CanvasOverrides,
            ViewsRequest,
            CompareRequest,
            ArrangementResponse,
            ViewsResponse,
            CompareResponse,
            ContainersResponse,
            ErrorResponse,
            BoxSpec,
            ContainerSpec,
            ArrangementResult,
            AxisCounts,
            RemainingSpace,
            CapacityStatus,
            Rotation,
            EvaluationEvent,
            EfficiencyTier,
            ContainerCandidate,
            ProjectedViews,
            PlaceholderReason,
            ViewLayout,
            ViewCell,
            ViewKind,
            Rect,
            Vec3
        )
    ),
    tags((name = "loading", description = "Container loading optimization"))
)]
struct ApiDoc;

/// Builds the router with all endpoints.
pub fn router(state: ApiState) -> Router {
    let cors = CorsLayer::new()
        .allow_methods(Any)
        .allow_origin(Any)
        .allow_headers(Any);

    Router::new()
        .route("/up", get(|| async { "ok" }))
        .route("/containers", get(handle_containers))
        .route("/arrangement", post(handle_arrangement))
        .route("/views", post(handle_views))
        .route("/compare", post(handle_compare))
        .route("/docs/openapi.json", get(serve_openapi_json))
        .route("/docs", get(serve_openapi_ui))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state)
}

/// Starts the API server and blocks until it terminates.
pub async fn start_api_server(
    config: ApiConfig,
    projection: ProjectionConfig,
) -> std::io::Result<()> {
    let state = ApiState::new(ContainerCatalog::standard(), projection.canvas_config());
    let app = router(state);

    let addr = config.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!(
        host = config.display_host(),
        port = config.port(),
        "load planner listening"
    );
    if config.binds_to_all_interfaces() {
        tracing::info!("local access: http://localhost:{}", config.port());
    }

    axum::serve(listener, app).await
}

/// Handler for GET /containers.
#[utoipa::path(
    get,
    path = "/containers",
    responses((status = 200, description = "Container catalog", body = ContainersResponse)),
    tag = "loading"
)]
async fn handle_containers(State(state): State<ApiState>) -> Json<ContainersResponse> {
    Json(ContainersResponse {
        containers: state.catalog.all().to_vec(),
    })
}

/// Handler for POST /arrangement.
///
/// Computes capacity, weight and efficiency for one box type in one container.
/// An infeasible combination is a normal response with a null arrangement.
#[utoipa::path(
    post,
    path = "/arrangement",
    request_body = ArrangementRequest,
    responses(
        (status = 200, description = "Arrangement computed", body = ArrangementResponse),
        (
            status = UNPROCESSABLE_ENTITY,
            description = "Invalid box or container",
            body = ErrorResponse
        )
    ),
    tag = "loading"
)]
async fn handle_arrangement(
    State(state): State<ApiState>,
    payload: Result<Json<ArrangementRequest>, JsonRejection>,
) -> Response {
    let Json(payload) = match payload {
        Ok(payload) => payload,
        Err(err) => return json_deserialize_error(err),
    };
    let request = match payload.into_validated(&state.catalog) {
        Ok(request) => request,
        Err(err) => return validation_error(&err),
    };

    let mut orientations = Vec::with_capacity(7);
    let arrangement =
        compute_arrangement_with_progress(&request.box_spec, &request.container, |evt| {
            orientations.push(evt.clone())
        });

    tracing::info!(
        container = %request.container.id,
        feasible = arrangement.is_some(),
        max_capacity = ?arrangement.as_ref().map(|a| a.max_capacity),
        "arrangement request"
    );

    let response = ArrangementResponse {
        tier: arrangement.as_ref().map(ArrangementResult::efficiency_tier),
        below_capacity: arrangement
            .as_ref()
            .is_some_and(ArrangementResult::is_below_capacity),
        container: request.container,
        arrangement,
        orientations,
    };
    (StatusCode::OK, Json(response)).into_response()
}

/// Handler for POST /views.
///
/// Returns the side, front and top layouts. Input that fails validation yields
/// the `invalid_input` placeholder rather than an error status.
#[utoipa::path(
    post,
    path = "/views",
    request_body = ViewsRequest,
    responses(
        (status = 200, description = "View layouts or placeholder", body = ViewsResponse),
        (status = UNPROCESSABLE_ENTITY, description = "Malformed JSON", body = ErrorResponse)
    ),
    tag = "loading"
)]
async fn handle_views(
    State(state): State<ApiState>,
    payload: Result<Json<ViewsRequest>, JsonRejection>,
) -> Response {
    let Json(payload) = match payload {
        Ok(payload) => payload,
        Err(err) => return json_deserialize_error(err),
    };

    let overrides = payload.canvas.unwrap_or_default();
    let validated = payload
        .arrangement
        .into_validated(&state.catalog)
        .and_then(|request| Ok((request, overrides.apply(state.canvas)?)));

    let response = match validated {
        Ok((request, canvas)) => {
            let arrangement = compute_arrangement_with_progress(
                &request.box_spec,
                &request.container,
                |_| {},
            );
            ViewsResponse {
                tier: arrangement.as_ref().map(ArrangementResult::efficiency_tier),
                views: project_views(arrangement.as_ref(), &request.container, &canvas),
                validation_error: None,
            }
        }
        Err(err) => {
            tracing::info!(error = %err, "views request failed validation");
            ViewsResponse {
                tier: None,
                views: ProjectedViews::invalid_input(),
                validation_error: Some(err.to_string()),
            }
        }
    };
    (StatusCode::OK, Json(response)).into_response()
}

/// Handler for POST /compare.
///
/// Ranks catalog containers for a box type.
#[utoipa::path(
    post,
    path = "/compare",
    request_body = CompareRequest,
    responses(
        (status = 200, description = "Ranked container candidates", body = CompareResponse),
        (status = UNPROCESSABLE_ENTITY, description = "Invalid request", body = ErrorResponse)
    ),
    tag = "loading"
)]
async fn handle_compare(
    State(state): State<ApiState>,
    payload: Result<Json<CompareRequest>, JsonRejection>,
) -> Response {
    let Json(payload) = match payload {
        Ok(payload) => payload,
        Err(err) => return json_deserialize_error(err),
    };
    if let Err(err) = payload.box_spec.validate() {
        return validation_error(&err);
    }

    let containers = match &payload.container_ids {
        Some(ids) => {
            let selected = ids
                .iter()
                .map(|id| state.catalog.lookup(id).cloned())
                .collect::<Result<Vec<_>, ValidationError>>();
            match selected {
                Ok(selected) => selected,
                Err(err) => return validation_error(&err),
            }
        }
        None => state.catalog.all().to_vec(),
    };

    let candidates = rank_containers(&payload.box_spec, &containers);
    tracing::info!(
        containers = containers.len(),
        feasible = candidates.iter().filter(|c| c.is_feasible()).count(),
        "compare request"
    );
    (StatusCode::OK, Json(CompareResponse { candidates })).into_response()
}

async fn serve_openapi_json() -> impl IntoResponse {
    Json(openapi_doc())
}

async fn serve_openapi_ui() -> impl IntoResponse {
    Html(SWAGGER_UI_HTML)
}
