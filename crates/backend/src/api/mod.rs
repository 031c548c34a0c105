use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use papapp_shared::models::{LabelingAck, LabelingRequest, StoredLabel, MIN_POLYGON_VERTICES};
use serde::Serialize;

use crate::storage::Storage;

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

/// Handler failure rendered as `{"error": ...}` with a status code.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn new(status: StatusCode, message: impl Into<String>) -> Self {
        ApiError {
            status,
            message: message.into(),
        }
    }

    fn internal(message: String) -> Self {
        tracing::error!(error = %message, "Storage failure");
        ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorBody {
                error: self.message,
            }),
        )
            .into_response()
    }
}

#[derive(Debug, Serialize)]
struct WakeupBody {
    status: &'static str,
    labels: u64,
    db_bytes: u64,
}

async fn wakeup(State(storage): State<Arc<Storage>>) -> Result<Json<WakeupBody>, ApiError> {
    let labels = storage.count_labels().map_err(ApiError::internal)?;
    let db_bytes = storage.db_size_bytes().map_err(ApiError::internal)?;
    tracing::debug!(labels, db_bytes, "Wakeup probe");
    Ok(Json(WakeupBody {
        status: "awake",
        labels,
        db_bytes,
    }))
}

async fn create_label(
    State(storage): State<Arc<Storage>>,
    Json(request): Json<LabelingRequest>,
) -> Result<Json<LabelingAck>, ApiError> {
    if !request.is_submittable() {
        return Err(ApiError::new(
            StatusCode::UNPROCESSABLE_ENTITY,
            format!(
                "A label needs at least {} vertices, got {}",
                MIN_POLYGON_VERTICES,
                request.poly.len()
            ),
        ));
    }

    let vertices = request.poly.len();
    let label = StoredLabel::from_request(request, chrono::Utc::now().to_rfc3339());
    storage.save_label(&label).map_err(ApiError::internal)?;

    tracing::info!(
        id = %label.id,
        variety = %label.variety,
        vertices,
        "Stored label"
    );

    Ok(Json(LabelingAck {
        id: label.id.to_string(),
        status: "ok".to_string(),
        vertices,
    }))
}

async fn fetch_label(
    State(storage): State<Arc<Storage>>,
    Path(id): Path<String>,
) -> Result<Json<StoredLabel>, ApiError> {
    storage
        .get_label(&id)
        .map_err(ApiError::internal)?
        .map(Json)
        .ok_or_else(|| ApiError::new(StatusCode::NOT_FOUND, "Label not found"))
}

/// Routes of the labeling service, with storage already attached.
pub fn router(storage: Arc<Storage>) -> Router {
    Router::new()
        .route("/wakeup", get(wakeup))
        .route("/labeling", post(create_label))
        .route("/labeling/{id}", get(fetch_label))
        .with_state(storage)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    fn test_router() -> (Router, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let storage = Storage::open(&dir.path().join("labels.redb")).unwrap();
        (router(storage), dir)
    }

    async fn body_json(resp: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn post_labeling(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/labeling")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_wakeup_reports_awake() {
        let (app, _dir) = test_router();
        let resp = app
            .oneshot(Request::builder().uri("/wakeup").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let json = body_json(resp).await;
        assert_eq!(json["status"], "awake");
        assert_eq!(json["labels"], 0);
    }

    #[tokio::test]
    async fn test_create_label_acknowledges_and_persists() {
        let (app, _dir) = test_router();
        let body = r#"{"poly":[[10,20],[10,21],[11,20.5]],"variedad":"Criolla","edadMin":30,"edadMax":90}"#;
        let resp = app.clone().oneshot(post_labeling(body)).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let ack = body_json(resp).await;
        assert_eq!(ack["status"], "ok");
        assert_eq!(ack["vertices"], 3);

        let id = ack["id"].as_str().unwrap().to_string();
        let resp = app
            .oneshot(
                Request::builder()
                    .uri(format!("/labeling/{}", id))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let stored = body_json(resp).await;
        assert_eq!(stored["variety"], "Criolla");
        assert_eq!(stored["minAge"], 30);
        assert_eq!(stored["maxAge"], 90);
        assert_eq!(stored["poly"][2][1], 20.5);
    }

    #[tokio::test]
    async fn test_create_label_accepts_null_ages() {
        let (app, _dir) = test_router();
        let body = r#"{"poly":[[1,1],[2,2],[3,1]],"variedad":"Spunta","edadMin":null,"edadMax":null}"#;
        let resp = app.oneshot(post_labeling(body)).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_create_label_rejects_too_few_vertices() {
        let (app, _dir) = test_router();
        let body = r#"{"poly":[[1,1],[2,2]],"variedad":"Criolla","edadMin":1,"edadMax":2}"#;
        let resp = app.oneshot(post_labeling(body)).await.unwrap();
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let json = body_json(resp).await;
        assert!(json["error"].as_str().unwrap().contains("at least 3"));
    }

    #[tokio::test]
    async fn test_create_label_rejects_malformed_json() {
        let (app, _dir) = test_router();
        let resp = app.oneshot(post_labeling("{not json")).await.unwrap();
        assert!(resp.status().is_client_error());
    }

    #[tokio::test]
    async fn test_fetch_unknown_label_is_404() {
        let (app, _dir) = test_router();
        let resp = app
            .oneshot(
                Request::builder()
                    .uri("/labeling/does-not-exist")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let json = body_json(resp).await;
        assert_eq!(json["error"], "Label not found");
    }
}
