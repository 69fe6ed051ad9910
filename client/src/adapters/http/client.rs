//! Job API client implementation

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use urlencoding::encode;

use crate::config::Config;
use crate::domain::entities::{JobId, JobPosting, LocationFilter, NewJobPosting};
use crate::domain::ports::{JobApi, JobPage, PaymentGateway, PaymentIntent, PaymentIntentRequest};
use crate::error::ApiError;

/// HTTP implementation of the Job API and payment ports
#[derive(Clone)]
pub struct HttpJobApi {
    http: Client,
    base_url: String,
}

impl HttpJobApi {
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        Self::with_config(&Config {
            api_url: base_url.to_string(),
            ..Config::default()
        })
    }

    pub fn with_config(config: &Config) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = Client::builder()
            .default_headers(headers)
            .timeout(config.http_timeout)
            .build()?;

        Ok(Self {
            http,
            base_url: config.api_url.trim_end_matches('/').to_string(),
        })
    }

    #[cfg(test)]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.http.get(self.api_url(path)).send().await?;
        handle_response(response).await
    }

    async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let response = self.http.post(self.api_url(path)).json(body).send().await?;
        handle_response(response).await
    }
}

async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
    let status = response.status();

    if status.is_success() {
        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|e| ApiError::Deserialization(e.to_string()))
    } else {
        let body = response.text().await.unwrap_or_default();
        Err(ApiError::Api {
            status: status.as_u16(),
            message: error_detail(&body),
        })
    }
}

/// Error bodies look like `{"detail": "..."}`; anything else is passed through.
fn error_detail(body: &str) -> String {
    #[derive(Deserialize)]
    struct ErrorBody {
        detail: serde_json::Value,
    }

    match serde_json::from_str::<ErrorBody>(body) {
        Ok(ErrorBody {
            detail: serde_json::Value::String(message),
        }) => message,
        Ok(ErrorBody { detail }) => detail.to_string(),
        Err(_) => body.trim().to_string(),
    }
}

/// `GET /jobs` answers either `{"items": [...]}` or a bare array.
#[derive(Deserialize)]
#[serde(untagged)]
enum ListResponse {
    Page(JobPage),
    Bare(Vec<JobPosting>),
}

impl From<ListResponse> for JobPage {
    fn from(r: ListResponse) -> Self {
        match r {
            ListResponse::Page(page) => page,
            ListResponse::Bare(items) => JobPage { items },
        }
    }
}

#[async_trait]
impl JobApi for HttpJobApi {
    async fn list_jobs(&self, skip: usize, limit: usize) -> Result<JobPage, ApiError> {
        let response: ListResponse = self
            .get_json(&format!("/jobs?skip={}&limit={}", skip, limit))
            .await?;
        Ok(response.into())
    }

    async fn search_by_location(
        &self,
        filter: &LocationFilter,
    ) -> Result<Vec<JobPosting>, ApiError> {
        self.get_json(&format!(
            "/jobs/search/location?zip_code={}&radius={}",
            encode(filter.postal_code.as_str()),
            filter.radius
        ))
        .await
    }

    async fn get_job(&self, id: JobId) -> Result<JobPosting, ApiError> {
        match self.get_json(&format!("/jobs/{}", id)).await {
            Err(ApiError::Api { status: 404, .. }) => Err(ApiError::NotFound(id)),
            other => other,
        }
    }

    async fn create_job(&self, posting: &NewJobPosting) -> Result<JobPosting, ApiError> {
        self.post_json("/jobs", posting).await
    }
}

#[async_trait]
impl PaymentGateway for HttpJobApi {
    async fn create_payment_intent(
        &self,
        request: &PaymentIntentRequest,
    ) -> Result<PaymentIntent, ApiError> {
        self.post_json("/payments/create-intent", request).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        extract::{Path, Query, State},
        http::StatusCode,
        routing::{get, post},
        Json, Router,
    };
    use serde_json::{json, Value};
    use tokio::net::TcpListener;

    use super::*;
    use crate::domain::entities::{JobFunction, PostalCode, Radius};

    #[derive(Clone, Default)]
    struct Recorded {
        queries: Arc<Mutex<Vec<String>>>,
        bodies: Arc<Mutex<Vec<Value>>>,
    }

    fn job_json(id: i64, function: &str) -> Value {
        json!({
            "id": id,
            "job_title": format!("Job {}", id),
            "description": "<p>Work</p>",
            "location": "Austin, TX",
            "job_function": function,
        })
    }

    async fn list_jobs(
        State(recorded): State<Recorded>,
        Query(params): Query<std::collections::HashMap<String, String>>,
    ) -> Json<Value> {
        let skip: i64 = params["skip"].parse().unwrap();
        recorded
            .queries
            .lock()
            .unwrap()
            .push(format!("skip={}&limit={}", params["skip"], params["limit"]));
        Json(json!({ "items": [job_json(skip + 1, "sales"), job_json(skip + 2, "labor")] }))
    }

    async fn search(
        State(recorded): State<Recorded>,
        Query(params): Query<std::collections::HashMap<String, String>>,
    ) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
        recorded.queries.lock().unwrap().push(format!(
            "zip_code={}&radius={}",
            params["zip_code"], params["radius"]
        ));
        if params["zip_code"] == "00000" {
            return Err((
                StatusCode::BAD_REQUEST,
                Json(json!({ "detail": "Invalid ZIP code" })),
            ));
        }
        Ok(Json(json!([job_json(99, "production")])))
    }

    async fn get_job(Path(id): Path<i64>) -> Result<Json<Value>, StatusCode> {
        if id == 1 {
            Ok(Json(job_json(1, "sales")))
        } else {
            Err(StatusCode::NOT_FOUND)
        }
    }

    async fn create_job(State(recorded): State<Recorded>, Json(body): Json<Value>) -> Json<Value> {
        recorded.bodies.lock().unwrap().push(body.clone());
        let mut created = body;
        created["id"] = json!(42);
        Json(created)
    }

    async fn create_intent(
        State(recorded): State<Recorded>,
        Json(body): Json<Value>,
    ) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
        recorded.bodies.lock().unwrap().push(body.clone());
        if body["payment_method_id"] == "pm_declined" {
            return Err((
                StatusCode::BAD_REQUEST,
                Json(json!({ "detail": "Card error: Your card was declined." })),
            ));
        }
        Ok(Json(json!({ "client_secret": "pi_secret", "status": "succeeded" })))
    }

    async fn spawn_api_server() -> (String, Recorded) {
        let recorded = Recorded::default();
        let app = Router::new()
            .route("/api/v1/jobs", get(list_jobs).post(create_job))
            .route("/api/v1/jobs/search/location", get(search))
            .route("/api/v1/jobs/:id", get(get_job))
            .route("/api/v1/payments/create-intent", post(create_intent))
            .with_state(recorded.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        (format!("http://{}/api/v1/", addr), recorded)
    }

    #[test]
    fn client_trims_trailing_slash() {
        let client = HttpJobApi::new("http://localhost:8000/api/v1/").unwrap();
        assert_eq!(client.base_url(), "http://localhost:8000/api/v1");
    }

    #[test]
    fn error_detail_extracts_message() {
        assert_eq!(error_detail(r#"{"detail": "Job not found"}"#), "Job not found");
        assert_eq!(
            error_detail(r#"{"detail": [{"msg": "field required"}]}"#),
            r#"[{"msg":"field required"}]"#
        );
        assert_eq!(error_detail("Bad Gateway\n"), "Bad Gateway");
    }

    #[test]
    fn list_response_accepts_both_shapes() {
        let page: ListResponse =
            serde_json::from_value(json!({ "items": [job_json(1, "sales")] })).unwrap();
        assert_eq!(JobPage::from(page).items.len(), 1);

        let bare: ListResponse = serde_json::from_value(json!([job_json(1, "sales")])).unwrap();
        assert_eq!(JobPage::from(bare).items.len(), 1);
    }

    #[tokio::test]
    async fn list_jobs_sends_offset_and_limit() {
        let (url, recorded) = spawn_api_server().await;
        let api = HttpJobApi::new(&url).unwrap();

        let page = api.list_jobs(50, 25).await.unwrap();

        assert_eq!(page.items.len(), 2);
        assert_eq!(page.items[0].id, JobId(51));
        assert_eq!(page.items[1].job_function, Some(JobFunction::Labor));
        assert_eq!(*recorded.queries.lock().unwrap(), vec!["skip=50&limit=25"]);
    }

    #[tokio::test]
    async fn search_by_location_sends_zip_and_radius() {
        let (url, recorded) = spawn_api_server().await;
        let api = HttpJobApi::new(&url).unwrap();
        let filter = LocationFilter::new(
            PostalCode::parse("78701").unwrap(),
            Radius::miles(50.0).unwrap(),
        );

        let jobs = api.search_by_location(&filter).await.unwrap();

        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].id, JobId(99));
        assert_eq!(
            *recorded.queries.lock().unwrap(),
            vec!["zip_code=78701&radius=50"]
        );
    }

    #[tokio::test]
    async fn search_error_carries_server_detail() {
        let (url, _recorded) = spawn_api_server().await;
        let api = HttpJobApi::new(&url).unwrap();
        let filter = LocationFilter::new(PostalCode::parse("00000").unwrap(), Radius::default());

        let err = api.search_by_location(&filter).await.unwrap_err();

        match err {
            ApiError::Api { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "Invalid ZIP code");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn get_job_maps_404_to_not_found() {
        let (url, _recorded) = spawn_api_server().await;
        let api = HttpJobApi::new(&url).unwrap();

        assert_eq!(api.get_job(JobId(1)).await.unwrap().id, JobId(1));
        assert!(matches!(
            api.get_job(JobId(2)).await,
            Err(ApiError::NotFound(JobId(2)))
        ));
    }

    #[tokio::test]
    async fn create_job_posts_form() {
        let (url, recorded) = spawn_api_server().await;
        let api = HttpJobApi::new(&url).unwrap();
        let mut form = NewJobPosting::new(
            "Roofer",
            "Acme",
            "Austin, TX",
            "78701",
            "<p>Shingles</p>",
            JobFunction::Labor,
        );
        form.application_email = Some("jobs@acme.test".to_string());

        let created = api.create_job(&form).await.unwrap();

        assert_eq!(created.id, JobId(42));
        assert_eq!(created.job_title, "Roofer");
        let bodies = recorded.bodies.lock().unwrap();
        assert_eq!(bodies[0]["job_function"], "labor");
        assert_eq!(bodies[0]["postal_code"], "78701");
    }

    #[tokio::test]
    async fn payment_intent_round_trip_and_decline() {
        let (url, _recorded) = spawn_api_server().await;
        let api = HttpJobApi::new(&url).unwrap();

        let intent = api
            .create_payment_intent(&PaymentIntentRequest {
                amount: 3500,
                payment_method_id: "pm_card".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(intent.client_secret, "pi_secret");
        assert_eq!(intent.status.as_deref(), Some("succeeded"));

        let err = api
            .create_payment_intent(&PaymentIntentRequest {
                amount: 3500,
                payment_method_id: "pm_declined".to_string(),
            })
            .await
            .unwrap_err();
        assert_eq!(err.detail(), "Card error: Your card was declined.");
    }

    #[tokio::test]
    async fn unreachable_server_is_a_request_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let api = HttpJobApi::new(&format!("http://{}", addr)).unwrap();

        let err = api.list_jobs(0, 25).await.unwrap_err();

        assert!(matches!(err, ApiError::Request(_)));
    }
}
