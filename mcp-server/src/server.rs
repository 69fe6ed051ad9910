//! Job board MCP server implementation
//!
//! One server instance is one browsing session: the feed, the filters and
//! the tracked interactions live as long as the connection.

use std::sync::Arc;

use crate::session::JobBoardSession;
use anyhow::Result;
use chrono::Utc;
use jobboard_client::app::{LoadOutcome, LocationOutcome};
use jobboard_client::domain::entities::{
    parse_function_filter, ApplicationMethod, Coordinates, EmploymentType, JobFunction, JobId,
    NewJobPosting, RemoteType,
};
use jobboard_client::view::{
    render_feed, render_job_detail, render_offer, render_radius_options, render_receipt,
};
use jobboard_client::ValidationError;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::{
    handler::server::tool::ToolRouter,
    model::{CallToolResult, Content, Implementation, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler,
};
use schemars::JsonSchema;
use serde::Deserialize;

/// Job board MCP Server
#[derive(Clone)]
pub struct JobBoardServer {
    session: Arc<JobBoardSession>,
    tool_router: ToolRouter<Self>,
}

impl JobBoardServer {
    pub fn from_env() -> Result<Self> {
        let session = JobBoardSession::from_env()?;
        Ok(Self::new(session))
    }

    pub fn new(session: JobBoardSession) -> Self {
        Self {
            session: Arc::new(session),
            tool_router: Self::tool_router(),
        }
    }

    async fn feed_text(&self) -> String {
        let snapshot = self.session.feed.snapshot().await;
        render_feed(&snapshot, Utc::now())
    }
}

fn success(text: String) -> Result<CallToolResult, McpError> {
    Ok(CallToolResult::success(vec![Content::text(text)]))
}

fn failure(text: String) -> Result<CallToolResult, McpError> {
    Ok(CallToolResult::error(vec![Content::text(text)]))
}

fn load_note(outcome: LoadOutcome) -> String {
    match outcome {
        LoadOutcome::Loaded(0) => "No more jobs.".to_string(),
        LoadOutcome::Loaded(n) => format!("Loaded {} more jobs.", n),
        LoadOutcome::AlreadyLoading => "Jobs are already loading.".to_string(),
        LoadOutcome::Exhausted => "All jobs are loaded.".to_string(),
        LoadOutcome::LocationMode => {
            "Location results are not paged. Clear the location filter to load more.".to_string()
        }
        LoadOutcome::Stale => "The feed changed while loading; that page was discarded.".to_string(),
    }
}

// --- Tool Parameter Types ---

#[derive(Debug, Deserialize, JsonSchema)]
pub struct FunctionFilterParams {
    /// "sales", "labor", "production" or "management"; omit or "all" to show every job
    #[serde(default)]
    pub function: Option<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct LocationFilterParams {
    /// 5-digit US ZIP code; omit to clear the location filter
    #[serde(default)]
    pub zip: Option<String>,
    /// Radius in miles (25, 50, 100, 150 or 200); defaults to 150
    #[serde(default)]
    pub radius: Option<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct DetectLocationParams {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct JobParams {
    /// Job ID as shown in the feed
    pub id: i64,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct ApplyParams {
    /// Job ID
    pub id: i64,
    /// "email", "link" or "company"
    pub method: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct PostJobParams {
    pub job_title: String,
    pub company_name: String,
    /// "City, ST"
    pub location: String,
    /// 5-digit ZIP code
    pub postal_code: String,
    /// Description, HTML allowed
    pub description: String,
    /// "sales", "labor", "production" or "management"
    pub job_function: String,
    /// "full-time" (default), "part-time", "contract" or "temporary"
    #[serde(default)]
    pub employment_type: Option<String>,
    /// "on-site" (default), "remote" or "hybrid"
    #[serde(default)]
    pub remote_type: Option<String>,
    #[serde(default)]
    pub salary_range: Option<String>,
    #[serde(default)]
    pub application_email: Option<String>,
    #[serde(default)]
    pub application_link: Option<String>,
    #[serde(default)]
    pub company_url: Option<String>,
    /// Payment method token from the payment provider (e.g. "pm_...")
    pub payment_method_id: String,
}

impl PostJobParams {
    fn into_form(self) -> Result<(NewJobPosting, String), ValidationError> {
        let function: JobFunction = self.job_function.parse()?;
        let mut form = NewJobPosting::new(
            self.job_title,
            self.company_name,
            self.location,
            self.postal_code,
            self.description,
            function,
        );
        if let Some(kind) = self.employment_type {
            form.employment_type = EmploymentType::from(kind);
        }
        if let Some(remote) = self.remote_type {
            form.remote_type = RemoteType::from(remote);
        }
        form.salary_range = self.salary_range;
        form.application_email = self.application_email;
        form.application_link = self.application_link;
        form.company_url = self.company_url;
        Ok((form, self.payment_method_id))
    }
}

#[tool_router]
impl JobBoardServer {
    // === Browsing ===

    #[tool(
        description = "Show the job feed with the active filters. Loads the first page on first use. Call this first."
    )]
    async fn jobs(&self) -> Result<CallToolResult, McpError> {
        let snapshot = self.session.feed.snapshot().await;
        if snapshot.total_loaded == 0 && snapshot.has_more && snapshot.location_filter.is_none() {
            if let Err(e) = self.session.feed.load_next_page().await {
                tracing::debug!("First page failed, feed shows the error: {}", e);
            }
        }
        success(self.feed_text().await)
    }

    #[tool(description = "Load the next page of jobs into the feed.")]
    async fn load_more(&self) -> Result<CallToolResult, McpError> {
        match self.session.feed.load_next_page().await {
            Ok(outcome) => success(format!("{}\n\n{}", load_note(outcome), self.feed_text().await)),
            Err(e) => failure(e.user_message()),
        }
    }

    #[tool(
        description = "Filter the feed by job function: sales, labor, production or management. Omit to show all."
    )]
    async fn filter_function(
        &self,
        params: Parameters<FunctionFilterParams>,
    ) -> Result<CallToolResult, McpError> {
        let raw = params.0.function.unwrap_or_default();
        match parse_function_filter(&raw) {
            Ok(filter) => {
                self.session.feed.apply_function_filter(filter).await;
                success(self.feed_text().await)
            }
            Err(e) => failure(e.to_string()),
        }
    }

    #[tool(
        description = "Search jobs within a radius (miles) of a ZIP code. Omit the ZIP to clear the location filter."
    )]
    async fn filter_location(
        &self,
        params: Parameters<LocationFilterParams>,
    ) -> Result<CallToolResult, McpError> {
        let zip = params.0.zip.unwrap_or_default();
        let radius = params.0.radius.unwrap_or_default();
        let filter = match self.session.location.from_input(&zip, &radius) {
            Ok(filter) => filter,
            Err(e @ ValidationError::Radius(_)) => {
                return failure(format!("{}\n{}", e, render_radius_options()))
            }
            Err(e) => return failure(e.to_string()),
        };

        match self.session.feed.apply_location_filter(filter).await {
            Ok(LocationOutcome::Stale) => success(
                "A newer location search replaced this one.".to_string(),
            ),
            Ok(_) => success(self.feed_text().await),
            Err(e) => failure(e.user_message()),
        }
    }

    #[tool(
        description = "Find the ZIP code for a latitude/longitude and search jobs around it with the default radius."
    )]
    async fn detect_location(
        &self,
        params: Parameters<DetectLocationParams>,
    ) -> Result<CallToolResult, McpError> {
        let coordinates = match Coordinates::new(params.0.latitude, params.0.longitude) {
            Ok(coordinates) => coordinates,
            Err(e) => return failure(e.to_string()),
        };

        let Some(filter) = self.session.location.detect(coordinates).await else {
            return success(
                "Could not determine a ZIP code for this position. Use `filter_location` with a ZIP code instead."
                    .to_string(),
            );
        };

        let label = filter.to_string();
        match self.session.feed.apply_location_filter(Some(filter)).await {
            Ok(_) => success(format!("Showing jobs {}.\n\n{}", label, self.feed_text().await)),
            Err(e) => failure(e.user_message()),
        }
    }

    // === Postings ===

    #[tool(description = "Show the full details of a job and how to apply.")]
    async fn job_details(&self, params: Parameters<JobParams>) -> Result<CallToolResult, McpError> {
        match self.session.feed.select_job(JobId(params.0.id)).await {
            Ok(job) => success(render_job_detail(&job)),
            Err(e) => failure(e.user_message()),
        }
    }

    #[tool(description = "Get the link to apply to a job. Methods: 'email', 'link', 'company'.")]
    async fn apply(&self, params: Parameters<ApplyParams>) -> Result<CallToolResult, McpError> {
        let method: ApplicationMethod = match params.0.method.parse() {
            Ok(method) => method,
            Err(e) => return failure(e),
        };
        match self.session.feed.apply_to_job(JobId(params.0.id), method).await {
            Ok(target) => success(format!(
                "Apply to job {} via {}: {}",
                params.0.id, target.method, target.url
            )),
            Err(e) => failure(e.user_message()),
        }
    }

    // === Posting a Job ===

    #[tool(description = "Show what posting a job costs and includes.")]
    async fn post_job_info(&self) -> Result<CallToolResult, McpError> {
        success(render_offer(&self.session.posting.landing()))
    }

    #[tool(
        description = "Post a job. Charges the posting fee with the given payment method, then publishes the job for 30 days."
    )]
    async fn post_job(&self, params: Parameters<PostJobParams>) -> Result<CallToolResult, McpError> {
        let (form, payment_method_id) = match params.0.into_form() {
            Ok(parts) => parts,
            Err(e) => return failure(e.to_string()),
        };
        match self.session.posting.submit(&form, &payment_method_id).await {
            Ok(receipt) => success(render_receipt(&receipt)),
            Err(e) => failure(e.to_string()),
        }
    }
}

#[tool_handler]
impl ServerHandler for JobBoardServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: Default::default(),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "jobboard".into(),
                title: Some("Roofing Job Board MCP Server".into()),
                version: env!("CARGO_PKG_VERSION").into(),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                r#"Roofing Job Board

BROWSING:
1. 'jobs' - See the feed (loads the first page)
2. 'load_more' - Fetch the next page
3. 'filter_function' - Narrow to sales, labor, production or management
4. 'filter_location' - Search around a ZIP code; call without a ZIP to clear
5. 'detect_location' - Search around a latitude/longitude

APPLYING:
- 'job_details' - Full posting and application options
- 'apply' - Get the email or link to apply with

POSTING:
- 'post_job_info' - Price and what's included
- 'post_job' - Pay and publish a posting"#
                    .into(),
            ),
        }
    }
}
