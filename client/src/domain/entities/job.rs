//! Job posting domain entity
//!
//! A single listed job as served by the Job API. Postings are immutable once
//! fetched.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{de, Deserialize, Deserializer, Serialize};

use crate::error::ValidationError;

/// Unique identifier for a job posting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(pub i64);

impl From<i64> for JobId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for JobId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Job function category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum JobFunction {
    Sales,
    Labor,
    Production,
    Management,
}

impl JobFunction {
    pub const ALL: [JobFunction; 4] = [
        JobFunction::Sales,
        JobFunction::Labor,
        JobFunction::Production,
        JobFunction::Management,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            JobFunction::Sales => "sales",
            JobFunction::Labor => "labor",
            JobFunction::Production => "production",
            JobFunction::Management => "management",
        }
    }

    /// Human label ("Sales", "Labor", ...)
    pub fn label(&self) -> &'static str {
        match self {
            JobFunction::Sales => "Sales",
            JobFunction::Labor => "Labor",
            JobFunction::Production => "Production",
            JobFunction::Management => "Management",
        }
    }
}

impl std::fmt::Display for JobFunction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for JobFunction {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sales" => Ok(JobFunction::Sales),
            "labor" => Ok(JobFunction::Labor),
            "production" => Ok(JobFunction::Production),
            "management" => Ok(JobFunction::Management),
            _ => Err(ValidationError::JobFunction(s.to_string())),
        }
    }
}

// The posting form has sent upper-case values ("LABOR") in the past.
impl<'de> Deserialize<'de> for JobFunction {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}

/// Parse an optional job-function filter from user input.
///
/// Blank input means "all job functions".
pub fn parse_function_filter(input: &str) -> Result<Option<JobFunction>, ValidationError> {
    let trimmed = input.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all") {
        return Ok(None);
    }
    trimmed.parse().map(Some)
}

/// Employment type of a posting
///
/// Values the API sends that are not one of the known kinds are kept as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EmploymentType {
    FullTime,
    PartTime,
    Contract,
    Temporary,
    Other(String),
}

impl EmploymentType {
    pub fn as_str(&self) -> &str {
        match self {
            EmploymentType::FullTime => "full-time",
            EmploymentType::PartTime => "part-time",
            EmploymentType::Contract => "contract",
            EmploymentType::Temporary => "temporary",
            EmploymentType::Other(raw) => raw,
        }
    }
}

impl From<String> for EmploymentType {
    fn from(raw: String) -> Self {
        match raw.trim().to_lowercase().replace('_', "-").as_str() {
            "full-time" | "fulltime" => EmploymentType::FullTime,
            "part-time" | "parttime" => EmploymentType::PartTime,
            "contract" => EmploymentType::Contract,
            "temporary" => EmploymentType::Temporary,
            _ => EmploymentType::Other(raw),
        }
    }
}

impl From<EmploymentType> for String {
    fn from(kind: EmploymentType) -> Self {
        kind.as_str().to_string()
    }
}

impl std::fmt::Display for EmploymentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", title_case(self.as_str()))
    }
}

/// Where the work happens
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RemoteType {
    OnSite,
    Remote,
    Hybrid,
    Other(String),
}

impl RemoteType {
    pub fn as_str(&self) -> &str {
        match self {
            RemoteType::OnSite => "on-site",
            RemoteType::Remote => "remote",
            RemoteType::Hybrid => "hybrid",
            RemoteType::Other(raw) => raw,
        }
    }
}

impl From<String> for RemoteType {
    fn from(raw: String) -> Self {
        match raw.trim().to_lowercase().replace('_', "-").as_str() {
            "on-site" | "onsite" => RemoteType::OnSite,
            "remote" => RemoteType::Remote,
            "hybrid" => RemoteType::Hybrid,
            _ => RemoteType::Other(raw),
        }
    }
}

impl From<RemoteType> for String {
    fn from(kind: RemoteType) -> Self {
        kind.as_str().to_string()
    }
}

impl std::fmt::Display for RemoteType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", title_case(self.as_str()))
    }
}

/// "full-time" -> "Full Time"
pub fn title_case(raw: &str) -> String {
    raw.split(['-', ' '])
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// How a candidate applies to a posting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationMethod {
    Email,
    Link,
    Company,
}

impl ApplicationMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationMethod::Email => "email",
            ApplicationMethod::Link => "link",
            ApplicationMethod::Company => "company",
        }
    }
}

impl std::fmt::Display for ApplicationMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ApplicationMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "email" => Ok(ApplicationMethod::Email),
            "link" => Ok(ApplicationMethod::Link),
            "company" => Ok(ApplicationMethod::Company),
            _ => Err(format!("Unknown application method: {}", s)),
        }
    }
}

/// A job posting as listed by the Job API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobPosting {
    pub id: JobId,
    #[serde(default)]
    pub external_id: Option<String>,
    #[serde(default)]
    pub company_id: Option<i64>,
    #[serde(default)]
    pub company_name: Option<String>,
    pub job_title: String,
    /// Rich text (HTML)
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub postal_code: Option<String>,
    #[serde(default)]
    pub employment_type: Option<EmploymentType>,
    #[serde(default)]
    pub remote_type: Option<RemoteType>,
    #[serde(default)]
    pub salary_range: Option<String>,
    #[serde(default)]
    pub application_email: Option<String>,
    #[serde(default)]
    pub application_link: Option<String>,
    #[serde(default)]
    pub company_url: Option<String>,
    #[serde(default)]
    pub job_function: Option<JobFunction>,
    #[serde(default, deserialize_with = "deserialize_posted_date")]
    pub posted_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

impl JobPosting {
    /// Exact match on job function; `None` matches every posting.
    pub fn matches_function(&self, filter: Option<JobFunction>) -> bool {
        match filter {
            None => true,
            Some(function) => self.job_function == Some(function),
        }
    }

    /// Application methods this posting offers, in display order
    pub fn application_methods(&self) -> Vec<ApplicationMethod> {
        let mut methods = Vec::new();
        if has_text(&self.application_email) {
            methods.push(ApplicationMethod::Email);
        }
        if has_text(&self.application_link) {
            methods.push(ApplicationMethod::Link);
        }
        if has_text(&self.company_url) {
            methods.push(ApplicationMethod::Company);
        }
        methods
    }

    /// Where an application through `method` goes, if the posting offers it
    pub fn application_target(&self, method: ApplicationMethod) -> Option<String> {
        match method {
            ApplicationMethod::Email => non_blank(&self.application_email).map(|email| {
                let subject = format!("Application for {}", self.job_title);
                format!("mailto:{}?subject={}", email, urlencoding::encode(&subject))
            }),
            ApplicationMethod::Link => non_blank(&self.application_link).map(str::to_string),
            ApplicationMethod::Company => non_blank(&self.company_url).map(str::to_string),
        }
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn has_text(value: &Option<String>) -> bool {
    non_blank(value).is_some()
}

/// Parse the API's timestamps: RFC 3339, naive ISO 8601 taken as UTC, or a
/// bare date taken as midnight UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc());
    }
    [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S",
    ]
    .iter()
    .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
    .map(|naive| naive.and_utc())
}

fn deserialize_posted_date<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        None => Ok(None),
        Some(raw) if raw.trim().is_empty() => Ok(None),
        Some(raw) => {
            let parsed = parse_timestamp(raw.trim());
            if parsed.is_none() {
                tracing::debug!("Ignoring unparseable posted_date {:?}", raw);
            }
            Ok(parsed)
        }
    }
}
