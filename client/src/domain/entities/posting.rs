//! Job posting form
//!
//! The payload an employer submits through the paid posting workflow.

use reqwest::Url;
use serde::Serialize;

use super::job::{EmploymentType, JobFunction, RemoteType};
use super::location::PostalCode;
use crate::error::ValidationError;

/// Data needed to create a new job posting
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewJobPosting {
    pub job_title: String,
    pub company_name: String,
    /// "City, ST"
    pub location: String,
    pub postal_code: String,
    pub employment_type: EmploymentType,
    pub remote_type: RemoteType,
    /// Rich text (HTML)
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salary_range: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub application_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub application_link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_url: Option<String>,
    pub job_function: JobFunction,
}

impl NewJobPosting {
    /// Form with the defaults the posting page starts from
    /// (full-time, on-site, no salary or contacts yet).
    pub fn new(
        job_title: impl Into<String>,
        company_name: impl Into<String>,
        location: impl Into<String>,
        postal_code: impl Into<String>,
        description: impl Into<String>,
        job_function: JobFunction,
    ) -> Self {
        Self {
            job_title: job_title.into(),
            company_name: company_name.into(),
            location: location.into(),
            postal_code: postal_code.into(),
            employment_type: EmploymentType::FullTime,
            remote_type: RemoteType::OnSite,
            description: description.into(),
            salary_range: None,
            application_email: None,
            application_link: None,
            company_url: None,
            job_function,
        }
    }

    /// Check every field; returns the first problem found.
    pub fn validate(&self) -> Result<(), ValidationError> {
        required(&self.job_title, "Job title")?;
        required(&self.company_name, "Company name")?;
        required(&self.location, "City, State")?;
        required(&self.postal_code, "ZIP code")?;
        PostalCode::parse(&self.postal_code)?;
        required(&self.description, "Description")?;

        if let Some(email) = filled(&self.application_email) {
            if !looks_like_email(email) {
                return Err(ValidationError::Email(email.to_string()));
            }
        }
        if let Some(link) = filled(&self.application_link) {
            check_url(link, "application link")?;
        }
        if let Some(url) = filled(&self.company_url) {
            check_url(url, "company URL")?;
        }

        if filled(&self.application_email).is_none()
            && filled(&self.application_link).is_none()
            && filled(&self.company_url).is_none()
        {
            return Err(ValidationError::NoApplicationMethod);
        }

        Ok(())
    }
}

fn required(value: &str, field: &'static str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::Required(field))
    } else {
        Ok(())
    }
}

fn filled(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn looks_like_email(value: &str) -> bool {
    match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !value.contains(' ')
        }
        None => false,
    }
}

fn check_url(value: &str, field: &'static str) -> Result<(), ValidationError> {
    match Url::parse(value) {
        Ok(url) if url.scheme() == "http" || url.scheme() == "https" => Ok(()),
        _ => Err(ValidationError::Url {
            field,
            value: value.to_string(),
        }),
    }
}
