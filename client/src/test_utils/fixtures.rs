//! Test fixtures
//!
//! Factory functions for creating test data with sensible defaults.

use chrono::{Duration, Utc};

use crate::domain::entities::{
    EmploymentType, JobFunction, JobId, JobPosting, NewJobPosting, RemoteType,
};

/// Create a test posting with an email contact and no job function
pub fn test_job(id: i64) -> JobPosting {
    JobPosting {
        id: JobId(id),
        external_id: None,
        company_id: Some(1),
        company_name: Some("Summit Roofing".to_string()),
        job_title: format!("Roofer {}", id),
        description: "<p>Install and repair <b>shingle</b> roofs.</p>".to_string(),
        location: "Austin, TX".to_string(),
        postal_code: Some("78701".to_string()),
        employment_type: Some(EmploymentType::FullTime),
        remote_type: Some(RemoteType::OnSite),
        salary_range: Some("$20-30/hr".to_string()),
        application_email: Some("hiring@example.com".to_string()),
        application_link: None,
        company_url: None,
        job_function: None,
        posted_date: Some(Utc::now() - Duration::days(3)),
        is_active: Some(true),
    }
}

/// Create a test posting with a specific job function
pub fn test_job_with_function(id: i64, function: JobFunction) -> JobPosting {
    JobPosting {
        job_function: Some(function),
        job_title: format!("{} role {}", function.label(), id),
        ..test_job(id)
    }
}

/// Create `count` postings with ids `offset + 1 ..= offset + count`
pub fn test_jobs(offset: i64, count: usize) -> Vec<JobPosting> {
    (1..=count as i64).map(|n| test_job(offset + n)).collect()
}

/// Create a posting form that passes validation
pub fn test_new_posting() -> NewJobPosting {
    let mut posting = NewJobPosting::new(
        "Roofing Foreman",
        "Summit Roofing",
        "Austin, TX",
        "78701",
        "<p>Lead a crew of four.</p>",
        JobFunction::Management,
    );
    posting.application_email = Some("jobs@summitroofing.com".to_string());
    posting
}
