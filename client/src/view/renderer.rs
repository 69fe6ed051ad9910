//! Job board renderer
//!
//! Renders feeds and postings to LLM-readable markdown format.

use chrono::{DateTime, Utc};
use regex::Regex;

use crate::app::{FeedSnapshot, FeedStatus, PostingOffer, PostingReceipt};
use crate::domain::entities::{title_case, ApplicationMethod, JobPosting, RADIUS_OPTIONS};

/// Characters of description shown on a job card
pub const PREVIEW_LEN: usize = 150;

pub const SERVER_UNAVAILABLE_TITLE: &str = "Unable to connect to job server";
pub const SERVER_UNAVAILABLE_HINT: &str =
    "Please try again later. The server might be temporarily down.";
pub const LOADING_MESSAGE: &str = "Searching for jobs...";
pub const EMPTY_MESSAGE: &str = "No jobs available at the moment";

/// Render the visible feed with 1-based indices
pub fn render_feed(snapshot: &FeedSnapshot, now: DateTime<Utc>) -> String {
    let mut buf = String::new();

    buf.push_str("# Roofing Jobs\n\n");

    let mut filters = Vec::new();
    if let Some(function) = snapshot.function_filter {
        filters.push(format!("Function: {}", function.label()));
    }
    if let Some(location) = &snapshot.location_filter {
        filters.push(format!("Location: {}", location));
    }
    if !filters.is_empty() {
        buf.push_str(&format!("_{}_\n\n", filters.join(" | ")));
    }

    match &snapshot.status {
        FeedStatus::Error(_) => {
            buf.push_str(&format!(
                "**{}**\n{}\n\n",
                SERVER_UNAVAILABLE_TITLE, SERVER_UNAVAILABLE_HINT
            ));
        }
        FeedStatus::Loading if snapshot.jobs.is_empty() => {
            buf.push_str(LOADING_MESSAGE);
            buf.push_str("\n\n");
        }
        _ => {}
    }

    if snapshot.jobs.is_empty() {
        if !matches!(snapshot.status, FeedStatus::Loading) {
            buf.push_str(&format!("_{}_\n\n", EMPTY_MESSAGE));
        }
    } else {
        for (i, job) in snapshot.jobs.iter().enumerate() {
            buf.push_str(&format!("[{}] ", i + 1));
            buf.push_str(&render_job_card(job, now));
            buf.push('\n');
        }
    }

    if snapshot.location_filter.is_none() && snapshot.has_more {
        buf.push_str(&format!(
            "_{} jobs loaded. Use `load_more` for more._\n",
            snapshot.total_loaded
        ));
    }

    buf
}

/// Render one posting as a list card
pub fn render_job_card(job: &JobPosting, now: DateTime<Utc>) -> String {
    let mut buf = format!("**{}**", job.job_title);
    if let Some(company) = job.company_name.as_deref().filter(|c| !c.is_empty()) {
        buf.push_str(&format!(" at {}", company));
    }
    if let Some(posted) = job.posted_date {
        buf.push_str(&format!(" ({})", posted_phrase(posted, now)));
    }
    buf.push('\n');

    let mut meta = vec![job.location.clone()];
    if let Some(salary) = job.salary_range.as_deref().filter(|s| !s.is_empty()) {
        meta.push(salary.to_string());
    }
    buf.push_str(&format!("    {}\n", meta.join(" | ")));

    let tags = job_tags(job);
    if !tags.is_empty() {
        buf.push_str(&format!("    {}\n", tags.join(" · ")));
    }

    let preview = description_preview(&job.description);
    if !preview.is_empty() {
        buf.push_str(&format!("    {}\n", preview));
    }

    buf
}

/// Render the full posting (the detail view)
pub fn render_job_detail(job: &JobPosting) -> String {
    let mut buf = String::new();

    buf.push_str(&format!("# {}\n\n", job.job_title));
    buf.push_str(&format!("**ID:** {}\n", job.id));
    if let Some(company) = &job.company_name {
        buf.push_str(&format!("**Company:** {}\n", company));
    }
    buf.push_str(&format!("**Location:** {}\n", job.location));
    if let Some(zip) = &job.postal_code {
        buf.push_str(&format!("**ZIP:** {}\n", zip));
    }
    if let Some(kind) = &job.employment_type {
        buf.push_str(&format!("**Employment:** {}\n", kind));
    }
    if let Some(remote) = &job.remote_type {
        buf.push_str(&format!("**Work site:** {}\n", remote));
    }
    if let Some(function) = job.job_function {
        buf.push_str(&format!("**Function:** {}\n", function.label()));
    }
    if let Some(salary) = &job.salary_range {
        buf.push_str(&format!("**Salary:** {}\n", salary));
    }
    if let Some(posted) = job.posted_date {
        buf.push_str(&format!("**Posted:** {}\n", posted.format("%Y-%m-%d")));
    }

    buf.push_str("\n## Description\n\n");
    buf.push_str(&html_to_text(&job.description));
    buf.push_str("\n\n## How to Apply\n\n");

    let methods = job.application_methods();
    if methods.is_empty() {
        buf.push_str("_No application method listed._\n");
    }
    for method in methods {
        let label = match method {
            ApplicationMethod::Email => "Apply via Email",
            ApplicationMethod::Link => "Apply Online",
            ApplicationMethod::Company => "Visit Company Website",
        };
        if let Some(target) = job.application_target(method) {
            buf.push_str(&format!("- {} (`apply {} {}`): {}\n", label, job.id, method, target));
        }
    }

    buf
}

/// Render the posting landing page
pub fn render_offer(offer: &PostingOffer) -> String {
    let mut buf = String::new();

    buf.push_str("# Post Your Roofing Job\n\n");
    buf.push_str("Reach qualified roofing professionals across the country.\n\n");
    buf.push_str(&format!("**{}** per job posting\n\n", offer.fee_display()));
    buf.push_str("## What's Included\n\n");
    for item in &offer.included {
        buf.push_str(&format!("- {}\n", item));
    }
    buf.push_str(&format!(
        "\nNext: fill in the form at `{}` and submit with a payment method.\n",
        offer.next
    ));

    buf
}

/// Render the confirmation after a successful posting
pub fn render_receipt(receipt: &PostingReceipt) -> String {
    let mut buf = String::new();

    buf.push_str("# Job Posted Successfully!\n\n");
    buf.push_str(&format!(
        "**{}** (ID {}) is now live. Charged {}.\n\n",
        receipt.job.job_title,
        receipt.job.id,
        crate::app::format_cents(receipt.amount_cents)
    ));
    buf.push_str("## What's Next?\n\n");
    buf.push_str("- Your job will be visible to thousands of qualified candidates\n");
    buf.push_str("- You'll receive email notifications when candidates apply\n");
    buf.push_str("- Track applications and engagement in real-time\n");

    buf
}

/// "Radius options: 25, 50, 100, 150, 200 miles"
pub fn render_radius_options() -> String {
    let options: Vec<String> = RADIUS_OPTIONS.iter().map(u32::to_string).collect();
    format!("Radius options: {} miles", options.join(", "))
}

/// Employment type, remote type and function, title-cased
fn job_tags(job: &JobPosting) -> Vec<String> {
    let mut tags = Vec::new();
    if let Some(kind) = &job.employment_type {
        tags.push(kind.to_string());
    }
    if let Some(remote) = &job.remote_type {
        tags.push(remote.to_string());
    }
    if let Some(function) = job.job_function {
        tags.push(title_case(function.as_str()));
    }
    tags
}

/// "Posted yesterday", "Posted 3 days ago", "Posted 2 weeks ago", ...
///
/// Partial days round up.
pub fn posted_phrase(posted: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let seconds = (now - posted).num_seconds().unsigned_abs();
    let days = seconds.div_ceil(86_400);

    match days {
        1 => "Posted yesterday".to_string(),
        d if d < 7 => format!("Posted {} days ago", d),
        d if d < 30 => format!("Posted {} weeks ago", d / 7),
        d => format!("Posted {} months ago", d / 30),
    }
}

/// Plain-text description cut to the card length
pub fn description_preview(html: &str) -> String {
    let text = html_to_text(html).split_whitespace().collect::<Vec<_>>().join(" ");
    truncate(&text, PREVIEW_LEN)
}

/// First `max_chars` characters followed by "..." when anything was cut
pub fn truncate(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        None => s.to_string(),
        Some((idx, _)) => format!("{}...", &s[..idx]),
    }
}

/// Strip markup from a rich-text description, keeping paragraph breaks.
pub fn html_to_text(html: &str) -> String {
    let (Ok(breaks), Ok(items), Ok(tags), Ok(blank_lines)) = (
        Regex::new(r"(?i)<br\s*/?>|</p>|</div>|</li>|</h[1-6]>"),
        Regex::new(r"(?i)<li[^>]*>"),
        Regex::new(r"<[^>]*>"),
        Regex::new(r"\n\s*\n+"),
    ) else {
        return html.to_string();
    };

    let text = breaks.replace_all(html, "\n");
    let text = items.replace_all(&text, "- ");
    let text = tags.replace_all(&text, "");
    let text = text
        .replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&");
    let joined = text.lines().map(str::trim).collect::<Vec<_>>().join("\n");
    blank_lines.replace_all(joined.trim(), "\n\n").into_owned()
}
