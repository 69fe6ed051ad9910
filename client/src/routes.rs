//! Path table of the job board
//!
//! `/post-job` has no page of its own; it redirects to the landing page.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Route {
    Home,
    PostJob,
    PostJobLanding,
    PostJobForm,
    PostJobSuccess,
}

impl Route {
    pub const ALL: [Route; 5] = [
        Route::Home,
        Route::PostJob,
        Route::PostJobLanding,
        Route::PostJobForm,
        Route::PostJobSuccess,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::PostJob => "/post-job",
            Route::PostJobLanding => "/post-job/landing",
            Route::PostJobForm => "/post-job/form",
            Route::PostJobSuccess => "/post-job/success",
        }
    }

    /// Where this route redirects to, if anywhere
    pub fn redirect(&self) -> Option<Route> {
        match self {
            Route::PostJob => Some(Route::PostJobLanding),
            _ => None,
        }
    }

    /// Route for `path` after following redirects. Unknown paths are `None`.
    pub fn resolve(path: &str) -> Option<Route> {
        let path = path.split(['?', '#']).next().unwrap_or(path);
        let trimmed = path.trim_end_matches('/');
        let normalized = if trimmed.is_empty() { "/" } else { trimmed };

        let route = Self::ALL.into_iter().find(|r| r.path() == normalized)?;
        Some(route.redirect().unwrap_or(route))
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.path())
    }
}
