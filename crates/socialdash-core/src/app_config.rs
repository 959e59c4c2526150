use crate::estimate::EstimatorRules;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    /// Base URL of the scraping backend, e.g. `http://localhost:5000/api`.
    pub api_url: String,
    pub log_level: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    /// Default row count for top-N rankings.
    pub top_n: usize,
    pub likes_per_view: f64,
    pub comments_per_like: f64,
    pub comments_per_view: f64,
    pub min_estimated_likes: u64,
    pub min_estimated_comments: u64,
}

impl AppConfig {
    /// The fallback table configured for this process.
    #[must_use]
    pub fn estimator_rules(&self) -> EstimatorRules {
        EstimatorRules {
            likes_per_view: self.likes_per_view,
            min_estimated_likes: self.min_estimated_likes,
            comments_per_like: self.comments_per_like,
            comments_per_view: self.comments_per_view,
            min_estimated_comments: self.min_estimated_comments,
        }
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("api_url", &redact_userinfo(&self.api_url))
            .field("log_level", &self.log_level)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("top_n", &self.top_n)
            .field("likes_per_view", &self.likes_per_view)
            .field("comments_per_like", &self.comments_per_like)
            .field("comments_per_view", &self.comments_per_view)
            .field("min_estimated_likes", &self.min_estimated_likes)
            .field("min_estimated_comments", &self.min_estimated_comments)
            .finish()
    }
}

/// Hides `user:password@` credentials embedded in a URL.
fn redact_userinfo(url: &str) -> String {
    let Some((scheme, rest)) = url.split_once("://") else {
        return url.to_string();
    };
    let authority_end = rest.find('/').unwrap_or(rest.len());
    match rest[..authority_end].rfind('@') {
        Some(at) => format!("{scheme}://[redacted]@{}", &rest[at + 1..]),
        None => url.to_string(),
    }
}
