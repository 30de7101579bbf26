//! Client configuration.

/// Default API root.
pub const DEFAULT_BASE_URL: &str = "https://api.github.com";

/// Default `user-agent` header value.
pub const DEFAULT_USER_AGENT: &str = "ghrest";

/// Settings shared by every request a `GitHubClient` builds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// API root, with or without a trailing slash.
    pub base_url: String,
    pub user_agent: String,
    /// Use the stubbed path for listings that offer one.
    pub stubbed: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            stubbed: false,
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            ..Self::default()
        }
    }

    pub fn user_agent(mut self, user_agent: &str) -> Self {
        self.user_agent = user_agent.to_string();
        self
    }

    pub fn stubbed(mut self, stubbed: bool) -> Self {
        self.stubbed = stubbed;
        self
    }
}
