use std::time::Duration;

pub const SAMPLE_URL: &str = "https://jsonplaceholder.typicode.com/posts/1";
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Applies to the plain header fetches (menu 1, 2 and 3).
    pub fetch_timeout: Option<Duration>,
    /// Applies to both requests of the cookie flows (menu 4 and 5).
    pub cookie_timeout: Option<Duration>,
    pub sample_url: String,
}

impl Default for Config {
    fn default() -> Self {
        return Config {
            fetch_timeout: Some(DEFAULT_FETCH_TIMEOUT),
            // The cookie flows have never had a timeout and can hang on a silent server.
            cookie_timeout: None,
            sample_url: SAMPLE_URL.to_string(),
        };
    }
}
