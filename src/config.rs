use std::time::Duration;

/// Where signups are sent unless configured otherwise.
pub const DEFAULT_ENDPOINT: &str = "https://api-base-url.com/user/signup/add";

/// Settings for the signup system.
#[derive(Debug, Clone, PartialEq)]
pub struct SignupConfig {
    pub endpoint: String,
    pub request_timeout: Duration,
    /// Capacity of the form service's request channel.
    pub buffer_size: usize,
}

impl Default for SignupConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            request_timeout: Duration::from_secs(30),
            buffer_size: 32,
        }
    }
}

impl SignupConfig {
    #[allow(dead_code)]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    #[allow(dead_code)]
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    #[allow(dead_code)]
    pub fn with_buffer_size(mut self, buffer_size: usize) -> Self {
        self.buffer_size = buffer_size.max(1);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builders_override_defaults() {
        let config = SignupConfig::default()
            .with_endpoint("http://localhost:8080/signup")
            .with_request_timeout(Duration::from_secs(5))
            .with_buffer_size(0);

        assert_eq!(config.endpoint, "http://localhost:8080/signup");
        assert_eq!(config.request_timeout, Duration::from_secs(5));
        assert_eq!(config.buffer_size, 1);
        assert_eq!(SignupConfig::default().endpoint, DEFAULT_ENDPOINT);
    }
}
