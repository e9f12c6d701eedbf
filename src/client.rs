use serde::Serialize;
use url::Url;

use crate::credentials::Credentials;
use crate::error::Error;

/// Env var holding the Taskcluster root URL.
pub const ROOT_URL_ENV: &str = "TASKCLUSTER_ROOT_URL";

/// Minimal argument bag for Taskcluster API client constructors.
///
/// Produced by [`UserSession::client_args`](crate::UserSession::client_args).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[non_exhaustive]
pub struct ClientArgs {
    pub credentials: Credentials,
}

impl ClientArgs {
    /// Complete the bag with the deployment's root URL.
    #[must_use]
    pub fn with_root_url(self, config: &ClientConfig) -> ClientOptions {
        ClientOptions {
            credentials: self.credentials,
            root_url: config.root_url.clone(),
        }
    }
}

/// Everything an API client (index, queue, ...) needs to be built.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
#[non_exhaustive]
pub struct ClientOptions {
    pub credentials: Credentials,
    pub root_url: Url,
}

/// Deployment-level client configuration.
///
/// The session never needs this itself; it is merged into [`ClientArgs`] by
/// code that builds API clients.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct ClientConfig {
    pub(crate) root_url: Url,
}

impl ClientConfig {
    #[must_use]
    pub fn new(root_url: Url) -> Self {
        Self { root_url }
    }

    /// Create config from environment variables.
    ///
    /// # Required env vars
    /// - `TASKCLUSTER_ROOT_URL`: root URL of the Taskcluster deployment
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the variable is missing or not a valid URL.
    pub fn from_env() -> Result<Self, Error> {
        let raw = std::env::var(ROOT_URL_ENV)
            .map_err(|_| Error::Config(format!("{ROOT_URL_ENV} is required")))?;
        Self::parse(&raw)
    }

    /// Create config from a root URL string.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if `root_url` is not a valid URL.
    pub fn parse(root_url: &str) -> Result<Self, Error> {
        let url: Url = root_url
            .trim()
            .parse()
            .map_err(|e| Error::Config(format!("{ROOT_URL_ENV}: {e}")))?;
        Ok(Self::new(url))
    }

    #[must_use]
    pub fn root_url(&self) -> &Url {
        &self.root_url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_root_url() {
        let config = ClientConfig::parse(" https://firefox-ci-tc.services.mozilla.com ").unwrap();
        assert_eq!(
            config.root_url().as_str(),
            "https://firefox-ci-tc.services.mozilla.com/"
        );
    }

    #[test]
    fn test_parse_rejects_garbage() {
        let err = ClientConfig::parse("not a url").unwrap_err();
        assert!(matches!(err, Error::Config(msg) if msg.starts_with("TASKCLUSTER_ROOT_URL")));
    }

    #[test]
    fn test_options_merge_root_url() {
        let config = ClientConfig::new("https://tc.example.com".parse().unwrap());
        let args = ClientArgs {
            credentials: Credentials::new("c").with_access_token("t"),
        };
        let options = args.with_root_url(&config);

        assert_eq!(options.root_url.as_str(), "https://tc.example.com/");
        let json = serde_json::to_value(&options).unwrap();
        assert_eq!(json["rootUrl"], "https://tc.example.com/");
        assert_eq!(json["credentials"]["clientId"], "c");
        assert_eq!(json["credentials"]["accessToken"], "t");
    }
}
