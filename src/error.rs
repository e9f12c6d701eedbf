#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The provider payload is missing a field the session cannot be built without.
    #[error("malformed provider payload: missing {field}")]
    MalformedPayload { field: &'static str },
    #[error("malformed provider payload: {0}")]
    MalformedPayloadJson(#[source] serde_json::Error),
    /// A persisted session blob could not be decoded.
    #[error("failed to deserialize session: {0}")]
    Deserialize(#[source] serde_json::Error),
    #[error("failed to serialize session: {0}")]
    Serialize(#[source] serde_json::Error),
    #[cfg(feature = "client")]
    #[error("client configuration error: {0}")]
    Config(String),
}
