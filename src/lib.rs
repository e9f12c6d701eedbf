#![doc = include_str!("../README.md")]

#[cfg(feature = "client")]
pub mod client;
pub mod codec;
pub mod credentials;
pub mod error;
pub mod expiry;
pub mod identity;
pub mod payload;
pub mod session;
pub mod slot;
pub mod types;

// Re-exports for convenient access
#[cfg(feature = "client")]
pub use client::{ClientArgs, ClientConfig, ClientOptions};
pub use credentials::{CredentialSource, Credentials};
pub use error::Error;
pub use expiry::{describe_duration, describe_remaining};
pub use identity::extract_user_id;
pub use payload::ProviderPayload;
pub use session::{
    RENEWAL_SAFETY_MARGIN, SessionOptions, UNKNOWN_USER, UserSession, user_changed,
};
pub use slot::{SessionChange, SessionSlot};
pub use types::{ClientId, RenewalToken, SessionKind, UserId};
