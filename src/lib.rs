//! Typed client for the recruitment platform backend: person lookup,
//! session handling, the application assembly state machine and the
//! recruiter review flow. Rendering and navigation stay with the embedding
//! application; this crate owns the state and the wire calls.

pub mod api;
pub mod auth;
pub mod config;
pub mod draft;
pub mod error;
pub mod lookup;
pub mod models;
pub mod review;
pub mod selection;
pub mod telemetry;

pub use api::{ApiClient, TranslationCache};
pub use auth::{Session, SessionClaims, SessionStore};
pub use config::ClientConfig;
pub use draft::{ApplicationDraft, ApplicationFlow, DEFAULT_LANGUAGE};
pub use error::{ClientError, ClientResult};
pub use lookup::PersonLookup;
pub use review::{ReviewDecision, ReviewFlow};
pub use selection::SelectionSet;
