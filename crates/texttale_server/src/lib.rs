//! HTTP surface for TextTale.
//!
//! Provides the layered configuration ([`TextTaleConfig`]), the shared handler
//! state ([`AppState`]) and the axum [`router`]. [`serve`] runs the router until a
//! shutdown future resolves.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod handlers;
mod router;
mod state;

pub use config::{AudioSettings, LogSettings, ServerSettings, TextTaleConfig};
pub use error::ApiError;
pub use router::{router, serve};
pub use state::AppState;
