//! Session driver for the Bugyo cloud time-clock portal.
//!
//! The portal has no public API. This crate replays the request sequence its
//! own front end issues: an HTML login flow that threads an anti-forgery token
//! and cookies from page to page, followed by the punch flow that records a
//! clock event.
//!
//! # Example
//!
//! ```ignore
//! use bugyo::{Client, ClientConfig, ClockType, Credentials};
//!
//! let credentials = Credentials::new("acme", "1234", "secret")?;
//! let mut client = Client::new(credentials, ClientConfig::default())?;
//! client.login().await?;
//! client.punchmark(ClockType::ClockIn).await?;
//! ```
//!
//! Every step depends on state left by the previous one (token, referer,
//! cookies), so one [`Client`] serves exactly one logical session and its
//! calls must not be interleaved.

pub mod auth;
pub mod client;
pub mod config;
pub mod endpoints;
pub mod error;
pub mod fake_transport;
pub mod markup;
pub mod punch;
pub mod session;
pub mod transport;

pub use bugyo_protocol::{ClockType, Form, Position};
pub use client::Client;
pub use config::{AccountId, ClientConfig, Credentials, Password};
pub use endpoints::Endpoints;
pub use error::{Error, Result};
pub use session::{AuthState, Session};
pub use tokio_util::sync::CancellationToken;
pub use transport::{Document, HttpTransport, Method, Navigator, Request, Response, Transport};

/// User agent sent with every request unless overridden.
pub const DEFAULT_USER_AGENT: &str = concat!("Bugyo-Client-Rust/", env!("CARGO_PKG_VERSION"));
