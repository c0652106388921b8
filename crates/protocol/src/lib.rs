//! Wire types for the Bugyo cloud portal.
//!
//! This crate contains the shapes the portal's own front end puts on the wire:
//! the url-encoded form bodies, the header names it expects, and the clock
//! vocabulary understood by the punch endpoint.
//!
//! # Design Philosophy
//!
//! Types in this crate are:
//! * Pure data: No behavior beyond encoding and decoding
//! * 1:1 with the portal: field names and literal values match what a browser sends
//! * Stable: Changes only when the portal changes its forms
//!
//! The session driver that sends these forms lives in `bugyo-rs`.

pub mod clock;
pub mod form;
pub mod headers;
pub mod position;
pub mod requests;

pub use clock::*;
pub use form::*;
pub use headers::*;
pub use position::*;
pub use requests::*;
