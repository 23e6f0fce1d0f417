//! Core types for Hookforge: resource ids, error families, and the wire buffer.
//!
//! Every content type in the workspace has two encodings: a structured JSON
//! form for authored content and a positional binary form for runtime sync.
//! This crate holds the pieces both sides share.

/// Wire decoding limits.
pub mod config;
/// Content and protocol error families.
pub mod error;
/// Namespaced identifiers.
pub mod id;
/// Accessors for hand-read JSON objects.
pub mod json;
/// Binary reader and writer.
pub mod wire;

/// Re-export the wire limits.
pub use config::WireLimits;
/// Re-export error types.
pub use error::{ContentError, ContentResult, DecodeError, DecodeResult, IdError, ValidationError};
/// Re-export identifier types.
pub use id::{DEFAULT_NAMESPACE, ResourceId};
/// Re-export the JSON object alias.
pub use json::JsonObject;
/// Re-export wire types.
pub use wire::{PacketReader, PacketWriter};
