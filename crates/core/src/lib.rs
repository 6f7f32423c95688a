//! # Studyhall Core
//!
//! Domain types, traits, and error definitions for the Studyhall assistant
//! suite. This crate has **zero framework dependencies** — it defines the
//! domain model that all other crates implement against.
//!
//! ## Design Philosophy
//!
//! Every upstream collaborator (chat-completion provider, document store) is
//! defined as a trait here. Implementations live in their respective crates.
//! This enables:
//! - Swapping implementations via configuration
//! - Easy testing with scripted mock implementations
//! - Clean dependency graph (all crates depend inward on core)

pub mod document;
pub mod error;
pub mod message;
pub mod provider;

// Re-export key types at crate root for ergonomics
pub use document::{DocumentRecord, DocumentStore, RetrievedDocument};
pub use error::{Error, Result};
pub use message::{Message, Role, Transcript};
pub use provider::{Provider, ProviderRequest, ProviderResponse, StreamChunk};
