//! Domain layer for nova-assistant
//!
//! Core entities and value objects for the request-orchestration flow:
//! conversations, generation parameters, inference profiles, tool
//! request/result types, composed answers, and the closed error taxonomy.
//! This crate has no dependencies on infrastructure or presentation
//! concerns.

pub mod answer;
pub mod conversation;
pub mod core;
pub mod generation;
pub mod profile;
pub mod reply;
pub mod tool;

// Re-export commonly used types
pub use answer::{ComposedAnswer, Provenance, ProvenanceSpan};
pub use conversation::{ContentBlock, Conversation, Role, Turn};
pub use core::{ClassifiedError, ErrorKind, ModelFamily};
pub use generation::GenerationConfig;
pub use profile::{InferenceProfile, region_group_prefix};
pub use reply::{ModelReply, StreamEvent};
pub use tool::{ToolRequest, ToolResult, ToolServer};
