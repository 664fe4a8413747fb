//! Application layer for nova-assistant
//!
//! Use cases and ports. The request builder and response composer live
//! here because they are pure orchestration logic; the network-facing
//! adapters implementing the ports live in the infrastructure layer.

pub mod compose;
pub mod config;
pub mod ports;
pub mod request;
pub mod use_cases;

// Re-export commonly used types
pub use compose::ResponseComposer;
pub use config::ModelSelection;
pub use ports::{ModelInvoker, ProfileResolver, ReplyStream, ToolGateway};
pub use request::{RequestBody, RequestBuilder};
pub use use_cases::{
    DocGenInput, ResearchInput, RunChatUseCase, RunDocGenUseCase, RunResearchUseCase,
};
