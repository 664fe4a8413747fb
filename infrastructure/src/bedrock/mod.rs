//! Bedrock adapters: client construction, profile resolution, model
//! invocation, and error classification.

pub mod adapter;
pub mod classify;
pub mod invoker;
pub mod resolver;

pub use adapter::BedrockConnection;
pub use invoker::BedrockInvoker;
pub use resolver::{BedrockProfileDirectory, BedrockProfileResolver, ProfileDirectory};
