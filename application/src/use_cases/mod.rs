//! Use cases orchestrating the tool gateway, profile resolver, and model
//! invoker into complete interaction flows.

pub mod chat;
pub mod document;
pub mod research;

pub use chat::RunChatUseCase;
pub use document::{DocGenInput, RunDocGenUseCase};
pub use research::{ResearchInput, RunResearchUseCase};

#[cfg(test)]
pub(crate) mod test_support {
    //! Mock port implementations shared by the use-case tests.

    use crate::ports::{ModelInvoker, ProfileResolver, ToolGateway};
    use crate::request::RequestBody;
    use assistant_domain::{
        ClassifiedError, InferenceProfile, ModelFamily, ModelReply, ToolRequest, ToolResult,
    };
    use async_trait::async_trait;

    /// Gateway that returns a fixed result for every call.
    pub struct MockGateway {
        result: ToolResult,
    }

    impl MockGateway {
        pub fn returning(result: ToolResult) -> Self {
            Self { result }
        }
    }

    #[async_trait]
    impl ToolGateway for MockGateway {
        async fn call(&self, _request: &ToolRequest) -> ToolResult {
            self.result.clone()
        }
    }

    /// Invoker that always replies or always fails.
    pub struct MockInvoker {
        outcome: Result<ModelReply, ClassifiedError>,
    }

    impl MockInvoker {
        pub fn replying(reply: ModelReply) -> Self {
            Self { outcome: Ok(reply) }
        }

        pub fn failing(error: ClassifiedError) -> Self {
            Self {
                outcome: Err(error),
            }
        }
    }

    #[async_trait]
    impl ModelInvoker for MockInvoker {
        async fn invoke(
            &self,
            _body: &RequestBody,
            _profile: &InferenceProfile,
        ) -> Result<ModelReply, ClassifiedError> {
            self.outcome.clone()
        }
    }

    /// Resolver that applies the cross-region convention without discovery.
    #[derive(Default)]
    pub struct FixedResolver;

    #[async_trait]
    impl ProfileResolver for FixedResolver {
        async fn resolve(
            &self,
            family: &ModelFamily,
            explicit_override: Option<&str>,
        ) -> Result<InferenceProfile, ClassifiedError> {
            let identifier = match explicit_override {
                Some(id) if !id.is_empty() => id.to_string(),
                _ => InferenceProfile::cross_region_identifier(family, "us-east-1"),
            };
            Ok(InferenceProfile::new(family.clone(), "us-east-1", identifier))
        }
    }
}
