//! AWS client construction.
//!
//! One shared credential/region resolution feeds both the runtime client
//! (inference) and the control-plane client (profile discovery).

use aws_config::{BehaviorVersion, Region};

/// The pair of Bedrock clients the assistant needs, bound to one region.
pub struct BedrockConnection {
    pub runtime: aws_sdk_bedrockruntime::Client,
    pub control: aws_sdk_bedrock::Client,
    pub region: String,
}

impl BedrockConnection {
    /// Resolve AWS credentials and build both clients.
    ///
    /// `profile` selects a named credentials profile; `None` uses the
    /// default provider chain (environment, instance role, sso cache).
    pub async fn connect(region: &str, profile: Option<&str>) -> Self {
        let mut loader = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(region.to_string()));

        if let Some(profile) = profile {
            loader = loader.profile_name(profile);
        }

        let shared = loader.load().await;
        Self {
            runtime: aws_sdk_bedrockruntime::Client::new(&shared),
            control: aws_sdk_bedrock::Client::new(&shared),
            region: region.to_string(),
        }
    }
}
