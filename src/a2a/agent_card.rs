//! Agent Card generation for `.well-known/agent-card.json`.
//!
//! Builds the `AgentCard` once from the gateway configuration, advertising
//! the echo skill and the API key security scheme.

use crate::a2a::types::*;
use crate::config::GatewayConfig;
use std::collections::BTreeMap;

pub const API_KEY_SCHEME: &str = "api-key";
pub const PROTOCOL_VERSION: &str = "0.3.0";

/// The single skill this agent offers.
pub fn echo_skill() -> AgentSkill {
    AgentSkill {
        id: "echo".to_string(),
        name: "Echo Skill".to_string(),
        description: "Echoes the input text".to_string(),
        tags: vec!["echo".to_string(), "test".to_string()],
        examples: vec!["hi".to_string(), "hello world".to_string()],
    }
}

/// Build the public Agent Card for this gateway.
pub fn build_agent_card(config: &GatewayConfig) -> AgentCard {
    let mut security_schemes = BTreeMap::new();
    security_schemes.insert(
        API_KEY_SCHEME.to_string(),
        SecurityScheme::ApiKey {
            name: config.api_key_header.to_string(),
            location: ApiKeyLocation::Header,
            description: None,
        },
    );

    let mut requirement = SecurityRequirement::new();
    requirement.insert(API_KEY_SCHEME.to_string(), vec![]);

    AgentCard {
        name: "Echo Agent".to_string(),
        description: "Just an echo agent".to_string(),
        url: config.public_url(),
        version: crate::VERSION.to_string(),
        protocol_version: PROTOCOL_VERSION.to_string(),
        preferred_transport: "JSONRPC".to_string(),
        default_input_modes: vec!["text".to_string()],
        default_output_modes: vec!["text".to_string()],
        capabilities: AgentCapabilities {
            streaming: false,
            push_notifications: false,
            state_transition_history: false,
        },
        skills: vec![echo_skill()],
        security: vec![requirement],
        security_schemes,
    }
}
