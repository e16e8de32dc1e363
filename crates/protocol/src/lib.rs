use anyhow::Result;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub const CAPABILITIES_SCHEMA_VERSION: u32 = 1;
pub const COMMAND_API_VERSION: &str = "v1";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, JsonSchema)]
pub struct NextAction {
    pub action: String,
    pub args: serde_json::Value,
    pub reason: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, JsonSchema)]
pub struct ErrorEnvelope {
    pub code: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub next_actions: Vec<NextAction>,
}

impl ErrorEnvelope {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
            hint: None,
            next_actions: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    #[must_use]
    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }
}

/// Caller identity as it appears on the wire. Roles stay strings here so an
/// unknown role can be reported instead of failing deserialization.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, JsonSchema)]
pub struct ActorPayload {
    pub id: String,
    pub role: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, JsonSchema)]
pub struct ScorePayload {
    pub text: String,
    /// Include per-token evidence
    #[serde(default)]
    pub explain: bool,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, JsonSchema)]
pub struct AuthorizePayload {
    pub operation: String,
    /// Omitted for unauthenticated requests
    #[serde(default)]
    pub actor: Option<ActorPayload>,
    /// Owner of the targeted resource, when the operation has one
    #[serde(default)]
    pub resource_owner: Option<String>,
}

/// Create-review flow: gate the reviewer, then score the body.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, JsonSchema)]
pub struct ReviewPayload {
    #[serde(default)]
    pub actor: Option<ActorPayload>,
    /// Owner of the reviewed business
    pub business_owner: String,
    pub text: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, JsonSchema)]
pub struct OperationInfo {
    pub name: String,
    pub subgraph: String,
    pub authentication: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_role: Option<String>,
    pub owner_rule: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, JsonSchema)]
pub struct CapabilitiesServer {
    pub name: String,
    pub version: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, JsonSchema)]
pub struct Capabilities {
    pub schema_version: u32,
    pub server: CapabilitiesServer,
    pub command_api: String,
    pub actions: Vec<String>,
    pub operations: Vec<OperationInfo>,
    pub payload_schemas: serde_json::Value,
}

/// JSON schemas for the payloads of the single-item actions.
pub fn payload_schemas() -> Result<serde_json::Value> {
    Ok(serde_json::json!({
        "score": serde_json::to_value(schemars::schema_for!(ScorePayload))?,
        "authorize": serde_json::to_value(schemars::schema_for!(AuthorizePayload))?,
        "review": serde_json::to_value(schemars::schema_for!(ReviewPayload))?,
    }))
}

pub fn serialize_json<T: Serialize>(value: &T, pretty: bool) -> Result<String> {
    let raw = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(raw)
}
