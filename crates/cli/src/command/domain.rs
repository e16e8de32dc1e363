use anyhow::Result;
use engage_access::{AccessError, DenyReason};
use engage_protocol::{ErrorEnvelope, NextAction};
use engage_sentiment::SentimentError;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{json, Value};

pub const BATCH_VERSION: u32 = 1;

#[derive(Debug, Deserialize)]
pub struct CommandRequest {
    pub action: CommandAction,
    #[serde(default = "empty_payload")]
    pub payload: Value,
    /// Per-request overlay on top of the file config
    #[serde(default)]
    pub config: Option<Value>,
}

fn empty_payload() -> Value {
    Value::Object(Default::default())
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CommandAction {
    Score,
    Authorize,
    Review,
    Batch,
    Capabilities,
}

impl CommandAction {
    pub const ALL: [CommandAction; 5] = [
        CommandAction::Score,
        CommandAction::Authorize,
        CommandAction::Review,
        CommandAction::Batch,
        CommandAction::Capabilities,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            CommandAction::Score => "score",
            CommandAction::Authorize => "authorize",
            CommandAction::Review => "review",
            CommandAction::Batch => "batch",
            CommandAction::Capabilities => "capabilities",
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct BatchPayload {
    #[serde(default)]
    pub stop_on_error: bool,
    pub items: Vec<BatchItem>,
}

#[derive(Debug, Deserialize)]
pub struct BatchItem {
    pub id: String,
    pub action: CommandAction,
    #[serde(default = "empty_payload")]
    pub payload: Value,
}

#[derive(Debug, Serialize, Clone)]
pub struct BatchItemResult {
    pub id: String,
    pub status: CommandStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorEnvelope>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub hints: Vec<Hint>,
    #[serde(default)]
    pub data: Value,
}

#[derive(Debug, Serialize, Clone)]
pub struct BatchOutput {
    pub version: u32,
    pub items: Vec<BatchItemResult>,
    pub stopped_early: bool,
}

#[derive(Debug, Serialize)]
pub struct CommandResponse {
    pub status: CommandStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorEnvelope>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub hints: Vec<Hint>,
    #[serde(default)]
    pub data: Value,
    #[serde(default)]
    pub meta: ResponseMeta,
}

impl CommandResponse {
    pub fn ok(outcome: CommandOutcome, meta: ResponseMeta) -> Self {
        Self {
            status: CommandStatus::Ok,
            message: None,
            error: None,
            hints: outcome.hints,
            data: outcome.data,
            meta,
        }
    }

    pub fn error(envelope: ErrorEnvelope, meta: ResponseMeta) -> Self {
        Self {
            status: CommandStatus::Error,
            message: Some(envelope.message.clone()),
            error: Some(envelope),
            hints: Vec::new(),
            data: Value::Null,
            meta,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self.status, CommandStatus::Error)
    }
}

#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CommandStatus {
    Ok,
    Error,
}

#[derive(Debug, Serialize, Clone)]
pub struct Hint {
    #[serde(rename = "type")]
    pub kind: HintKind,
    pub text: String,
}

impl Hint {
    pub fn warn(text: impl Into<String>) -> Self {
        Self {
            kind: HintKind::Warn,
            text: text.into(),
        }
    }
}

#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum HintKind {
    Warn,
}

#[derive(Debug, Serialize, Default, Clone)]
pub struct ResponseMeta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,
}

#[derive(Debug)]
pub struct CommandOutcome {
    pub data: Value,
    pub hints: Vec<Hint>,
}

impl CommandOutcome {
    pub fn from_value<T: Serialize>(value: T) -> Result<Self> {
        Ok(Self {
            data: serde_json::to_value(value)?,
            hints: Vec::new(),
        })
    }

    #[must_use]
    pub fn with_hints(mut self, hints: Vec<Hint>) -> Self {
        self.hints = hints;
        self
    }
}

/// Request shapes rejected by the router before any service runs.
#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    #[error("batch items cannot be batches")]
    NestedBatch,
}

pub fn parse_payload<T: DeserializeOwned>(payload: Value) -> Result<T> {
    serde_json::from_value(payload).map_err(Into::into)
}

/// Map a failed action onto a stable error envelope.
pub fn classify_error(err: &anyhow::Error) -> ErrorEnvelope {
    if let Some(access) = err.downcast_ref::<AccessError>() {
        let envelope = ErrorEnvelope::new(access.code(), access.to_string());
        return match access {
            AccessError::Denied(DenyReason::Unauthenticated) => envelope
                .with_hint("Pass payload.actor with the caller's id and role."),
            AccessError::Denied(reason) => {
                envelope.with_details(json!({ "reason": reason.code() }))
            }
            AccessError::UnknownOperation(_) => {
                let mut envelope = envelope
                    .with_hint("Operation names are snake_case, e.g. create_review.");
                envelope.next_actions.push(NextAction {
                    action: CommandAction::Capabilities.as_str().to_string(),
                    args: json!({}),
                    reason: "List every known operation and its access policy.".to_string(),
                });
                envelope
            }
            AccessError::UnknownRole(_) => envelope.with_hint(
                "Roles are resident, business_owner or community_organizer.",
            ),
        };
    }

    if let Some(sentiment) = err.downcast_ref::<SentimentError>() {
        return ErrorEnvelope::new("invalid_config", sentiment.to_string())
            .with_hint("Fix the [sentiment] section of the config file or request.");
    }

    if let Some(request) = err.downcast_ref::<RequestError>() {
        return ErrorEnvelope::new("invalid_request", request.to_string())
            .with_hint("Flatten nested batches into a single items list.");
    }

    if err.downcast_ref::<serde_json::Error>().is_some() {
        return ErrorEnvelope::new("invalid_request", format!("{err:#}"))
            .with_hint("Run action=capabilities for the payload schemas.");
    }

    ErrorEnvelope::new("internal", format!("{err:#}"))
}
