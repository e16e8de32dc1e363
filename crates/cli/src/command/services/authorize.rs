use super::parse_actor;
use crate::command::domain::{parse_payload, CommandOutcome, Hint};
use anyhow::{Context as AnyhowContext, Result};
use engage_access::{DenyReason, Operation, Resource};
use engage_protocol::AuthorizePayload;
use serde::Serialize;
use serde_json::Value;

pub(crate) struct AuthorizeService;

#[derive(Debug, Serialize)]
struct AuthorizeOutput {
    operation: Operation,
    allowed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<DenyReason>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<&'static str>,
}

impl AuthorizeService {
    /// A denial is a successful answer here, not an error.
    pub fn run(&self, payload: Value) -> Result<CommandOutcome> {
        let payload: AuthorizePayload =
            parse_payload(payload).context("Invalid payload for action=authorize")?;
        let operation: Operation = payload.operation.parse()?;
        let actor = parse_actor(payload.actor)?;
        let resource = payload.resource_owner.map(Resource::owned_by);

        let mut hints = Vec::new();
        if operation.policy().needs_resource() && resource.is_none() {
            hints.push(Hint::warn(format!(
                "{operation} checks ownership but no resource_owner was given; the check fails closed."
            )));
        }

        let verdict = operation.authorize(actor.as_ref(), resource.as_ref());
        let reason = verdict.reason();
        let output = AuthorizeOutput {
            operation,
            allowed: verdict.is_allowed(),
            reason,
            message: reason.map(DenyReason::message),
        };

        Ok(CommandOutcome::from_value(output)?.with_hints(hints))
    }
}
