use crate::command::domain::{CommandAction, CommandOutcome};
use anyhow::Result;
use engage_access::{Authentication, Operation, OwnerRule};
use engage_protocol::{
    payload_schemas, Capabilities, CapabilitiesServer, OperationInfo,
    CAPABILITIES_SCHEMA_VERSION, COMMAND_API_VERSION,
};
use serde_json::Value;

pub(crate) struct CapabilitiesService;

impl CapabilitiesService {
    pub fn run(&self, _payload: Value) -> Result<CommandOutcome> {
        let output = Capabilities {
            schema_version: CAPABILITIES_SCHEMA_VERSION,
            server: CapabilitiesServer {
                name: "engage-cli".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            command_api: COMMAND_API_VERSION.to_string(),
            actions: CommandAction::ALL
                .iter()
                .map(|action| action.as_str().to_string())
                .collect(),
            operations: Operation::ALL.iter().copied().map(operation_info).collect(),
            payload_schemas: payload_schemas()?,
        };

        CommandOutcome::from_value(output)
    }
}

pub(crate) fn operation_info(op: Operation) -> OperationInfo {
    let policy = op.policy();
    OperationInfo {
        name: op.as_str().to_string(),
        subgraph: op.subgraph().as_str().to_string(),
        authentication: match policy.authentication {
            Authentication::Public => "public",
            Authentication::Required => "required",
        }
        .to_string(),
        required_role: policy.required_role.map(|role| role.as_str().to_string()),
        owner_rule: match policy.owner_rule {
            OwnerRule::None => "none",
            OwnerRule::MustOwn => "must_own",
            OwnerRule::NoSelfReview => "no_self_review",
        }
        .to_string(),
    }
}
