mod authorize;
mod batch;
mod capabilities;
mod review;
mod score;

use crate::command::domain::{CommandAction, CommandOutcome, RequestError};
use anyhow::Result;
use engage_access::{Actor, Role};
use engage_protocol::ActorPayload;
use engage_sentiment::Scorer;
use serde_json::Value;

pub struct Services {
    authorize: authorize::AuthorizeService,
    capabilities: capabilities::CapabilitiesService,
    review: review::ReviewService,
    score: score::ScoreService,
}

impl Services {
    pub fn new(scorer: Scorer) -> Self {
        Self {
            authorize: authorize::AuthorizeService,
            capabilities: capabilities::CapabilitiesService,
            review: review::ReviewService::new(scorer.clone()),
            score: score::ScoreService::new(scorer),
        }
    }

    pub fn route(&self, action: CommandAction, payload: Value) -> Result<CommandOutcome> {
        match action {
            CommandAction::Batch => batch::run(self, payload),
            _ => self.route_item(action, payload),
        }
    }

    fn route_item(&self, action: CommandAction, payload: Value) -> Result<CommandOutcome> {
        match action {
            CommandAction::Score => self.score.run(payload),
            CommandAction::Authorize => self.authorize.run(payload),
            CommandAction::Review => self.review.run(payload),
            CommandAction::Capabilities => self.capabilities.run(payload),
            CommandAction::Batch => Err(RequestError::NestedBatch.into()),
        }
    }
}

/// Convert a wire actor into a checked one; `None` stays anonymous.
fn parse_actor(payload: Option<ActorPayload>) -> Result<Option<Actor>> {
    payload
        .map(|actor| -> Result<Actor> {
            let role: Role = actor.role.parse()?;
            Ok(Actor::new(actor.id, role))
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_actor_checks_role() {
        let actor = parse_actor(Some(ActorPayload {
            id: "u-1".to_string(),
            role: "business_owner".to_string(),
        }))
        .unwrap();
        assert_eq!(actor, Some(Actor::new("u-1", Role::BusinessOwner)));

        assert!(parse_actor(None).unwrap().is_none());
        assert!(parse_actor(Some(ActorPayload {
            id: "u-1".to_string(),
            role: "mayor".to_string(),
        }))
        .is_err());
    }
}
