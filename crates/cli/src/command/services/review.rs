use super::parse_actor;
use crate::command::domain::{parse_payload, CommandOutcome};
use anyhow::{Context as AnyhowContext, Result};
use engage_access::{Operation, Resource};
use engage_protocol::ReviewPayload;
use engage_sentiment::{Scorer, SentimentResult};
use serde::Serialize;
use serde_json::Value;

/// Review creation: the reviewer is checked before the body is scored, so a
/// rejected review never produces a score.
pub(crate) struct ReviewService {
    scorer: Scorer,
}

#[derive(Debug, Serialize)]
struct ReviewOutput {
    operation: Operation,
    reviewer: String,
    sentiment: SentimentResult,
}

impl ReviewService {
    pub fn new(scorer: Scorer) -> Self {
        Self { scorer }
    }

    pub fn run(&self, payload: Value) -> Result<CommandOutcome> {
        let payload: ReviewPayload =
            parse_payload(payload).context("Invalid payload for action=review")?;
        let actor = parse_actor(payload.actor)?;
        let business = Resource::owned_by(payload.business_owner);

        Operation::CreateReview
            .authorize(actor.as_ref(), Some(&business))
            .into_result()
            .context("Review rejected")?;

        // Authorization above guarantees an actor.
        let reviewer = actor.map(|a| a.id.to_string()).unwrap_or_default();
        let sentiment = self.scorer.score(&payload.text);
        log::debug!(
            "review by {reviewer} for business owned by {} scored {} ({})",
            business.owner_id,
            sentiment.score,
            sentiment.label
        );

        CommandOutcome::from_value(ReviewOutput {
            operation: Operation::CreateReview,
            reviewer,
            sentiment,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use engage_access::{AccessError, DenyReason};
    use serde_json::json;

    fn service() -> ReviewService {
        ReviewService::new(Scorer::default())
    }

    #[test]
    fn resident_review_is_scored() {
        let outcome = service()
            .run(json!({
                "actor": { "id": "res-1", "role": "resident" },
                "business_owner": "owner-1",
                "text": "Lovely bakery, friendly staff"
            }))
            .unwrap();
        assert_eq!(outcome.data["reviewer"], "res-1");
        assert_eq!(outcome.data["sentiment"]["label"], "very_positive");
        assert_eq!(outcome.data["sentiment"]["score"], 5.0);
    }

    #[test]
    fn owner_cannot_review_own_business() {
        let err = service()
            .run(json!({
                "actor": { "id": "owner-1", "role": "business_owner" },
                "business_owner": "owner-1",
                "text": "Best shop in town"
            }))
            .unwrap_err();
        assert_eq!(
            err.downcast_ref::<AccessError>(),
            Some(&AccessError::Denied(DenyReason::SelfReview))
        );
    }

    #[test]
    fn anonymous_review_is_rejected() {
        let err = service()
            .run(json!({ "business_owner": "owner-1", "text": "meh" }))
            .unwrap_err();
        assert_eq!(
            err.downcast_ref::<AccessError>(),
            Some(&AccessError::Denied(DenyReason::Unauthenticated))
        );
    }
}
