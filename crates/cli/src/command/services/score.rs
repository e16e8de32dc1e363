use crate::command::domain::{parse_payload, CommandOutcome};
use anyhow::{Context as AnyhowContext, Result};
use engage_protocol::ScorePayload;
use engage_sentiment::Scorer;
use serde_json::Value;

pub(crate) struct ScoreService {
    scorer: Scorer,
}

impl ScoreService {
    pub fn new(scorer: Scorer) -> Self {
        Self { scorer }
    }

    pub fn run(&self, payload: Value) -> Result<CommandOutcome> {
        let payload: ScorePayload =
            parse_payload(payload).context("Invalid payload for action=score")?;

        if payload.explain {
            CommandOutcome::from_value(self.scorer.analyze(&payload.text))
        } else {
            CommandOutcome::from_value(self.scorer.score(&payload.text))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn scores_text() {
        let service = ScoreService::new(Scorer::default());
        let outcome = service.run(json!({ "text": "terrible wait" })).unwrap();
        assert_eq!(outcome.data["score"], -5.0);
        assert_eq!(outcome.data["label"], "very_negative");
        assert!(outcome.data.get("matches").is_none());
    }

    #[test]
    fn explain_includes_evidence() {
        let service = ScoreService::new(Scorer::default());
        let outcome = service
            .run(json!({ "text": "terrible wait", "explain": true }))
            .unwrap();
        assert_eq!(outcome.data["penalized"], json!(["terrible"]));
        assert_eq!(outcome.data["lexicon_score"], -3);
        assert_eq!(outcome.data["label"], "very_negative");
    }

    #[test]
    fn missing_text_is_rejected() {
        let service = ScoreService::new(Scorer::default());
        assert!(service.run(json!({})).is_err());
    }
}
