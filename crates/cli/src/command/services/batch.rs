use super::Services;
use crate::command::domain::{
    classify_error, parse_payload, BatchItemResult, BatchOutput, BatchPayload, CommandOutcome,
    CommandStatus, BATCH_VERSION,
};
use anyhow::{Context as AnyhowContext, Result};
use serde_json::Value;

/// Run items in order. Failed items are reported in place; with
/// `stop_on_error` the remaining items are skipped.
pub(super) fn run(services: &Services, payload: Value) -> Result<CommandOutcome> {
    let payload: BatchPayload =
        parse_payload(payload).context("Invalid payload for action=batch")?;

    let mut items = Vec::with_capacity(payload.items.len());
    let mut stopped_early = false;

    for item in payload.items {
        match services.route_item(item.action, item.payload) {
            Ok(outcome) => items.push(BatchItemResult {
                id: item.id,
                status: CommandStatus::Ok,
                error: None,
                hints: outcome.hints,
                data: outcome.data,
            }),
            Err(err) => {
                log::debug!("batch item {} failed: {err:#}", item.id);
                items.push(BatchItemResult {
                    id: item.id,
                    status: CommandStatus::Error,
                    error: Some(classify_error(&err)),
                    hints: Vec::new(),
                    data: Value::Null,
                });
                if payload.stop_on_error {
                    stopped_early = true;
                    break;
                }
            }
        }
    }

    CommandOutcome::from_value(BatchOutput {
        version: BATCH_VERSION,
        items,
        stopped_early,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use engage_sentiment::Scorer;
    use serde_json::json;

    fn services() -> Services {
        Services::new(Scorer::default())
    }

    #[test]
    fn runs_items_in_order() {
        let outcome = run(
            &services(),
            json!({
                "items": [
                    { "id": "a", "action": "score", "payload": { "text": "good" } },
                    { "id": "b", "action": "authorize", "payload": { "operation": "list_posts" } }
                ]
            }),
        )
        .unwrap();
        let items = outcome.data["items"].as_array().unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0]["id"], "a");
        assert_eq!(items[0]["data"]["score"], 5.0);
        assert_eq!(items[1]["data"]["allowed"], true);
        assert_eq!(outcome.data["stopped_early"], false);
    }

    #[test]
    fn stop_on_error_skips_the_rest() {
        let outcome = run(
            &services(),
            json!({
                "stop_on_error": true,
                "items": [
                    { "id": "bad", "action": "authorize", "payload": { "operation": "nope" } },
                    { "id": "never", "action": "score", "payload": { "text": "good" } }
                ]
            }),
        )
        .unwrap();
        let items = outcome.data["items"].as_array().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0]["status"], "error");
        assert_eq!(items[0]["error"]["code"], "unknown_operation");
        assert_eq!(outcome.data["stopped_early"], true);
    }

    #[test]
    fn nested_batches_are_item_errors() {
        let outcome = run(
            &services(),
            json!({ "items": [ { "id": "n", "action": "batch", "payload": { "items": [] } } ] }),
        )
        .unwrap();
        assert_eq!(outcome.data["items"][0]["status"], "error");
        let error = &outcome.data["items"][0]["error"];
        assert_eq!(error["code"], "invalid_request");
        assert_eq!(error["message"], "batch items cannot be batches");
    }
}
