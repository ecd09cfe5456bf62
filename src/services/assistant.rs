use crate::{
    entities::{item, stock_movement},
    metrics::ASSISTANT_FALLBACKS,
};
use serde::Serialize;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::{error, instrument, warn};

/// Shown when no API key is configured.
const MISSING_KEY_MESSAGE: &str =
    "API Key is missing. Please configure the environment variable.";
/// Shown on any request or parse failure.
const FAILURE_MESSAGE: &str =
    "Sorry, I encountered an error while analyzing your inventory.";
/// Shown when the model returns an empty candidate list.
const EMPTY_MESSAGE: &str = "I couldn't generate an analysis at this time.";

/// How many recent movements are included in the prompt snapshot.
const MOVEMENT_SNAPSHOT_LIMIT: usize = 20;

#[derive(Clone, Debug)]
pub struct AssistantConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub timeout: Duration,
}

/// Inventory-analysis assistant backed by a generative-text API.
///
/// Failure never propagates to the caller: a missing key, transport error or
/// unexpected payload all degrade to a fixed message.
#[derive(Clone)]
pub struct AssistantService {
    config: AssistantConfig,
    http: reqwest::Client,
}

#[derive(Serialize)]
struct ItemSummary<'a> {
    name: &'a str,
    stock: i32,
    min: i32,
    status: String,
    category: &'a str,
}

#[derive(Serialize)]
struct MovementSummary<'a> {
    #[serde(rename = "type")]
    kind: String,
    qty: i32,
    date: String,
    note: Option<&'a str>,
}

impl AssistantService {
    pub fn new(config: AssistantConfig) -> Self {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .unwrap_or_default();
        Self { config, http }
    }

    /// Answers a natural-language query about the inventory snapshot.
    #[instrument(skip(self, inventory, recent_movements), fields(query_len = query.len()))]
    pub async fn analyze(
        &self,
        query: &str,
        inventory: &[item::Model],
        recent_movements: &[stock_movement::Model],
    ) -> String {
        let Some(api_key) = self.config.api_key.as_deref() else {
            ASSISTANT_FALLBACKS.inc();
            return MISSING_KEY_MESSAGE.to_string();
        };

        let prompt = build_prompt(query, inventory, recent_movements);

        match self.generate(api_key, &prompt).await {
            Ok(Some(text)) => text,
            Ok(None) => {
                warn!("Assistant returned no candidates");
                ASSISTANT_FALLBACKS.inc();
                EMPTY_MESSAGE.to_string()
            }
            Err(e) => {
                error!("Assistant request failed: {}", e);
                ASSISTANT_FALLBACKS.inc();
                FAILURE_MESSAGE.to_string()
            }
        }
    }

    async fn generate(&self, api_key: &str, prompt: &str) -> Result<Option<String>, reqwest::Error> {
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.config.base_url.trim_end_matches('/'),
            self.config.model,
            api_key
        );

        let body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }]
        });

        let response: Value = self
            .http
            .post(&url)
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(extract_text(&response))
    }
}

/// Summarize the snapshot to keep the prompt small.
fn build_prompt(
    query: &str,
    inventory: &[item::Model],
    recent_movements: &[stock_movement::Model],
) -> String {
    let inventory_summary: Vec<ItemSummary<'_>> = inventory
        .iter()
        .map(|i| ItemSummary {
            name: &i.name,
            stock: i.current_stock,
            min: i.min_stock_threshold,
            status: i.status.to_string(),
            category: &i.category,
        })
        .collect();

    let recent_activity: Vec<MovementSummary<'_>> = recent_movements
        .iter()
        .take(MOVEMENT_SNAPSHOT_LIMIT)
        .map(|m| MovementSummary {
            kind: m.movement_type.to_string(),
            qty: m.quantity,
            date: m.created_at.to_rfc3339(),
            note: m.note.as_deref(),
        })
        .collect();

    format!(
        "You are an expert Inventory Manager Assistant for an audiovisual equipment rental company.\n\n\
         Current Inventory Status (JSON):\n{}\n\n\
         Recent Movements (Last {}):\n{}\n\n\
         User Query: \"{}\"\n\n\
         Analyze the data above to answer the user's query.\n\
         - If asking about low stock, identify items where stock < min.\n\
         - If asking about trends, look at recent movements.\n\
         - Be concise, professional, and actionable.\n\
         - Format your response in Markdown.",
        serde_json::to_string(&inventory_summary).unwrap_or_else(|_| "[]".to_string()),
        MOVEMENT_SNAPSHOT_LIMIT,
        serde_json::to_string(&recent_activity).unwrap_or_else(|_| "[]".to_string()),
        query
    )
}

fn extract_text(response: &Value) -> Option<String> {
    response
        .pointer("/candidates/0/content/parts/0/text")
        .and_then(Value::as_str)
        .map(|s| s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::ItemStatus;
    use chrono::Utc;
    use uuid::Uuid;

    fn sample_item(name: &str, stock: i32, min: i32) -> item::Model {
        item::Model {
            id: Uuid::new_v4(),
            name: name.to_string(),
            brand: "Sony".to_string(),
            model: "X".to_string(),
            category: "Camera".to_string(),
            min_stock_threshold: min,
            tags: serde_json::json!(["4k"]),
            image_url: "https://example.com/x.jpg".to_string(),
            description: String::new(),
            current_stock: stock,
            status: ItemStatus::Ok,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn missing_key_degrades_to_fixed_message() {
        let service = AssistantService::new(AssistantConfig {
            api_key: None,
            model: "gemini-2.0-flash".to_string(),
            base_url: "https://example.invalid".to_string(),
            timeout: Duration::from_secs(1),
        });

        let answer = service.analyze("what is low?", &[], &[]).await;
        assert_eq!(answer, MISSING_KEY_MESSAGE);
    }

    #[tokio::test]
    async fn request_failure_degrades_to_fixed_message() {
        // Unroutable base URL forces a transport error.
        let service = AssistantService::new(AssistantConfig {
            api_key: Some("test-key".to_string()),
            model: "gemini-2.0-flash".to_string(),
            base_url: "http://127.0.0.1:1".to_string(),
            timeout: Duration::from_secs(1),
        });

        let answer = service.analyze("anything", &[], &[]).await;
        assert_eq!(answer, FAILURE_MESSAGE);
    }

    #[test]
    fn prompt_contains_snapshot_and_query() {
        let items = vec![sample_item("Sony Alpha a7S III", 5, 2)];
        let prompt = build_prompt("which cameras are low?", &items, &[]);
        assert!(prompt.contains("Sony Alpha a7S III"));
        assert!(prompt.contains("which cameras are low?"));
        assert!(prompt.contains("\"stock\":5"));
    }

    #[test]
    fn extract_text_reads_first_candidate() {
        let response = serde_json::json!({
            "candidates": [
                { "content": { "parts": [{ "text": "All good." }] } }
            ]
        });
        assert_eq!(extract_text(&response), Some("All good.".to_string()));
        assert_eq!(extract_text(&serde_json::json!({})), None);
    }
}
