//! Per-task plan generation.
//!
//! The model is asked for strict JSON against a fixed schema. The reply
//! is parsed best-effort: valid JSON is normalized (pretty-printed) for
//! storage and kept as a value; anything else is stored verbatim.

use focal_llm::{ChatMessage, ChatProvider, ProviderError};
use serde_json::Value;

const SYSTEM_PROMPT: &str = "You are an assistant that turns a user task into an actionable plan.\n\
Return STRICT JSON only (no markdown, no backticks).\n\
Keep it short and practical.\n";

/// Outcome of a plan request.
#[derive(Clone, Debug)]
pub struct PlanResult {
    /// Text to persist: pretty JSON when the reply parsed, raw otherwise.
    pub content: String,
    /// The parsed plan, when the model honored the JSON contract.
    pub parsed: Option<Value>,
}

fn schema_hint() -> String {
    serde_json::json!({
        "title": "string (short normalized task title)",
        "priority": "low|medium|high",
        "today_plan": ["step 1", "step 2", "step 3"],
        "suggested_file_searches": [
            {
                "query": "string",
                "regex": false,
                "case_sensitive": false,
                "why": "string",
            }
        ],
        "questions_to_ask_user": ["string"],
    })
    .to_string()
}

fn build_plan_prompt(task_title: &str, context: &str) -> String {
    let mut prompt = format!("Create a plan for this task.\n\nTask: {}\n", task_title.trim());
    let context = context.trim();
    if !context.is_empty() {
        prompt.push_str(&format!("\nContext:\n{context}\n"));
    }
    prompt.push_str("\nReturn JSON matching this schema (keys required):\n");
    prompt.push_str(&schema_hint());
    prompt
}

/// Ask the provider for a plan and normalize its reply.
#[tracing::instrument(skip_all, fields(task_title))]
pub async fn generate_task_plan(
    provider: &dyn ChatProvider,
    task_title: &str,
    context: &str,
) -> Result<PlanResult, ProviderError> {
    let messages = [
        ChatMessage::system(SYSTEM_PROMPT),
        ChatMessage::user(build_plan_prompt(task_title, context)),
    ];
    let raw = provider.chat(&messages).await?;
    let text = raw.trim().to_string();

    match serde_json::from_str::<Value>(&text) {
        Ok(parsed) => {
            let content =
                serde_json::to_string_pretty(&parsed).unwrap_or_else(|_| text.clone());
            Ok(PlanResult {
                content,
                parsed: Some(parsed),
            })
        }
        Err(_) => Ok(PlanResult {
            content: text,
            parsed: None,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    pub struct FixedProvider(pub String);

    #[async_trait::async_trait]
    impl ChatProvider for FixedProvider {
        fn name(&self) -> String {
            "fixed".to_string()
        }

        async fn chat(&self, _: &[ChatMessage]) -> Result<String, ProviderError> {
            Ok(self.0.clone())
        }
    }

    #[test]
    fn prompt_includes_context_only_when_present() {
        let with = build_plan_prompt("ship it", "deadline friday");
        assert!(with.contains("Context:\ndeadline friday"));
        let without = build_plan_prompt("ship it", "   ");
        assert!(!without.contains("Context:"));
        assert!(without.contains("\"priority\""));
    }

    #[tokio::test]
    async fn valid_json_is_normalized_pretty() {
        let provider = FixedProvider(r#"{"title":"x","priority":"high"}"#.to_string());
        let result = generate_task_plan(&provider, "x", "").await.unwrap();
        assert!(result.parsed.is_some());
        assert!(result.content.contains('\n'), "pretty output is multiline");
        assert_eq!(result.parsed.unwrap()["priority"], "high");
    }

    #[tokio::test]
    async fn non_json_reply_is_kept_raw() {
        let provider = FixedProvider("Sure! Here is a plan:\n1. do it".to_string());
        let result = generate_task_plan(&provider, "x", "").await.unwrap();
        assert!(result.parsed.is_none());
        assert_eq!(result.content, "Sure! Here is a plan:\n1. do it");
    }
}
