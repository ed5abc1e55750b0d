//! One-shot analysis of a downloaded Drive document.

use focal_llm::{ChatMessage, ChatProvider, ProviderError};

const SYSTEM_PROMPT: &str = "Return concise bullet points.";

/// Hard cap on how much document text goes into the prompt.
pub const MAX_CONTENT_CHARS: usize = 50_000;

/// Build the analysis prompt for a downloaded document body.
#[must_use]
pub fn build_analysis_prompt(file_name: &str, mime_type: &str, content: &str) -> String {
    let shown: String = content.chars().take(MAX_CONTENT_CHARS).collect();
    format!(
        "You are analyzing a file from Google Drive for the user.\n\
         Summarize key points, extract actionable items, and highlight any numbers/dates.\n\
         If the text looks truncated, mention what to fetch next.\n\n\
         File name: {file_name}\n\
         MIME: {mime_type}\n\n\
         CONTENT (may be truncated):\n{shown}"
    )
}

/// Analyze a document through the provider.
#[tracing::instrument(skip_all, fields(file_name, mime_type))]
pub async fn analyze_document(
    provider: &dyn ChatProvider,
    file_name: &str,
    mime_type: &str,
    content: &str,
) -> Result<String, ProviderError> {
    let messages = [
        ChatMessage::system(SYSTEM_PROMPT),
        ChatMessage::user(build_analysis_prompt(file_name, mime_type, content)),
    ];
    provider.chat(&messages).await
}
