// Conversation commands - send messages, classify intent, describe modes

use crate::agents::{classify_intent, mode_spec, IntentClassification, ModeDispatcher, MODE_TABLE};
use crate::context::ContextAccumulator;
use crate::file_storage::project_ops;
use crate::llm::LlmClient;
use crate::models::{ChatMessage, MessageRole};
use std::path::Path;

use super::types::{ModeInfo, SendMessageRequest, SendMessageResponse};

// ============================================================================
// Message Commands
// ============================================================================

/// Run one conversation turn for a project.
///
/// The mode comes from the request or, when absent, from the intent
/// classifier. Messages and extracted items are persisted only after the
/// LLM call succeeds; a failed turn leaves the project untouched.
pub async fn send_message(
    data_dir: &Path,
    dispatcher: &ModeDispatcher,
    client: &dyn LlmClient,
    request: SendMessageRequest,
) -> Result<SendMessageResponse, String> {
    request.validate()?;

    let project = project_ops::get_project(data_dir, &request.project_id)?;
    let config = dispatcher.config();

    let (mode, intent) = match request.explicit_mode()? {
        Some(mode) => (mode, None),
        None => {
            let intent = classify_intent(&request.content, config);
            log::debug!(
                "Classified message as {} (score {}, fallback {})",
                intent.mode,
                intent.score,
                intent.fallback
            );
            (intent.mode, Some(intent))
        }
    };

    let context = ContextAccumulator::from_project(&project, config.context_window).into_context();

    let response = dispatcher
        .dispatch(mode, &request.content, &context, client)
        .await
        .map_err(|e| format!("Failed to get response: {}", e))?;

    let user_message = ChatMessage::new(MessageRole::User, request.content.clone());
    let assistant_message = ChatMessage::new(MessageRole::Assistant, response.message);

    let new_items = project_ops::record_exchange(
        data_dir,
        &project.id,
        &[user_message.clone(), assistant_message.clone()],
        &response.extracted_items,
    )?;

    log::info!(
        "Project {}: {} turn stored {} new item(s)",
        project.id,
        mode,
        new_items.len()
    );

    Ok(SendMessageResponse {
        user_message,
        message: assistant_message,
        mode,
        new_items,
        intent,
    })
}

/// Classify a message without sending it
pub fn classify_message(
    dispatcher: &ModeDispatcher,
    content: &str,
) -> Result<IntentClassification, String> {
    if content.trim().is_empty() {
        return Err("Message content cannot be empty".to_string());
    }
    Ok(classify_intent(content, dispatcher.config()))
}

/// Describe every conversation mode
pub fn list_modes() -> Vec<ModeInfo> {
    MODE_TABLE
        .iter()
        .map(|spec| ModeInfo {
            mode: spec.mode,
            display_name: spec.mode.display_name().to_string(),
            item_type: mode_spec(spec.mode).item_type(),
            keywords: spec.keywords.iter().map(|k| k.trim().to_string()).collect(),
        })
        .collect()
}
