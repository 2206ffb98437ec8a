//! Shared field shapes: messages, tool calls, settings objects.

use serde_json::{Map, Value as JsonValue};

use crate::data::{Message, ModelSettings, ToolCall};

use super::decode::{as_count, as_float, field, tolerant_json};

// ============================================================================
// MESSAGES
// ============================================================================

/// Message list where every element is an object with a string `role`.
///
/// One malformed element rejects the whole list.
pub(super) fn parse_messages(items: Vec<JsonValue>) -> Option<Vec<Message>> {
    let mut messages = Vec::with_capacity(items.len());
    for item in items {
        let JsonValue::Object(mut obj) = item else {
            tracing::trace!("Message entry is not an object, dropping input");
            return None;
        };
        let role = match obj.remove("role") {
            Some(JsonValue::String(role)) => role,
            _ => {
                tracing::trace!("Message entry has no string role, dropping input");
                return None;
            }
        };
        let content = obj.remove("content").unwrap_or(JsonValue::Null);
        messages.push(Message { role, content });
    }
    Some(messages)
}

/// Messages from a `{messages}` or `{system?, prompt}` prompt object.
pub(super) fn messages_from_prompt(prompt: &Map<String, JsonValue>) -> Option<Vec<Message>> {
    if let Some(JsonValue::Array(items)) = field(prompt, "messages") {
        return parse_messages(items.clone());
    }

    let mut messages = Vec::new();
    if let Some(system) = field(prompt, "system") {
        messages.push(Message {
            role: "system".to_string(),
            content: system.clone(),
        });
    }
    if let Some(text) = field(prompt, "prompt") {
        messages.push(Message {
            role: "user".to_string(),
            content: text.clone(),
        });
    }
    if messages.is_empty() {
        None
    } else {
        Some(messages)
    }
}

// ============================================================================
// TOOL CALLS
// ============================================================================

/// Normalize tool call entries.
///
/// `arg_fields` lists the entry fields holding arguments, in priority order;
/// the first non-null one becomes `args`. A numeric `toolCallId` is kept as
/// its decimal string. Entries without an id or a string `toolName` are
/// dropped, and an empty result is `None`.
pub(super) fn parse_tool_calls(items: &[JsonValue], arg_fields: &[&str]) -> Option<Vec<ToolCall>> {
    let calls: Vec<ToolCall> = items
        .iter()
        .filter_map(|item| {
            let obj = item.as_object()?;
            let tool_call_id = match field(obj, "toolCallId")? {
                JsonValue::String(id) => id.clone(),
                JsonValue::Number(id) => id.to_string(),
                _ => return None,
            };
            let tool_name = field(obj, "toolName")?.as_str()?.to_string();
            let args = arg_fields
                .iter()
                .find_map(|k| field(obj, k))
                .cloned()
                .unwrap_or(JsonValue::Null);
            Some(ToolCall {
                tool_call_id,
                tool_name,
                args,
                provider_metadata: field(obj, "providerMetadata").cloned(),
            })
        })
        .collect();

    if calls.len() < items.len() {
        tracing::trace!(
            kept = calls.len(),
            total = items.len(),
            "Dropped tool call entries without id or name"
        );
    }

    if calls.is_empty() { None } else { Some(calls) }
}

// ============================================================================
// SETTINGS
// ============================================================================

fn object_float(obj: &Map<String, JsonValue>, key: &str) -> Option<f64> {
    as_float(tolerant_json(field(obj, key)?)?.as_ref())
}

fn object_count(obj: &Map<String, JsonValue>, keys: &[&str]) -> Option<u64> {
    keys.iter()
        .find_map(|k| as_count(tolerant_json(field(obj, k)?)?.as_ref()))
}

/// Settings from a camelCase settings object (`maxTokens` or `maxOutputTokens`).
pub(super) fn settings_from_object(obj: &Map<String, JsonValue>) -> Option<ModelSettings> {
    ModelSettings {
        temperature: object_float(obj, "temperature"),
        max_tokens: object_count(obj, &["maxTokens", "maxOutputTokens"]),
        top_p: object_float(obj, "topP"),
        presence_penalty: object_float(obj, "presencePenalty"),
        frequency_penalty: object_float(obj, "frequencyPenalty"),
    }
    .non_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn items(value: JsonValue) -> Vec<JsonValue> {
        value.as_array().unwrap().clone()
    }

    #[test]
    fn test_parse_messages_keeps_content_shape() {
        let messages = parse_messages(items(json!([
            {"role": "system", "content": "Be brief."},
            {"role": "user", "content": [{"type": "text", "text": "Hi"}]}
        ])))
        .unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, "system");
        assert_eq!(messages[1].content, json!([{"type": "text", "text": "Hi"}]));
    }

    #[test]
    fn test_parse_messages_rejects_non_message_elements() {
        assert!(parse_messages(items(json!([{"role": "user"}, "text"]))).is_none());
        assert!(parse_messages(items(json!([{"role": 1, "content": "x"}]))).is_none());
        assert!(parse_messages(items(json!([{"content": "x"}]))).is_none());
    }

    #[test]
    fn test_parse_messages_missing_content_is_null() {
        let messages = parse_messages(items(json!([{"role": "user"}]))).unwrap();
        assert_eq!(messages[0].content, JsonValue::Null);
    }

    #[test]
    fn test_messages_from_prompt_object() {
        let prompt = json!({"system": "Be brief.", "prompt": "Hi"});
        let messages = messages_from_prompt(prompt.as_object().unwrap()).unwrap();
        assert_eq!(messages[0].role, "system");
        assert_eq!(messages[1].role, "user");
        assert_eq!(messages[1].content, json!("Hi"));

        let prompt = json!({"messages": [{"role": "user", "content": "Hi"}]});
        assert_eq!(messages_from_prompt(prompt.as_object().unwrap()).unwrap().len(), 1);

        let prompt = json!({"other": 1});
        assert!(messages_from_prompt(prompt.as_object().unwrap()).is_none());
    }

    #[test]
    fn test_parse_tool_calls_renames_input() {
        let calls = parse_tool_calls(
            &items(json!([{
                "toolCallId": "call_1",
                "toolName": "search",
                "input": {"q": "rust"},
                "providerMetadata": {"openai": {"itemId": "x"}}
            }])),
            &["input", "args"],
        )
        .unwrap();
        assert_eq!(calls[0].tool_call_id, "call_1");
        assert_eq!(calls[0].args, json!({"q": "rust"}));
        assert_eq!(
            calls[0].provider_metadata,
            Some(json!({"openai": {"itemId": "x"}}))
        );
    }

    #[test]
    fn test_parse_tool_calls_drops_incomplete_entries() {
        let calls = parse_tool_calls(
            &items(json!([
                {"toolName": "search", "args": {}},
                {"toolCallId": "c2", "toolName": "lookup", "args": "{\"id\":1}"},
                "garbage"
            ])),
            &["args"],
        )
        .unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].args, json!("{\"id\":1}"));
        assert_eq!(calls[0].provider_metadata, None);

        assert!(parse_tool_calls(&items(json!([{"toolName": "x"}])), &["args"]).is_none());
        assert!(
            parse_tool_calls(
                &items(json!([{"toolCallId": true, "toolName": "x"}])),
                &["args"]
            )
            .is_none()
        );
        assert!(parse_tool_calls(&[], &["args"]).is_none());
    }

    #[test]
    fn test_parse_tool_calls_numeric_id() {
        let calls = parse_tool_calls(
            &items(json!([{"toolCallId": 7, "toolName": "search", "args": {"q": "rust"}}])),
            &["args"],
        )
        .unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].tool_call_id, "7");
        assert_eq!(calls[0].tool_name, "search");
        assert_eq!(calls[0].args, json!({"q": "rust"}));
    }

    #[test]
    fn test_settings_from_object() {
        let obj = json!({"temperature": 0.2, "maxOutputTokens": 256, "topP": "0.9"});
        let settings = settings_from_object(obj.as_object().unwrap()).unwrap();
        assert_eq!(settings.temperature, Some(0.2));
        assert_eq!(settings.max_tokens, Some(256));
        assert_eq!(settings.top_p, Some(0.9));
        assert_eq!(settings.presence_penalty, None);

        let empty = json!({"temperature": "hot"});
        assert!(settings_from_object(empty.as_object().unwrap()).is_none());
    }
}
