// file: src/prompts/manifest.rs
// description: structured prompt template parsed from a serialized LangChain manifest
// reference: https://python.langchain.com/docs/concepts/prompt_templates/

use serde_json::Value;

/// The first thing a chat prompt message can expose.
#[derive(Debug, Clone, PartialEq)]
pub enum PromptMessage {
    /// A message prompt template wrapping `kwargs.prompt.kwargs.template`.
    Template(String),
    /// A concrete message with literal `kwargs.content`.
    Content(String),
    Unrecognized,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PromptManifest {
    pub messages: Vec<PromptMessage>,
}

impl PromptManifest {
    /// Parse the `manifest` object of a prompt commit. A manifest without a
    /// message list (for example a plain string prompt) yields no messages.
    pub fn from_value(manifest: &Value) -> Self {
        let messages = manifest
            .pointer("/kwargs/messages")
            .and_then(Value::as_array)
            .map(|messages| messages.iter().map(parse_message).collect())
            .unwrap_or_default();

        Self { messages }
    }
}

fn parse_message(message: &Value) -> PromptMessage {
    let kwargs = message.get("kwargs").unwrap_or(message);

    if let Some(template) = kwargs
        .pointer("/prompt/kwargs/template")
        .and_then(Value::as_str)
    {
        return PromptMessage::Template(template.to_string());
    }

    match kwargs.get("content").and_then(Value::as_str) {
        Some(content) => PromptMessage::Content(content.to_string()),
        None => PromptMessage::Unrecognized,
    }
}
