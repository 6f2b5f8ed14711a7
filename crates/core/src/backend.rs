use crate::transcript::{Speaker, Turn};
use async_openai::{
    Client,
    config::OpenAIConfig,
    error::OpenAIError,
    types::{
        ChatCompletionRequestAssistantMessageArgs, ChatCompletionRequestMessage,
        ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequestArgs,
    },
};
use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

/// Output cap for a single patient reply; answers are meant to be short.
const MAX_REPLY_TOKENS: u32 = 300;
/// Low temperature keeps the patient consistent across a whole interview.
const REPLY_TEMPERATURE: f32 = 0.2;

/// Ways a generation attempt can fail.
///
/// `NoCredential` is not a fault: running without an API key is a supported
/// mode, and callers match on it to select the deterministic fallback path.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("no API credential is configured")]
    NoCredential,
    #[error("transport failure: {0}")]
    Transport(String),
    #[error("service failure: {0}")]
    Service(String),
    #[error("backend returned no usable text")]
    EmptyResponse,
}

/// A text-generation backend that plays the patient.
///
/// One invocation makes exactly one outbound call; there is no retry,
/// caching or rate limiting at this layer.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ResponderBackend: Send + Sync {
    async fn generate(
        &self,
        system_instruction: &str,
        turns: &[Turn],
    ) -> Result<String, BackendError>;
}

/// `ResponderBackend` over an OpenAI-compatible chat completions API.
pub struct OpenAiResponder {
    client: Option<Client<OpenAIConfig>>,
    model: String,
}

impl OpenAiResponder {
    /// Builds a responder for `model`. With `api_key` absent the responder
    /// is still constructible, but every `generate` reports `NoCredential`.
    pub fn new(api_key: Option<String>, model: impl Into<String>) -> Self {
        let client =
            api_key.map(|key| Client::with_config(OpenAIConfig::new().with_api_key(key)));
        Self {
            client,
            model: model.into(),
        }
    }

    pub fn has_credential(&self) -> bool {
        self.client.is_some()
    }
}

#[async_trait]
impl ResponderBackend for OpenAiResponder {
    async fn generate(
        &self,
        system_instruction: &str,
        turns: &[Turn],
    ) -> Result<String, BackendError> {
        let client = self.client.as_ref().ok_or(BackendError::NoCredential)?;

        let messages =
            request_messages(system_instruction, turns).map_err(map_openai_error)?;
        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(messages)
            .max_completion_tokens(MAX_REPLY_TOKENS)
            .temperature(REPLY_TEMPERATURE)
            .build()
            .map_err(map_openai_error)?;

        let response = client
            .chat()
            .create(request)
            .await
            .map_err(map_openai_error)?;

        let text = response
            .choices
            .first()
            .and_then(|choice| choice.message.content.as_deref())
            .map(str::trim)
            .unwrap_or_default();
        if text.is_empty() {
            return Err(BackendError::EmptyResponse);
        }
        Ok(text.to_string())
    }
}

/// Maps the conversation window onto the wire message types, system
/// instruction first.
fn request_messages(
    system_instruction: &str,
    turns: &[Turn],
) -> Result<Vec<ChatCompletionRequestMessage>, OpenAIError> {
    let mut messages: Vec<ChatCompletionRequestMessage> = vec![
        ChatCompletionRequestSystemMessageArgs::default()
            .content(system_instruction)
            .build()?
            .into(),
    ];
    for turn in turns {
        match turn.speaker {
            Speaker::Student => messages.push(
                ChatCompletionRequestUserMessageArgs::default()
                    .content(turn.text.clone())
                    .build()?
                    .into(),
            ),
            Speaker::Patient => messages.push(
                ChatCompletionRequestAssistantMessageArgs::default()
                    .content(turn.text.clone())
                    .build()?
                    .into(),
            ),
        }
    }
    Ok(messages)
}

fn map_openai_error(err: OpenAIError) -> BackendError {
    match err {
        OpenAIError::Reqwest(e) => BackendError::Transport(e.to_string()),
        other => BackendError::Service(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_generate_without_credential() {
        let responder = OpenAiResponder::new(None, "gpt-3.5-turbo");
        assert!(!responder.has_credential());

        let result = responder.generate("instruction", &[]).await;
        assert!(matches!(result, Err(BackendError::NoCredential)));
    }

    #[test]
    fn test_responder_with_credential() {
        let responder = OpenAiResponder::new(Some("sk-test".to_string()), "gpt-3.5-turbo");
        assert!(responder.has_credential());
    }

    #[test]
    fn test_request_messages_order_and_roles() {
        let turns = vec![
            Turn::student("Does it hurt?"),
            Turn::patient("Yes, it burns."),
            Turn::student("Since when?"),
        ];
        let messages = request_messages("act as a patient", &turns).unwrap();

        assert_eq!(messages.len(), 4);
        assert!(matches!(
            messages[0],
            ChatCompletionRequestMessage::System(_)
        ));
        assert!(matches!(messages[1], ChatCompletionRequestMessage::User(_)));
        assert!(matches!(
            messages[2],
            ChatCompletionRequestMessage::Assistant(_)
        ));
        assert!(matches!(messages[3], ChatCompletionRequestMessage::User(_)));
    }

    #[test]
    fn test_error_mapping_to_service() {
        let mapped = map_openai_error(OpenAIError::InvalidArgument("bad".to_string()));
        assert!(matches!(mapped, BackendError::Service(_)));
    }

    #[test]
    fn test_backend_error_display() {
        assert_eq!(
            format!("{}", BackendError::NoCredential),
            "no API credential is configured"
        );
        assert_eq!(
            format!("{}", BackendError::Transport("timeout".to_string())),
            "transport failure: timeout"
        );
    }
}
