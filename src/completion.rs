//! Thin wrapper over the language model.
//!
//! Everything above this module only sees [`Completer::complete`], so the quiz
//! can be driven by a scripted completer in tests.

use std::time::Duration;

use chatgpt::client::ChatGPT;
use chatgpt::config::{ChatGPTEngine, ModelConfiguration};
use chatgpt::types::CompletionResponse;
use log::debug;

use crate::error::{QuizError, Result};

pub const DEFAULT_MODEL: &str = "gpt-4.1-mini";

/// A text-completion capability: prompt in, completion out.
#[allow(async_fn_in_trait)]
pub trait Completer {
    async fn complete(&self, prompt: &str, max_tokens: u32, temperature: f32) -> Result<String>;
}

pub struct ChatGptCompleter {
    chat_gpt: ChatGPT,
}

impl ChatGptCompleter {
    pub fn new(api_key: &str, model: &str, timeout: Duration) -> Result<Self> {
        let config = ModelConfiguration {
            engine: engine_for(model),
            timeout,
            ..Default::default()
        };
        let chat_gpt = ChatGPT::new_with_config(api_key, config)
            .map_err(|err| QuizError::ClientSetup(Box::new(err)))?;

        Ok(Self { chat_gpt })
    }
}

impl Completer for ChatGptCompleter {
    async fn complete(&self, prompt: &str, max_tokens: u32, temperature: f32) -> Result<String> {
        debug!("Sending prompt (max_tokens={max_tokens}, temperature={temperature}): {prompt:?}");

        // Each call site has its own knobs, the shared client config stays untouched.
        let mut gpt = self.chat_gpt.clone();
        gpt.config.temperature = temperature;
        gpt.config.max_tokens = Some(max_tokens);

        let response: CompletionResponse = gpt.send_message(prompt).await?;
        let content = first_choice_content(&response)?;

        debug!("Completion: {:?}", content);

        Ok(content)
    }
}

// `CompletionResponse::message()` unwraps the first choice, so an empty list would panic.
fn first_choice_content(response: &CompletionResponse) -> Result<String> {
    response
        .message_choices
        .first()
        .map(|choice| choice.message.content.clone())
        .ok_or_else(|| QuizError::Completion("response contained no choices".into()))
}

fn engine_for(model: &str) -> ChatGPTEngine {
    match model {
        "gpt-3.5-turbo" => ChatGPTEngine::Gpt35Turbo,
        "gpt-4" => ChatGPTEngine::Gpt4,
        "gpt-4-32k" => ChatGPTEngine::Gpt4_32k,
        // Custom engines need a 'static name; this runs once per process.
        other => ChatGPTEngine::Custom(Box::leak(other.to_owned().into_boxed_str())),
    }
}
