use std::time::Duration;

use base64::{Engine as _, engine::general_purpose};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::domain::{
    classification::{entities::ImageMime, ports::ClassifierClient},
    common::entities::app_errors::CoreError,
};

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);
const TEMPERATURE: f32 = 0.1;

/// Chat-completions client for any OpenAI-compatible endpoint.
#[derive(Debug, Clone)]
pub struct OpenAiClassifierClient {
    api_key: String,
    model: String,
    base_url: String,
    client: Client,
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<Message>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct Message {
    role: &'static str,
    content: MessageContent,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum MessageContent {
    Text(String),
    Parts(Vec<ContentPart>),
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentPart {
    Text { text: String },
    ImageUrl { image_url: ImageUrl },
}

#[derive(Debug, Serialize)]
struct ImageUrl {
    url: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

impl OpenAiClassifierClient {
    pub fn new(api_key: String, model: String) -> Self {
        Self::with_base_url(api_key, model, DEFAULT_BASE_URL.to_string())
    }

    pub fn with_base_url(api_key: String, model: String, base_url: String) -> Self {
        Self {
            api_key,
            model,
            base_url,
            client: Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()
                .expect("failed to build HTTP client"),
        }
    }

    async fn chat(&self, content: MessageContent, max_tokens: u32) -> Result<String, CoreError> {
        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![Message {
                role: "user",
                content,
            }],
            max_tokens,
            temperature: TEMPERATURE,
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("classifier request failed: {}", e);
                CoreError::ClassificationUnavailable(e.to_string())
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!("classifier API error: {} - {}", status, error_text);
            return Err(CoreError::ClassificationUnavailable(format!(
                "API returned {status}: {error_text}"
            )));
        }

        let chat_response: ChatResponse = response.json().await.map_err(|e| {
            tracing::error!("failed to parse classifier response: {}", e);
            CoreError::ClassificationUnavailable(e.to_string())
        })?;

        chat_response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| {
                CoreError::ClassificationUnavailable("empty completion".to_string())
            })
    }
}

impl ClassifierClient for OpenAiClassifierClient {
    async fn complete_text(&self, prompt: String, max_tokens: u32) -> Result<String, CoreError> {
        self.chat(MessageContent::Text(prompt), max_tokens).await
    }

    async fn complete_with_image(
        &self,
        prompt: String,
        image: Vec<u8>,
        mime: ImageMime,
        max_tokens: u32,
    ) -> Result<String, CoreError> {
        let encoded = general_purpose::STANDARD.encode(&image);
        let content = MessageContent::Parts(vec![
            ContentPart::Text { text: prompt },
            ContentPart::ImageUrl {
                image_url: ImageUrl {
                    url: format!("data:{};base64,{encoded}", mime.as_str()),
                },
            },
        ]);

        self.chat(content, max_tokens).await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn client(server: &MockServer) -> OpenAiClassifierClient {
        OpenAiClassifierClient::with_base_url(
            "test-key".to_string(),
            "gpt-4.1-mini".to_string(),
            server.uri(),
        )
    }

    #[tokio::test]
    async fn complete_text_returns_the_first_choice_content() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header("authorization", "Bearer test-key"))
            .and(body_partial_json(json!({
                "model": "gpt-4.1-mini",
                "max_tokens": 1500,
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{"message": {"content": "{\"ingredients\":[]}"}}]
            })))
            .mount(&server)
            .await;

        let content = client(&server)
            .complete_text("analyze this".to_string(), 1500)
            .await
            .unwrap();

        assert_eq!(content, "{\"ingredients\":[]}");
    }

    #[tokio::test]
    async fn image_requests_embed_a_data_url_part() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(body_partial_json(json!({
                "messages": [{
                    "role": "user",
                    "content": [
                        {"type": "text", "text": "read the label"},
                        {"type": "image_url", "image_url": {"url": "data:image/jpeg;base64,/9g="}},
                    ],
                }],
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{"message": {"content": "ok"}}]
            })))
            .mount(&server)
            .await;

        let content = client(&server)
            .complete_with_image("read the label".to_string(), vec![0xff, 0xd8], ImageMime::Jpeg, 1500)
            .await
            .unwrap();

        assert_eq!(content, "ok");
    }

    #[tokio::test]
    async fn http_errors_surface_as_unavailable() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let result = client(&server)
            .complete_text("analyze this".to_string(), 1500)
            .await;

        assert!(matches!(
            result,
            Err(CoreError::ClassificationUnavailable(_))
        ));
    }

    #[tokio::test]
    async fn missing_choices_surface_as_unavailable() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"choices": []})))
            .mount(&server)
            .await;

        let result = client(&server)
            .complete_text("analyze this".to_string(), 1500)
            .await;

        assert!(matches!(
            result,
            Err(CoreError::ClassificationUnavailable(_))
        ));
    }
}
