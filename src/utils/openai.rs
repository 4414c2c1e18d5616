//! OpenAI Chat Completions で選手紹介文を直接生成

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::models::Player;
use crate::utils::api::{send_json, JsonRequest};
use crate::utils::stats::format_rate;

const COMPLETIONS_URL: &str = "https://api.openai.com/v1/chat/completions";
const MODEL: &str = "gpt-3.5-turbo";
const ANNOUNCER_INSTRUCTIONS: &str = "You're a major league baseball announcer of 25 years.";

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    #[serde(default)]
    content: Option<String>,
}

/// 実況アナウンサー向けのプロンプト
pub fn build_prompt(player: &Player) -> String {
    format!(
        "Explain the record of baseball player {} given these stats: {} games, {} batting average, \
         {} RBI, {} slugging percent, and {} position.",
        player.player_name,
        player.games,
        format_rate(player.batting_average),
        player.rbi,
        format_rate(player.slugging_percent),
        player.position,
    )
}

fn request_body(player: &Player) -> Result<String> {
    let prompt = build_prompt(player);
    let request = ChatRequest {
        model: MODEL,
        messages: vec![
            ChatMessage { role: "system", content: ANNOUNCER_INSTRUCTIONS },
            ChatMessage { role: "user", content: &prompt },
        ],
    };
    Ok(serde_json::to_string(&request)?)
}

fn completion_text(response: ChatResponse) -> Result<String> {
    response
        .choices
        .into_iter()
        .find_map(|c| c.message.content)
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
        .ok_or(AppError::EmptyCompletion)
}

/// 紹介文を生成
pub async fn generate_description(api_key: Option<&str>, player: &Player) -> Result<String> {
    let api_key = api_key.filter(|k| !k.is_empty()).ok_or(AppError::MissingApiKey)?;
    let response: ChatResponse = send_json(JsonRequest {
        method: "POST",
        url: COMPLETIONS_URL,
        body: Some(request_body(player)?),
        bearer: Some(api_key),
    })
    .await?;
    completion_text(response)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player() -> Player {
        Player {
            id: 3,
            player_name: "Ichiro".into(),
            position: "RF".into(),
            games: 161,
            rbi: 69,
            batting_average: 0.35,
            slugging_percent: 0.4583,
            ..Default::default()
        }
    }

    #[test]
    fn test_build_prompt() {
        assert_eq!(
            build_prompt(&player()),
            "Explain the record of baseball player Ichiro given these stats: 161 games, 0.350 batting average, \
             69 RBI, 0.458 slugging percent, and RF position."
        );
    }

    #[test]
    fn test_request_body_shape() {
        let body: serde_json::Value = serde_json::from_str(&request_body(&player()).unwrap()).unwrap();
        assert_eq!(body["model"], "gpt-3.5-turbo");
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][0]["content"], ANNOUNCER_INSTRUCTIONS);
        assert_eq!(body["messages"][1]["role"], "user");
    }

    #[test]
    fn test_completion_text() {
        let response: ChatResponse = serde_json::from_str(
            r#"{"choices": [{"message": {"role": "assistant", "content": "  A legend.  "}}]}"#,
        )
        .unwrap();
        assert_eq!(completion_text(response).unwrap(), "A legend.");

        let empty: ChatResponse = serde_json::from_str(r#"{"choices": []}"#).unwrap();
        assert_eq!(completion_text(empty), Err(AppError::EmptyCompletion));
    }
}
