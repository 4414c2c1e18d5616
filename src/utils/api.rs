//! 選手APIとの通信

use serde::de::DeserializeOwned;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response};

use crate::error::{AppError, Result};
use crate::models::{ApiMessage, DescriptionResponse, Player};
use crate::utils::config::AppConfig;

/// 送信するリクエスト
pub(crate) struct JsonRequest<'a> {
    pub method: &'a str,
    pub url: &'a str,
    pub body: Option<String>,
    pub bearer: Option<&'a str>,
}

impl<'a> JsonRequest<'a> {
    pub fn get(url: &'a str) -> Self {
        JsonRequest { method: "GET", url, body: None, bearer: None }
    }
}

/// エラーレスポンス本文から表示用メッセージを取り出す
pub(crate) fn error_message(body: &str) -> String {
    serde_json::from_str::<ApiMessage>(body)
        .ok()
        .and_then(|m| m.error.or(m.message))
        .unwrap_or_else(|| body.trim().to_string())
}

/// JSONを送受信する共通処理
pub(crate) async fn send_json<T: DeserializeOwned>(req: JsonRequest<'_>) -> Result<T> {
    let opts = RequestInit::new();
    opts.set_method(req.method);
    opts.set_mode(RequestMode::Cors);
    if let Some(ref body) = req.body {
        opts.set_body(&JsValue::from_str(body));
    }

    let request = Request::new_with_str_and_init(req.url, &opts)
        .map_err(|e| AppError::Request(format!("{:?}", e)))?;

    let headers = request.headers();
    headers
        .set("Accept", "application/json")
        .map_err(|e| AppError::Request(format!("{:?}", e)))?;
    if req.body.is_some() {
        headers
            .set("Content-Type", "application/json")
            .map_err(|e| AppError::Request(format!("{:?}", e)))?;
    }
    if let Some(token) = req.bearer {
        headers
            .set("Authorization", &format!("Bearer {}", token))
            .map_err(|e| AppError::Request(format!("{:?}", e)))?;
    }

    let window = web_sys::window().ok_or(AppError::NoWindow)?;
    let resp_value = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|e| AppError::Network(format!("{:?}", e)))?;

    let resp: Response = resp_value
        .dyn_into()
        .map_err(|_| AppError::Decode("not a Response".to_string()))?;

    let text = JsFuture::from(resp.text().map_err(|e| AppError::Decode(format!("{:?}", e)))?)
        .await
        .map_err(|e| AppError::Decode(format!("{:?}", e)))?
        .as_string()
        .unwrap_or_default();

    if !resp.ok() {
        return Err(AppError::Status {
            status: resp.status(),
            message: error_message(&text),
        });
    }

    Ok(serde_json::from_str(&text)?)
}

/// GET /players
pub async fn fetch_players(config: &AppConfig) -> Result<Vec<Player>> {
    let url = config.endpoint("/players");
    send_json(JsonRequest::get(&url)).await
}

/// GET /players/description/{id}
pub async fn fetch_description(config: &AppConfig, player_id: i64) -> Result<String> {
    let url = config.endpoint(&format!("/players/description/{}", player_id));
    let response: DescriptionResponse = send_json(JsonRequest::get(&url)).await?;
    description_text(response)
}

/// 成功応答でも本文に error が入っていればエラー扱い
pub(crate) fn description_text(response: DescriptionResponse) -> Result<String> {
    match (response.message, response.error) {
        (Some(text), _) if !text.trim().is_empty() => Ok(text),
        (_, Some(error)) => Err(AppError::Server(error)),
        _ => Err(AppError::EmptyCompletion),
    }
}

/// PUT /players（レコード全体を送信）
pub async fn update_player(config: &AppConfig, player: &Player) -> Result<ApiMessage> {
    let url = config.endpoint("/players");
    let body = serde_json::to_string(player)?;
    send_json(JsonRequest {
        method: "PUT",
        url: &url,
        body: Some(body),
        bearer: None,
    })
    .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_prefers_error_field() {
        assert_eq!(error_message(r#"{"error": "Missing fields: games"}"#), "Missing fields: games");
        assert_eq!(error_message(r#"{"message": "nope"}"#), "nope");
        assert_eq!(error_message("Internal Server Error\n"), "Internal Server Error");
    }

    #[test]
    fn test_description_text() {
        let ok: DescriptionResponse = serde_json::from_str(r#"{"message": "A slugger."}"#).unwrap();
        assert_eq!(description_text(ok), Ok("A slugger.".to_string()));

        let failed: DescriptionResponse = serde_json::from_str(r#"{"error": "Player not found"}"#).unwrap();
        assert_eq!(description_text(failed), Err(AppError::Server("Player not found".into())));

        let blank: DescriptionResponse = serde_json::from_str(r#"{"message": "  "}"#).unwrap();
        assert_eq!(description_text(blank), Err(AppError::EmptyCompletion));
    }
}
