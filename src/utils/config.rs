//! 接続設定（LocalStorage保存）

use wasm_bindgen::prelude::*;

use crate::utils::{local_storage, remove_item};

const API_BASE_KEY: &str = "fraction_players_api_base";
const DESCRIPTION_SOURCE_KEY: &str = "fraction_players_description_source";
const OPENAI_KEY_KEY: &str = "fraction_players_openai_key";

/// ビルド時に PLAYERS_API_BASE を指定すると既定値になる（未指定なら同一オリジン）
pub fn default_api_base() -> &'static str {
    option_env!("PLAYERS_API_BASE").unwrap_or("")
}

/// 選手紹介文の取得元
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DescriptionSource {
    #[default]
    Backend,
    OpenAi,
}

impl DescriptionSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            DescriptionSource::Backend => "backend",
            DescriptionSource::OpenAi => "openai",
        }
    }

    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "openai" => DescriptionSource::OpenAi,
            _ => DescriptionSource::Backend,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppConfig {
    pub api_base: String,
    pub description_source: DescriptionSource,
    pub openai_api_key: Option<String>,
}

impl AppConfig {
    /// エンドポイントURLを組み立てる
    pub fn endpoint(&self, path: &str) -> String {
        join_url(&self.api_base, path)
    }

    /// OpenAI直接呼び出しが有効か
    pub fn uses_openai(&self) -> bool {
        self.description_source == DescriptionSource::OpenAi && self.openai_api_key.is_some()
    }
}

pub fn join_url(base: &str, path: &str) -> String {
    let base = base.trim().trim_end_matches('/');
    let path = path.trim_start_matches('/');
    format!("{}/{}", base, path)
}

/// `?api=xxx` からAPIベースURLを取り出す
pub fn api_param(search: &str) -> Option<String> {
    search
        .trim_start_matches('?')
        .split('&')
        .find_map(|pair| pair.strip_prefix("api="))
        .filter(|v| !v.is_empty())
        .map(|v| v.to_string())
}

fn get_item(key: &str) -> Option<String> {
    let value = local_storage()?.get_item(key).ok()??;
    if value.is_empty() { None } else { Some(value) }
}

fn set_item(key: &str, value: &str) {
    if let Some(storage) = local_storage() {
        let _ = if value.is_empty() {
            storage.remove_item(key)
        } else {
            storage.set_item(key, value)
        };
    }
}

/// 保存済みの設定を読み込み
pub fn load_config() -> AppConfig {
    AppConfig {
        api_base: get_item(API_BASE_KEY).unwrap_or_else(|| default_api_base().to_string()),
        description_source: get_item(DESCRIPTION_SOURCE_KEY)
            .map(|v| DescriptionSource::parse(&v))
            .unwrap_or_default(),
        openai_api_key: get_item(OPENAI_KEY_KEY),
    }
}

/// 設定を保存
pub fn save_config(config: &AppConfig) {
    set_item(API_BASE_KEY, config.api_base.trim());
    set_item(DESCRIPTION_SOURCE_KEY, config.description_source.as_str());
    set_item(OPENAI_KEY_KEY, config.openai_api_key.as_deref().unwrap_or("").trim());
}

/// 設定をクリア
pub fn clear_config() {
    for key in [API_BASE_KEY, DESCRIPTION_SOURCE_KEY, OPENAI_KEY_KEY] {
        remove_item(key);
    }
}

/// URLパラメータからAPIベースURLを読み込む (?api=xxx)
pub fn init_api_from_url_params() -> Option<String> {
    let window = web_sys::window()?;
    let location = window.location();
    let search = location.search().ok()?;
    let encoded = api_param(&search)?;
    let decoded = js_sys::decode_uri_component(&encoded).ok()?.as_string()?;
    set_item(API_BASE_KEY, &decoded);

    // URLからパラメータを削除
    let pathname = location.pathname().ok()?;
    let hash = location.hash().ok().unwrap_or_default();
    if let Ok(history) = window.history() {
        let _ = history.replace_state_with_url(&JsValue::NULL, "", Some(&format!("{}{}", pathname, hash)));
    }
    Some(decoded)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_url() {
        assert_eq!(join_url("", "/players"), "/players");
        assert_eq!(join_url("http://localhost:5000/", "/players"), "http://localhost:5000/players");
        assert_eq!(join_url("http://api", "players/description/3"), "http://api/players/description/3");
    }

    #[test]
    fn test_api_param() {
        assert_eq!(api_param("?api=http%3A%2F%2Fhost"), Some("http%3A%2F%2Fhost".to_string()));
        assert_eq!(api_param("?x=1&api=abc"), Some("abc".to_string()));
        assert_eq!(api_param("?api="), None);
        assert_eq!(api_param(""), None);
    }

    #[test]
    fn test_description_source_parse() {
        assert_eq!(DescriptionSource::parse("OpenAI"), DescriptionSource::OpenAi);
        assert_eq!(DescriptionSource::parse("backend"), DescriptionSource::Backend);
        assert_eq!(DescriptionSource::parse("other"), DescriptionSource::Backend);
    }

    #[test]
    fn test_uses_openai_requires_key() {
        let mut config = AppConfig {
            description_source: DescriptionSource::OpenAi,
            ..Default::default()
        };
        assert!(!config.uses_openai());
        config.openai_api_key = Some("sk-test".into());
        assert!(config.uses_openai());
        assert_eq!(config.endpoint("/players"), "/players");
    }
}
