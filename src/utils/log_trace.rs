//! 時系列トレースログ
//! 通信や画面操作の結果を記録し、コンソールとLocalStorageに残す

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use crate::utils::{read_json, write_json};

const MAX_LOG_ENTRIES: usize = 1000;
const STORAGE_KEY: &str = "fraction_players_log_trace";

/// ログのカテゴリ
pub const CATEGORIES: &[&str] = &["players", "description", "update", "config", "cache", "ui-action"];

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub timestamp: String,
    pub level: LogLevel,
    pub category: String, // CATEGORIES のいずれか
    pub message: String,
    pub data: Option<serde_json::Value>,
}

pub struct LogTrace {
    logs: VecDeque<LogEntry>,
    capacity: usize,
}

impl LogTrace {
    fn with_capacity(capacity: usize) -> Self {
        LogTrace {
            logs: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    fn new() -> Self {
        let mut trace = Self::with_capacity(MAX_LOG_ENTRIES);
        trace.load_from_storage();
        trace
    }

    /// 上限を超えたら古いものから捨てる
    fn push(&mut self, entry: LogEntry) {
        while self.logs.len() >= self.capacity {
            self.logs.pop_front();
        }
        self.logs.push_back(entry);
    }

    fn log(&mut self, level: LogLevel, category: &str, message: &str, data: Option<serde_json::Value>) {
        debug_assert!(CATEGORIES.contains(&category), "unknown log category: {}", category);
        let timestamp = js_sys::Date::new_0().to_iso_string().as_string().unwrap_or_default();

        let line = JsValue::from_str(&format!("[{}] {}", category, message));
        match level {
            LogLevel::Error => web_sys::console::error_1(&line),
            LogLevel::Warn => web_sys::console::warn_1(&line),
            LogLevel::Debug => web_sys::console::debug_1(&line),
            LogLevel::Info => web_sys::console::log_1(&line),
        }

        self.push(LogEntry {
            timestamp,
            level,
            category: category.to_string(),
            message: message.to_string(),
            data,
        });
        self.save_to_storage();
    }

    fn get_logs_json(&self) -> String {
        let logs: Vec<&LogEntry> = self.logs.iter().collect();
        serde_json::to_string_pretty(&logs).unwrap_or_else(|_| "[]".to_string())
    }

    fn clear(&mut self) {
        self.logs.clear();
        self.save_to_storage();
    }

    fn load_from_storage(&mut self) {
        if let Some(logs) = read_json::<Vec<LogEntry>>(STORAGE_KEY) {
            for entry in logs {
                self.push(entry);
            }
        }
    }

    fn save_to_storage(&self) {
        let logs: Vec<&LogEntry> = self.logs.iter().collect();
        write_json(STORAGE_KEY, &logs);
    }

    fn download_logs(&self) {
        let json_str = self.get_logs_json();
        let timestamp = js_sys::Date::new_0().to_iso_string().as_string().unwrap_or_default();
        let filename = format!("player_log_{}.json", timestamp.replace([':', '.'], "-"));

        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        let blob_parts = js_sys::Array::new();
        blob_parts.push(&JsValue::from_str(&json_str));

        let options = web_sys::BlobPropertyBag::new();
        options.set_type("application/json");

        if let Ok(blob) = web_sys::Blob::new_with_str_sequence_and_options(&blob_parts, &options) {
            if let Ok(url) = web_sys::Url::create_object_url_with_blob(&blob) {
                if let Ok(a) = document.create_element("a") {
                    let _ = a.set_attribute("href", &url);
                    let _ = a.set_attribute("download", &filename);
                    if let Some(element) = a.dyn_ref::<web_sys::HtmlElement>() {
                        element.click();
                    }
                    let _ = web_sys::Url::revoke_object_url(&url);
                }
            }
        }
    }
}

// グローバルなログトレースインスタンス
thread_local! {
    static LOG_TRACE: std::cell::RefCell<LogTrace> = std::cell::RefCell::new(LogTrace::new());
}

pub fn log_info(category: &str, message: &str) {
    LOG_TRACE.with(|trace| trace.borrow_mut().log(LogLevel::Info, category, message, None));
}

pub fn log_info_with_data(category: &str, message: &str, data: serde_json::Value) {
    LOG_TRACE.with(|trace| trace.borrow_mut().log(LogLevel::Info, category, message, Some(data)));
}

pub fn log_debug(category: &str, message: &str) {
    LOG_TRACE.with(|trace| trace.borrow_mut().log(LogLevel::Debug, category, message, None));
}

pub fn log_warn(category: &str, message: &str) {
    LOG_TRACE.with(|trace| trace.borrow_mut().log(LogLevel::Warn, category, message, None));
}

pub fn log_error(category: &str, message: &str) {
    LOG_TRACE.with(|trace| trace.borrow_mut().log(LogLevel::Error, category, message, None));
}

pub fn download_logs() {
    LOG_TRACE.with(|trace| trace.borrow().download_logs());
}

pub fn clear_logs() {
    LOG_TRACE.with(|trace| trace.borrow_mut().clear());
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(message: &str) -> LogEntry {
        LogEntry {
            timestamp: "2026-01-01T00:00:00.000Z".into(),
            level: LogLevel::Info,
            category: "players".into(),
            message: message.into(),
            data: None,
        }
    }

    #[test]
    fn test_push_drops_oldest() {
        let mut trace = LogTrace::with_capacity(2);
        trace.push(entry("a"));
        trace.push(entry("b"));
        trace.push(entry("c"));
        let messages: Vec<_> = trace.logs.iter().map(|e| e.message.as_str()).collect();
        assert_eq!(messages, vec!["b", "c"]);
    }

    #[test]
    fn test_logs_json_uses_lowercase_levels() {
        let mut trace = LogTrace::with_capacity(4);
        trace.push(LogEntry { level: LogLevel::Warn, ..entry("slow") });
        let json = trace.get_logs_json();
        assert!(json.contains("\"level\": \"warn\""));
        assert!(json.contains("\"message\": \"slow\""));
    }

    #[test]
    fn test_categories_cover_app_logging() {
        for category in ["players", "description", "update", "config", "ui-action"] {
            assert!(CATEGORIES.contains(&category), "{} missing", category);
        }
    }
}
