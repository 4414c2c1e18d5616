//! ユーティリティモジュール

pub mod api;
pub mod cache;
pub mod config;
pub mod description;
pub mod log_trace;
pub mod openai;
pub mod stats;

use serde::de::DeserializeOwned;
use serde::Serialize;

/// ブラウザのLocalStorage（取得できなければNone）
pub(crate) fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok()?
}

/// JSONとして読み込み。壊れたデータはNone
pub(crate) fn read_json<T: DeserializeOwned>(key: &str) -> Option<T> {
    let json = local_storage()?.get_item(key).ok()??;
    serde_json::from_str(&json).ok()
}

/// JSONとして保存
pub(crate) fn write_json<T: Serialize + ?Sized>(key: &str, value: &T) {
    if let (Some(storage), Ok(json)) = (local_storage(), serde_json::to_string(value)) {
        let _ = storage.set_item(key, &json);
    }
}

pub(crate) fn remove_item(key: &str) {
    if let Some(storage) = local_storage() {
        let _ = storage.remove_item(key);
    }
}
