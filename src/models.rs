//! データ構造体モジュール

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::AppError;
use crate::utils::description::is_current_reply;

// ============================================
// 選手データ（バックエンドのカラム名そのまま）
// ============================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Player {
    pub id: i64,
    pub player_name: String,
    #[serde(default)]
    pub position: String,
    #[serde(default)]
    pub games: u32,
    #[serde(default)]
    pub at_bat: u32,
    #[serde(default)]
    pub runs: u32,
    #[serde(default)]
    pub hits: u32,
    #[serde(default)]
    pub doubles: u32,
    #[serde(default)]
    pub triples: u32,
    #[serde(default)]
    pub home_runs: u32,
    #[serde(default)]
    pub rbi: u32,
    #[serde(default)]
    pub walks: u32,
    #[serde(default)]
    pub strikeouts: u32,
    #[serde(default)]
    pub stolen_bases: u32,
    /// 元データでは文字列が入っていることがあるので数値以外は0扱い
    #[serde(default, deserialize_with = "lenient_count")]
    pub caught_stealing: u32,
    #[serde(default)]
    pub batting_average: f64,
    #[serde(default)]
    pub on_base_percent: f64,
    #[serde(default)]
    pub slugging_percent: f64,
    #[serde(default)]
    pub on_base_plus_slugging: f64,
}

fn lenient_count<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value
        .as_u64()
        .and_then(|n| u32::try_from(n).ok())
        .unwrap_or(0))
}

// ============================================
// APIレスポンス
// ============================================

/// PUT /players などの汎用レスポンス
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ApiMessage {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// GET /players/description/{id} のレスポンス
#[derive(Debug, Clone, Deserialize, Default)]
pub struct DescriptionResponse {
    #[serde(default, alias = "description")]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

// ============================================
// UI状態
// ============================================

pub const AWAITING_DESCRIPTION: &str = "Awaiting baseball player details...";
pub const DESCRIPTION_UNAVAILABLE: &str = "No description available for this player right now.";

/// 選手紹介文の取得状態
#[derive(Debug, Clone, PartialEq, Default)]
pub enum DescriptionState {
    #[default]
    Idle,
    Loading,
    Ready(String),
    Failed,
}

impl DescriptionState {
    pub fn is_loading(&self) -> bool {
        matches!(self, DescriptionState::Loading)
    }

    /// モーダルに表示するテキスト
    pub fn text(&self) -> String {
        match self {
            DescriptionState::Idle | DescriptionState::Loading => AWAITING_DESCRIPTION.to_string(),
            DescriptionState::Ready(text) => text.clone(),
            DescriptionState::Failed => DESCRIPTION_UNAVAILABLE.to_string(),
        }
    }
}

/// 一覧の中で同じidの選手を差し替える。見つかればtrue
pub fn replace_player(players: &mut [Player], edited: &Player) -> bool {
    match players.iter_mut().find(|p| p.id == edited.id) {
        Some(slot) => {
            *slot = edited.clone();
            true
        }
        None => false,
    }
}

/// モーダル表示・フォーカス・紹介文の画面状態
#[derive(Debug, Clone, PartialEq, Default)]
pub struct UiState {
    pub detail_visible: bool,
    pub edit_visible: bool,
    pub focus: Option<Player>,
    pub description: DescriptionState,
}

impl UiState {
    /// カードクリック: 詳細モーダルを開いて紹介文を読み込み中にする
    pub fn open_detail(&mut self, player: Player) {
        self.focus = Some(player);
        self.detail_visible = true;
        self.description = DescriptionState::Loading;
    }

    pub fn open_edit(&mut self, player: Player) {
        self.focus = Some(player);
        self.edit_visible = true;
    }

    pub fn close_detail(&mut self) {
        self.detail_visible = false;
        self.description = DescriptionState::Idle;
    }

    pub fn close_edit(&mut self) {
        self.edit_visible = false;
    }

    /// 紹介文の応答を反映する。表示中の選手と違えば捨ててfalse
    pub fn apply_description(&mut self, player_id: i64, result: Result<String, AppError>) -> bool {
        if !is_current_reply(self.focus.as_ref(), self.detail_visible, player_id) {
            return false;
        }
        self.description = match result {
            Ok(text) => DescriptionState::Ready(text),
            Err(_) => DescriptionState::Failed,
        };
        true
    }

    /// 更新成功後: 編集モーダルを閉じてフォーカスを外す
    pub fn finish_update(&mut self) {
        self.edit_visible = false;
        self.focus = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_from_backend_row() {
        let json = r#"{
            "id": 7, "player_name": "Pete Alonso", "position": "1B",
            "games": 162, "at_bat": 597, "runs": 92, "hits": 161,
            "doubles": 21, "triples": 3, "home_runs": 46, "rbi": 131,
            "walks": 59, "strikeouts": 151, "stolen_bases": 4,
            "caught_stealing": 1, "batting_average": 0.27,
            "on_base_percent": 0.3, "slugging_percent": 0.52,
            "on_base_plus_slugging": 0.82
        }"#;
        let player: Player = serde_json::from_str(json).unwrap();
        assert_eq!(player.id, 7);
        assert_eq!(player.player_name, "Pete Alonso");
        assert_eq!(player.home_runs, 46);
        assert_eq!(player.caught_stealing, 1);
    }

    #[test]
    fn test_caught_stealing_string_reads_as_zero() {
        let json = r#"{"id": 1, "player_name": "A", "caught_stealing": "--"}"#;
        let player: Player = serde_json::from_str(json).unwrap();
        assert_eq!(player.caught_stealing, 0);
        assert_eq!(player.games, 0);
    }

    #[test]
    fn test_description_accepts_both_keys() {
        let a: DescriptionResponse = serde_json::from_str(r#"{"message": "hello"}"#).unwrap();
        let b: DescriptionResponse = serde_json::from_str(r#"{"description": "hi"}"#).unwrap();
        assert_eq!(a.message.as_deref(), Some("hello"));
        assert_eq!(b.message.as_deref(), Some("hi"));
    }

    #[test]
    fn test_replace_player_matches_by_id() {
        let mut players = vec![
            Player { id: 1, player_name: "A".into(), ..Default::default() },
            Player { id: 2, player_name: "B".into(), ..Default::default() },
        ];
        let edited = Player { id: 2, player_name: "B2".into(), ..Default::default() };
        assert!(replace_player(&mut players, &edited));
        assert_eq!(players[0].player_name, "A");
        assert_eq!(players[1].player_name, "B2");

        let missing = Player { id: 9, ..Default::default() };
        assert!(!replace_player(&mut players, &missing));
        assert_eq!(players.len(), 2);
    }

    #[test]
    fn test_description_state_text() {
        assert_eq!(DescriptionState::Idle.text(), AWAITING_DESCRIPTION);
        assert!(DescriptionState::Loading.is_loading());
        assert_eq!(DescriptionState::Ready("x".into()).text(), "x");
        assert_eq!(DescriptionState::Failed.text(), DESCRIPTION_UNAVAILABLE);
    }

    fn roster() -> Vec<Player> {
        vec![
            Player { id: 1, player_name: "Shohei Ohtani".into(), position: "DH".into(), ..Default::default() },
            Player { id: 2, player_name: "Aaron Judge".into(), position: "RF".into(), ..Default::default() },
        ]
    }

    #[test]
    fn test_open_detail_shows_selected_player() {
        let mut ui = UiState::default();
        ui.open_detail(roster()[1].clone());
        assert!(ui.detail_visible);
        assert!(!ui.edit_visible);
        assert_eq!(ui.focus.as_ref().map(|p| p.player_name.as_str()), Some("Aaron Judge"));
        assert!(ui.description.is_loading());
    }

    #[test]
    fn test_description_reply_moves_out_of_loading() {
        let mut ui = UiState::default();
        ui.open_detail(roster()[0].clone());
        assert!(ui.apply_description(1, Ok("Two-way star.".into())));
        assert_eq!(ui.description, DescriptionState::Ready("Two-way star.".into()));

        ui.open_detail(roster()[0].clone());
        assert!(ui.apply_description(1, Err(AppError::EmptyCompletion)));
        assert_eq!(ui.description, DescriptionState::Failed);
    }

    #[test]
    fn test_stale_description_reply_is_ignored() {
        let mut ui = UiState::default();
        ui.open_detail(roster()[0].clone());
        ui.open_detail(roster()[1].clone());
        assert!(!ui.apply_description(1, Ok("old".into())));
        assert!(ui.description.is_loading());

        ui.close_detail();
        assert!(!ui.apply_description(2, Ok("late".into())));
        assert_eq!(ui.description, DescriptionState::Idle);
    }

    #[test]
    fn test_close_detail_resets_description() {
        let mut ui = UiState::default();
        ui.open_detail(roster()[0].clone());
        ui.apply_description(1, Ok("text".into()));
        ui.close_detail();
        assert!(!ui.detail_visible);
        assert_eq!(ui.description, DescriptionState::Idle);
        assert_eq!(ui.description.text(), AWAITING_DESCRIPTION);
    }

    #[test]
    fn test_update_replaces_entry_and_clears_focus() {
        let mut players = roster();
        let mut ui = UiState::default();
        ui.open_edit(players[0].clone());
        assert!(ui.edit_visible);

        let edited = Player { position: "SP".into(), ..players[0].clone() };
        assert!(replace_player(&mut players, &edited));
        ui.finish_update();

        assert_eq!(players[0].position, "SP");
        assert_eq!(players[1], roster()[1]);
        assert!(!ui.edit_visible);
        assert_eq!(ui.focus, None);
    }
}
