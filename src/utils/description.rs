//! 選手紹介文の取得元の切り替え

use crate::error::Result;
use crate::models::Player;
use crate::utils::api::fetch_description;
use crate::utils::config::AppConfig;
use crate::utils::openai::generate_description;

/// 設定に応じてバックエンドかOpenAIから紹介文を取得
pub async fn describe_player(config: &AppConfig, player: &Player) -> Result<String> {
    if config.uses_openai() {
        generate_description(config.openai_api_key.as_deref(), player).await
    } else {
        fetch_description(config, player.id).await
    }
}

/// 応答が届いた時点でまだ同じ選手の詳細を表示しているか
pub fn is_current_reply(focus: Option<&Player>, detail_visible: bool, player_id: i64) -> bool {
    detail_visible && focus.map(|p| p.id) == Some(player_id)
}
