use leptos::*;

mod components;
mod error;
mod models;
mod utils;
mod views;

use components::{DetailModal, EditModal};
use models::{replace_player, Player, UiState};
use utils::api::{fetch_players, update_player};
use utils::cache::{load_from_cache, save_to_cache};
use utils::config::{init_api_from_url_params, load_config, AppConfig};
use utils::description::describe_player;
use utils::log_trace::{log_debug, log_error, log_info, log_info_with_data, log_warn};
use utils::stats::recompute_all;
use views::{RosterView, SettingsPanel};

/// アプリ全体で共有する状態
#[derive(Clone, Copy)]
pub struct PlayersContext {
    pub players: ReadSignal<Vec<Player>>,
    pub set_players: WriteSignal<Vec<Player>>,
    pub config: ReadSignal<AppConfig>,
    pub set_config: WriteSignal<AppConfig>,
}

/// 選手一覧を取得して差し替える（後着のレスポンスが勝つ）
async fn load_players(config: AppConfig, set_players: WriteSignal<Vec<Player>>) {
    match fetch_players(&config).await {
        Ok(mut players) => {
            let corrections = recompute_all(&mut players);
            if corrections.total() > 0 {
                log_info_with_data(
                    "players",
                    &corrections.report(),
                    serde_json::json!({
                        "batting_average": corrections.batting_average,
                        "on_base_percent": corrections.on_base_percent,
                        "slugging_percent": corrections.slugging_percent,
                        "on_base_plus_slugging": corrections.on_base_plus_slugging,
                    }),
                );
            }
            log_info("players", &format!("Loaded {} players", players.len()));
            save_to_cache(&players);
            set_players.set(players);
        }
        Err(e) => log_error("players", &format!("Error getting players: {}", e)),
    }
}

// ============================================
// メインアプリ
// ============================================

#[component]
fn App() -> impl IntoView {
    // 取得が終わるまではキャッシュを表示
    let cached = load_from_cache().unwrap_or_default();

    let (players, set_players) = create_signal(cached);
    let (config, set_config) = create_signal(load_config());
    provide_context(PlayersContext { players, set_players, config, set_config });

    let (ui, set_ui) = create_signal(UiState::default());
    let is_detail_visible = create_memo(move |_| ui.with(|s| s.detail_visible));
    let is_edit_visible = create_memo(move |_| ui.with(|s| s.edit_visible));
    let player_focus = create_memo(move |_| ui.with(|s| s.focus.clone()));
    let description = create_memo(move |_| ui.with(|s| s.description.clone()));

    // 起動時と設定変更時に一覧を再取得
    create_effect(move |_| {
        let config = config.get();
        spawn_local(load_players(config, set_players));
    });

    let open_detail = Callback::new(move |player: Player| {
        set_ui.update(|s| s.open_detail(player.clone()));

        let config = config.get_untracked();
        spawn_local(async move {
            let result = describe_player(&config, &player).await;
            if let Err(ref e) = result {
                log_error("description", &format!("Error getting player description: {}", e));
            }
            let applied = set_ui.try_update(|s| s.apply_description(player.id, result)).unwrap_or(false);
            if !applied {
                log_debug("description", &format!("Dropped stale description for player {}", player.id));
            }
        });
    });

    let open_edit = Callback::new(move |player: Player| set_ui.update(|s| s.open_edit(player)));
    let close_detail = Callback::new(move |_: ()| set_ui.update(UiState::close_detail));
    let close_edit = Callback::new(move |_: ()| set_ui.update(UiState::close_edit));

    let on_update_player = Callback::new(move |edited: Player| {
        let config = config.get_untracked();
        spawn_local(async move {
            match update_player(&config, &edited).await {
                Ok(reply) => {
                    log_info(
                        "update",
                        reply.message.as_deref().unwrap_or("Player updated"),
                    );
                    set_players.update(|list| {
                        if !replace_player(list, &edited) {
                            log_warn("update", &format!("Player {} is not in the list", edited.id));
                        }
                    });
                    players.with_untracked(|list| save_to_cache(list));
                    set_ui.update(UiState::finish_update);
                }
                Err(e) => log_error("update", &format!("Error updating player: {}", e)),
            }
        });
    });

    view! {
        <div class="App">
            <header class="App-header">
                <h1>"Fraction.Work - ⚾ Players"</h1>
                <SettingsPanel />
                <RosterView on_detail=open_detail on_edit=open_edit />
            </header>
            <DetailModal
                show=is_detail_visible
                player=player_focus
                description=description
                on_close=close_detail
            />
            <EditModal
                show=is_edit_visible
                player=player_focus
                on_update_player=on_update_player
                on_close=close_edit
            />
        </div>
    }
}

fn main() {
    console_error_panic_hook::set_once();
    if let Some(api_base) = init_api_from_url_params() {
        log_info("config", &format!("API base set from URL: {}", api_base));
    }
    mount_to_body(App);
}
