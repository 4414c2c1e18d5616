//! 選手カードコンポーネント

use leptos::*;

use crate::models::Player;
use crate::utils::log_trace::log_debug;
use crate::utils::stats::{format_rate, hits_per_game};

/// 選手カードコンポーネント
/// クリックで詳細モーダル、鉛筆ボタンで編集モーダルを開く
#[component]
pub fn PlayerCard(
    player: Player,
    on_detail: Callback<Player>,
    on_edit: Callback<Player>,
) -> impl IntoView {
    let hits_per_game = format_rate(hits_per_game(player.hits, player.games));
    let avg = format_rate(player.batting_average);
    let slugging = format_rate(player.slugging_percent);

    let player_detail = player.clone();
    let show_player_details = move |_: web_sys::MouseEvent| {
        log_debug("ui-action", &format!("Showing player {}", player_detail.id));
        on_detail.call(player_detail.clone());
    };

    let player_edit = player.clone();
    let edit_player = move |ev: web_sys::MouseEvent| {
        // カード本体のクリックに伝播させない
        ev.stop_propagation();
        log_debug("ui-action", &format!("Editing player {}", player_edit.player_name));
        on_edit.call(player_edit.clone());
    };

    view! {
        <div id=format!("player-{}", player.id) class="Card" on:click=show_player_details>
            <div class="Card-container">
                <p class="Player-name">{player.player_name}</p>
                <p class="Player-position">{player.position}</p>
                <ul class="Player-stats">
                    <li>{player.games}" Games"</li>
                    <li>{avg}" AVG"</li>
                    <li>{player.rbi}" RBI"</li>
                    <li>{slugging}" Slugging"</li>
                    <li>{hits_per_game}" Hits Per Game"</li>
                </ul>
                <div class="Actions-row">
                    <button class="Player-edit-button" title="Edit player" on:click=edit_player>"✏️"</button>
                </div>
            </div>
        </div>
    }
}
