//! 選手一覧ビュー

use leptos::*;

use crate::components::PlayerCard;
use crate::models::Player;
use crate::PlayersContext;

#[component]
pub fn RosterView(on_detail: Callback<Player>, on_edit: Callback<Player>) -> impl IntoView {
    let ctx = use_context::<PlayersContext>().expect("PlayersContext not found");

    view! {
        <div class="Players">
            {move || {
                let players = ctx.players.get();
                if players.is_empty() {
                    return view! { <p class="Players-empty">"No players loaded yet."</p> }.into_view();
                }
                players.into_iter().map(|p| view! {
                    <PlayerCard player=p on_detail=on_detail on_edit=on_edit />
                }).collect_view()
            }}
        </div>
    }
}
