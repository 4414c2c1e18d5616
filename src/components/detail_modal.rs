//! 選手詳細モーダル

use leptos::*;

use crate::models::{DescriptionState, Player};

#[component]
pub fn DetailModal(
    #[prop(into)] show: Signal<bool>,
    #[prop(into)] player: Signal<Option<Player>>,
    #[prop(into)] description: Signal<DescriptionState>,
    on_close: Callback<()>,
) -> impl IntoView {
    view! {
        <Show when=move || show.get()>
            <div id="detail-modal" class="modal-overlay" on:click=move |_| on_close.call(())>
                <div class="modal" on:click=|ev: web_sys::MouseEvent| ev.stop_propagation()>
                    <button class="close-button" on:click=move |_| on_close.call(())>"❌"</button>
                    {move || {
                        if description.with(DescriptionState::is_loading) {
                            return view! { <p>"Loading player details..."</p> }.into_view();
                        }
                        match player.get() {
                            Some(p) => view! {
                                <div>
                                    <p class="Player-name">{p.player_name}</p>
                                    <p class="Player-description">{description.with(DescriptionState::text)}</p>
                                </div>
                            }.into_view(),
                            None => view! { <p>"No player selected to show details"</p> }.into_view(),
                        }
                    }}
                </div>
            </div>
        </Show>
    }
}
