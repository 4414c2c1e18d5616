//! 選手編集モーダル
//!
//! 入力欄はフィールド名で束縛し、保存時に率系の値を計算し直す

use leptos::*;
use std::collections::HashMap;

use crate::error::{AppError, Result};
use crate::models::Player;
use crate::utils::stats::recompute;

/// テキスト入力欄
pub const TEXT_FIELDS: &[(&str, &str)] = &[
    ("player_name", "Player name"),
    ("position", "Position"),
];

/// 計数値の入力欄
pub const COUNT_FIELDS: &[(&str, &str)] = &[
    ("games", "Games"),
    ("at_bat", "At-bats"),
    ("runs", "Runs"),
    ("hits", "Hits"),
    ("doubles", "Doubles"),
    ("triples", "Triples"),
    ("home_runs", "Home runs"),
    ("rbi", "RBI"),
    ("walks", "Walks"),
    ("strikeouts", "Strikeouts"),
    ("stolen_bases", "Stolen bases"),
    ("caught_stealing", "Caught stealing"),
];

fn count_slot<'a>(player: &'a mut Player, name: &str) -> Option<&'a mut u32> {
    let slot = match name {
        "games" => &mut player.games,
        "at_bat" => &mut player.at_bat,
        "runs" => &mut player.runs,
        "hits" => &mut player.hits,
        "doubles" => &mut player.doubles,
        "triples" => &mut player.triples,
        "home_runs" => &mut player.home_runs,
        "rbi" => &mut player.rbi,
        "walks" => &mut player.walks,
        "strikeouts" => &mut player.strikeouts,
        "stolen_bases" => &mut player.stolen_bases,
        "caught_stealing" => &mut player.caught_stealing,
        _ => return None,
    };
    Some(slot)
}

/// 編集中の選手（入力値は文字列のまま保持）
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerForm {
    base: Player,
    values: HashMap<&'static str, String>,
}

impl PlayerForm {
    pub fn from_player(player: &Player) -> Self {
        let mut base = player.clone();
        let mut values = HashMap::new();
        values.insert("player_name", player.player_name.clone());
        values.insert("position", player.position.clone());
        for &(name, _) in COUNT_FIELDS {
            if let Some(slot) = count_slot(&mut base, name) {
                values.insert(name, slot.to_string());
            }
        }
        PlayerForm { base, values }
    }

    pub fn get(&self, name: &str) -> &str {
        self.values.get(name).map(String::as_str).unwrap_or("")
    }

    /// 既知のフィールドのみ更新
    pub fn set(&mut self, name: &str, value: String) {
        if let Some(slot) = self.values.get_mut(name) {
            *slot = value;
        }
    }

    /// 入力値を検証して選手レコードを組み立てる
    pub fn to_player(&self) -> Result<Player> {
        let mut player = self.base.clone();

        for &(name, label) in TEXT_FIELDS {
            let value = self.get(name).trim();
            if value.is_empty() {
                return Err(AppError::validation(label, "must not be empty"));
            }
            match name {
                "player_name" => player.player_name = value.to_string(),
                _ => player.position = value.to_string(),
            }
        }

        for &(name, label) in COUNT_FIELDS {
            let value = self
                .get(name)
                .trim()
                .parse::<u32>()
                .map_err(|_| AppError::validation(label, "must be a whole number of 0 or more"))?;
            if let Some(slot) = count_slot(&mut player, name) {
                *slot = value;
            }
        }

        if player.hits > player.at_bat {
            return Err(AppError::validation("Hits", "cannot exceed at-bats"));
        }
        let extra_base_hits = player.doubles as u64 + player.triples as u64 + player.home_runs as u64;
        if extra_base_hits > player.hits as u64 {
            return Err(AppError::validation("Hits", "must include doubles, triples and home runs"));
        }

        recompute(&mut player);
        Ok(player)
    }
}

#[component]
pub fn EditModal(
    #[prop(into)] show: Signal<bool>,
    #[prop(into)] player: Signal<Option<Player>>,
    on_update_player: Callback<Player>,
    on_close: Callback<()>,
) -> impl IntoView {
    let (form, set_form) = create_signal(None::<PlayerForm>);
    let (form_error, set_form_error) = create_signal(None::<String>);

    // 対象選手が変わったら編集内容をリセット
    create_effect(move |_| {
        set_form.set(player.get().map(|p| PlayerForm::from_player(&p)));
        set_form_error.set(None);
    });

    let has_form = create_memo(move |_| form.with(Option::is_some));
    let field_value = move |name: &'static str| {
        form.with(|f| f.as_ref().map(|f| f.get(name).to_string()).unwrap_or_default())
    };
    let handle_change = move |name: &'static str, value: String| {
        set_form.update(|f| {
            if let Some(f) = f {
                f.set(name, value);
            }
        });
    };

    let save_changes = move |_| {
        let Some(current) = form.get_untracked() else {
            return;
        };
        match current.to_player() {
            Ok(edited) => {
                set_form_error.set(None);
                on_update_player.call(edited);
            }
            Err(e) => set_form_error.set(Some(e.to_string())),
        }
    };

    view! {
        <Show when=move || show.get()>
            <div id="edit-modal" class="modal-overlay" on:click=move |_| on_close.call(())>
                <div class="modal" on:click=|ev: web_sys::MouseEvent| ev.stop_propagation()>
                    <button class="close-button" on:click=move |_| on_close.call(())>"❌"</button>
                    {move || if has_form.get() {
                        view! {
                            <div>
                                <div class="edit-form">
                                    {TEXT_FIELDS.iter().map(|&(name, label)| view! {
                                        <div>
                                            <label>{label}": "</label>
                                            <input name=name type="text"
                                                prop:value=move || field_value(name)
                                                on:input=move |ev| handle_change(name, event_target_value(&ev)) />
                                        </div>
                                    }).collect_view()}
                                    {COUNT_FIELDS.iter().map(|&(name, label)| view! {
                                        <div>
                                            <label>{label}": "</label>
                                            <input name=name type="number" min="0" step="1"
                                                prop:value=move || field_value(name)
                                                on:input=move |ev| handle_change(name, event_target_value(&ev)) />
                                        </div>
                                    }).collect_view()}
                                </div>
                                {move || form_error.get().map(|e| view! {
                                    <p class="status error">{e}</p>
                                })}
                                <button class="save-button" on:click=save_changes>"Save changes"</button>
                            </div>
                        }.into_view()
                    } else {
                        view! { <p>"No player selected to edit"</p> }.into_view()
                    }}
                </div>
            </div>
        </Show>
    }
}
