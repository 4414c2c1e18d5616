//! 接続設定パネル
//!
//! APIベースURL、紹介文の取得元、OpenAIのAPIキーを設定する

use leptos::*;

use crate::utils::cache::clear_cache;
use crate::utils::config::{clear_config, load_config, save_config, AppConfig, DescriptionSource};
use crate::utils::log_trace::{clear_logs, download_logs, log_info};
use crate::PlayersContext;

#[component]
pub fn SettingsPanel() -> impl IntoView {
    let ctx = use_context::<PlayersContext>().expect("PlayersContext not found");
    let initial = ctx.config.get_untracked();

    let (open, set_open) = create_signal(false);
    let (api_base, set_api_base) = create_signal(initial.api_base.clone());
    let (use_openai, set_use_openai) =
        create_signal(initial.description_source == DescriptionSource::OpenAi);
    let (api_key, set_api_key) = create_signal(initial.openai_api_key.clone().unwrap_or_default());
    let (saved, set_saved) = create_signal(false);

    let save_settings = move |_| {
        let key = api_key.get().trim().to_string();
        let config = AppConfig {
            api_base: api_base.get().trim().to_string(),
            description_source: if use_openai.get() {
                DescriptionSource::OpenAi
            } else {
                DescriptionSource::Backend
            },
            openai_api_key: if key.is_empty() { None } else { Some(key) },
        };
        save_config(&config);
        log_info(
            "config",
            &format!("Saved settings (api base '{}', description source {})",
                config.api_base, config.description_source.as_str()),
        );
        ctx.set_config.set(config);

        set_saved.set(true);
        // 2秒後にリセット
        spawn_local(async move {
            gloo::timers::future::TimeoutFuture::new(2000).await;
            set_saved.set(false);
        });
    };

    let reset_settings = move |_| {
        clear_config();
        clear_cache();
        let config = load_config();
        set_api_base.set(config.api_base.clone());
        set_use_openai.set(false);
        set_api_key.set(String::new());
        ctx.set_config.set(config);
        log_info("config", "Cleared settings and roster cache");
    };

    view! {
        <div class="settings">
            <button class="settings-toggle" on:click=move |_| set_open.update(|o| *o = !*o)>
                {move || if open.get() { "Hide settings" } else { "Settings" }}
            </button>
            <Show when=move || open.get()>
                <div class="settings-panel">
                    <div>
                        <label>"API base URL: "</label>
                        <input type="text" placeholder="same origin"
                            prop:value=move || api_base.get()
                            on:input=move |ev| set_api_base.set(event_target_value(&ev)) />
                    </div>
                    <div>
                        <label>
                            <input type="checkbox"
                                prop:checked=move || use_openai.get()
                                on:change=move |ev| set_use_openai.set(event_target_checked(&ev)) />
                            " Generate descriptions directly with OpenAI"
                        </label>
                    </div>
                    <div>
                        <label>"OpenAI API key: "</label>
                        <input type="password" placeholder="sk-..."
                            prop:value=move || api_key.get()
                            on:input=move |ev| set_api_key.set(event_target_value(&ev)) />
                    </div>
                    <div class="settings-actions">
                        <button on:click=save_settings>
                            {move || if saved.get() { "Saved!" } else { "Save settings" }}
                        </button>
                        <button on:click=reset_settings>"Reset"</button>
                        <button on:click=move |_| download_logs()>"Download logs"</button>
                        <button on:click=move |_| clear_logs()>"Clear logs"</button>
                    </div>
                </div>
            </Show>
        </div>
    }
}
