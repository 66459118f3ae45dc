use crate::shared::icons::icon;
use leptos::prelude::*;

#[component]
pub fn Header() -> impl IntoView {
    view! {
        <header data-zone="header" class="header">
            <div class="header__content">
                {icon("shield")}
                <span class="header__title">"RuleForge — Admin Demo"</span>
            </div>
            <p class="tagline">"Rule-based detection with automatic rule generation"</p>
        </header>
    }
}
