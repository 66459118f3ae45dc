use crate::dashboard::state::DashboardState;
use crate::shared::icons::icon;
use leptos::prelude::*;
use thaw::*;

#[component]
pub fn AnalyzerPanel(state: RwSignal<DashboardState>, on_run: Callback<()>) -> impl IntoView {
    let running = Signal::derive(move || state.with(|s| s.analyzer.is_running()));

    view! {
        <div class="card">
            <h2>"Analyzer"</h2>
            <p>"Scan recent logs and auto-generate candidate rules."</p>
            <Button
                appearance=ButtonAppearance::Primary
                on_click=move |_| on_run.run(())
                disabled=running
            >
                {icon("play")}
                {move || if running.get() { " Running..." } else { " Run analyzer" }}
            </Button>
            <pre class="output">{move || state.with(|s| s.analyzer.output.clone())}</pre>
        </div>
    }
}
