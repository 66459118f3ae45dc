use crate::dashboard::state::DashboardState;
use contracts::admin::logs::LogEntry;
use leptos::prelude::*;

fn log_line(entry: LogEntry) -> impl IntoView {
    let excerpt = entry.payload_excerpt();
    let when = entry.timestamp.clone().unwrap_or_default();
    let source_ip = entry.source_ip.clone().unwrap_or_else(|| "?".to_string());
    let url = entry.url.clone().unwrap_or_default();
    let event = entry.event.clone();

    view! {
        <div class="log-line">
            <div>
                <strong>{when}</strong>
                " — "{source_ip}" → "{url}
                {event.map(|e| view! { <span class="log-line__event">" ["{e}"]"</span> })}
            </div>
            <div class="mono small">{excerpt}</div>
            {entry.matched_pattern.map(|p| view! {
                <div class="evidence">"matched: "{p}</div>
            })}
        </div>
    }
}

#[component]
pub fn LogsView(state: RwSignal<DashboardState>) -> impl IntoView {
    view! {
        <div class="card">
            <h2>"Recent blocked logs"</h2>
            {move || state.with(|s| s.logs_error.clone()).map(|err| view! {
                <div class="stale-warning">"Showing last known logs: "{err}</div>
            })}
            <div class="logs">
                {move || {
                    let logs = state.with(|s| s.logs.logs.clone());
                    if logs.is_empty() {
                        view! { <div>"No logs yet"</div> }.into_any()
                    } else {
                        logs.into_iter().map(log_line).collect_view().into_any()
                    }
                }}
            </div>
        </div>
    }
}
