use super::analyzer_panel::AnalyzerPanel;
use super::logs_view::LogsView;
use super::rule_list::RuleList;
use crate::dashboard::api::HttpAdminApi;
use crate::dashboard::dispatcher::ActionDispatcher;
use crate::dashboard::poller::PollingController;
use crate::dashboard::state::{create_state, DashboardState};
use crate::dashboard::sync::ViewSync;
use crate::shared::clock::BrowserClock;
use crate::shared::icons::icon;
use contracts::admin::rules::RuleId;
use contracts::system::dashboard_config::DashboardConfig;
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::rc::Rc;
use thaw::*;

type BrowserDispatcher = ActionDispatcher<HttpAdminApi, RwSignal<DashboardState>, BrowserClock>;

#[component]
pub fn AdminDashboard(config: DashboardConfig) -> impl IntoView {
    let state = create_state();
    let api = Rc::new(HttpAdminApi::new(config.clone()));
    let sync = ViewSync::new(api, state, BrowserClock, config);

    // Опрос начинается сразу и останавливается при размонтировании
    let (handle, cycle) = PollingController::new(sync.clone()).activate();
    spawn_local(cycle);
    on_cleanup(move || handle.cancel());

    let stored = StoredValue::new_local(ActionDispatcher::new(sync));
    let dispatcher = move || -> BrowserDispatcher { stored.with_value(|d| d.clone()) };

    let on_toggle = Callback::new(move |id: RuleId| {
        let d = dispatcher();
        spawn_local(async move {
            let _ = d.toggle(id).await;
        });
    });

    let on_run = Callback::new(move |_: ()| {
        let d = dispatcher();
        spawn_local(async move {
            d.run_analyzer().await;
        });
    });

    let on_refresh = move |_| {
        let d = dispatcher();
        spawn_local(async move {
            d.refresh().await;
        });
    };

    let refreshed_at = move || {
        state.with(|s| {
            s.rules
                .refreshed_at
                .map(|t| format!("updated {}", t.format("%H:%M:%S")))
                .unwrap_or_default()
        })
    };

    view! {
        <main class="dashboard">
            <Flex justify=FlexJustify::SpaceBetween align=FlexAlign::Center style="margin-bottom: 16px;">
                <span class="dashboard__refreshed">{refreshed_at}</span>
                <Button appearance=ButtonAppearance::Secondary on_click=on_refresh>
                    {icon("refresh")}
                    " Refresh"
                </Button>
            </Flex>

            {move || state.with(|s| s.rules_error.clone()).map(|err| view! {
                <div class="stale-warning">"Showing last known rules: "{err}</div>
            })}

            <section class="left">
                <AnalyzerPanel state=state on_run=on_run />
                <RuleList state=state on_toggle=on_toggle />
            </section>

            <section class="right">
                <LogsView state=state />
            </section>
        </main>
    }
}
