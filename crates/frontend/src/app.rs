use crate::dashboard::ui::AdminDashboard;
use crate::layout::Shell;
use crate::shared::api_utils::load_dashboard_config;
use contracts::system::dashboard_config::DashboardConfig;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

#[component]
pub fn App() -> impl IntoView {
    let (config, set_config) = signal(None::<DashboardConfig>);

    spawn_local(async move {
        set_config.set(Some(load_dashboard_config().await));
    });

    view! {
        <Shell>
            {move || match config.get() {
                Some(config) => view! { <AdminDashboard config=config /> }.into_any(),
                None => view! {
                    <Flex justify=FlexJustify::Center align=FlexAlign::Center gap=FlexGap::Small>
                        <Spinner />
                        "Loading configuration..."
                    </Flex>
                }.into_any(),
            }}
        </Shell>
    }
}
