pub mod footer;
pub mod header;

use leptos::prelude::*;

/// Page frame: header, content, footer.
#[component]
pub fn Shell(children: Children) -> impl IntoView {
    view! {
        <div class="container">
            <header::Header />
            {children()}
            <footer::Footer />
        </div>
    }
}
