use leptos::mount::mount_to_body;
use leptos::prelude::*;
use leptos_router::components::{Route, Router, Routes};
use leptos_router::path;
use wasm_bindgen::prelude::*;

pub mod chpsoc;
mod components;
pub mod edge;
pub mod environment;
pub mod error;
pub mod service;
pub mod store;
pub mod translate;
pub mod websocket;

use components::{LivePage, ToastContainer};
use environment::{ENVIRONMENT, TARGET};
use service::ToastService;
use store::ConfigStore;
use translate::Translator;
use websocket::EdgeWebsocket;

#[wasm_bindgen(start)]
pub fn main() {
    let level = if ENVIRONMENT.debug_mode { log::Level::Debug } else { log::Level::Info };
    _ = console_log::init_with_level(level);
    console_error_panic_hook::set_once();

    log::info!(
        "{} [{}] ({}) at {}",
        ENVIRONMENT.theme.ui_title,
        TARGET.as_str(),
        ENVIRONMENT.backend.label(),
        ENVIRONMENT.url
    );
    mount_to_body(|| view! { <App/> });
}

#[component]
pub fn App() -> impl IntoView {
    provide_context(EdgeWebsocket::new(ENVIRONMENT.url));
    provide_context(ConfigStore::new());
    provide_context(ToastService::new());
    provide_context(Translator::from_browser());

    view! {
        <Router>
            <Routes fallback=|| view! { <LivePage/> }>
                <Route path=path!("/") view=LivePage />
                <Route path=path!("/device/:edge_id/live") view=LivePage />
            </Routes>
        </Router>
        <ToastContainer/>
    }
}
