//! Live page of one edge.

use leptos::prelude::*;
use leptos_router::hooks::use_params_map;
use wasm_bindgen_futures::spawn_local;

use super::ChpsocWidget;
use crate::edge::Edge;
use crate::environment::ENVIRONMENT;
use crate::store::ConfigStore;
use crate::translate::{Translate, Translator};
use crate::websocket::EdgeWebsocket;

/// Binds the edge from the `edge_id` route parameter. Without one, no edge
/// is bound and configuration changes are not sent anywhere.
#[component]
pub fn LivePage() -> impl IntoView {
    let ws = use_context::<EdgeWebsocket>().expect("EdgeWebsocket context");
    let store = use_context::<ConfigStore>().expect("ConfigStore context");
    let translator = use_context::<Translator>().expect("Translator context");

    let params = use_params_map();
    let edge = Memo::new(move |_| {
        params
            .with(|p| p.get("edge_id"))
            .map(|id| Edge::new(id, &ENVIRONMENT))
    });

    // (Re)load the edge configuration whenever the connection comes up
    Effect::new(move |_| {
        if !ws.connected.get() {
            return;
        }
        let Some(edge) = edge.get() else {
            return;
        };
        spawn_local(async move {
            match edge.get_edge_config(&ws).await {
                Ok(config) => store.replace_all(config.into_components()),
                Err(e) => log::error!("Failed to load configuration of edge '{}': {}", edge.id, e),
            }
        });
    });

    let connected_text = translator.instant("General.connected");
    let disconnected_text = translator.instant("General.disconnected");
    let no_edge_text = translator.instant("General.noEdgeSelected");

    view! {
        <div class="min-h-screen bg-[#0a0a0a] p-4 flex flex-col gap-4">
            <div class="flex items-center justify-between">
                <h1 class="text-sm font-semibold text-white">{ENVIRONMENT.theme.ui_title}</h1>
                <div class="flex items-center gap-2 text-[10px]">
                    <span class="text-[#888888]">{ENVIRONMENT.backend.label()}</span>
                    <span class=move || if ws.connected.get() { "text-[#22c55e]" } else { "text-[#ff4444]" }>
                        {move || if ws.connected.get() { connected_text.clone() } else { disconnected_text.clone() }}
                    </span>
                    <Show when=move || ENVIRONMENT.debug_mode>
                        <span class="font-mono text-[#555555]">{ws.url()}</span>
                    </Show>
                </div>
            </div>
            <Show
                when=move || edge.get().is_some()
                fallback=move || view! { <p class="text-[10px] text-[#555555]">{no_edge_text.clone()}</p> }
            >
                <ChpsocWidget edge=edge />
            </Show>
        </div>
    }
}
