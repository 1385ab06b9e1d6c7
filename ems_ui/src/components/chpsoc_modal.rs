//! CHP SoC controller modal - operating mode and force-charge thresholds.

use std::rc::Rc;

use ems_common::{ChpSocMode, EdgeConfigComponent};
use leptos::prelude::*;
use leptos::reactive::owner::LocalStorage;
use wasm_bindgen_futures::spawn_local;

use crate::chpsoc::{ChpsocController, Services};
use crate::edge::Edge;
use crate::service::ToastService;
use crate::store::ConfigStore;
use crate::translate::{Translate, Translator};
use crate::websocket::EdgeWebsocket;

pub(crate) fn mode_label(translator: &Translator, mode: ChpSocMode) -> String {
    let key = match mode {
        ChpSocMode::ManualOn => "General.manuallyOn",
        ChpSocMode::ManualOff => "General.manuallyOff",
        ChpSocMode::Automatic => "General.automatic",
    };
    translator.instant(key)
}

pub(crate) fn format_threshold(value: Option<f64>) -> String {
    value.map(|v| format!("{:.0} %", v)).unwrap_or_else(|| "-".to_string())
}

/// Modal editing one controller. Local state is seeded from the store on
/// open and set back to the store's values once each update resolves.
#[component]
pub fn ChpsocModal(
    edge: Option<Edge>,
    #[prop(into)] component_id: String,
    on_close: impl Fn() + 'static + Clone + Send,
) -> impl IntoView {
    let ws = use_context::<EdgeWebsocket>().expect("EdgeWebsocket context");
    let store = use_context::<ConfigStore>().expect("ConfigStore context");
    let toasts = use_context::<ToastService>().expect("ToastService context");
    let translator = use_context::<Translator>().expect("Translator context");

    let controller = ChpsocController::new(
        edge,
        component_id.clone(),
        Services {
            transport: Rc::new(ws),
            store: Rc::new(store),
            notifier: Rc::new(toasts),
            translator: Rc::new(translator.clone()),
            locks: store.update_locks(),
        },
    );

    let (mode, set_mode) = signal(controller.current_mode());
    let (thresholds, set_thresholds) = signal(controller.current_thresholds());
    let controller: StoredValue<ChpsocController, LocalStorage> = StoredValue::new_local(controller);

    let component = Memo::new(move |_| store.component(&component_id));
    let channel = move |read: fn(&EdgeConfigComponent) -> Option<ems_common::ChannelAddress>| {
        component
            .get()
            .and_then(|c| read(&c))
            .map(|address| address.to_string())
            .unwrap_or_else(|| "-".to_string())
    };

    let on_mode_change = move |ev: leptos::ev::Event| {
        let new_mode = match event_target_value(&ev).parse::<ChpSocMode>() {
            Ok(mode) => mode,
            Err(e) => {
                log::warn!("Ignoring mode selection: {}", e);
                return;
            }
        };
        set_mode.set(Some(new_mode));
        let controller = controller.get_value();
        spawn_local(async move {
            controller.update_mode(new_mode).await;
            set_mode.set(controller.current_mode());
        });
    };

    let commit_thresholds = move || {
        let range = thresholds.get_untracked();
        let controller = controller.get_value();
        spawn_local(async move {
            controller.update_thresholds(range).await;
            set_thresholds.set(controller.current_thresholds());
        });
    };

    let mode_options = ChpSocMode::ALL
        .into_iter()
        .map(|m| view! { <option value=m.as_str()>{mode_label(&translator, m)}</option> })
        .collect_view();

    let on_close_header = on_close.clone();

    view! {
        <div class="fixed inset-0 bg-black/60 flex items-center justify-center z-50">
            <div class="bg-[#111111] border border-[#ffffff10] rounded-lg w-[420px] flex flex-col">
                // Header
                <div class="flex items-center justify-between p-3 border-b border-[#ffffff08]">
                    <h2 class="text-sm font-semibold text-white">
                        {move || component.get().map(|c| c.alias).unwrap_or_default()}
                    </h2>
                    <button
                        class="text-[#666666] hover:text-white"
                        on:click=move |_| on_close_header()
                    >
                        <svg class="w-4 h-4" fill="none" stroke="currentColor" viewBox="0 0 24 24">
                            <path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d="M6 18L18 6M6 6l12 12"/>
                        </svg>
                    </button>
                </div>

                // Content
                <div class="p-3 space-y-3">
                    <div class="grid grid-cols-2 gap-2 text-[10px]">
                        <span class="text-[#888888]">{translator.instant("Edge.Index.Widgets.CHP.inputChannel")}</span>
                        <span class="text-white font-mono">{move || channel(EdgeConfigComponent::input_channel)}</span>
                        <span class="text-[#888888]">{translator.instant("Edge.Index.Widgets.CHP.outputChannel")}</span>
                        <span class="text-white font-mono">{move || channel(EdgeConfigComponent::output_channel)}</span>
                    </div>

                    <div>
                        <label class="block text-[9px] text-[#888888] mb-1">{translator.instant("General.mode")}</label>
                        <select
                            class="w-full bg-[#0a0a0a] border border-[#ffffff08] rounded px-2 py-1.5 text-[10px] text-white focus:border-[#00d9ff] focus:outline-none"
                            prop:value=move || mode.get().map(|m| m.as_str()).unwrap_or_default()
                            on:change=on_mode_change
                        >
                            {mode_options}
                        </select>
                    </div>

                    <div class="space-y-2">
                        <p class="text-[9px] text-[#555555]">
                            {translator.instant("Edge.Index.Widgets.CHP.thresholdsDescription")}
                        </p>
                        <div>
                            <div class="flex justify-between text-[9px] text-[#888888] mb-1">
                                <span>{translator.instant("Edge.Index.Widgets.CHP.lowThreshold")}</span>
                                <span class="font-mono text-white">{move || format_threshold(thresholds.get().lower)}</span>
                            </div>
                            <input
                                type="range"
                                min="0"
                                max="100"
                                step="1"
                                class="w-full"
                                prop:value=move || thresholds.get().lower.unwrap_or(0.0)
                                on:input=move |ev| {
                                    if let Ok(v) = event_target_value(&ev).parse::<f64>() {
                                        set_thresholds.update(|range| range.lower = Some(v));
                                    }
                                }
                                on:change=move |_| commit_thresholds()
                            />
                        </div>
                        <div>
                            <div class="flex justify-between text-[9px] text-[#888888] mb-1">
                                <span>{translator.instant("Edge.Index.Widgets.CHP.highThreshold")}</span>
                                <span class="font-mono text-white">{move || format_threshold(thresholds.get().upper)}</span>
                            </div>
                            <input
                                type="range"
                                min="0"
                                max="100"
                                step="1"
                                class="w-full"
                                prop:value=move || thresholds.get().upper.unwrap_or(100.0)
                                on:input=move |ev| {
                                    if let Ok(v) = event_target_value(&ev).parse::<f64>() {
                                        set_thresholds.update(|range| range.upper = Some(v));
                                    }
                                }
                                on:change=move |_| commit_thresholds()
                            />
                        </div>
                    </div>
                </div>

                // Footer
                <div class="flex justify-end gap-2 p-3 border-t border-[#ffffff08]">
                    <button
                        class="bg-[#1a1a1a] border border-[#ffffff08] text-[#888888] hover:text-white text-[10px] px-3 py-1.5 rounded"
                        on:click=move |_| on_close()
                    >
                        {translator.instant("General.close")}
                    </button>
                </div>
            </div>
        </div>
    }
}
