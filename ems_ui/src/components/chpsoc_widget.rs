//! Live widget listing the CHP SoC controllers of an edge.

use ems_common::CHP_SOC_FACTORY_ID;
use leptos::prelude::*;

use super::chpsoc_modal::{format_threshold, mode_label, ChpsocModal};
use crate::edge::Edge;
use crate::store::ConfigStore;
use crate::translate::{Translate, Translator};

#[component]
pub fn ChpsocWidget(#[prop(into)] edge: Signal<Option<Edge>>) -> impl IntoView {
    let store = use_context::<ConfigStore>().expect("ConfigStore context");
    let translator = use_context::<Translator>().expect("Translator context");

    let (open_component, set_open_component) = signal::<Option<String>>(None);
    let controllers = Memo::new(move |_| store.by_factory(CHP_SOC_FACTORY_ID));
    let empty_text = translator.instant("Edge.Index.Widgets.CHP.noControllers");

    view! {
        <div class="bg-[#111111] border border-[#ffffff10] rounded-lg p-3 w-[420px]">
            <h2 class="text-sm font-semibold text-white mb-2">
                {translator.instant("Edge.Index.Widgets.CHP.title")}
            </h2>
            <Show
                when=move || !controllers.get().is_empty()
                fallback=move || view! { <p class="text-[10px] text-[#555555]">{empty_text.clone()}</p> }
            >
                <div class="flex flex-col gap-1">
                    <For
                        each=move || controllers.get()
                        key=|component| component.id.clone()
                        children=move |component| {
                            let id = component.id.clone();
                            view! {
                                <button
                                    class="text-left bg-[#0a0a0a] border border-[#ffffff08] rounded px-2 py-1.5 hover:border-[#00d9ff40]"
                                    on:click=move |_| set_open_component.set(Some(id.clone()))
                                >
                                    <ChpsocSummary component_id=component.id />
                                </button>
                            }
                        }
                    />
                </div>
            </Show>
            {move || open_component.get().map(|id| view! {
                <ChpsocModal
                    edge=edge.get_untracked()
                    component_id=id
                    on_close=move || set_open_component.set(None)
                />
            })}
        </div>
    }
}

/// One row: alias, mode and thresholds, tracking the store.
#[component]
fn ChpsocSummary(component_id: String) -> impl IntoView {
    let store = use_context::<ConfigStore>().expect("ConfigStore context");
    let translator = use_context::<Translator>().expect("Translator context");
    let component = Memo::new(move |_| store.component(&component_id));

    view! {
        <div class="flex items-center justify-between text-[10px]">
            <span class="text-white">{move || component.get().map(|c| c.alias).unwrap_or_default()}</span>
            <span class="text-[#00d9ff]">
                {move || {
                    component
                        .get()
                        .and_then(|c| c.mode())
                        .map(|m| mode_label(&translator, m))
                        .unwrap_or_else(|| "-".to_string())
                }}
            </span>
            <span class="font-mono text-[#888888]">
                {move || {
                    let c = component.get();
                    format!(
                        "{} / {}",
                        format_threshold(c.as_ref().and_then(|c| c.low_threshold())),
                        format_threshold(c.as_ref().and_then(|c| c.high_threshold())),
                    )
                }}
            </span>
        </div>
    }
}
