/// Popup panel for reviewing and editing a block-list
use patternfly_yew::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::blocklist::BlockList;
use crate::entity::Entity;
use crate::storage;
use crate::view::{self, ViewPlan};

#[derive(Clone, PartialEq)]
enum PanelState {
    Loading,
    Idle,
    Error(String),
}

/// One panel per entity kind; the kind supplies the storage key, wording,
/// and export filename.
#[function_component(BlockPanel)]
pub fn block_panel<E: Entity>() -> Html {
    let state = use_state(|| PanelState::Loading);
    let list = use_state(BlockList::<E>::new);
    // Cleared on every popup open, so the default recent view shows first.
    let search_query = use_state(String::new);
    let file_input_ref = use_node_ref();

    // Load the stored list on mount
    {
        let state = state.clone();
        let list = list.clone();

        use_effect_with((), move |_| {
            spawn_local(async move {
                match storage::load::<E>().await {
                    Ok(loaded) => {
                        list.set(loaded);
                        state.set(PanelState::Idle);
                    }
                    Err(e) => {
                        state.set(PanelState::Error(format!("Failed to load: {}", e)));
                    }
                }
            });
            || ()
        });
    }

    // Search handler
    let on_search_input = {
        let search_query = search_query.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(input) = e.target_dyn_into::<HtmlInputElement>() {
                search_query.set(input.value());
            }
        })
    };

    // Remove one entry, persist, and fall back to the default view
    let on_remove = {
        let list = list.clone();
        let search_query = search_query.clone();
        let state = state.clone();

        Callback::from(move |id: String| {
            let mut updated = (*list).clone();
            if updated.remove(&id) {
                list.set(updated.clone());
                search_query.set(String::new());

                let state = state.clone();
                spawn_local(async move {
                    if let Err(e) = storage::save(&updated).await {
                        state.set(PanelState::Error(format!("Failed to save: {}", e)));
                    }
                });
            }
        })
    };

    // Export the full list as a JSON download
    let on_export = {
        let list = list.clone();

        Callback::from(move |_| match list.to_json() {
            Ok(json) => storage::export_file(&json, E::EXPORT_FILENAME),
            Err(e) => log::error!("Export failed: {:?}", e),
        })
    };

    // The visible Import button proxies to a hidden file input
    let on_import_click = {
        let file_input_ref = file_input_ref.clone();
        Callback::from(move |_| {
            if let Some(input) = file_input_ref.cast::<HtmlInputElement>() {
                input.click();
            }
        })
    };

    // Wholesale replacement on a well-formed file; otherwise the stored list
    // is left untouched and the failure is logged.
    let on_import_file = {
        let list = list.clone();
        let search_query = search_query.clone();
        let state = state.clone();

        Callback::from(move |e: Event| {
            let Some(input) = e.target_dyn_into::<HtmlInputElement>() else {
                return;
            };
            let Some(file) = input.files().and_then(|files| files.get(0)) else {
                return;
            };
            // Reset so picking the same file again re-fires the change event.
            input.set_value("");

            let list = list.clone();
            let search_query = search_query.clone();
            let state = state.clone();
            spawn_local(async move {
                let text = match storage::read_file_text(&file).await {
                    Ok(text) => text,
                    Err(e) => {
                        state.set(PanelState::Error(format!("Failed to read file: {}", e)));
                        return;
                    }
                };

                match BlockList::<E>::from_json(&text) {
                    Ok(imported) => {
                        list.set(imported.clone());
                        search_query.set(String::new());
                        if let Err(e) = storage::save(&imported).await {
                            state.set(PanelState::Error(format!("Failed to save: {}", e)));
                        }
                    }
                    Err(e) => {
                        log::error!("Invalid file format: {}", e);
                    }
                }
            });
        })
    };

    let is_busy = matches!(*state, PanelState::Loading);
    let plan = view::plan(&*list, search_query.as_str());

    html! {
        <div class="padding-20">
            <h1 class="popup-title">{E::PANEL_TITLE}</h1>

            // Status display
            {match &*state {
                PanelState::Loading => html! {
                    <div class="loading-text-center">
                        <Spinner />
                    </div>
                },
                PanelState::Error(err) => html! {
                    <Alert r#type={AlertType::Danger} title={"Error"} inline={true}>
                        {err.clone()}
                    </Alert>
                },
                PanelState::Idle => html! {}
            }}

            // Search bar
            <div class="search-container">
                <input
                    type="text"
                    placeholder={E::SEARCH_PLACEHOLDER}
                    value={(*search_query).clone()}
                    oninput={on_search_input}
                    class="search-input"
                />
            </div>

            // Blocked entries
            <div id="blocked-list">
                {match plan {
                    ViewPlan::Empty => html! {
                        <p>{E::EMPTY_MESSAGE}</p>
                    },
                    ViewPlan::NoMatches => html! {
                        <p>{"No matches found"}</p>
                    },
                    ViewPlan::Matches(entries) => html! {
                        <>
                            {for entries.iter().map(|entry| entry_row(entry, &on_remove))}
                        </>
                    },
                    ViewPlan::Recent { entries, total } => html! {
                        <>
                            <h4>{E::RECENT_HEADING}</h4>
                            {for entries.iter().map(|entry| entry_row(entry, &on_remove))}
                            if let Some(total) = total {
                                <p class="total-count">
                                    {format!("{}: {}", E::TOTAL_LABEL, total)}
                                </p>
                            }
                        </>
                    },
                }}
            </div>

            // Export / import
            <div class="list-actions">
                <Button onclick={on_export} disabled={is_busy} variant={ButtonVariant::Secondary}>
                    {"Export"}
                </Button>
                <Button onclick={on_import_click} disabled={is_busy} variant={ButtonVariant::Secondary}>
                    {"Import"}
                </Button>
                <input
                    type="file"
                    accept=".json"
                    ref={file_input_ref}
                    onchange={on_import_file}
                    style="display: none"
                />
            </div>

            <p class="footer-popup">
                {"Card Warden v0.1.0"}
            </p>
        </div>
    }
}

fn entry_row<E: Entity>(entry: &E, on_remove: &Callback<String>) -> Html {
    let id = entry.id().to_string();
    let onclick = on_remove.reform(move |_: MouseEvent| id.clone());

    html! {
        <div class="blocked-entry" key={entry.id().to_string()}>
            <span>
                {entry.label()}
                {" "}
                <small>{format!("(ID: {})", entry.id())}</small>
            </span>
            <Button onclick={onclick} variant={ButtonVariant::Secondary} size={ButtonSize::Small}>
                {"Remove"}
            </Button>
        </div>
    }
}
