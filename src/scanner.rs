/// Scan-and-mutate pass over the live page
///
/// Finds candidate elements, injects block controls, and suppresses the ones
/// already blocked. The host page mutates its own DOM at will (infinite
/// scroll, tab switches, client-side navigation), so the whole pass is
/// idempotent and re-runs on every mutation batch plus once after a settling
/// delay.
use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::{
    Document, Element, HtmlAnchorElement, HtmlElement, MouseEvent, MutationObserver,
    MutationObserverInit,
};

use crate::blocklist::BlockList;
use crate::entity::Entity;
use crate::profiles::{DetailProfile, ScanProfile};
use crate::storage;

/// Extra pass after startup, for content that lands before the observer
/// attaches or while the page is still settling.
const SETTLE_DELAY_MS: i32 = 1_000;

/// The in-memory copy of the list, shared between the pass closures. A cache
/// of the store: refreshed once at startup, mutated locally before each
/// write-through.
pub type SharedList<E> = Rc<RefCell<BlockList<E>>>;

/// Load the list, run the first pass, then keep re-running on every observed
/// child-list change and once more after the settling delay.
pub async fn start<E: Entity>(
    profile: &'static ScanProfile,
    detail: Option<&'static DetailProfile>,
) -> Result<(), String> {
    let list: SharedList<E> = Rc::new(RefCell::new(match storage::load::<E>().await {
        Ok(list) => list,
        Err(err) => {
            log::warn!("Starting with an empty list, storage read failed: {}", err);
            BlockList::new()
        }
    }));

    let window = web_sys::window().ok_or("No window")?;
    let document = window.document().ok_or("No document")?;
    let body = document.body().ok_or("No body")?;

    run_pass(&document, profile, detail, &list);

    let observer_cb = {
        let document = document.clone();
        let list = list.clone();
        Closure::<dyn FnMut(js_sys::Array, MutationObserver)>::new(
            move |_mutations: js_sys::Array, _observer: MutationObserver| {
                run_pass(&document, profile, detail, &list);
            },
        )
    };
    let observer = MutationObserver::new(observer_cb.as_ref().unchecked_ref())
        .map_err(|e| format!("Failed to create observer: {:?}", e))?;
    let options = MutationObserverInit::new();
    options.set_child_list(true);
    options.set_subtree(true);
    observer
        .observe_with_options(&body, &options)
        .map_err(|e| format!("Failed to observe: {:?}", e))?;
    // Observes for the rest of the page's life.
    observer_cb.forget();

    let settle_cb = {
        let document = document.clone();
        let list = list.clone();
        Closure::<dyn FnMut()>::new(move || {
            run_pass(&document, profile, detail, &list);
        })
    };
    window
        .set_timeout_with_callback_and_timeout_and_arguments_0(
            settle_cb.as_ref().unchecked_ref(),
            SETTLE_DELAY_MS,
        )
        .map_err(|e| format!("Failed to schedule settling pass: {:?}", e))?;
    settle_cb.forget();

    Ok(())
}

/// One scan-and-mutate pass over the current DOM snapshot. Safe to call
/// arbitrarily often.
pub fn run_pass<E: Entity>(
    document: &Document,
    profile: &'static ScanProfile,
    detail: Option<&'static DetailProfile>,
    list: &SharedList<E>,
) {
    inject_controls(document, profile, list);
    hide_blocked(document, profile, list);
    if let Some(detail) = detail {
        refresh_detail_control(document, detail, list);
    }
}

/// Identifier for a candidate element: first one embedded on the element
/// itself, then one parsed from a contained link's URL.
pub fn extract_identity(element: &Element, profile: &ScanProfile) -> Option<String> {
    if let Some(id) = (profile.id_from_element)(element) {
        return Some(id);
    }
    let link = element.query_selector(profile.link_selector).ok().flatten()?;
    // The `href` property resolves relative URLs against the page.
    let href = link.dyn_ref::<HtmlAnchorElement>()?.href();
    (profile.id_from_href)(&href)
}

/// Display label for a candidate, falling back to the identifier.
pub fn extract_label(element: &Element, profile: &ScanProfile, id: &str) -> String {
    for selector in profile.label_selectors {
        if let Ok(Some(node)) = element.query_selector(selector) {
            if let Some(text) = node.text_content() {
                let text = text.trim();
                if !text.is_empty() {
                    return text.to_string();
                }
            }
        }
    }
    id.to_string()
}

fn candidates(document: &Document, selector: &str) -> Vec<Element> {
    let Ok(nodes) = document.query_selector_all(selector) else {
        return Vec::new();
    };
    (0..nodes.length())
        .filter_map(|i| nodes.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

fn inject_controls<E: Entity>(
    document: &Document,
    profile: &'static ScanProfile,
    list: &SharedList<E>,
) {
    let control_selector = format!(".{}", profile.control_class);
    for element in candidates(document, profile.candidate_selector) {
        if matches!(element.query_selector(&control_selector), Ok(Some(_))) {
            continue;
        }
        let Some(id) = extract_identity(&element, profile) else {
            continue;
        };
        let label = extract_label(&element, profile, &id);
        if let Err(err) = inject_control(document, profile, list, &element, id, label) {
            log::warn!("Failed to inject block control: {:?}", err);
        }
    }
}

fn inject_control<E: Entity>(
    document: &Document,
    profile: &'static ScanProfile,
    list: &SharedList<E>,
    element: &Element,
    id: String,
    label: String,
) -> Result<(), JsValue> {
    let button = document.create_element("button")?;
    button.set_class_name(profile.control_class);
    button.set_inner_html("\u{2716}");
    button.set_attribute("title", profile.control_title)?;

    let onclick = {
        let list = list.clone();
        let element = element.clone();
        Closure::<dyn FnMut(MouseEvent)>::new(move |event: MouseEvent| {
            event.prevent_default();
            event.stop_propagation();
            // Re-check membership: rapid re-invocation must not double-insert.
            let changed = list
                .borrow_mut()
                .block(E::new(id.clone(), label.clone()));
            if changed {
                persist(&list.borrow());
                suppress(&element, profile);
            }
        })
    };
    button.add_event_listener_with_callback("click", onclick.as_ref().unchecked_ref())?;
    // The handler lives as long as the button.
    onclick.forget();

    if let Some(html) = element.dyn_ref::<HtmlElement>() {
        let _ = html.style().set_property("position", "relative");
    }
    element.append_child(&button)?;
    Ok(())
}

fn hide_blocked<E: Entity>(
    document: &Document,
    profile: &'static ScanProfile,
    list: &SharedList<E>,
) {
    for element in candidates(document, profile.candidate_selector) {
        if let Some(id) = extract_identity(&element, profile) {
            if list.borrow().contains(&id) {
                suppress(&element, profile);
            }
        }
    }
}

/// Layout-specific removal rule. List rows hide their container and stay in
/// the DOM; card/tile layouts are removed outright (the nearest configured
/// wrapper ancestor when present, else the element itself).
fn suppress(element: &Element, profile: &ScanProfile) {
    if element.class_list().contains(profile.row_marker) {
        // Missing container: leave the row visible rather than guess.
        if let Ok(Some(container)) = element.query_selector(profile.row_container_selector) {
            hide(&container);
        }
    } else {
        let target = profile
            .tile_wrapper_selector
            .and_then(|selector| element.closest(selector).ok().flatten())
            .unwrap_or_else(|| element.clone());
        target.remove();
    }
}

fn hide(element: &Element) {
    if let Some(html) = element.dyn_ref::<HtmlElement>() {
        let _ = html.style().set_property("display", "none");
    }
}

/// Single-entity detail page: one control in the fixed action area. Its state
/// tracks membership on every pass, but clicking only ever adds.
fn refresh_detail_control<E: Entity>(
    document: &Document,
    detail: &'static DetailProfile,
    list: &SharedList<E>,
) {
    let Ok(Some(page)) = document.query_selector(detail.page_selector) else {
        return;
    };
    let Some(id) = page.get_attribute(detail.id_attr).filter(|id| !id.is_empty()) else {
        return;
    };
    let Ok(Some(area)) = document.query_selector(detail.action_area_selector) else {
        return;
    };

    let control_selector = format!(".{}", detail.control_class);
    if let Ok(Some(existing)) = area.query_selector(&control_selector) {
        set_detail_state(&existing, detail, list.borrow().contains(&id));
        return;
    }

    let label = page
        .query_selector(detail.title_selector)
        .ok()
        .flatten()
        .and_then(|node| node.text_content())
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
        .unwrap_or_else(|| id.clone());

    let Ok(button) = document.create_element("button") else {
        return;
    };
    button.set_class_name(detail.control_class);
    set_detail_state(&button, detail, list.borrow().contains(&id));

    let onclick = {
        let list = list.clone();
        let button = button.clone();
        Closure::<dyn FnMut(MouseEvent)>::new(move |event: MouseEvent| {
            event.prevent_default();
            event.stop_propagation();
            // One-way affordance: adds, never removes or toggles.
            let changed = list
                .borrow_mut()
                .block(E::new(id.clone(), label.clone()));
            if changed {
                persist(&list.borrow());
            }
            set_detail_state(&button, detail, true);
        })
    };
    if button
        .add_event_listener_with_callback("click", onclick.as_ref().unchecked_ref())
        .is_err()
    {
        return;
    }
    onclick.forget();
    let _ = area.append_child(&button);
}

fn set_detail_state(button: &Element, detail: &DetailProfile, blocked: bool) {
    let _ = button.set_attribute("data-blocked", if blocked { "true" } else { "false" });
    button.set_text_content(Some(if blocked {
        detail.blocked_text
    } else {
        detail.block_text
    }));
}

/// Write-through, fire-and-forget: the UI proceeds on its in-memory state and
/// the persisted write happens in the background.
fn persist<E: Entity>(list: &BlockList<E>) {
    let snapshot = list.clone();
    spawn_local(async move {
        if let Err(err) = storage::save(&snapshot).await {
            log::warn!("Storage write failed: {}", err);
        }
    });
}
