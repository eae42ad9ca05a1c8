/// Host page contract: selectors and URL patterns per entity kind.
///
/// The host markup is an unstable external interface. When it drifts, these
/// tables are the only place that needs to change.
use web_sys::Element;

use crate::identity;

/// Everything the generic scanner needs to handle one entity kind across the
/// layouts the host renders it in.
pub struct ScanProfile {
    /// Matches every candidate element across all known layouts.
    pub candidate_selector: &'static str,
    /// Link inside a candidate whose URL carries the identifier.
    pub link_selector: &'static str,
    /// Parses the identifier out of that link's URL.
    pub id_from_href: fn(&str) -> Option<String>,
    /// Identifier embedded directly on the element, for layouts that carry one.
    pub id_from_element: fn(&Element) -> Option<String>,
    /// Text sources for the display label, in priority order.
    pub label_selectors: &'static [&'static str],
    /// Class marking the list-row layout. Rows are hidden in place, not
    /// removed, so the host page's keyed lists stay consistent.
    pub row_marker: &'static str,
    /// Container hidden for list rows.
    pub row_container_selector: &'static str,
    /// Ancestor removed for card/tile layouts; the element itself when absent.
    pub tile_wrapper_selector: Option<&'static str>,
    pub control_class: &'static str,
    pub control_title: &'static str,
}

/// Single-entity detail page: one control in a fixed action area.
pub struct DetailProfile {
    pub page_selector: &'static str,
    pub id_attr: &'static str,
    pub action_area_selector: &'static str,
    pub title_selector: &'static str,
    pub control_class: &'static str,
    pub block_text: &'static str,
    pub blocked_text: &'static str,
}

fn friend_row_id(element: &Element) -> Option<String> {
    // Only list rows carry the user id as the element id.
    if !element.class_list().contains("list-item") {
        return None;
    }
    let id = element.id();
    (!id.is_empty()).then_some(id)
}

fn game_embedded_id(element: &Element) -> Option<String> {
    element
        .get_attribute("data-universe-id")
        .filter(|id| !id.is_empty())
}

pub static FRIENDS: ScanProfile = ScanProfile {
    candidate_selector: ".friends-carousel-tile, .list-item.avatar-card",
    link_selector: r#"a[href*="/users/"]"#,
    id_from_href: identity::user_id_from_href,
    id_from_element: friend_row_id,
    label_selectors: &[".friends-carousel-display-name", ".avatar-name"],
    row_marker: "list-item",
    row_container_selector: ".avatar-card-container",
    tile_wrapper_selector: None,
    control_class: "friend-block-btn",
    control_title: "Hide this friend",
};

pub static GAMES: ScanProfile = ScanProfile {
    candidate_selector: ".game-card-container, .list-item.game-card",
    link_selector: r#"a[href*="universeId="]"#,
    id_from_href: identity::universe_id_from_href,
    id_from_element: game_embedded_id,
    label_selectors: &[".game-card-name", ".game-name"],
    row_marker: "list-item",
    row_container_selector: ".game-card-body",
    tile_wrapper_selector: Some(".grid-item-container"),
    control_class: "game-block-btn",
    control_title: "Block this game",
};

pub static GAME_DETAIL: DetailProfile = DetailProfile {
    page_selector: "#game-detail-page",
    id_attr: "data-universe-id",
    action_area_selector: ".game-calls-to-action",
    title_selector: ".game-name",
    control_class: "game-block-btn",
    block_text: "Block game",
    blocked_text: "Blocked",
};
