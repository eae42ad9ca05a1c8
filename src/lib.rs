/// Card Warden - Chrome extension for hiding friend cards and blocking games
/// Built with Rust + WASM + Yew

pub mod blocklist;
pub mod entity;
pub mod identity;
pub mod profiles;
pub mod scanner;
pub mod storage;
pub mod ui;
pub mod view;

use entity::{BlockedFriend, BlockedGame};
use wasm_bindgen::prelude::*;

// Set up panic hook for better error messages in the browser console
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());
}

// Re-export core extraction functions for JavaScript access
#[wasm_bindgen]
pub fn extract_user_id(href: &str) -> String {
    identity::user_id_from_href(href).unwrap_or_default()
}

#[wasm_bindgen]
pub fn extract_universe_id(href: &str) -> String {
    identity::universe_id_from_href(href).unwrap_or_default()
}

// Content scripts: keep the page scanned as the host mutates it

#[wasm_bindgen]
pub fn start_friends_watcher() {
    wasm_bindgen_futures::spawn_local(async {
        if let Err(e) = scanner::start::<BlockedFriend>(&profiles::FRIENDS, None).await {
            log::error!("Friends watcher failed to start: {}", e);
        }
    });
}

#[wasm_bindgen]
pub fn start_games_watcher() {
    wasm_bindgen_futures::spawn_local(async {
        if let Err(e) =
            scanner::start::<BlockedGame>(&profiles::GAMES, Some(&profiles::GAME_DETAIL)).await
        {
            log::error!("Games watcher failed to start: {}", e);
        }
    });
}

// Popup panels, one per list

#[wasm_bindgen]
pub fn start_friends_popup() {
    yew::Renderer::<ui::popup::BlockPanel<BlockedFriend>>::new().render();
}

#[wasm_bindgen]
pub fn start_games_popup() {
    yew::Renderer::<ui::popup::BlockPanel<BlockedGame>>::new().render();
}
