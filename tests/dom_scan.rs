//! DOM-level properties of the scan-and-mutate pass, driven by explicit
//! rescans over synthetic page fragments.
#![cfg(target_arch = "wasm32")]

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::{Document, Element, HtmlElement};

use card_warden::blocklist::BlockList;
use card_warden::entity::{BlockedFriend, BlockedGame, Entity};
use card_warden::profiles;
use card_warden::scanner::{self, SharedList};

wasm_bindgen_test_configure!(run_in_browser);

fn document() -> Document {
    web_sys::window().unwrap().document().unwrap()
}

fn mount(html: &str) -> Element {
    let doc = document();
    let root = doc.create_element("div").unwrap();
    root.set_inner_html(html);
    doc.body().unwrap().append_child(&root).unwrap();
    root
}

fn empty_friends() -> SharedList<BlockedFriend> {
    Rc::new(RefCell::new(BlockList::new()))
}

fn friends_with(id: &str, name: &str) -> SharedList<BlockedFriend> {
    let mut list = BlockList::new();
    list.block(BlockedFriend::new(id.to_string(), name.to_string()));
    Rc::new(RefCell::new(list))
}

fn carousel_tile(id: &str, name: &str) -> String {
    format!(
        r#"<div class="friends-carousel-tile">
            <a href="/users/{id}/profile">
                <span class="friends-carousel-display-name">{name}</span>
            </a>
        </div>"#
    )
}

fn click(button: &Element) {
    button.dyn_ref::<HtmlElement>().unwrap().click();
}

#[wasm_bindgen_test]
fn injection_pass_is_idempotent() {
    let root = mount(&carousel_tile("101", "Alice"));
    let list = empty_friends();

    scanner::run_pass(&document(), &profiles::FRIENDS, None, &list);
    scanner::run_pass(&document(), &profiles::FRIENDS, None, &list);

    let controls = root.query_selector_all(".friend-block-btn").unwrap();
    assert_eq!(controls.length(), 1);

    root.remove();
}

#[wasm_bindgen_test]
fn element_without_identifier_is_skipped() {
    let root = mount(r#"<div class="friends-carousel-tile"><span>???</span></div>"#);
    let list = empty_friends();

    scanner::run_pass(&document(), &profiles::FRIENDS, None, &list);

    assert!(root.query_selector(".friend-block-btn").unwrap().is_none());
    // The element itself is untouched.
    assert!(root.query_selector(".friends-carousel-tile").unwrap().is_some());

    root.remove();
}

#[wasm_bindgen_test]
fn clicking_control_blocks_and_suppresses() {
    let root = mount(&carousel_tile("102", "Bob"));
    let list = empty_friends();

    scanner::run_pass(&document(), &profiles::FRIENDS, None, &list);
    let button = root.query_selector(".friend-block-btn").unwrap().unwrap();
    click(&button);

    assert!(list.borrow().contains("102"));
    assert_eq!(list.borrow().entries()[0].name, "Bob");
    assert!(root.query_selector(".friends-carousel-tile").unwrap().is_none());

    root.remove();
}

#[wasm_bindgen_test]
fn blocking_same_identifier_twice_keeps_one_entry() {
    let root = mount(&format!(
        "{}{}",
        carousel_tile("103", "Carol"),
        carousel_tile("103", "Carol")
    ));
    let list = empty_friends();

    scanner::run_pass(&document(), &profiles::FRIENDS, None, &list);
    let controls = root.query_selector_all(".friend-block-btn").unwrap();
    assert_eq!(controls.length(), 2);

    click(&controls.item(0).unwrap().dyn_into::<Element>().unwrap());
    click(&controls.item(1).unwrap().dyn_into::<Element>().unwrap());

    assert_eq!(list.borrow().len(), 1);

    root.remove();
}

#[wasm_bindgen_test]
fn blocked_tiles_are_removed_on_rescan_including_late_arrivals() {
    let root = mount(&carousel_tile("104", "Dave"));
    let list = friends_with("104", "Dave");

    scanner::run_pass(&document(), &profiles::FRIENDS, None, &list);
    assert!(root.query_selector(".friends-carousel-tile").unwrap().is_none());

    // Content the host page adds later is caught by the next pass.
    let late = document().create_element("div").unwrap();
    late.set_inner_html(&carousel_tile("104", "Dave"));
    root.append_child(&late).unwrap();

    scanner::run_pass(&document(), &profiles::FRIENDS, None, &list);
    assert!(root.query_selector(".friends-carousel-tile").unwrap().is_none());

    root.remove();
}

#[wasm_bindgen_test]
fn blocked_list_row_is_hidden_in_place() {
    let root = mount(
        r#"<div class="list-item avatar-card" id="105">
            <div class="avatar-card-container">
                <span class="avatar-name">Eve</span>
            </div>
        </div>"#,
    );
    let list = friends_with("105", "Eve");

    scanner::run_pass(&document(), &profiles::FRIENDS, None, &list);

    // The row stays in the DOM; only its container goes invisible.
    let row = root.query_selector(".list-item.avatar-card").unwrap().unwrap();
    assert!(row.is_connected());
    let container = root.query_selector(".avatar-card-container").unwrap().unwrap();
    let display = container
        .dyn_ref::<HtmlElement>()
        .unwrap()
        .style()
        .get_property_value("display")
        .unwrap();
    assert_eq!(display, "none");

    root.remove();
}

#[wasm_bindgen_test]
fn list_row_identifier_comes_from_element_id() {
    let root = mount(
        r#"<div class="list-item avatar-card" id="106">
            <div class="avatar-card-container">
                <span class="avatar-name">Frank</span>
            </div>
        </div>"#,
    );
    let list = empty_friends();

    scanner::run_pass(&document(), &profiles::FRIENDS, None, &list);
    let button = root.query_selector(".friend-block-btn").unwrap().unwrap();
    click(&button);

    assert!(list.borrow().contains("106"));
    assert_eq!(list.borrow().entries()[0].name, "Frank");

    root.remove();
}

#[wasm_bindgen_test]
fn game_detail_control_is_one_way() {
    let root = mount(
        r#"<div id="game-detail-page" data-universe-id="201">
            <h1 class="game-name">Tower Builder</h1>
            <div class="game-calls-to-action"></div>
        </div>"#,
    );
    let list: SharedList<BlockedGame> = Rc::new(RefCell::new(BlockList::new()));

    scanner::run_pass(&document(), &profiles::GAMES, Some(&profiles::GAME_DETAIL), &list);

    let button = root
        .query_selector(".game-calls-to-action .game-block-btn")
        .unwrap()
        .unwrap();
    assert_eq!(button.text_content().unwrap(), "Block game");

    click(&button);
    assert!(list.borrow().contains("201"));
    assert_eq!(list.borrow().entries()[0].title, "Tower Builder");
    assert_eq!(button.text_content().unwrap(), "Blocked");
    assert_eq!(button.get_attribute("data-blocked").unwrap(), "true");

    // Clicking again never removes or toggles.
    click(&button);
    assert_eq!(list.borrow().len(), 1);
    assert_eq!(button.text_content().unwrap(), "Blocked");

    root.remove();
}

#[wasm_bindgen_test]
fn game_detail_control_reflects_existing_block() {
    let root = mount(
        r#"<div id="game-detail-page" data-universe-id="202">
            <h1 class="game-name">Speed Run</h1>
            <div class="game-calls-to-action"></div>
        </div>"#,
    );
    let mut blocked = BlockList::new();
    blocked.block(BlockedGame::new("202".to_string(), "Speed Run".to_string()));
    let list: SharedList<BlockedGame> = Rc::new(RefCell::new(blocked));

    scanner::run_pass(&document(), &profiles::GAMES, Some(&profiles::GAME_DETAIL), &list);

    let button = root
        .query_selector(".game-calls-to-action .game-block-btn")
        .unwrap()
        .unwrap();
    assert_eq!(button.text_content().unwrap(), "Blocked");

    root.remove();
}

#[wasm_bindgen_test]
fn game_tile_identifier_comes_from_link_query() {
    let root = mount(
        r#"<div class="grid-item-container">
            <div class="game-card-container">
                <a href="/games/refs?universeId=203&pos=1">
                    <span class="game-card-name">Obby World</span>
                </a>
            </div>
        </div>"#,
    );
    let list: SharedList<BlockedGame> = Rc::new(RefCell::new(BlockList::new()));

    scanner::run_pass(&document(), &profiles::GAMES, None, &list);
    let button = root.query_selector(".game-block-btn").unwrap().unwrap();
    click(&button);

    assert!(list.borrow().contains("203"));
    assert_eq!(list.borrow().entries()[0].title, "Obby World");
    // Tile removal takes the configured wrapper ancestor with it.
    assert!(root.query_selector(".grid-item-container").unwrap().is_none());

    root.remove();
}
