/// Synced storage access via the extension's JS bridge
///
/// `chrome.storage.sync` is eventually consistent across the user's devices;
/// every save replaces the whole list and the last writer wins. Callers treat
/// writes as fire-and-forget.
use wasm_bindgen::prelude::*;

use crate::blocklist::BlockList;
use crate::entity::Entity;

// Import JS bridge functions
#[wasm_bindgen(module = "/bridge.js")]
extern "C" {
    #[wasm_bindgen(catch)]
    async fn getSyncStorage(key: &str) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn setSyncStorage(key: &str, value: JsValue) -> Result<(), JsValue>;

    fn exportToFile(data: &str, filename: &str);

    #[wasm_bindgen(catch)]
    async fn readFileText(file: JsValue) -> Result<JsValue, JsValue>;
}

/// Load the list stored under `E`'s key. A missing key yields an empty list.
pub async fn load<E: Entity>() -> Result<BlockList<E>, String> {
    let value = getSyncStorage(E::STORAGE_KEY)
        .await
        .map_err(|e| format!("Failed to read storage: {:?}", e))?;

    if value.is_null() || value.is_undefined() {
        Ok(BlockList::new())
    } else {
        serde_wasm_bindgen::from_value(value)
            .map_err(|e| format!("Failed to parse storage: {:?}", e))
    }
}

/// Replace the stored list under `E`'s key with `list`.
pub async fn save<E: Entity>(list: &BlockList<E>) -> Result<(), String> {
    let value = serde_wasm_bindgen::to_value(list)
        .map_err(|e| format!("Failed to serialize list: {:?}", e))?;

    setSyncStorage(E::STORAGE_KEY, value)
        .await
        .map_err(|e| format!("Failed to write storage: {:?}", e))
}

/// Offer `data` as a browser download named `filename`.
pub fn export_file(data: &str, filename: &str) {
    exportToFile(data, filename);
}

/// Read a user-selected file as UTF-8 text.
pub async fn read_file_text(file: &web_sys::File) -> Result<String, String> {
    let text = readFileText(file.clone().into())
        .await
        .map_err(|e| format!("Failed to read file: {:?}", e))?;

    text.as_string()
        .ok_or_else(|| "File contents were not text".to_string())
}
