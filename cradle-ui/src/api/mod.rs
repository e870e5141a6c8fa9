//! Browser API Client
//!
//! [`GlooClient`] implements the shared `CareApi` contract over `gloo-net`,
//! plus the helpers that pick the backend base URL.

mod client;

pub use client::GlooClient;

use cradle::api::{normalize_base, DEFAULT_API_BASE};

/// localStorage key holding a user-chosen backend URL
pub const API_URL_STORAGE_KEY: &str = "cradle_api_url";

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

/// Backend base URL: localStorage, then the build-time `CRADLE_API_URL`,
/// then the default
pub fn get_api_base() -> String {
    let stored = local_storage()
        .and_then(|s| s.get_item(API_URL_STORAGE_KEY).ok().flatten())
        .filter(|url| !url.trim().is_empty());
    resolve_base(stored.as_deref(), option_env!("CRADLE_API_URL"))
}

/// Persist the backend base URL; a blank URL clears the override
pub fn set_api_base(url: &str) {
    if let Some(storage) = local_storage() {
        let result = if url.trim().is_empty() {
            storage.remove_item(API_URL_STORAGE_KEY)
        } else {
            storage.set_item(API_URL_STORAGE_KEY, &normalize_base(url))
        };
        if result.is_err() {
            web_sys::console::warn_1(&"Could not write API URL to localStorage".into());
        }
    }
}

fn resolve_base(stored: Option<&str>, build_time: Option<&str>) -> String {
    let url = stored
        .or(build_time.filter(|u| !u.trim().is_empty()))
        .unwrap_or(DEFAULT_API_BASE);
    normalize_base(url)
}


#[cfg(all(test, target_arch = "wasm32"))]
mod browser_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_api_base_round_trip() {
        set_api_base("http://10.0.0.2:5000/api/");
        assert_eq!(get_api_base(), "http://10.0.0.2:5000/api");

        set_api_base("");
        assert_eq!(
            get_api_base(),
            resolve_base(None, option_env!("CRADLE_API_URL"))
        );
    }
}
