//! Embedded UI assets for single-binary distribution
//!
//! Compiles the browser panel (HTML, stylesheet, wasm bundle) into the host
//! binary with rust-embed, so a release build ships as one file.

use rust_embed::RustEmbed;

/// Embedded UI assets from the ui crate directory
#[derive(RustEmbed)]
#[folder = "../ui/"]
#[include = "index.html"]
#[include = "style.css"]
#[include = "pkg/*.js"]
#[include = "pkg/*.wasm"]
#[include = "pkg/*.d.ts"]
pub struct UiAssets;

/// Get a file from embedded assets with its MIME type
pub fn get_asset(path: &str) -> Option<(Vec<u8>, &'static str)> {
    let path = match path.trim_start_matches('/') {
        "" => "index.html",
        trimmed => trimmed,
    };

    let file = UiAssets::get(path)?;

    // wasm-bindgen emits module scripts; browsers refuse them without a JS type
    let mime = if path.ends_with(".js") {
        "application/javascript"
    } else {
        mime_guess::from_path(path)
            .first_raw()
            .unwrap_or("application/octet-stream")
    };

    Some((file.data.into_owned(), mime))
}
