//! Cookie read/write over `document.cookie`.
//!
//! The pure parser is split out so cookie handling stays testable without a
//! browser; `get_cookie`/`set_cookie` require one.

#[cfg(test)]
#[path = "cookies_test.rs"]
mod cookies_test;

/// Extract the value of `name` from a `document.cookie` string.
///
/// Names match exactly; the first occurrence wins.
pub fn parse_cookie(raw: &str, name: &str) -> Option<String> {
    raw.split(';').find_map(|pair| {
        let (key, value) = pair.split_once('=')?;
        if key.trim() == name {
            Some(value.trim().to_owned())
        } else {
            None
        }
    })
}

/// Read a cookie from the current document.
#[cfg(feature = "csr")]
pub fn get_cookie(name: &str) -> Option<String> {
    let raw = html_document()?.cookie().ok()?;
    parse_cookie(&raw, name)
}

/// Write a session cookie on the current document under `path=/`.
#[cfg(feature = "csr")]
pub fn set_cookie(name: &str, value: &str) {
    if let Some(doc) = html_document() {
        let _ = doc.set_cookie(&format!("{name}={value}; path=/"));
    }
}

#[cfg(feature = "csr")]
fn html_document() -> Option<web_sys::HtmlDocument> {
    use wasm_bindgen::JsCast;

    web_sys::window()?
        .document()?
        .dyn_into::<web_sys::HtmlDocument>()
        .ok()
}
