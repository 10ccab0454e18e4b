use std::path::Path;

use crate::dom::dom_model::Document;
use crate::dom::html::parse_html;
use crate::dom::snapshot::document_from_json;
use crate::engine::error::LocatorError;

/// Load a document from disk. `.json` files are DOM snapshots, anything
/// else is treated as HTML markup.
pub fn load_document(path: &str) -> Result<Document, LocatorError> {
    let content = std::fs::read_to_string(path).map_err(|source| LocatorError::Io {
        path: path.to_string(),
        source,
    })?;

    let is_json = Path::new(path)
        .extension()
        .map_or(false, |e| e.eq_ignore_ascii_case("json"));

    if is_json {
        document_from_json(&content)
    } else {
        Ok(parse_html(&content))
    }
}

/// Fetch a page over HTTP and parse it as HTML.
pub fn fetch_document(url: &str) -> Result<Document, LocatorError> {
    let response = reqwest::blocking::get(url)
        .map_err(|e| LocatorError::Fetch(format!("GET {}: {}", url, e)))?;

    if !response.status().is_success() {
        return Err(LocatorError::Fetch(format!(
            "GET {} returned {}",
            url,
            response.status()
        )));
    }

    let body = response
        .text()
        .map_err(|e| LocatorError::Fetch(format!("reading body of {}: {}", url, e)))?;

    Ok(parse_html(&body))
}
