use monkey_id::dom::dom_model::{Document, Layout, NodeId};
use monkey_id::dom::html::parse_html;
use monkey_id::dom::loader::load_document;

pub fn fixture_path(name: &str) -> String {
    let base = std::env::current_dir().unwrap();
    let path = base.join("tests").join("fixtures").join(name);

    path.display().to_string()
}

pub fn load_fixture(name: &str) -> Document {
    load_document(&fixture_path(name)).unwrap()
}

/// Parse a body fragment inside a minimal page.
pub fn page(body: &str) -> Document {
    parse_html(&format!(
        "<!DOCTYPE html><html><head><title>t</title></head><body>{}</body></html>",
        body
    ))
}

pub fn by_id(doc: &Document, id: &str) -> NodeId {
    doc.element_by_id(id)
        .unwrap_or_else(|| panic!("no element with id '{}'", id))
}

/// The `n`-th (0-based) element with `tag`.
pub fn nth(doc: &Document, tag: &str, n: usize) -> NodeId {
    doc.elements_by_tag(tag)
        .get(n)
        .copied()
        .unwrap_or_else(|| panic!("fewer than {} <{}> elements", n + 1, tag))
}

/// Empty `html > body` document built without the parser.
pub fn empty_body() -> (Document, NodeId) {
    let mut doc = Document::new();
    let root = doc.root();
    let html = doc.append_element(root, "html", &[]);
    let body = doc.append_element(html, "body", &[]);
    (doc, body)
}

/// `<table id="elements">` with one `<tr>` per row and one `<td>` per
/// value; empty strings leave the cell without text.
pub fn element_table(rows: &[[&str; 2]]) -> (Document, NodeId) {
    let (mut doc, body) = empty_body();
    let table = doc.append_element(body, "table", &[("id", "elements")]);
    for row in rows {
        let tr = doc.append_element(table, "tr", &[]);
        for value in row {
            let td = doc.append_element(tr, "td", &[]);
            if !value.is_empty() {
                doc.append_text(td, value);
            }
        }
    }
    (doc, table)
}

/// Cell at 0-based row and column of `table`.
pub fn cell(doc: &Document, table: NodeId, row: usize, column: usize) -> NodeId {
    let tr = doc.rows(table)[row];
    doc.cells(tr)[column]
}

/// Radio group `name` with one radio per value.
pub fn radio_group_doc(name: &str, values: &[&str]) -> Document {
    let (mut doc, body) = empty_body();
    for value in values {
        doc.append_element(body, "input", &[("type", "radio"), ("name", name), ("value", value)]);
    }
    doc
}

pub fn layout(offset_left: i64, offset_top: i64, client_width: i64, client_height: i64) -> Layout {
    Layout {
        offset_left,
        offset_top,
        client_width,
        client_height,
        ..Layout::default()
    }
}
