use scraper::{Html, Node as HtmlNode};

use crate::dom::dom_model::Document;

/// Parse HTML markup into a [`Document`].
///
/// Markup carries no layout, so geometry is zero everywhere; offset parents
/// still follow the browser rule so the offset chain is well formed.
pub fn parse_html(markup: &str) -> Document {
    let html = Html::parse_document(markup);
    let mut doc = Document::new();

    let root = doc.root();
    let mut stack: Vec<_> = html.tree.root().children().map(|child| (child, root)).collect();
    stack.reverse();

    while let Some((node, parent)) = stack.pop() {
        let created = match node.value() {
            HtmlNode::Element(el) => {
                let attrs: Vec<(&str, &str)> = el.attrs().collect();
                Some(doc.append_element(parent, el.name(), &attrs))
            }
            HtmlNode::Text(text) => {
                let text: &str = text;
                doc.append_text(parent, text);
                None
            }
            // Doctype, comments and processing instructions are not part of the tree
            _ => None,
        };

        if let Some(created) = created {
            let mut children: Vec<_> = node.children().map(|c| (c, created)).collect();
            children.reverse();
            stack.extend(children);
        }
    }

    doc.resolve_offset_parents();
    doc
}
