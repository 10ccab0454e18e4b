use serde::{Deserialize, Serialize};

/// Index of a node inside a [`Document`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub usize);

/// Layout metrics captured from the live page. Offsets and client sizes are
/// integers (as the DOM reports them); the bounding rect origin is fractional.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Layout {
    #[serde(default)]
    pub offset_left: i64,
    #[serde(default)]
    pub offset_top: i64,
    #[serde(default)]
    pub client_width: i64,
    #[serde(default)]
    pub client_height: i64,
    #[serde(default)]
    pub rect_left: f64,
    #[serde(default)]
    pub rect_top: f64,
    /// Whether this element establishes an offset parent for its descendants.
    #[serde(default)]
    pub positioned: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ElementData {
    /// Lower-case tag name.
    pub tag: String,
    /// Attributes in source order, names lower-cased.
    pub attributes: Vec<(String, String)>,
    pub layout: Layout,
    pub offset_parent: Option<NodeId>,

    // Live state that diverges from markup once the user interacts.
    pub live_value: Option<String>,
    pub checked: Option<bool>,
    pub selected_index: Option<usize>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum NodeData {
    Document,
    Element(ElementData),
    Text(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    pub data: NodeData,
}

/// DOM-style properties, as opposed to raw attribute reads.
///
/// Properties apply the browser's reflection rules: `type` defaults to
/// `"text"` on inputs, `value` of a select is its selected option, and so on.
/// `None` means the property does not exist on that element (JS `undefined`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Property {
    Id,
    Name,
    ClassName,
    Value,
    Type,
    Title,
    TextContent,
}

const NAME_TAGS: &[&str] = &[
    "a", "button", "embed", "fieldset", "form", "frame", "iframe", "img", "input", "map", "meta",
    "object", "output", "param", "select", "slot", "textarea",
];

const VALUE_TAGS: &[&str] = &["button", "data", "input", "option", "output", "param", "select", "textarea"];

const INPUT_TYPES: &[&str] = &[
    "button", "checkbox", "color", "date", "datetime-local", "email", "file", "hidden", "image",
    "month", "number", "password", "radio", "range", "reset", "search", "submit", "tel", "text",
    "time", "url", "week",
];

/// An arena-backed element tree. Node 0 is always the document root.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    nodes: Vec<Node>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        Document {
            nodes: vec![Node {
                parent: None,
                children: Vec::new(),
                data: NodeData::Document,
            }],
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    // =====================================================================
    // Construction
    // =====================================================================

    pub fn append_element(&mut self, parent: NodeId, tag: &str, attributes: &[(&str, &str)]) -> NodeId {
        let data = ElementData {
            tag: tag.to_ascii_lowercase(),
            attributes: attributes
                .iter()
                .map(|(k, v)| (k.to_ascii_lowercase(), v.to_string()))
                .collect(),
            layout: Layout::default(),
            offset_parent: None,
            live_value: None,
            checked: None,
            selected_index: None,
        };
        self.push(parent, NodeData::Element(data))
    }

    pub fn append_text(&mut self, parent: NodeId, text: &str) -> NodeId {
        self.push(parent, NodeData::Text(text.to_string()))
    }

    fn push(&mut self, parent: NodeId, data: NodeData) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            parent: Some(parent),
            children: Vec::new(),
            data,
        });
        self.nodes[parent.0].children.push(id);
        id
    }

    pub fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) {
        if let Some(el) = self.element_mut(node) {
            let name = name.to_ascii_lowercase();
            match el.attributes.iter_mut().find(|(k, _)| *k == name) {
                Some(entry) => entry.1 = value.to_string(),
                None => el.attributes.push((name, value.to_string())),
            }
        }
    }

    pub fn set_value(&mut self, node: NodeId, value: &str) {
        if let Some(el) = self.element_mut(node) {
            el.live_value = Some(value.to_string());
        }
    }

    pub fn set_checked(&mut self, node: NodeId, checked: bool) {
        if let Some(el) = self.element_mut(node) {
            el.checked = Some(checked);
        }
    }

    pub fn set_selected_index(&mut self, node: NodeId, index: usize) {
        if let Some(el) = self.element_mut(node) {
            el.selected_index = Some(index);
        }
    }

    pub fn set_layout(&mut self, node: NodeId, layout: Layout) {
        if let Some(el) = self.element_mut(node) {
            el.layout = layout;
        }
    }

    pub fn set_offset_parent(&mut self, node: NodeId, offset_parent: Option<NodeId>) {
        if let Some(el) = self.element_mut(node) {
            el.offset_parent = offset_parent;
        }
    }

    /// Assign offset parents the way a browser does: nearest positioned
    /// ancestor, otherwise `body`. `body` itself and elements outside it get none.
    pub fn resolve_offset_parents(&mut self) {
        let body = self.elements_by_tag("body").first().copied();
        for node in self.elements() {
            if Some(node) == body {
                continue;
            }
            let mut offset_parent = None;
            let mut cursor = self.parent_element(node);
            while let Some(ancestor) = cursor {
                let positioned = self.element(ancestor).map(|e| e.layout.positioned).unwrap_or(false);
                if positioned || Some(ancestor) == body {
                    offset_parent = Some(ancestor);
                    break;
                }
                cursor = self.parent_element(ancestor);
            }
            self.set_offset_parent(node, offset_parent);
        }
    }

    // =====================================================================
    // Node access
    // =====================================================================

    pub fn node(&self, node: NodeId) -> Option<&Node> {
        self.nodes.get(node.0)
    }

    pub fn element(&self, node: NodeId) -> Option<&ElementData> {
        match self.nodes.get(node.0).map(|n| &n.data) {
            Some(NodeData::Element(el)) => Some(el),
            _ => None,
        }
    }

    fn element_mut(&mut self, node: NodeId) -> Option<&mut ElementData> {
        match self.nodes.get_mut(node.0).map(|n| &mut n.data) {
            Some(NodeData::Element(el)) => Some(el),
            _ => None,
        }
    }

    pub fn is_element(&self, node: NodeId) -> bool {
        self.element(node).is_some()
    }

    /// Lower-case tag name; empty for text and document nodes.
    pub fn tag(&self, node: NodeId) -> &str {
        self.element(node).map(|e| e.tag.as_str()).unwrap_or("")
    }

    /// Raw attribute read (`getAttribute`). Empty values are returned as-is.
    pub fn attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        let el = self.element(node)?;
        el.attributes
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn has_attribute(&self, node: NodeId, name: &str) -> bool {
        self.attribute(node, name).is_some()
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.get(node.0).and_then(|n| n.parent)
    }

    pub fn parent_element(&self, node: NodeId) -> Option<NodeId> {
        self.parent(node).filter(|p| self.is_element(*p))
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        self.nodes.get(node.0).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    pub fn element_children(&self, node: NodeId) -> Vec<NodeId> {
        self.children(node)
            .iter()
            .copied()
            .filter(|c| self.is_element(*c))
            .collect()
    }

    /// Descendant elements of `node` in document order, excluding `node`.
    pub fn descendants(&self, node: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(node).iter().rev().copied().collect();
        while let Some(current) = stack.pop() {
            if self.is_element(current) {
                out.push(current);
            }
            stack.extend(self.children(current).iter().rev().copied());
        }
        out
    }

    /// All elements in document order.
    pub fn elements(&self) -> Vec<NodeId> {
        self.descendants(self.root())
    }

    /// `getElementsByTagName`; `"*"` selects everything.
    pub fn elements_by_tag(&self, tag: &str) -> Vec<NodeId> {
        self.elements()
            .into_iter()
            .filter(|n| tag == "*" || self.tag(*n).eq_ignore_ascii_case(tag))
            .collect()
    }

    /// `getElementsByName`.
    pub fn elements_by_name(&self, name: &str) -> Vec<NodeId> {
        self.elements()
            .into_iter()
            .filter(|n| self.attribute(*n, "name") == Some(name))
            .collect()
    }

    /// `getElementById`: the first element in document order carrying the id.
    pub fn element_by_id(&self, id: &str) -> Option<NodeId> {
        if id.is_empty() {
            return None;
        }
        self.elements()
            .into_iter()
            .find(|n| self.attribute(*n, "id") == Some(id))
    }

    /// Whether `ancestor` strictly contains `node`.
    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut cursor = self.parent(node);
        let mut steps = 0;
        while let Some(current) = cursor {
            if current == ancestor {
                return true;
            }
            steps += 1;
            if steps > self.nodes.len() {
                break;
            }
            cursor = self.parent(current);
        }
        false
    }

    /// Nearest ancestor (or self) with the given tag.
    pub fn closest(&self, node: NodeId, tag: &str) -> Option<NodeId> {
        let mut cursor = Some(node);
        let mut steps = 0;
        while let Some(current) = cursor {
            if self.tag(current).eq_ignore_ascii_case(tag) {
                return Some(current);
            }
            steps += 1;
            if steps > self.nodes.len() {
                break;
            }
            cursor = self.parent_element(current);
        }
        None
    }

    // =====================================================================
    // Text
    // =====================================================================

    pub fn text_content(&self, node: NodeId) -> String {
        if let Some(Node { data: NodeData::Text(text), .. }) = self.node(node) {
            return text.clone();
        }
        let mut out = String::new();
        let mut stack: Vec<NodeId> = self.children(node).iter().rev().copied().collect();
        while let Some(current) = stack.pop() {
            match self.node(current).map(|n| &n.data) {
                Some(NodeData::Text(text)) => out.push_str(text),
                Some(_) => stack.extend(self.children(current).iter().rev().copied()),
                None => {}
            }
        }
        out
    }

    /// True when the element's inner markup contains nested tags.
    pub fn has_nested_markup(&self, node: NodeId) -> bool {
        self.children(node).iter().any(|c| self.is_element(*c))
    }

    // =====================================================================
    // Properties
    // =====================================================================

    pub fn property(&self, node: NodeId, property: Property) -> Option<String> {
        let el = self.element(node)?;
        let attr = |name: &str| self.attribute(node, name).unwrap_or("").to_string();

        match property {
            Property::Id => Some(attr("id")),
            Property::ClassName => Some(attr("class")),
            Property::Title => Some(attr("title")),
            Property::TextContent => Some(self.text_content(node)),
            Property::Name => NAME_TAGS.contains(&el.tag.as_str()).then(|| attr("name")),
            Property::Type => self.type_property(node, el),
            Property::Value => self.value_property(node, el),
        }
    }

    fn type_property(&self, node: NodeId, el: &ElementData) -> Option<String> {
        let declared = self
            .attribute(node, "type")
            .map(|t| t.trim().to_ascii_lowercase())
            .unwrap_or_default();

        match el.tag.as_str() {
            "input" => {
                if INPUT_TYPES.contains(&declared.as_str()) {
                    Some(declared)
                } else {
                    Some("text".to_string())
                }
            }
            "button" => match declared.as_str() {
                "reset" | "button" => Some(declared),
                _ => Some("submit".to_string()),
            },
            "select" => {
                if self.has_attribute(node, "multiple") {
                    Some("select-multiple".to_string())
                } else {
                    Some("select-one".to_string())
                }
            }
            "textarea" => Some("textarea".to_string()),
            _ => None,
        }
    }

    fn value_property(&self, node: NodeId, el: &ElementData) -> Option<String> {
        if !VALUE_TAGS.contains(&el.tag.as_str()) {
            return None;
        }
        if let Some(live) = &el.live_value {
            return Some(live.clone());
        }

        match el.tag.as_str() {
            "textarea" => Some(self.text_content(node)),
            "option" => Some(self.option_value(node)),
            "select" => Some(
                self.selected_index(node)
                    .and_then(|i| self.options(node).get(i).copied())
                    .map(|opt| self.option_value(opt))
                    .unwrap_or_default(),
            ),
            "input" => {
                let checkable = matches!(
                    self.type_property(node, el).as_deref(),
                    Some("checkbox") | Some("radio")
                );
                match self.attribute(node, "value") {
                    Some(v) => Some(v.to_string()),
                    None if checkable => Some("on".to_string()),
                    None => Some(String::new()),
                }
            }
            _ => Some(self.attribute(node, "value").unwrap_or("").to_string()),
        }
    }

    fn option_value(&self, option: NodeId) -> String {
        match self.attribute(option, "value") {
            Some(v) => v.to_string(),
            None => self
                .text_content(option)
                .split_whitespace()
                .collect::<Vec<_>>()
                .join(" "),
        }
    }

    pub fn is_checked(&self, node: NodeId) -> bool {
        match self.element(node) {
            Some(el) => el.checked.unwrap_or_else(|| self.has_attribute(node, "checked")),
            None => false,
        }
    }

    // =====================================================================
    // Composite widgets
    // =====================================================================

    /// `select.options`.
    pub fn options(&self, select: NodeId) -> Vec<NodeId> {
        self.descendants(select)
            .into_iter()
            .filter(|n| self.tag(*n) == "option")
            .collect()
    }

    /// `select.selectedIndex`; `None` when the select has no options.
    pub fn selected_index(&self, select: NodeId) -> Option<usize> {
        let options = self.options(select);
        if options.is_empty() {
            return None;
        }
        if let Some(index) = self.element(select).and_then(|e| e.selected_index) {
            return (index < options.len()).then_some(index);
        }
        options
            .iter()
            .position(|o| self.has_attribute(*o, "selected"))
            .or(Some(0))
    }

    /// `table.rows`: rows whose nearest enclosing table is `table`.
    pub fn rows(&self, table: NodeId) -> Vec<NodeId> {
        self.descendants(table)
            .into_iter()
            .filter(|n| self.tag(*n) == "tr")
            .filter(|n| self.parent_element(*n).and_then(|p| self.closest(p, "table")) == Some(table))
            .collect()
    }

    /// `row.cells`.
    pub fn cells(&self, row: NodeId) -> Vec<NodeId> {
        self.element_children(row)
            .into_iter()
            .filter(|c| matches!(self.tag(*c), "td" | "th"))
            .collect()
    }

    // =====================================================================
    // Geometry
    // =====================================================================

    /// Sum of offsets along the offset-parent chain. Scroll and transforms
    /// are not accounted for.
    pub fn absolute_position(&self, node: NodeId) -> (i64, i64) {
        let (mut x, mut y) = (0, 0);
        let mut cursor = Some(node);
        let mut steps = 0;
        while let Some(current) = cursor {
            let Some(el) = self.element(current) else { break };
            x += el.layout.offset_left;
            y += el.layout.offset_top;
            steps += 1;
            if steps > self.nodes.len() {
                break;
            }
            cursor = el.offset_parent;
        }
        (x, y)
    }

    /// Centre of the bounding box, truncated.
    pub fn bounding_center(&self, node: NodeId) -> (i64, i64) {
        match self.element(node) {
            Some(el) => {
                let l = &el.layout;
                let x = l.rect_left + l.client_width as f64 / 2.0;
                let y = l.rect_top + l.client_height as f64 / 2.0;
                (x.trunc() as i64, y.trunc() as i64)
            }
            None => (0, 0),
        }
    }

    pub fn layout(&self, node: NodeId) -> Layout {
        self.element(node).map(|e| e.layout).unwrap_or_default()
    }
}
