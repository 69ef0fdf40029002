//! In-memory editable surfaces.
//!
//! These back the command-line driver and the test suite. `MemoryRichText`
//! can also play a restricted host: one whose input framework ignores direct
//! text mutation and only reacts to keystrokes and pastes.

use crate::app::domain::surface::{HostEvent, NodeId};
use crate::app::services::text_ops::{char_len, slice_chars};

use super::host::{HostSelection, PlainInputHost, RichTextHost, TextTree};

/// A native text control holding a linear buffer.
#[derive(Debug, Default)]
pub struct MemoryInput {
    value: String,
    selection: (usize, usize),
    events: Vec<HostEvent>,
}

impl MemoryInput {
    pub fn new(value: &str) -> Self {
        let end = char_len(value);
        Self {
            value: value.to_string(),
            selection: (end, end),
            events: Vec::new(),
        }
    }

    /// Select `start..end` the way a user drag would.
    pub fn select(&mut self, start: usize, end: usize) {
        let len = char_len(&self.value);
        let start = start.min(len);
        self.selection = (start, end.clamp(start, len));
    }

    pub fn events(&self) -> &[HostEvent] {
        &self.events
    }
}

impl PlainInputHost for MemoryInput {
    fn value(&self) -> String {
        self.value.clone()
    }

    fn set_value(&mut self, value: &str) {
        self.value = value.to_string();
        let end = char_len(value);
        self.selection = (end, end);
    }

    fn selection_range(&self) -> (usize, usize) {
        self.selection
    }

    fn dispatch(&mut self, event: HostEvent) {
        self.events.push(event);
    }
}

#[derive(Debug)]
enum NodeData {
    Element { tag: String, hidden: bool },
    Text(String),
}

#[derive(Debug)]
struct Node {
    data: NodeData,
    children: Vec<NodeId>,
}

/// A contenteditable tree with elements and text nodes.
///
/// Rendered text follows `innerText`: an element renders the text of its
/// visible descendants. A hidden element skipped by its ancestors still
/// reports its own text when asked directly.
#[derive(Debug)]
pub struct MemoryRichText {
    nodes: Vec<Node>,
    selection: HostSelection,
    caret_at_end_of: Option<NodeId>,
    focused: bool,
    rejects_direct_mutation: bool,
    dispatched: Vec<(NodeId, HostEvent)>,
}

impl MemoryRichText {
    pub fn new(root_tag: &str) -> Self {
        Self {
            nodes: vec![Node {
                data: NodeData::Element {
                    tag: root_tag.to_string(),
                    hidden: false,
                },
                children: Vec::new(),
            }],
            selection: HostSelection::default(),
            caret_at_end_of: None,
            focused: false,
            rejects_direct_mutation: false,
            dispatched: Vec::new(),
        }
    }

    /// A root holding a single text node.
    pub fn with_text(root_tag: &str, text: &str) -> Self {
        let mut host = Self::new(root_tag);
        let root = host.root();
        host.append_text(root, text);
        host
    }

    /// Behave like a host whose own framework drops direct mutation.
    pub fn restricted(mut self) -> Self {
        self.rejects_direct_mutation = true;
        self
    }

    fn push(&mut self, parent: NodeId, data: NodeData) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            data,
            children: Vec::new(),
        });
        self.nodes[parent.0].children.push(id);
        id
    }

    pub fn append_element(&mut self, parent: NodeId, tag: &str) -> NodeId {
        self.push(
            parent,
            NodeData::Element {
                tag: tag.to_string(),
                hidden: false,
            },
        )
    }

    pub fn append_hidden_element(&mut self, parent: NodeId, tag: &str) -> NodeId {
        self.push(
            parent,
            NodeData::Element {
                tag: tag.to_string(),
                hidden: true,
            },
        )
    }

    pub fn append_text(&mut self, parent: NodeId, text: &str) -> NodeId {
        self.push(parent, NodeData::Text(text.to_string()))
    }

    pub fn tag(&self, node: NodeId) -> Option<&str> {
        match &self.nodes.get(node.0)?.data {
            NodeData::Element { tag, .. } => Some(tag),
            NodeData::Text(_) => None,
        }
    }

    /// Select `start..end` inside the text node `text_node`.
    pub fn select_in_text(&mut self, text_node: NodeId, start: usize, end: usize) {
        let text = match &self.nodes[text_node.0].data {
            NodeData::Text(t) => slice_chars(t, start, end).to_string(),
            NodeData::Element { .. } => String::new(),
        };
        self.selection = HostSelection {
            ranges: vec![(start, end)],
            text,
        };
    }

    /// Replace the page selection wholesale.
    pub fn set_selection(&mut self, selection: HostSelection) {
        self.selection = selection;
    }

    pub fn caret_at_end_of(&self) -> Option<NodeId> {
        self.caret_at_end_of
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn dispatched(&self) -> &[(NodeId, HostEvent)] {
        &self.dispatched
    }

    /// Rendered text of the whole editable root.
    pub fn text(&self) -> String {
        self.rendered_text(self.root())
    }

    fn collect_text(&self, node: NodeId, out: &mut String) {
        let entry = &self.nodes[node.0];
        match &entry.data {
            NodeData::Text(t) => out.push_str(t),
            NodeData::Element { .. } => {
                for &child in &entry.children {
                    if !self.is_hidden(child) {
                        self.collect_text(child, out);
                    }
                }
            }
        }
    }

    fn is_hidden(&self, node: NodeId) -> bool {
        matches!(self.nodes[node.0].data, NodeData::Element { hidden: true, .. })
    }

    /// Last visible text node under `node` that still has characters.
    fn last_text_node(&self, node: NodeId) -> Option<NodeId> {
        let entry = &self.nodes[node.0];
        match &entry.data {
            NodeData::Text(t) if !t.is_empty() => Some(node),
            NodeData::Text(_) => None,
            NodeData::Element { .. } => entry
                .children
                .iter()
                .rev()
                .filter(|&&c| !self.is_hidden(c))
                .find_map(|&c| self.last_text_node(c)),
        }
    }

    /// Keystroke handling of a restricted host's own input framework.
    fn handle_native_input(&mut self, target: NodeId, event: &HostEvent) {
        match event {
            HostEvent::KeyDown(key) if key == "Backspace" => {
                if let Some(node) = self.last_text_node(target) {
                    if let NodeData::Text(t) = &mut self.nodes[node.0].data {
                        t.pop();
                    }
                }
            }
            HostEvent::Paste(text) => {
                match self.last_text_node(target) {
                    Some(node) => {
                        if let NodeData::Text(t) = &mut self.nodes[node.0].data {
                            t.push_str(text);
                        }
                    }
                    None => {
                        self.append_text(target, text);
                    }
                }
            }
            _ => {}
        }
    }
}

impl TextTree for MemoryRichText {
    fn element_children(&self, node: NodeId) -> Vec<NodeId> {
        self.nodes
            .get(node.0)
            .map(|n| {
                n.children
                    .iter()
                    .copied()
                    .filter(|c| matches!(self.nodes[c.0].data, NodeData::Element { .. }))
                    .collect()
            })
            .unwrap_or_default()
    }

    fn rendered_text(&self, node: NodeId) -> String {
        let mut out = String::new();
        if node.0 < self.nodes.len() {
            self.collect_text(node, &mut out);
        }
        out
    }
}

impl RichTextHost for MemoryRichText {
    fn root(&self) -> NodeId {
        NodeId(0)
    }

    fn set_rendered_text(&mut self, node: NodeId, text: &str) {
        if self.rejects_direct_mutation {
            return;
        }
        if let NodeData::Text(t) = &mut self.nodes[node.0].data {
            *t = text.to_string();
            return;
        }
        // Detached children stay in the arena but are unreachable
        self.nodes[node.0].children.clear();
        self.append_text(node, text);
    }

    fn selection(&self) -> HostSelection {
        self.selection.clone()
    }

    fn collapse_selection_to_end(&mut self, node: NodeId) {
        let end = char_len(&self.rendered_text(node));
        self.selection = HostSelection {
            ranges: vec![(end, end)],
            text: String::new(),
        };
        self.caret_at_end_of = Some(node);
    }

    fn focus(&mut self) {
        self.focused = true;
    }

    fn dispatch(&mut self, target: NodeId, event: HostEvent) {
        if self.rejects_direct_mutation {
            self.handle_native_input(target, &event);
        }
        self.dispatched.push((target, event));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_select_clamps() {
        let mut input = MemoryInput::new("cat");
        assert_eq!(input.selection_range(), (3, 3));
        input.select(1, 10);
        assert_eq!(input.selection_range(), (1, 3));
        input.select(2, 1);
        assert_eq!(input.selection_range(), (2, 2));
    }

    #[test]
    fn test_nested_rendered_text() {
        let mut doc = MemoryRichText::new("DIV");
        let root = doc.root();
        let p = doc.append_element(root, "P");
        doc.append_text(p, "Hello ");
        let b = doc.append_element(p, "B");
        doc.append_text(b, "world");

        assert_eq!(doc.text(), "Hello world");
        assert_eq!(doc.rendered_text(b), "world");
        assert_eq!(doc.element_children(root), vec![p]);
        assert_eq!(doc.element_children(p), vec![b]);
        assert_eq!(doc.tag(b), Some("B"));
    }

    #[test]
    fn test_hidden_element_skipped_by_ancestors() {
        let mut doc = MemoryRichText::new("DIV");
        let root = doc.root();
        let hidden = doc.append_hidden_element(root, "SPAN");
        doc.append_text(hidden, "draft");

        assert_eq!(doc.text(), "");
        assert_eq!(doc.rendered_text(hidden), "draft");
    }

    #[test]
    fn test_set_rendered_text_replaces_children() {
        let mut doc = MemoryRichText::new("DIV");
        let root = doc.root();
        let p = doc.append_element(root, "P");
        doc.append_text(p, "old");

        doc.set_rendered_text(root, "new text");
        assert_eq!(doc.text(), "new text");
        assert!(doc.element_children(root).is_empty());
    }

    #[test]
    fn test_restricted_host_ignores_mutation_but_takes_keys() {
        let mut doc = MemoryRichText::with_text("DIV", "abc").restricted();
        let root = doc.root();

        doc.set_rendered_text(root, "zzz");
        assert_eq!(doc.text(), "abc");

        doc.dispatch(root, HostEvent::backspace_down());
        doc.dispatch(root, HostEvent::Input);
        doc.dispatch(root, HostEvent::backspace_up());
        assert_eq!(doc.text(), "ab");

        doc.dispatch(root, HostEvent::Paste("!".to_string()));
        assert_eq!(doc.text(), "ab!");
        assert_eq!(doc.dispatched().len(), 4);
    }

    #[test]
    fn test_select_in_text() {
        let mut doc = MemoryRichText::new("DIV");
        let root = doc.root();
        let t = doc.append_text(root, "I has a cat");
        doc.select_in_text(t, 2, 5);

        let sel = doc.selection();
        assert_eq!(sel.range_count(), 1);
        assert_eq!(sel.ranges[0], (2, 5));
        assert_eq!(sel.text, "has");
    }
}
