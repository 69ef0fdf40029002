//! Seams between the correction core and the page it runs in.
//!
//! The core never owns the page. It drives editable surfaces through these
//! traits, which a browser binding (or the in-memory hosts in
//! [`super::memory`]) implements.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::app::domain::surface::{EditableSurfaceKind, HostEvent, NodeId};
use crate::app::services::text_ops::has_visible_text;

/// A native text control: `<input type=text>` or `<textarea>`.
pub trait PlainInputHost {
    fn value(&self) -> String;

    /// Assign the native value. Host listeners are not notified by this alone.
    fn set_value(&mut self, value: &str);

    /// Native `(selectionStart, selectionEnd)` in characters.
    fn selection_range(&self) -> (usize, usize);

    fn dispatch(&mut self, event: HostEvent);
}

/// Tree shape needed to find the node that actually carries text.
pub trait TextTree {
    /// Element children of `node`, in document order. Text nodes are skipped.
    fn element_children(&self, node: NodeId) -> Vec<NodeId>;

    /// Rendered text of `node` (what `innerText` reports), not markup.
    fn rendered_text(&self, node: NodeId) -> String;

    fn has_rendered_text(&self, node: NodeId) -> bool {
        has_visible_text(&self.rendered_text(node))
    }
}

/// The page's live text selection as reported by the host.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostSelection {
    /// `(startOffset, endOffset)` of each range, relative to the range's
    /// own container node.
    pub ranges: Vec<(usize, usize)>,
    /// The selection's string form.
    pub text: String,
}

impl HostSelection {
    pub fn range_count(&self) -> usize {
        self.ranges.len()
    }
}

/// A contenteditable subtree.
pub trait RichTextHost: TextTree {
    fn root(&self) -> NodeId;

    /// Overwrite the rendered text of `node`. Restricted hosts may drop this.
    fn set_rendered_text(&mut self, node: NodeId, text: &str);

    fn selection(&self) -> HostSelection;

    /// Collapse the page selection to the end of `node`'s contents.
    fn collapse_selection_to_end(&mut self, node: NodeId);

    fn focus(&mut self);

    fn dispatch(&mut self, target: NodeId, event: HostEvent);
}

pub type SharedPlainInput = Rc<RefCell<dyn PlainInputHost>>;
pub type SharedRichText = Rc<RefCell<dyn RichTextHost>>;

/// Shared handle to an editable surface owned by the page.
#[derive(Clone)]
pub enum EditableSurface {
    PlainInput(SharedPlainInput),
    RichText(SharedRichText),
}

impl EditableSurface {
    pub fn plain(host: impl PlainInputHost + 'static) -> Self {
        EditableSurface::PlainInput(Rc::new(RefCell::new(host)))
    }

    pub fn rich(host: impl RichTextHost + 'static) -> Self {
        EditableSurface::RichText(Rc::new(RefCell::new(host)))
    }

    pub fn kind(&self) -> EditableSurfaceKind {
        match self {
            EditableSurface::PlainInput(_) => EditableSurfaceKind::PlainInput,
            EditableSurface::RichText(_) => EditableSurfaceKind::RichText,
        }
    }

    /// True when both handles point at the same page element.
    pub fn same_surface(&self, other: &EditableSurface) -> bool {
        match (self, other) {
            (EditableSurface::PlainInput(a), EditableSurface::PlainInput(b)) => Rc::ptr_eq(a, b),
            (EditableSurface::RichText(a), EditableSurface::RichText(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Debug for EditableSurface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("EditableSurface").field(&self.kind()).finish()
    }
}
