//! Call contract between the correction flow and whatever draws the
//! correction button and suggestion popup.

use crate::app::domain::selection::SelectionDescriptor;
use crate::app::domain::suggestions::{ActionMenu, RequestKind};
use crate::app::domain::surface::PointerPosition;

pub trait PresentationChrome {
    /// A qualifying surface gained focus; attach the whole-field correct button.
    fn show_correct_button(&mut self);

    /// Whether the suggestion popup (and its anchor) is currently on the page.
    fn popup_exists(&self) -> bool;

    fn show_popup(&mut self, selection: &SelectionDescriptor, menu: &ActionMenu, at: PointerPosition);

    /// Replace the popup's option list.
    fn render_suggestions(&mut self, kind: RequestKind, candidates: &[String]);

    /// Replace the popup's option list with a message.
    fn render_message(&mut self, kind: RequestKind, message: &str);

    /// Remove the popup, keeping the anchor.
    fn close_popup(&mut self);

    /// Remove the anchor element and everything hanging off it.
    fn remove_anchor(&mut self);
}

/// What a [`RecordingChrome`] was last asked to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rendered {
    Options(RequestKind, Vec<String>),
    Message(RequestKind, String),
}

/// Headless chrome that remembers what it was asked to show.
#[derive(Debug, Default)]
pub struct RecordingChrome {
    pub button_shown: usize,
    pub anchor: Option<PointerPosition>,
    pub popup_open: bool,
    pub popup_selection: Option<SelectionDescriptor>,
    pub menu: Option<ActionMenu>,
    pub rendered: Option<Rendered>,
    pub anchors_removed: usize,
}

impl RecordingChrome {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PresentationChrome for RecordingChrome {
    fn show_correct_button(&mut self) {
        self.button_shown += 1;
    }

    fn popup_exists(&self) -> bool {
        self.anchor.is_some()
    }

    fn show_popup(&mut self, selection: &SelectionDescriptor, menu: &ActionMenu, at: PointerPosition) {
        self.anchor = Some(at);
        self.popup_open = true;
        self.popup_selection = Some(selection.clone());
        self.menu = Some(*menu);
        self.rendered = None;
    }

    fn render_suggestions(&mut self, kind: RequestKind, candidates: &[String]) {
        if self.popup_open {
            self.rendered = Some(Rendered::Options(kind, candidates.to_vec()));
        }
    }

    fn render_message(&mut self, kind: RequestKind, message: &str) {
        if self.popup_open {
            self.rendered = Some(Rendered::Message(kind, message.to_string()));
        }
    }

    fn close_popup(&mut self) {
        self.popup_open = false;
    }

    fn remove_anchor(&mut self) {
        if self.anchor.take().is_some() {
            self.anchors_removed += 1;
        }
        self.popup_open = false;
    }
}
