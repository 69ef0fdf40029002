use crate::app::domain::selection::SelectionDescriptor;
use crate::app::domain::surface::FocusTarget;
use crate::app::infrastructure::host::EditableSurface;
use crate::app::services::selection::{capture_selection, SelectionTrigger};

/// The surface corrections are written back into, and the page it lives on.
#[derive(Debug, Clone)]
pub struct TrackedSurface {
    pub surface: EditableSurface,
    /// Hostname of the page, used to pick a write-back strategy.
    pub origin: String,
}

/// Single-slot record of the most recently focused editable surface.
///
/// The only mutation is replacement on a qualifying focus-in: the last
/// focused surface wins. Write-back reads the slot, so it still reaches the
/// original field after the suggestion popup has taken focus.
#[derive(Debug, Default)]
pub struct CorrectionSession {
    target: Option<TrackedSurface>,
    last_selection: Option<SelectionDescriptor>,
}

impl CorrectionSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start tracking `surface` if `element` qualifies as an editable surface.
    ///
    /// Returns whether the slot was replaced.
    pub fn on_focus_in(&mut self, element: &FocusTarget, surface: EditableSurface, origin: &str) -> bool {
        if !element.is_editable_surface() {
            return false;
        }
        let refocused = self
            .target
            .as_ref()
            .is_some_and(|t| t.surface.same_surface(&surface));
        if !refocused {
            self.last_selection = None;
        }
        tracing::debug!(kind = ?surface.kind(), %origin, "tracking focused surface");
        self.target = Some(TrackedSurface {
            surface,
            origin: origin.to_string(),
        });
        true
    }

    pub fn target(&self) -> Option<&TrackedSurface> {
        self.target.as_ref()
    }

    /// Capture the tracked surface's live selection and remember it.
    pub fn capture(&mut self, trigger: SelectionTrigger) -> Option<SelectionDescriptor> {
        let target = self.target.as_ref()?;
        let selection = capture_selection(&target.surface, trigger)?;
        self.last_selection = Some(selection.clone());
        Some(selection)
    }

    /// The most recent non-empty selection on the tracked surface.
    pub fn last_selection(&self) -> Option<&SelectionDescriptor> {
        self.last_selection.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::domain::surface::EditableSurfaceKind;
    use crate::app::infrastructure::memory::{MemoryInput, MemoryRichText};
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_ignores_non_editable_focus() {
        let mut session = CorrectionSession::new();
        let button = FocusTarget {
            tag_name: "BUTTON".to_string(),
            ..Default::default()
        };
        assert!(!session.on_focus_in(&button, EditableSurface::plain(MemoryInput::new("x")), "a.com"));
        assert!(session.target().is_none());
    }

    #[test]
    fn test_last_focus_wins() {
        let mut session = CorrectionSession::new();
        session.on_focus_in(&FocusTarget::textarea(), EditableSurface::plain(MemoryInput::new("one")), "a.com");
        session.on_focus_in(
            &FocusTarget::content_editable("DIV"),
            EditableSurface::rich(MemoryRichText::with_text("DIV", "two")),
            "b.com",
        );

        let target = session.target().unwrap();
        assert_eq!(target.surface.kind(), EditableSurfaceKind::RichText);
        assert_eq!(target.origin, "b.com");
    }

    #[test]
    fn test_non_qualifying_focus_keeps_previous_target() {
        let mut session = CorrectionSession::new();
        session.on_focus_in(&FocusTarget::text_input(), EditableSurface::plain(MemoryInput::new("keep")), "a.com");

        // The suggestion popup stealing focus must not clear the slot
        let popup_item = FocusTarget {
            tag_name: "DIV".to_string(),
            ..Default::default()
        };
        session.on_focus_in(&popup_item, EditableSurface::plain(MemoryInput::new("")), "a.com");

        assert_eq!(session.target().unwrap().surface.kind(), EditableSurfaceKind::PlainInput);
        assert_eq!(session.target().unwrap().origin, "a.com");
    }

    #[test]
    fn test_capture_updates_last_selection() {
        let input = Rc::new(RefCell::new(MemoryInput::new("I has a cat")));
        let mut session = CorrectionSession::new();
        session.on_focus_in(&FocusTarget::text_input(), EditableSurface::PlainInput(input.clone()), "a.com");

        assert!(session.capture(SelectionTrigger::PointerUp).is_none());
        assert!(session.last_selection().is_none());

        input.borrow_mut().select(2, 5);
        let sel = session.capture(SelectionTrigger::PointerUp).unwrap();
        assert_eq!(sel.text, "has");
        assert_eq!(session.last_selection(), Some(&sel));

        // A collapsed selection does not erase the slot
        input.borrow_mut().select(3, 3);
        assert!(session.capture(SelectionTrigger::KeyUp).is_none());
        assert_eq!(session.last_selection().unwrap().text, "has");
    }

    #[test]
    fn test_new_surface_clears_last_selection() {
        let input = Rc::new(RefCell::new(MemoryInput::new("I has a cat")));
        let mut session = CorrectionSession::new();
        let surface = EditableSurface::PlainInput(input.clone());
        session.on_focus_in(&FocusTarget::text_input(), surface.clone(), "a.com");
        input.borrow_mut().select(2, 5);
        session.capture(SelectionTrigger::PointerUp);

        // Refocusing the same field keeps it
        session.on_focus_in(&FocusTarget::text_input(), surface, "a.com");
        assert!(session.last_selection().is_some());

        session.on_focus_in(&FocusTarget::textarea(), EditableSurface::plain(MemoryInput::new("")), "a.com");
        assert!(session.last_selection().is_none());
    }

    #[test]
    fn test_capture_without_target() {
        let mut session = CorrectionSession::new();
        assert!(session.capture(SelectionTrigger::KeyUp).is_none());
    }
}
