use crate::app::domain::selection::SelectionDescriptor;
use crate::app::infrastructure::host::EditableSurface;
use crate::app::services::text_ops::slice_chars;

/// The release event that prompted a selection check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionTrigger {
    PointerUp,
    KeyUp,
}

/// Read the live selection of `surface` and normalize it.
///
/// Returns `None` when nothing (or only whitespace) is selected.
///
/// Rich-text offsets come from the first range of the page selection and are
/// relative to that range's own text node, not the whole editable root. A
/// selection spanning several nodes is taken as-is.
pub fn capture_selection(
    surface: &EditableSurface,
    trigger: SelectionTrigger,
) -> Option<SelectionDescriptor> {
    let (raw, start, end) = match surface {
        EditableSurface::PlainInput(input) => {
            let input = input.borrow();
            let (start, end) = input.selection_range();
            if start == end {
                return None;
            }
            let value = input.value();
            (slice_chars(&value, start, end).to_string(), start, end)
        }
        EditableSurface::RichText(rich) => {
            let selection = rich.borrow().selection();
            if selection.range_count() == 0 || selection.text.is_empty() {
                return None;
            }
            let (start, end) = selection.ranges[0];
            (selection.text, start, end)
        }
    };

    let descriptor = SelectionDescriptor::from_raw(&raw, start, end)?;
    tracing::debug!(
        ?trigger,
        kind = ?surface.kind(),
        start = descriptor.start,
        end = descriptor.end,
        "captured selection"
    );
    Some(descriptor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::infrastructure::host::{HostSelection, RichTextHost};
    use crate::app::infrastructure::memory::{MemoryInput, MemoryRichText};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn plain(value: &str, start: usize, end: usize) -> EditableSurface {
        let mut input = MemoryInput::new(value);
        input.select(start, end);
        EditableSurface::plain(input)
    }

    #[test]
    fn test_plain_selection() {
        let surface = plain("I has a cat", 2, 5);
        let sel = capture_selection(&surface, SelectionTrigger::PointerUp).unwrap();
        assert_eq!(sel, SelectionDescriptor { start: 2, end: 5, text: "has".to_string() });
    }

    #[test]
    fn test_plain_collapsed_selection() {
        let surface = plain("I has a cat", 4, 4);
        assert!(capture_selection(&surface, SelectionTrigger::KeyUp).is_none());
    }

    #[test]
    fn test_plain_whitespace_only() {
        let surface = plain("I  has", 1, 3);
        assert!(capture_selection(&surface, SelectionTrigger::PointerUp).is_none());
    }

    #[test]
    fn test_plain_trims_double_click_space() {
        // Double-click on Windows selects the trailing space too
        let surface = plain("I has a cat", 2, 6);
        let sel = capture_selection(&surface, SelectionTrigger::PointerUp).unwrap();
        assert_eq!((sel.start, sel.end), (2, 5));
        assert_eq!(sel.text, "has");
    }

    #[test]
    fn test_rich_selection_in_text_node() {
        let host = Rc::new(RefCell::new(MemoryRichText::new("DIV")));
        {
            let mut h = host.borrow_mut();
            let root = h.root();
            let p = h.append_element(root, "P");
            let t = h.append_text(p, " teh fox");
            h.select_in_text(t, 0, 4);
        }
        let surface = EditableSurface::RichText(host.clone());

        let sel = capture_selection(&surface, SelectionTrigger::PointerUp).unwrap();
        assert_eq!(sel.text, "teh");
        assert_eq!((sel.start, sel.end), (1, 4));
    }

    #[test]
    fn test_rich_no_ranges() {
        let surface = EditableSurface::rich(MemoryRichText::with_text("DIV", "hello"));
        assert!(capture_selection(&surface, SelectionTrigger::KeyUp).is_none());
    }

    #[test]
    fn test_rich_empty_string_form() {
        let mut host = MemoryRichText::with_text("DIV", "hello");
        host.set_selection(HostSelection {
            ranges: vec![(3, 3)],
            text: String::new(),
        });
        let surface = EditableSurface::rich(host);
        assert!(capture_selection(&surface, SelectionTrigger::PointerUp).is_none());
    }

    #[test]
    fn test_rich_cross_node_selection_taken_as_is() {
        let mut host = MemoryRichText::with_text("DIV", "ignored");
        // Triple click across two paragraphs; offsets belong to different nodes
        host.set_selection(HostSelection {
            ranges: vec![(0, 5)],
            text: "first para\nsecond".to_string(),
        });
        let surface = EditableSurface::rich(host);

        let sel = capture_selection(&surface, SelectionTrigger::PointerUp).unwrap();
        assert_eq!(sel.text, "first para\nsecond");
        assert_eq!((sel.start, sel.end), (0, 5));
    }
}
