use serde::{Deserialize, Serialize};

/// The two families of editable surface the adapter knows how to drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EditableSurfaceKind {
    /// Native single or multi-line control with a linear buffer and a
    /// built-in selection range.
    PlainInput,
    /// A subtree whose text is the concatenation of its descendant text nodes.
    RichText,
}

/// Opaque handle to a node inside a rich-text host's tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

/// What the focus-in observer knows about the element that received focus.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FocusTarget {
    pub tag_name: String,
    pub input_type: Option<String>,
    pub content_editable: bool,
    pub role: Option<String>,
}

impl FocusTarget {
    pub fn textarea() -> Self {
        Self {
            tag_name: "TEXTAREA".to_string(),
            ..Default::default()
        }
    }

    pub fn text_input() -> Self {
        Self {
            tag_name: "INPUT".to_string(),
            input_type: Some("text".to_string()),
            ..Default::default()
        }
    }

    pub fn content_editable(tag_name: &str) -> Self {
        Self {
            tag_name: tag_name.to_string(),
            content_editable: true,
            ..Default::default()
        }
    }

    /// Whether focusing this element should start tracking it.
    pub fn is_editable_surface(&self) -> bool {
        let tag = self.tag_name.to_ascii_uppercase();
        tag == "TEXTAREA"
            || (tag == "INPUT"
                && self
                    .input_type
                    .as_deref()
                    .is_some_and(|t| t.eq_ignore_ascii_case("text")))
            || self.content_editable
            || self.role.as_deref() == Some("textbox")
    }
}

/// Synthetic events the adapter dispatches into the host page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostEvent {
    /// Generic bubbling "input changed" notification.
    Input,
    KeyDown(String),
    KeyUp(String),
    /// Clipboard paste with a `text/plain` payload.
    Paste(String),
}

impl HostEvent {
    pub fn backspace_down() -> Self {
        HostEvent::KeyDown("Backspace".to_string())
    }

    pub fn backspace_up() -> Self {
        HostEvent::KeyUp("Backspace".to_string())
    }
}

/// Page coordinates of the pointer/key release that armed selection capture.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerPosition {
    pub x: f64,
    pub y: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_native_controls_qualify() {
        assert!(FocusTarget::textarea().is_editable_surface());
        assert!(FocusTarget::text_input().is_editable_surface());
    }

    #[test]
    fn test_non_text_inputs_do_not_qualify() {
        let checkbox = FocusTarget {
            tag_name: "INPUT".to_string(),
            input_type: Some("checkbox".to_string()),
            ..Default::default()
        };
        assert!(!checkbox.is_editable_surface());

        let untyped = FocusTarget {
            tag_name: "INPUT".to_string(),
            ..Default::default()
        };
        assert!(!untyped.is_editable_surface());

        let button = FocusTarget {
            tag_name: "BUTTON".to_string(),
            ..Default::default()
        };
        assert!(!button.is_editable_surface());
    }

    #[test]
    fn test_rich_text_qualifies() {
        assert!(FocusTarget::content_editable("DIV").is_editable_surface());

        let textbox = FocusTarget {
            tag_name: "DIV".to_string(),
            role: Some("textbox".to_string()),
            ..Default::default()
        };
        assert!(textbox.is_editable_surface());
    }

    #[test]
    fn test_tag_case_insensitive() {
        let lower = FocusTarget {
            tag_name: "textarea".to_string(),
            ..Default::default()
        };
        assert!(lower.is_editable_surface());
    }
}
