//! Reading and writing text across heterogeneous editable surfaces.
//!
//! Plain inputs take a value assignment plus an `input` notification. Rich
//! text editors take either a direct overwrite of the text-bearing node, or,
//! on hosts whose framework drops direct mutation, a replay of backspaces
//! followed by a paste. Every failure here is a silent no-op: write-back must
//! never interrupt the user's editing.

use crate::app::domain::session::CorrectionSession;
use crate::app::domain::surface::{HostEvent, NodeId};
use crate::app::infrastructure::chrome::PresentationChrome;
use crate::app::infrastructure::host::{EditableSurface, RichTextHost, SharedPlainInput, SharedRichText, TextTree};
use crate::app::services::policy::{Resolution, WritePolicy, WriteStrategy};
use crate::app::services::text_ops::{char_len, splice_chars};

/// How a write-back request ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// Native control value assigned.
    Assigned,
    /// Rich-text node overwritten directly.
    Mutated,
    /// Rich-text content replaced by simulated keystrokes and a paste.
    Simulated { backspaces: usize },
    /// No surface is being tracked.
    NoTarget,
    /// The rich-text root has no node with visible text.
    NoTextNode,
}

impl WriteOutcome {
    pub fn committed(&self) -> bool {
        matches!(self, Self::Assigned | Self::Mutated | Self::Simulated { .. })
    }
}

/// Current text of `surface`: the native value, or the rendered text of the
/// rich-text root.
pub fn get_field_value(surface: &EditableSurface) -> String {
    match surface {
        EditableSurface::PlainInput(input) => input.borrow().value(),
        EditableSurface::RichText(rich) => {
            let host = rich.borrow();
            host.rendered_text(host.root())
        }
    }
}

/// The node that actually carries the editor's text.
///
/// `root` itself when it renders visible text, otherwise the first element
/// below it (pre-order) that does.
pub fn find_text_node<T: TextTree + ?Sized>(tree: &T, root: NodeId) -> Option<NodeId> {
    if tree.has_rendered_text(root) {
        return Some(root);
    }

    let mut stack: Vec<NodeId> = tree.element_children(root).into_iter().rev().collect();
    while let Some(node) = stack.pop() {
        if tree.has_rendered_text(node) {
            return Some(node);
        }
        stack.extend(tree.element_children(node).into_iter().rev());
    }
    None
}

/// Replace `original[start..end]` with `replacement`, or everything when no
/// range is given.
pub fn build_full_text(original: &str, replacement: &str, range: Option<(usize, usize)>) -> String {
    match range {
        Some((start, end)) => splice_chars(original, replacement, start, end),
        None => replacement.to_string(),
    }
}

/// Write `replacement` into the session's tracked surface.
///
/// With a range, only `start..end` of the current text is replaced; without
/// one, the whole content is. Committed writes finish by removing the
/// suggestion anchor from the page.
pub fn set_field_value(
    session: &CorrectionSession,
    policy: &mut WritePolicy,
    chrome: &mut dyn PresentationChrome,
    replacement: &str,
    range: Option<(usize, usize)>,
) -> WriteOutcome {
    let Some(target) = session.target() else {
        tracing::debug!("write-back skipped: no tracked surface");
        return WriteOutcome::NoTarget;
    };

    let outcome = match &target.surface {
        EditableSurface::PlainInput(input) => write_plain(input, replacement, range),
        EditableSurface::RichText(rich) => write_rich(rich, &target.origin, policy, replacement, range),
    };

    if outcome.committed() {
        chrome.remove_anchor();
    }
    outcome
}

fn write_plain(input: &SharedPlainInput, replacement: &str, range: Option<(usize, usize)>) -> WriteOutcome {
    let mut input = input.borrow_mut();
    let updated = build_full_text(&input.value(), replacement, range);
    input.set_value(&updated);
    // Framework-bound listeners only see the change through this event
    input.dispatch(HostEvent::Input);
    WriteOutcome::Assigned
}

fn write_rich(
    rich: &SharedRichText,
    origin: &str,
    policy: &mut WritePolicy,
    replacement: &str,
    range: Option<(usize, usize)>,
) -> WriteOutcome {
    let mut host = rich.borrow_mut();
    host.focus();

    let root = host.root();
    let Some(node) = find_text_node(&*host, root) else {
        tracing::debug!("write-back skipped: no text-bearing node");
        return WriteOutcome::NoTextNode;
    };

    let original = host.rendered_text(node);
    let updated = build_full_text(&original, replacement, range);

    match policy.resolve(origin) {
        Resolution::Known(WriteStrategy::DirectMutation) => {
            mutate_directly(&mut *host, node, &updated);
            WriteOutcome::Mutated
        }
        Resolution::Known(WriteStrategy::KeystrokeSimulation) => {
            simulate_typing(&mut *host, root, &original, &updated)
        }
        Resolution::Probe => {
            host.set_rendered_text(node, &updated);
            // Hosts normalize what they render, so only an untouched node
            // counts as a dropped mutation
            let dropped = updated != original && host.rendered_text(node) == original;
            if dropped {
                policy.learn_restricted(origin);
                simulate_typing(&mut *host, root, &original, &updated)
            } else {
                finish_mutation(&mut *host, node);
                WriteOutcome::Mutated
            }
        }
    }
}

fn mutate_directly(host: &mut dyn RichTextHost, node: NodeId, updated: &str) {
    host.set_rendered_text(node, updated);
    finish_mutation(host, node);
}

fn finish_mutation(host: &mut dyn RichTextHost, node: NodeId) {
    host.dispatch(node, HostEvent::Input);
    host.collapse_selection_to_end(node);
}

/// Backspace out every existing character, then paste the new content.
///
/// Blocks for one event triple per character of `original`.
fn simulate_typing(host: &mut dyn RichTextHost, root: NodeId, original: &str, updated: &str) -> WriteOutcome {
    let backspaces = char_len(original);
    tracing::debug!(backspaces, "simulating keystrokes for write-back");

    for _ in 0..backspaces {
        host.dispatch(root, HostEvent::backspace_down());
        host.dispatch(root, HostEvent::Input);
        host.dispatch(root, HostEvent::backspace_up());
    }
    host.dispatch(root, HostEvent::Paste(updated.to_string()));

    WriteOutcome::Simulated { backspaces }
}
