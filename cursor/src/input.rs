//! Input model: the hover state enum, mouse buttons, and the predicates that
//! decide whether a delegated pointer event changes hover state.
//!
//! The predicates are pure over a [`Dom`] so the same rules apply to the
//! browser host and to headless tests.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::dom::{Dom, normalize_path};

/// Which interaction mode the cursor is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorState {
    /// Box follows the pointer directly and spins slowly.
    #[default]
    Free,
    /// Box wraps a tagged element and trails it on a spring.
    Hovering,
    /// Box glides back to the pointer after leaving an element.
    Releasing,
}

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Left mouse button (or single-finger tap).
    Primary,
    /// Middle mouse button (scroll wheel click).
    Middle,
    /// Right mouse button (or two-finger tap).
    Secondary,
}

impl Button {
    /// Map a DOM `MouseEvent.button` code.
    #[must_use]
    pub fn from_dom(code: i16) -> Option<Self> {
        match code {
            0 => Some(Self::Primary),
            1 => Some(Self::Middle),
            2 => Some(Self::Secondary),
            _ => None,
        }
    }
}

/// Whether an "over" event on `target` should latch onto a new element.
///
/// True when the target sits inside a tagged element that is not the one
/// already hovered. Moving between children of the hovered element is not
/// an enter.
pub fn should_handle_cursor_enter<D: Dom>(dom: &D, target: &D::Node, hovered: Option<&D::Node>) -> bool {
    match dom.tagged_ancestor(target) {
        Some(el) => hovered != Some(&el),
        None => false,
    }
}

/// Whether an "out" event from `target` toward `related` leaves the hovered element.
///
/// The pointer has only left when the event came from inside the hovered
/// element and its destination is outside it. A `None` destination means
/// the pointer left the document.
pub fn should_handle_cursor_leave<D: Dom>(
    dom: &D,
    target: &D::Node,
    related: Option<&D::Node>,
    hovered: Option<&D::Node>,
) -> bool {
    let Some(hovered) = hovered else {
        return false;
    };
    if !dom.contains(hovered, target) {
        return false;
    }
    match related {
        Some(related) => !dom.contains(hovered, related),
        None => true,
    }
}

/// Whether a click on `target` is an in-app navigation to a different route.
pub fn should_release_cursor_on_navigation_click<D: Dom>(dom: &D, target: &D::Node, current_path: &str) -> bool {
    dom.link_path(target)
        .is_some_and(|path| path != normalize_path(current_path))
}
