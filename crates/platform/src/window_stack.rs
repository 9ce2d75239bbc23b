//! Window stack: a bounded stack of [`WindowId`]s.
//!
//! The stack is capped at 8 entries (no heap). Unlike a menu navigator the
//! stack may be empty: an app with no window pushed shows nothing.

use heapless::Vec;

use crate::handles::WindowId;
use crate::toolkit::HostError;

/// Maximum number of stacked windows.
pub const MAX_DEPTH: usize = 8;

/// Window stack bounded at [`MAX_DEPTH`] entries.
#[derive(Debug, Default)]
pub struct WindowStack {
    stack: Vec<WindowId, MAX_DEPTH>,
}

impl WindowStack {
    /// Create an empty stack.
    pub const fn new() -> Self {
        WindowStack { stack: Vec::new() }
    }

    /// Return the window currently at the top of the stack.
    #[must_use]
    pub fn top(&self) -> Option<WindowId> {
        self.stack.last().copied()
    }

    /// Push a window.
    ///
    /// # Errors
    ///
    /// [`HostError::AlreadyPushed`] if the window is on the stack already,
    /// [`HostError::StackFull`] at capacity.
    pub fn push(&mut self, window: WindowId) -> Result<(), HostError> {
        if self.contains(window) {
            return Err(HostError::AlreadyPushed);
        }
        self.stack.push(window).map_err(|_| HostError::StackFull)
    }

    /// Pop the top window.
    pub fn pop(&mut self) -> Option<WindowId> {
        self.stack.pop()
    }

    /// Remove `window` wherever it sits. Returns `true` if it was present.
    pub fn remove(&mut self, window: WindowId) -> bool {
        match self.stack.iter().position(|w| *w == window) {
            Some(pos) => {
                self.stack.remove(pos);
                true
            }
            None => false,
        }
    }

    /// `true` if `window` is anywhere on the stack.
    #[must_use]
    pub fn contains(&self, window: WindowId) -> bool {
        self.stack.contains(&window)
    }

    /// Return the number of entries currently on the stack.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.stack.len()
    }
}
