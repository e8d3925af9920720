//! Forward/backward stepping over a finished trace.

use super::Step;

/// Read-only cursor over a step sequence, as a renderer's Previous/Next
/// buttons would drive it. Movement past either end is clamped.
#[derive(Debug, Clone)]
pub struct StepCursor<'a, V> {
    steps: &'a [Step<V>],
    position: usize,
}

impl<'a, V> StepCursor<'a, V> {
    /// A cursor at the first step.
    pub fn new(steps: &'a [Step<V>]) -> Self {
        Self { steps, position: 0 }
    }

    /// Zero-based position of the current step.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Number of steps in the underlying sequence.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// True if there is nothing to step through.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// The step under the cursor. `None` only for an empty sequence.
    pub fn current(&self) -> Option<&'a Step<V>> {
        self.steps.get(self.position)
    }

    /// Move one step forward. Returns `None` (and stays put) at the end.
    pub fn next_step(&mut self) -> Option<&'a Step<V>> {
        if self.position + 1 >= self.steps.len() {
            return None;
        }
        self.position += 1;
        self.current()
    }

    /// Move one step back. Returns `None` (and stays put) at the start.
    pub fn prev_step(&mut self) -> Option<&'a Step<V>> {
        if self.position == 0 || self.steps.is_empty() {
            return None;
        }
        self.position -= 1;
        self.current()
    }

    /// Jump to `index`. Out-of-range indices leave the cursor where it was.
    pub fn seek(&mut self, index: usize) -> Option<&'a Step<V>> {
        if index >= self.steps.len() {
            return None;
        }
        self.position = index;
        self.current()
    }

    /// Jump to the first step.
    pub fn rewind(&mut self) -> Option<&'a Step<V>> {
        self.position = 0;
        self.current()
    }

    /// Jump to the last step.
    pub fn seek_end(&mut self) -> Option<&'a Step<V>> {
        self.position = self.steps.len().saturating_sub(1);
        self.current()
    }

    /// True at the first step.
    pub fn is_at_start(&self) -> bool {
        self.position == 0
    }

    /// True at the last step (or for an empty sequence).
    pub fn is_at_end(&self) -> bool {
        self.position + 1 >= self.steps.len()
    }
}
