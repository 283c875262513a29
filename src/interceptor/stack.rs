use dashmap::DashMap;
use std::thread::{self, ThreadId};

struct Frame<T> {
    depth: usize,
    value: T,
}

/// A per-thread LIFO that pairs before-hook pushes with after-hook pops.
///
/// Each frame is tagged with the container's resolution depth at push time.
/// A pop only succeeds for the frame pushed at the same depth, so a
/// resolution that never pushed (or a hook that failed before pushing) cannot
/// take a frame belonging to an outer resolution.
pub struct ResolutionStack<T> {
    frames: DashMap<ThreadId, Vec<Frame<T>>>,
}

impl<T> Default for ResolutionStack<T> {
    fn default() -> Self {
        Self {
            frames: DashMap::new(),
        }
    }
}

impl<T> ResolutionStack<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, depth: usize, value: T) {
        self.frames
            .entry(thread::current().id())
            .or_default()
            .push(Frame { depth, value });
    }

    /// Pops the top frame if it was pushed at `depth`.
    pub fn pop(&self, depth: usize) -> Option<T> {
        let thread = thread::current().id();
        let (value, empty) = {
            let mut frames = self.frames.get_mut(&thread)?;
            if frames.last().map(|frame| frame.depth) != Some(depth) {
                return None;
            }
            let value = frames.pop().map(|frame| frame.value);
            (value, frames.is_empty())
        };
        if empty {
            self.frames.remove_if(&thread, |_, frames| frames.is_empty());
        }
        value
    }

    /// Frames on the current thread.
    pub fn len(&self) -> usize {
        self.frames
            .get(&thread::current().id())
            .map(|frames| frames.len())
            .unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_push_pop() {
        let stack = ResolutionStack::new();
        stack.push(1, "outer");
        stack.push(2, "inner");

        assert_eq!(stack.pop(2), Some("inner"));
        assert_eq!(stack.pop(1), Some("outer"));
        assert!(stack.is_empty());
    }

    #[test]
    fn test_pop_at_wrong_depth_is_noop() {
        let stack = ResolutionStack::new();
        stack.push(1, "outer");

        assert_eq!(stack.pop(2), None);
        assert_eq!(stack.len(), 1);
        assert_eq!(stack.pop(1), Some("outer"));
    }

    #[test]
    fn test_threads_do_not_share_frames() {
        let stack = std::sync::Arc::new(ResolutionStack::new());
        stack.push(1, 10);

        let other = stack.clone();
        std::thread::spawn(move || {
            assert!(other.is_empty());
            other.push(1, 20);
            assert_eq!(other.pop(1), Some(20));
        })
        .join()
        .unwrap();

        assert_eq!(stack.pop(1), Some(10));
    }
}
