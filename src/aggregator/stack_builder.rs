//! Normalize recorded stack traces into frame label sequences.
//!
//! Stacks are root first, the order folded output expects:
//! "java.lang.Thread.run();com.app.Worker.work();com.app.Worker.step()"
//!
//! Leading frames from uninteresting packages can be dropped with the
//! omit-first-seen-package rule. Only the unbroken run of matching frames
//! at the root is dropped; once a frame is kept, later frames always stay.

use crate::parser::{Event, RenderOptions};
use crate::utils::config::IGNORED_FRAME;

/// Frame labels of one stack, root first
pub type Stack = Vec<String>;

/// Stack used for events without a usable stack trace
pub fn ignored_stack() -> Stack {
    vec![IGNORED_FRAME.to_string()]
}

/// Build the root-first label stack of an event
///
/// **Public** - main entry point for stack normalization
///
/// # Arguments
/// * `event` - Event to normalize
/// * `options` - Resolved frame label rendering flags
/// * `omit_packages` - Prefixes for the omit-first-seen-package rule
///
/// # Returns
/// A non-empty stack. Events without a stack trace, and stacks emptied by
/// the omit rule, become the single `Ignored` frame.
pub fn normalize(event: &Event, options: &RenderOptions, omit_packages: &[String]) -> Stack {
    let Some(stack_trace) = &event.stack_trace else {
        return ignored_stack();
    };

    // Frames are recorded leaf first; scan from the root
    let mut kept: Stack = Vec::with_capacity(stack_trace.frames.len());
    for frame in stack_trace.frames.iter().rev() {
        let label = frame.label(options);

        if kept.is_empty() && is_omitted(&label, omit_packages) {
            continue;
        }

        kept.push(label);
    }

    if kept.is_empty() {
        return ignored_stack();
    }

    kept
}

/// True when the label starts with any omitted prefix
fn is_omitted(label: &str, omit_packages: &[String]) -> bool {
    omit_packages.iter().any(|prefix| label.starts_with(prefix.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{Frame, Method, StackTrace};

    /// Build an event from root-first (class, method, line) triples
    fn event_with_frames(frames: &[(&str, &str, u32)]) -> Event {
        let frames = frames
            .iter()
            .rev()
            .map(|(class, method, line)| Frame::new(Method::new(*class, *method, "()V"), Some(*line)))
            .collect();
        Event::new(
            "jdk.ExecutionSample",
            0,
            0,
            Some(StackTrace {
                frames,
                truncated: false,
            }),
        )
    }

    #[test]
    fn test_normalize_root_first_with_lines() {
        let event = event_with_frames(&[("a.A", "run", 1), ("b.B", "call", 2), ("c.C", "leaf", 3)]);
        let stack = normalize(&event, &RenderOptions::default(), &[]);
        assert_eq!(stack, vec!["a.A.run():1", "b.B.call():2", "c.C.leaf():3"]);
    }

    #[test]
    fn test_normalize_missing_stack() {
        let event = Event::new("jdk.ExecutionSample", 0, 0, None);
        assert_eq!(
            normalize(&event, &RenderOptions::default(), &[]),
            vec!["Ignored"]
        );
    }

    #[test]
    fn test_omit_only_leading_frames() {
        let event = event_with_frames(&[
            ("com.foo.X", "x", 1),
            ("com.foo.Y", "y", 2),
            ("bar.Z", "z", 3),
            ("com.foo.W", "w", 4),
        ]);
        let omit = vec!["com.foo.".to_string()];
        let stack = normalize(&event, &RenderOptions::default(), &omit);
        assert_eq!(stack, vec!["bar.Z.z():3", "com.foo.W.w():4"]);
    }

    #[test]
    fn test_fully_omitted_stack_falls_back_to_ignored() {
        let event = event_with_frames(&[("com.foo.X", "x", 1), ("com.foo.Y", "y", 2)]);
        let omit = vec!["com.foo.".to_string()];
        assert_eq!(
            normalize(&event, &RenderOptions::default(), &omit),
            vec!["Ignored"]
        );
    }

    #[test]
    fn test_empty_frame_list_falls_back_to_ignored() {
        let event = Event::new("jdk.ExecutionSample", 0, 0, Some(StackTrace::default()));
        assert_eq!(
            normalize(&event, &RenderOptions::default(), &[]),
            vec!["Ignored"]
        );
    }
}
