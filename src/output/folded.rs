//! Folded stack output.
//!
//! Format: "root;child;leaf weight", one line per distinct stack, in the
//! order each stack was first seen.

use super::{OutputConfig, OutputWriter};
use crate::aggregator::Stack;
use crate::utils::config::FRAME_SEPARATOR;
use crate::utils::error::OutputError;
use indexmap::IndexMap;
use log::debug;
use std::io::Write;

/// Aggregates identical stacks, keeping first-seen order
#[derive(Debug, Clone, Default)]
pub struct FoldedWriter {
    stacks: IndexMap<Stack, u64>,
}

impl FoldedWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Distinct stacks with their accumulated weights, first-seen order
    pub fn entries(&self) -> impl Iterator<Item = (&Stack, u64)> {
        self.stacks.iter().map(|(stack, weight)| (stack, *weight))
    }

    pub fn len(&self) -> usize {
        self.stacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stacks.is_empty()
    }
}

impl OutputWriter for FoldedWriter {
    fn init(&mut self, _config: &OutputConfig) {
        debug!("Folded output initialized");
    }

    fn accept(
        &mut self,
        _start_nanos: i64,
        _end_nanos: i64,
        _duration_nanos: i64,
        stack: Stack,
        weight: u64,
    ) {
        *self.stacks.entry(stack).or_insert(0) += weight;
    }

    fn render(&self, sink: &mut dyn Write) -> Result<(), OutputError> {
        debug!("Writing {} folded stacks", self.stacks.len());

        for (stack, weight) in &self.stacks {
            writeln!(sink, "{} {}", stack.join(FRAME_SEPARATOR), weight)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn stack(frames: &[&str]) -> Stack {
        frames.iter().map(|f| f.to_string()).collect()
    }

    fn render_to_string(writer: &FoldedWriter) -> String {
        let mut out = Vec::new();
        writer.render(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_identical_stacks_merge() {
        let mut writer = FoldedWriter::new();
        writer.accept(0, 0, 0, stack(&["main", "work"]), 1);
        writer.accept(0, 0, 0, stack(&["main", "work"]), 1);

        assert_eq!(writer.len(), 1);
        assert_eq!(render_to_string(&writer), "main;work 2\n");
    }

    #[test]
    fn test_first_seen_order_is_kept() {
        let mut writer = FoldedWriter::new();
        writer.accept(0, 0, 0, stack(&["z"]), 1);
        writer.accept(0, 0, 0, stack(&["a"]), 5);
        writer.accept(0, 0, 0, stack(&["z"]), 1);

        assert_eq!(render_to_string(&writer), "z 2\na 5\n");
    }

    #[test]
    fn test_prefix_stacks_stay_distinct() {
        let mut writer = FoldedWriter::new();
        writer.accept(0, 0, 0, stack(&["a", "b"]), 1);
        writer.accept(0, 0, 0, stack(&["a"]), 1);

        assert_eq!(render_to_string(&writer), "a;b 1\na 1\n");
    }

    #[test]
    fn test_render_is_repeatable() {
        let mut writer = FoldedWriter::new();
        writer.accept(0, 0, 0, stack(&["a", "b"]), 3);
        writer.accept(0, 0, 0, stack(&["c"]), 1);

        assert_eq!(render_to_string(&writer), render_to_string(&writer));
    }

    #[test]
    fn test_empty_writer_renders_nothing() {
        let writer = FoldedWriter::new();
        assert!(writer.is_empty());
        assert_eq!(render_to_string(&writer), "");
    }
}
