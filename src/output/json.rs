//! JSON hierarchy output for d3-flame-graph.
//!
//! Stacks are merged into a call tree. Every node carries the total weight
//! of the stacks passing through it:
//!
//! ```text
//! {"name": "root", "value": 3, "children": [
//!     {"name": "main", "value": 3, "children": [...]}]}
//! ```

use super::{OutputConfig, OutputWriter};
use crate::aggregator::Stack;
use crate::utils::config::DEFAULT_JSON_ROOT_NAME;
use crate::utils::error::OutputError;
use indexmap::IndexMap;
use log::debug;
use serde::Serialize;
use std::io::Write;

/// Internal node of the call tree, children in first-seen order
#[derive(Debug, Clone, Default)]
struct Node {
    value: u64,
    children: IndexMap<String, Node>,
}

impl Node {
    fn insert(&mut self, stack: &[String], weight: u64) {
        self.value += weight;
        if let Some((head, tail)) = stack.split_first() {
            self.children
                .entry(head.clone())
                .or_default()
                .insert(tail, weight);
        }
    }

    fn to_frame<'a>(&'a self, name: &'a str) -> JsonFrame<'a> {
        JsonFrame {
            name,
            value: self.value,
            children: self
                .children
                .iter()
                .map(|(child_name, child)| child.to_frame(child_name))
                .collect(),
        }
    }
}

/// Serialized form of a tree node
#[derive(Debug, Serialize)]
struct JsonFrame<'a> {
    name: &'a str,
    value: u64,
    children: Vec<JsonFrame<'a>>,
}

/// Builds a d3-flame-graph call tree
#[derive(Debug, Clone)]
pub struct JsonWriter {
    root: Node,
    root_name: String,
    pretty: bool,
}

impl Default for JsonWriter {
    fn default() -> Self {
        Self {
            root: Node::default(),
            root_name: DEFAULT_JSON_ROOT_NAME.to_string(),
            pretty: false,
        }
    }
}

impl JsonWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total weight accepted so far
    pub fn total(&self) -> u64 {
        self.root.value
    }
}

impl OutputWriter for JsonWriter {
    fn init(&mut self, config: &OutputConfig) {
        self.root_name = config.json_root_name.clone();
        self.pretty = config.pretty;
        debug!(
            "JSON output initialized (root: {}, pretty: {})",
            self.root_name, self.pretty
        );
    }

    fn accept(
        &mut self,
        _start_nanos: i64,
        _end_nanos: i64,
        _duration_nanos: i64,
        stack: Stack,
        weight: u64,
    ) {
        self.root.insert(&stack, weight);
    }

    fn render(&self, sink: &mut dyn Write) -> Result<(), OutputError> {
        let frame = self.root.to_frame(&self.root_name);

        if self.pretty {
            serde_json::to_writer_pretty(&mut *sink, &frame)?;
        } else {
            serde_json::to_writer(&mut *sink, &frame)?;
        }
        writeln!(sink)?;

        Ok(())
    }
}
