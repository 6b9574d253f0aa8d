use jfr_flame_graph::aggregator::Stack;
use jfr_flame_graph::output::{
    open_sink, validate_path, write_output, FoldedWriter, JsonWriter, OutputConfig,
    OutputType, OutputWriter,
};
use pretty_assertions::assert_eq;
use std::path::Path;

fn stack(frames: &[&str]) -> Stack {
    frames.iter().map(|f| f.to_string()).collect()
}

#[test]
fn test_folded_merges_identical_stacks() {
    let mut writer = FoldedWriter::new();
    writer.accept(0, 10, 10, stack(&["main", "run"]), 1);
    writer.accept(20, 30, 10, stack(&["main", "run"]), 1);

    let entries: Vec<_> = writer.entries().collect();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].1, 2);

    let mut out = Vec::new();
    writer.render(&mut out).unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), "main;run 2\n");
}

#[test]
fn test_folded_output_is_deterministic() {
    let render = || {
        let mut writer = OutputType::Folded.create_writer(&OutputConfig::default());
        for frames in [&["a", "b"][..], &["c"][..], &["a", "b"][..], &["a"][..]] {
            writer.accept(0, 0, 0, stack(frames), 1);
        }
        let mut out = Vec::new();
        writer.render(&mut out).unwrap();
        out
    };

    let first = render();
    assert_eq!(first, render());
    assert_eq!(String::from_utf8(first).unwrap(), "a;b 2\nc 1\na 1\n");
}

#[test]
fn test_json_tree() {
    let mut writer = JsonWriter::new();
    writer.accept(0, 0, 0, stack(&["main", "a"]), 1);
    writer.accept(0, 0, 0, stack(&["main"]), 1);
    writer.accept(0, 0, 0, stack(&["other"]), 3);

    let mut out = Vec::new();
    writer.render(&mut out).unwrap();
    let value: serde_json::Value = serde_json::from_slice(&out).unwrap();

    assert_eq!(value["value"], 5);
    assert_eq!(value["children"][0]["name"], "main");
    assert_eq!(value["children"][0]["value"], 2);
    assert_eq!(value["children"][0]["children"][0]["name"], "a");
    assert_eq!(value["children"][1]["name"], "other");
    assert_eq!(value["children"][1]["value"], 3);
}

#[test]
fn test_write_output_to_file() {
    let temp_dir = tempfile::tempdir().unwrap();
    let path = temp_dir.path().join("nested/profile.folded");

    let mut writer = FoldedWriter::new();
    writer.accept(0, 0, 0, stack(&["x", "y"]), 4);
    write_output(&writer, Some(path.as_path())).unwrap();

    assert_eq!(std::fs::read_to_string(&path).unwrap(), "x;y 4\n");
}

#[test]
fn test_validate_output_path_empty() {
    assert!(validate_path(Path::new("")).is_err());
}

#[test]
fn test_open_sink_rejects_directory() {
    let temp_dir = tempfile::tempdir().unwrap();
    assert!(open_sink(Some(temp_dir.path())).is_err());
}
