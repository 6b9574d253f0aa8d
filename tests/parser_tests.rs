use jfr_flame_graph::parser::{load_recording, EventSource, Recording, RenderOptions, TimeRange};
use jfr_flame_graph::utils::LoadError;
use serde_json::json;
use std::io::Write;
use tempfile::NamedTempFile;

fn sample_dump() -> serde_json::Value {
    json!({
        "recording": {
            "events": [
                {
                    "type": "jdk.ExecutionSample",
                    "values": {
                        "startTime": "2024-01-01T00:00:00Z",
                        "sampledThread": {"javaName": "main"},
                        "state": "STATE_RUNNABLE",
                        "stackTrace": {
                            "truncated": false,
                            "frames": [
                                {
                                    "method": {
                                        "type": {"name": "com.app.Worker", "modifiers": 1},
                                        "name": "step",
                                        "descriptor": "(I)J",
                                        "modifiers": 2
                                    },
                                    "lineNumber": 42,
                                    "bytecodeIndex": 7,
                                    "type": "JIT compiled"
                                },
                                {
                                    "method": {
                                        "type": {"name": "java/lang/Thread"},
                                        "name": "run",
                                        "descriptor": "()V"
                                    },
                                    "lineNumber": 833,
                                    "bytecodeIndex": 11,
                                    "type": "Interpreted"
                                }
                            ]
                        }
                    }
                },
                {
                    "type": "jdk.ThreadPark",
                    "values": {
                        "startTime": "2024-01-01T00:00:10Z",
                        "duration": "PT2.5S",
                        "stackTrace": null
                    }
                }
            ]
        }
    })
}

#[test]
fn test_parse_wrapped_dump() {
    let recording = Recording::from_json(&sample_dump().to_string()).unwrap();
    assert_eq!(recording.len(), 2);

    let events: Vec<_> = recording.events().collect();
    let sample = events[0];
    assert_eq!(sample.type_name, "jdk.ExecutionSample");
    assert_eq!(sample.start_nanos, 1_704_067_200_000_000_000);
    assert_eq!(sample.duration_nanos, 0);
    assert_eq!(sample.end_nanos, sample.start_nanos);

    let frames = &sample.stack_trace.as_ref().unwrap().frames;
    assert_eq!(frames.len(), 2);
    // Leaf first, as recorded
    assert_eq!(frames[0].method.name, "step");
    assert_eq!(frames[1].method.class_name, "java.lang.Thread");
    assert_eq!(
        frames[0].label(&RenderOptions::default()),
        "com.app.Worker.step(int):42"
    );

    let park = events[1];
    assert_eq!(park.duration_nanos, 2_500_000_000);
    assert_eq!(park.end_nanos, park.start_nanos + 2_500_000_000);
    assert!(park.stack_trace.is_none());
}

#[test]
fn test_time_range_and_catalog() {
    let recording = Recording::from_json(&sample_dump().to_string()).unwrap();
    let start = 1_704_067_200_000_000_000;

    assert_eq!(
        recording.time_range(),
        TimeRange {
            start_nanos: start,
            end_nanos: start + 12_500_000_000,
        }
    );
    assert_eq!(
        recording.event_types(),
        vec!["jdk.ExecutionSample", "jdk.ThreadPark"]
    );
}

#[test]
fn test_parse_bare_event_array_with_integer_times() {
    let dump = json!([
        {"type": "Method Profiling Sample", "values": {"startTime": 1000, "duration": 50}}
    ]);
    let recording = Recording::from_json(&dump.to_string()).unwrap();
    let event = recording.events().next().unwrap();

    assert_eq!(event.type_name, "Method Profiling Sample");
    assert_eq!(event.start_nanos, 1000);
    assert_eq!(event.end_nanos, 1050);
}

#[test]
fn test_negative_line_number_is_dropped() {
    let dump = json!([{
        "type": "jdk.ExecutionSample",
        "values": {
            "startTime": 0,
            "stackTrace": {"frames": [{
                "method": {"type": {"name": "sun.nio.ch.Net"}, "name": "poll", "descriptor": "()I"},
                "lineNumber": -1
            }]}
        }
    }]);
    let recording = Recording::from_json(&dump.to_string()).unwrap();
    let event = recording.events().next().unwrap();
    let frame = &event.stack_trace.as_ref().unwrap().frames[0];

    assert_eq!(frame.line_number, None);
    assert_eq!(frame.label(&RenderOptions::default()), "sun.nio.ch.Net.poll()");
}

#[test]
fn test_missing_start_time_is_rejected() {
    let dump = json!([{"type": "jdk.ExecutionSample", "values": {}}]);
    let result = Recording::from_json(&dump.to_string());
    assert!(matches!(result, Err(LoadError::InvalidFormat(_))));
}

#[test]
fn test_invalid_json_is_rejected() {
    assert!(matches!(
        Recording::from_json("not json"),
        Err(LoadError::Json(_))
    ));
}

#[test]
fn test_load_recording_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(sample_dump().to_string().as_bytes()).unwrap();

    let recording = load_recording(file.path(), false).unwrap();
    assert_eq!(recording.len(), 2);
}

#[test]
fn test_load_compressed_recording() {
    use flate2::write::GzEncoder;
    use flate2::Compression;

    let mut file = NamedTempFile::new().unwrap();
    {
        let mut encoder = GzEncoder::new(file.as_file_mut(), Compression::default());
        encoder
            .write_all(sample_dump().to_string().as_bytes())
            .unwrap();
        encoder.finish().unwrap();
    }

    // Compressed input only loads with decompression enabled
    assert!(load_recording(file.path(), false).is_err());
    let recording = load_recording(file.path(), true).unwrap();
    assert_eq!(recording.len(), 2);
}

#[test]
fn test_load_missing_file() {
    let result = load_recording("/nonexistent/recording.json", false);
    assert!(matches!(result, Err(LoadError::Io(_))));
}
