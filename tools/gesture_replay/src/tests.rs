use std::io::Write as _;

use pointer_gestures::GestureKind;

use super::*;

fn write_trace(body: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    file.write_all(body.as_bytes()).expect("write trace");
    file
}

#[test]
fn rows_with_same_timestamp_share_a_frame() {
    let trace = write_trace(
        "ms,hint,x,y,transition\n\
         # two fingers land together\n\
         0,0,10,10,began\n\
         0,1,200,10,began\n\
         16,0,10,10\n",
    );
    let frames = parse_trace(trace.path()).expect("trace parses");

    assert_eq!(frames.len(), 2);
    assert_eq!(frames[0].samples.len(), 2);
    assert_eq!(frames[1].samples[0].transition, None);
}

#[test]
fn backwards_timestamps_are_rejected() {
    let trace = write_trace("20,0,1,1,began\n10,0,1,1,ended\n");
    let err = parse_trace(trace.path()).expect_err("out of order");
    assert!(err.to_string().contains("goes backwards"), "got {err}");
}

#[test]
fn unknown_transition_is_reported_with_line() {
    let trace = write_trace("0,0,1,1,hover\n");
    let err = parse_trace(trace.path()).expect_err("bad transition");
    assert!(format!("{err:#}").contains("invalid transition 'hover'"), "got {err:#}");
    assert!(err.to_string().contains(":1 "), "got {err}");
}

#[test]
fn replay_flushes_trailing_tap() {
    let trace = write_trace("0,0,50,50,began\n16,0,50,50\n32,0,50,50,ended\n");
    let frames = parse_trace(trace.path()).expect("trace parses");
    let events = replay(GestureConfig::default(), &frames, 1_000, 16).expect("replay");
    let kinds: Vec<GestureKind> = events.iter().map(|e| e.kind).collect();

    assert_eq!(
        kinds,
        vec![GestureKind::TouchBegin, GestureKind::TouchEnd, GestureKind::Tap]
    );
    assert!(event_row(&events[2]).starts_with("event,"));
    assert!(event_row(&events[2]).contains(",tap,0,"));
}

#[test]
fn shipped_swipe_trace_matches_expected_kinds() {
    let traces = Path::new(env!("CARGO_MANIFEST_DIR")).join("traces");
    let frames = parse_trace(&traces.join("swipe_right.csv")).expect("trace parses");
    let expected =
        parse_expected_kinds(&traces.join("swipe_right.expected")).expect("expected kinds parse");

    let events = replay(GestureConfig::default(), &frames, 1_000, 16).expect("replay");
    let actual: Vec<&'static str> = events.iter().map(|e| e.kind.label()).collect();

    assert_eq!(actual, expected);
}
