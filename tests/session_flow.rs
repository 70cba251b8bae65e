use omniconvert_lib::cli::run_session;
use omniconvert_lib::{builtin_registry, new_session, ConversionSession, Side};
use std::io::Cursor;

#[test]
fn length_session_does_not_ping_pong() {
    let mut session = new_session("length").unwrap();
    assert_eq!(session.from_unit_id(), "ft");
    assert_eq!(session.to_unit_id(), "m");

    session.edit_from("10");
    assert!(session.to_text().starts_with("3.048"));
    assert_eq!(session.last_edited(), Side::From);

    session.edit_to("1");
    assert_eq!(session.to_text(), "1");
    assert_eq!(session.from_text(), "3.2808399");
    assert_eq!(session.last_edited(), Side::To);

    // Re-editing the same side never rewrites what the user typed
    session.edit_to("1.0");
    assert_eq!(session.to_text(), "1.0");
}

#[test]
fn swap_keeps_celsius_value() {
    let temperature = builtin_registry().find_category("temperature").unwrap();
    let mut session = ConversionSession::with_units(temperature, "c", "f").unwrap();
    session.edit_from("100");

    session.swap();

    assert_eq!(session.to_unit_id(), "c");
    assert_eq!(session.to_text(), "100");
    assert_eq!(session.from_unit_id(), "f");
    assert_eq!(session.from_text(), "212");
}

#[test]
fn transient_input_never_escapes_as_error() {
    let mut session = new_session("fuel-consumption").unwrap();
    for text in ["", "-", "1e", "0", "0.0", "abc", "inf", "NaN"] {
        session.edit_from(text);
        assert_eq!(session.from_text(), text);
        assert_eq!(session.to_text(), "", "input {text:?}");
    }

    session.edit_from("5");
    assert!(!session.to_text().is_empty());
}

#[test]
fn sessions_are_independent() {
    let mut first = new_session("mass").unwrap();
    let second = new_session("mass").unwrap();
    first.edit_from("3");
    assert_eq!(second.from_text(), "1");
    assert_ne!(first.snapshot(), second.snapshot());
}

#[test]
fn scripted_session_prints_each_state() {
    let mut session = new_session("speed").unwrap();
    let from = session.from_unit_id().to_string();
    let to = session.to_unit_id().to_string();

    let mut input = Cursor::new(b"from 0\nshow\nquit\n".to_vec());
    let mut out = Vec::new();
    run_session(&mut session, &mut input, &mut out).unwrap();

    let output = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[1], format!("0 {from} = 0 {to}"));
    assert_eq!(lines[2], lines[1]);
}
