use super::*;

#[test]
fn start_session_frame_parses_with_omitted_profile_and_region() {
    let frame: ClientFrame = serde_json::from_str(
        r#"{"type":"start_session","instance_id":"i-1","session_id":"s-1"}"#,
    )
    .unwrap();
    match frame {
        ClientFrame::StartSession { instance_id, session_id, profile, region } => {
            assert_eq!(instance_id, "i-1");
            assert_eq!(session_id, "s-1");
            assert_eq!(profile, None);
            assert_eq!(region, None);
        }
        other => panic!("expected StartSession, got {other:?}"),
    }
}

#[test]
fn terminal_input_frame_round_trips_the_tag() {
    let frame: ClientFrame =
        serde_json::from_str(r#"{"type":"terminal_input","session_id":"s-1","input":"ls\n"}"#).unwrap();
    assert!(matches!(frame, ClientFrame::TerminalInput { .. }));
}

#[test]
fn unknown_tag_fails_to_parse() {
    let err = serde_json::from_str::<ClientFrame>(r#"{"type":"not_a_real_frame"}"#).unwrap_err();
    assert!(err.to_string().contains("not_a_real_frame") || err.to_string().contains("unknown variant"));
}

#[test]
fn server_frame_serializes_with_snake_case_tag() {
    let frame = ServerFrame::SessionStarted {
        instance_id: "i-1".to_string(),
        session_id: "s-1".to_string(),
    };
    let json = serde_json::to_value(&frame).unwrap();
    assert_eq!(json["type"], "session_started");
    assert_eq!(json["instance_id"], "i-1");
}

#[test]
fn session_error_omits_session_id_when_absent() {
    let frame = ServerFrame::SessionError { session_id: None, error: "boom".to_string() };
    let json = serde_json::to_value(&frame).unwrap();
    assert!(json.get("session_id").is_none());
}
