use super::*;

#[test]
fn broadcast_command_request_deserializes_instance_list() {
    let req: BroadcastCommandRequest =
        serde_json::from_str(r#"{"instance_ids":["i-1","i-2"],"command":"uptime"}"#).unwrap();
    assert_eq!(req.instance_ids, vec!["i-1".to_string(), "i-2".to_string()]);
    assert_eq!(req.command, "uptime");
}

#[test]
fn ndjson_line_ends_with_a_single_newline() {
    let event = ProgressEvent::progress(42, "working");
    let line = to_ndjson_line(&event);
    assert_eq!(line.last(), Some(&b'\n'));
    assert_eq!(line.iter().filter(|&&b| b == b'\n').count(), 1);
}
