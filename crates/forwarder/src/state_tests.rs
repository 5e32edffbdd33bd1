use super::*;
use crate::session::ForwarderSession;

#[tokio::test]
async fn start_session_is_idempotent_for_a_tracked_instance() {
    let state = ForwarderState::new(33890, 33999);
    state
        .sessions
        .write()
        .await
        .insert("i-existing".to_string(), Arc::new(ForwarderSession::test_instance("i-existing", 33890)));

    let response = state
        .start_session("i-existing".to_string(), "web-1".to_string(), "default".to_string(), "us-east-1".to_string())
        .await
        .unwrap();

    assert_eq!(response.status, ForwarderStartStatus::AlreadyRunning);
    assert_eq!(response.port, 33890);
}

#[tokio::test]
async fn start_session_rejects_empty_instance_id() {
    let state = ForwarderState::new(33890, 33999);
    let err = state
        .start_session(String::new(), "web-1".to_string(), "default".to_string(), "us-east-1".to_string())
        .await
        .unwrap_err();
    assert!(matches!(err, ForwarderError::MissingInstanceId));
}

#[tokio::test]
async fn stop_session_frees_the_port_and_removes_the_entry() {
    let state = ForwarderState::new(33890, 33999);
    state.ports.allocate().unwrap();
    state
        .sessions
        .write()
        .await
        .insert("i-existing".to_string(), Arc::new(ForwarderSession::test_instance("i-existing", 33890)));

    state.stop_session("i-existing").await.unwrap();

    assert!(state.sessions.read().await.is_empty());
    assert_eq!(state.ports.allocated_count(), 0);
}

#[tokio::test]
async fn stop_session_errors_for_unknown_instance() {
    let state = ForwarderState::new(33890, 33999);
    let err = state.stop_session("i-missing").await.unwrap_err();
    assert!(matches!(err, ForwarderError::NotFound(id) if id == "i-missing"));
}

#[tokio::test]
async fn list_sessions_reflects_the_table() {
    let state = ForwarderState::new(33890, 33999);
    state
        .sessions
        .write()
        .await
        .insert("i-existing".to_string(), Arc::new(ForwarderSession::test_instance("i-existing", 33890)));

    let sessions = state.list_sessions().await;
    assert_eq!(sessions.len(), 1);
    assert_eq!(sessions[0].instance_id, "i-existing");
}

#[tokio::test]
async fn shutdown_drains_every_session() {
    let state = ForwarderState::new(33890, 33999);
    state.ports.allocate().unwrap();
    state
        .sessions
        .write()
        .await
        .insert("i-existing".to_string(), Arc::new(ForwarderSession::test_instance("i-existing", 33890)));

    state.shutdown().await;

    assert!(state.sessions.read().await.is_empty());
    assert_eq!(state.health().await, (0, 0));
}
