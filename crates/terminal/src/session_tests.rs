// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Cloudterm Gateway Contributors

use super::*;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

#[tokio::test]
async fn echoes_input_back_through_the_pty() {
    let received: Arc<Mutex<Vec<u8>>> = Arc::new(Mutex::new(Vec::new()));
    let received_clone = Arc::clone(&received);
    let on_output: OutputSink = Arc::new(move |chunk| received_clone.lock().unwrap().extend(chunk));
    let ended = Arc::new(AtomicBool::new(false));
    let ended_clone = Arc::clone(&ended);
    let on_ended: EndedSink = Box::new(move || ended_clone.store(true, Ordering::SeqCst));

    let session = Session::spawn(
        "i-test".to_string(),
        "sess-1".to_string(),
        "cat",
        &[],
        on_output,
        on_ended,
    )
    .await
    .unwrap();

    session.write_input(b"hello\n").await.unwrap();
    tokio::time::sleep(std::time::Duration::from_millis(200)).await;

    assert!(received.lock().unwrap().windows(5).any(|w| w == b"hello"));

    session.close().await.unwrap();
    tokio::time::sleep(std::time::Duration::from_millis(50)).await;
    assert!(ended.load(Ordering::SeqCst));
}

#[tokio::test]
async fn reader_reaps_and_notifies_on_natural_exit() {
    let on_output: OutputSink = Arc::new(|_| {});
    let ended = Arc::new(AtomicBool::new(false));
    let ended_clone = Arc::clone(&ended);
    let on_ended: EndedSink = Box::new(move || ended_clone.store(true, Ordering::SeqCst));

    let _session = Session::spawn(
        "i-test".to_string(),
        "sess-2".to_string(),
        "sh",
        &["-c".to_string(), "exit 0".to_string()],
        on_output,
        on_ended,
    )
    .await
    .unwrap();

    tokio::time::sleep(std::time::Duration::from_millis(200)).await;
    assert!(ended.load(Ordering::SeqCst));
}
