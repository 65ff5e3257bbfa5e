//! Integration tests: email/password identity provider against a local server.

mod common;

use common::json_server::{self, Canned};
use fcm_core::config::ProviderConfig;
use fcm_core::http::HttpTimeouts;
use fcm_core::kv::MemoryStore;
use fcm_core::session::{IdentityProvider, PasswordProvider, SessionError, SessionGate};
use std::io::Cursor;

fn provider(base_url: &str, input: &str) -> PasswordProvider<Cursor<String>, Vec<u8>> {
    let cfg = ProviderConfig {
        endpoint: format!("{base_url}/v1/accounts:signInWithPassword"),
        api_key: "test-key".to_string(),
    };
    PasswordProvider::new(&cfg, HttpTimeouts::default(), Cursor::new(input.to_string()), Vec::new())
        .unwrap()
}

#[test]
fn sign_in_sends_credentials_and_reads_profile() {
    let server = json_server::start(Canned::json(
        200,
        r#"{"localId":"uid-123","email":"dev@fcm.test","displayName":"Dev","idToken":"t"}"#,
    ));
    let mut p = provider(&server.base_url, "dev@fcm.test\nhunter2\n");
    let user = p.sign_in().unwrap();
    assert_eq!(user.uid.as_str(), "uid-123");
    assert_eq!(user.label(), "Dev");

    let reqs = server.received();
    assert_eq!(reqs[0].path, "/v1/accounts:signInWithPassword?key=test-key");
    let sent: serde_json::Value = serde_json::from_str(&reqs[0].body).unwrap();
    assert_eq!(sent["email"], "dev@fcm.test");
    assert_eq!(sent["password"], "hunter2");
    assert_eq!(sent["returnSecureToken"], true);
}

#[test]
fn empty_display_name_falls_back_to_email() {
    let server = json_server::start(Canned::json(200, r#"{"localId":"u","email":"e@x.io","displayName":""}"#));
    let user = provider(&server.base_url, "e@x.io\npw\n").sign_in().unwrap();
    assert_eq!(user.label(), "e@x.io");
}

#[test]
fn rejected_credentials_leave_gate_signed_out() {
    let server = json_server::start(Canned::json(
        400,
        r#"{"error":{"code":400,"message":"INVALID_LOGIN_CREDENTIALS"}}"#,
    ));
    let p = provider(&server.base_url, "dev@fcm.test\nwrong\n");
    let mut gate = SessionGate::new(Box::new(p), MemoryStore::new());
    match gate.login() {
        Err(SessionError::Provider { code, message }) => {
            assert_eq!(code, 400);
            assert_eq!(message, "INVALID_LOGIN_CREDENTIALS");
        }
        other => panic!("expected provider error, got {:?}", other),
    }
    assert!(gate.current().is_none());
}
