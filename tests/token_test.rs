use std::{fs, path::PathBuf};

use tidalsync::management::TokenManager;
use tidalsync::types::Token;

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("tidalsync-test-{}-{}", std::process::id(), name))
}

#[tokio::test]
async fn test_token_round_trip() {
    let path = temp_path("token.json");

    let token = Token {
        token_type: "Bearer".to_string(),
        access_token: "access-abc".to_string(),
        refresh_token: "refresh-def".to_string(),
        expiry_time: 1767225600,
    };

    let manager = TokenManager::new(token.clone(), &path);
    manager.persist().await.unwrap();

    // Loading must reproduce every field at integer-second precision
    let loaded = TokenManager::load(&path).await.unwrap();
    assert_eq!(loaded.current_token(), &token);

    fs::remove_file(&path).unwrap();
}

#[tokio::test]
async fn test_load_missing_token_file_is_an_error() {
    let path = temp_path("missing-token.json");
    assert!(TokenManager::load(&path).await.is_err());
}

#[tokio::test]
async fn test_load_corrupt_token_file_is_an_error() {
    let path = temp_path("corrupt-token.json");
    fs::write(&path, "{ not json").unwrap();

    assert!(TokenManager::load(&path).await.is_err());

    fs::remove_file(&path).unwrap();
}

#[tokio::test]
async fn test_load_empty_token_file_is_an_error() {
    let path = temp_path("empty-token.json");
    fs::write(&path, "").unwrap();

    assert!(TokenManager::load(&path).await.is_err());

    fs::remove_file(&path).unwrap();
}

#[tokio::test]
async fn test_load_token_without_expiry_is_an_error() {
    let path = temp_path("partial-token.json");
    fs::write(
        &path,
        r#"{ "token_type": "Bearer", "access_token": "abc", "refresh_token": "def" }"#,
    )
    .unwrap();

    assert!(TokenManager::load(&path).await.is_err());

    fs::remove_file(&path).unwrap();
}

#[tokio::test]
async fn test_clear_removes_the_file() {
    let path = temp_path("cleared-token.json");
    fs::write(&path, "{}").unwrap();

    TokenManager::clear(&path).await.unwrap();
    assert!(!path.exists());
}
