use super::*;

use std::{
    env, fs,
    time::{SystemTime, UNIX_EPOCH},
};

#[test]
fn missing_file_keeps_defaults() {
    let settings = load_settings_file(Path::new("/nonexistent/server.toml"));
    assert_eq!(settings, Settings::default());
}

fn write_settings(name: &str, body: &str) -> std::path::PathBuf {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let path = env::temp_dir().join(format!("article_server_{name}_{suffix}.toml"));
    fs::write(&path, body).expect("write settings");
    path
}

#[test]
fn reads_bind_addr_and_numeric_body_limit_from_file() {
    let path = write_settings(
        "numeric",
        "bind_addr = \"0.0.0.0:9000\"\nmax_body_bytes = 2048\n",
    );

    let settings = load_settings_file(&path);
    assert_eq!(settings.server_bind, "0.0.0.0:9000");
    assert_eq!(settings.max_body_bytes, 2048);

    fs::remove_file(path).expect("cleanup");
}

#[test]
fn partial_file_only_overrides_present_keys() {
    let path = write_settings("partial", "bind_addr = \"0.0.0.0:9001\"\n");

    let settings = load_settings_file(&path);
    assert_eq!(settings.server_bind, "0.0.0.0:9001");
    assert_eq!(settings.max_body_bytes, Settings::default().max_body_bytes);

    fs::remove_file(path).expect("cleanup");
}

#[test]
fn malformed_file_falls_back_to_defaults() {
    let path = write_settings("malformed", "max_body_bytes = \"lots\"\n");

    assert_eq!(load_settings_file(&path), Settings::default());

    fs::remove_file(path).expect("cleanup");
}

#[test]
fn env_overrides_file_and_ignores_garbage_numbers() {
    let mut settings = Settings::default();
    apply_env(&mut settings, |key| match key {
        "SERVER_BIND" => Some("127.0.0.1:1".into()),
        "APP__BIND_ADDR" => Some("127.0.0.1:2".into()),
        "APP__MAX_BODY_BYTES" => Some("lots".into()),
        _ => None,
    });
    assert_eq!(settings.server_bind, "127.0.0.1:2");
    assert_eq!(settings.max_body_bytes, Settings::default().max_body_bytes);
}
