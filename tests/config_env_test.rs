//! Backend configuration read from the process environment.

use malajunta::config::{
    BackendConfig, ConfigError, ANON_KEY_FALLBACK_VAR, ANON_KEY_VAR, REDIRECT_URL_VAR,
    URL_FALLBACK_VAR, URL_VAR,
};
use serial_test::serial;

fn clear_env() {
    for var in [
        URL_VAR,
        URL_FALLBACK_VAR,
        ANON_KEY_VAR,
        ANON_KEY_FALLBACK_VAR,
        REDIRECT_URL_VAR,
    ] {
        std::env::remove_var(var);
    }
}

#[test]
#[serial]
fn test_from_env_reads_primary_vars() {
    clear_env();
    std::env::set_var(URL_VAR, "https://abc.supabase.co/");
    std::env::set_var(ANON_KEY_VAR, "anon-key");

    let config = BackendConfig::from_env().unwrap();

    assert_eq!(config.url, "https://abc.supabase.co");
    assert_eq!(config.anon_key, "anon-key");
    assert_eq!(config.redirect_url, None);
    clear_env();
}

#[test]
#[serial]
fn test_from_env_falls_back() {
    clear_env();
    std::env::set_var(URL_FALLBACK_VAR, "https://xyz.supabase.co");
    std::env::set_var(ANON_KEY_FALLBACK_VAR, "fallback-key");
    std::env::set_var(REDIRECT_URL_VAR, "https://malajunta.gg/reset");

    let config = BackendConfig::from_env().unwrap();

    assert_eq!(config.url, "https://xyz.supabase.co");
    assert_eq!(config.anon_key, "fallback-key");
    assert_eq!(config.redirect_url.as_deref(), Some("https://malajunta.gg/reset"));
    clear_env();
}

#[test]
#[serial]
fn test_from_env_missing_key() {
    clear_env();
    std::env::set_var(URL_VAR, "https://abc.supabase.co");

    assert_eq!(
        BackendConfig::from_env(),
        Err(ConfigError::MissingVar(ANON_KEY_VAR))
    );
    clear_env();
}
