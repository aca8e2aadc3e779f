use std::sync::{Mutex, MutexGuard};

use super::*;

/// Serializes tests that touch the shared gateway variables.
static ENV_LOCK: Mutex<()> = Mutex::new(());

fn env_lock() -> MutexGuard<'static, ()> {
    ENV_LOCK.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
}

/// # Safety
/// Callers must hold [`env_lock`].
unsafe fn clear_gateway_env() {
    unsafe {
        std::env::remove_var("VANYA_API_URL");
        std::env::remove_var("PORT");
        std::env::remove_var("COOKIE_SECURE");
        std::env::remove_var("RELAY_TIMEOUT_SECS");
    }
}

#[test]
fn from_env_defaults() {
    let _guard = env_lock();
    unsafe { clear_gateway_env() };
    let cfg = GatewayConfig::from_env().unwrap();
    assert_eq!(cfg, GatewayConfig::default());
    assert_eq!(cfg.api_url, DEFAULT_API_URL);
    assert_eq!(cfg.port, DEFAULT_PORT);
    assert!(!cfg.cookie_secure);
}

#[test]
fn from_env_parses_overrides() {
    let _guard = env_lock();
    unsafe {
        clear_gateway_env();
        std::env::set_var("VANYA_API_URL", "https://api.vanya.org/");
        std::env::set_var("PORT", "8080");
        std::env::set_var("COOKIE_SECURE", "yes");
        std::env::set_var("RELAY_TIMEOUT_SECS", "5");
    }

    let cfg = GatewayConfig::from_env().unwrap();
    assert_eq!(cfg.api_url, "https://api.vanya.org");
    assert_eq!(cfg.port, 8080);
    assert!(cfg.cookie_secure);
    assert_eq!(cfg.relay_timeout, Duration::from_secs(5));

    unsafe { clear_gateway_env() };
}

#[test]
fn from_env_rejects_bad_port() {
    let _guard = env_lock();
    unsafe {
        clear_gateway_env();
        std::env::set_var("PORT", "eighty");
    }

    let err = GatewayConfig::from_env().unwrap_err().to_string();
    assert!(err.contains("PORT"));
    assert!(err.contains("eighty"));

    unsafe { clear_gateway_env() };
}

// =============================================================================
// env_bool: uses unique env var names to avoid races with parallel tests.
// =============================================================================

#[test]
fn env_bool_true_variants() {
    for (i, val) in ["1", "true", "yes", "on", " TRUE "].iter().enumerate() {
        let key = format!("__TEST_GW_TRUE_{i}__");
        unsafe { std::env::set_var(&key, val) };
        assert_eq!(env_bool(&key), Some(true), "expected true for {val:?}");
        unsafe { std::env::remove_var(&key) };
    }
}

#[test]
fn env_bool_false_variants() {
    for (i, val) in ["0", "false", "no", "off"].iter().enumerate() {
        let key = format!("__TEST_GW_FALSE_{i}__");
        unsafe { std::env::set_var(&key, val) };
        assert_eq!(env_bool(&key), Some(false), "expected false for {val:?}");
        unsafe { std::env::remove_var(&key) };
    }
}

#[test]
fn env_bool_invalid_or_unset_returns_none() {
    let key = "__TEST_GW_INVALID_5511__";
    unsafe { std::env::set_var(key, "maybe") };
    assert_eq!(env_bool(key), None);
    unsafe { std::env::remove_var(key) };
    assert_eq!(env_bool("__TEST_GW_SURELY_UNSET_5512__"), None);
}
