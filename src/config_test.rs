use std::sync::{Mutex, MutexGuard, PoisonError};

use super::*;

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Serializes tests in this module that mutate the process environment.
fn env_lock() -> MutexGuard<'static, ()> {
    ENV_LOCK.lock().unwrap_or_else(PoisonError::into_inner)
}

/// # Safety
/// Callers must hold `env_lock()`.
unsafe fn clear_server_env() {
    unsafe {
        std::env::remove_var("BIND_ADDR");
        std::env::remove_var("PORT");
        std::env::remove_var("TOOLSHELF_MAX_BODY_BYTES");
        std::env::remove_var("TOOLSHELF_RATES_FILE");
        std::env::remove_var("TOOLSHELF_CLOCK_MAX_TICKS");
    }
}

#[test]
fn from_env_defaults() {
    let _env = env_lock();
    unsafe { clear_server_env() };

    let cfg = ServerConfig::from_env().unwrap();
    assert_eq!(cfg, ServerConfig::default());
    assert_eq!(cfg.socket_addr().to_string(), "0.0.0.0:3000");
    assert_eq!(cfg.max_body_bytes, 1_048_576);
}

#[test]
fn from_env_parses_overrides() {
    let _env = env_lock();
    unsafe {
        clear_server_env();
        std::env::set_var("BIND_ADDR", "127.0.0.1");
        std::env::set_var("PORT", " 8080 ");
        std::env::set_var("TOOLSHELF_MAX_BODY_BYTES", "4096");
        std::env::set_var("TOOLSHELF_RATES_FILE", "/etc/toolshelf/rates.json");
        std::env::set_var("TOOLSHELF_CLOCK_MAX_TICKS", "60");
    }

    let cfg = ServerConfig::from_env().unwrap();
    assert_eq!(cfg.socket_addr().to_string(), "127.0.0.1:8080");
    assert_eq!(cfg.max_body_bytes, 4096);
    assert_eq!(cfg.rates_file, Some(PathBuf::from("/etc/toolshelf/rates.json")));
    assert_eq!(cfg.clock_max_ticks, 60);

    unsafe { clear_server_env() };
}

#[test]
fn from_env_rejects_unparsable_values() {
    let _env = env_lock();
    unsafe {
        clear_server_env();
        std::env::set_var("PORT", "eighty");
    }
    let err = ServerConfig::from_env().unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { var: "PORT", .. }));

    unsafe {
        clear_server_env();
        std::env::set_var("TOOLSHELF_CLOCK_MAX_TICKS", "0");
    }
    let err = ServerConfig::from_env().unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { var: "TOOLSHELF_CLOCK_MAX_TICKS", .. }));

    unsafe { clear_server_env() };
}

#[test]
fn blank_values_fall_back_to_defaults() {
    let _env = env_lock();
    unsafe {
        clear_server_env();
        std::env::set_var("PORT", "  ");
        std::env::set_var("TOOLSHELF_RATES_FILE", "");
    }
    let cfg = ServerConfig::from_env().unwrap();
    assert_eq!(cfg.port, DEFAULT_PORT);
    assert!(cfg.rates_file.is_none());

    unsafe { clear_server_env() };
}
