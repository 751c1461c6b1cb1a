// src/config/mod.rs
// Environment-driven configuration with per-key defaults

use std::str::FromStr;
use std::time::Duration;

use once_cell::sync::Lazy;

use crate::types::RetryPolicy;

#[derive(Debug, Clone)]
pub struct ShiftConfig {
    // ── Service endpoint
    pub endpoint: String,

    // ── Transport timeouts (seconds)
    pub request_timeout: u64,
    pub connect_timeout: u64,

    // ── Retry policy
    pub max_attempts: u32,
    pub base_delay_ms: u64,

    // ── Logging
    pub log_level: String,
}

fn env_var_or<T>(key: &str, default: T) -> T
where
    T: FromStr,
{
    match std::env::var(key) {
        Ok(val) => match val.trim().parse::<T>() {
            Ok(parsed) => parsed,
            Err(_) => {
                eprintln!("Config: {} = '{}' (parse failed, using default)", key, val);
                default
            }
        },
        Err(_) => default,
    }
}

impl ShiftConfig {
    pub fn from_env() -> Self {
        // Pick up a .env file when present; plain env vars otherwise.
        let _ = dotenvy::dotenv();

        Self {
            endpoint: env_var_or("SHIFT_ENDPOINT", "http://127.0.0.1:8000".to_string()),
            request_timeout: env_var_or("SHIFT_REQUEST_TIMEOUT_SECS", 30),
            connect_timeout: env_var_or("SHIFT_CONNECT_TIMEOUT_SECS", 10),
            max_attempts: env_var_or("SHIFT_MAX_ATTEMPTS", 3),
            base_delay_ms: env_var_or("SHIFT_BASE_DELAY_MS", 1000),
            log_level: env_var_or("SHIFT_LOG_LEVEL", "info".to_string()),
        }
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.max_attempts, Duration::from_millis(self.base_delay_ms))
    }
}

pub static CONFIG: Lazy<ShiftConfig> = Lazy::new(ShiftConfig::from_env);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sane_without_env() {
        let config = ShiftConfig {
            endpoint: "http://127.0.0.1:8000".into(),
            request_timeout: 30,
            connect_timeout: 10,
            max_attempts: 3,
            base_delay_ms: 1000,
            log_level: "info".into(),
        };
        let policy = config.retry_policy();
        assert_eq!(policy.max_attempts, 3);
        assert_eq!(policy.base_delay, Duration::from_secs(1));
    }

    #[test]
    fn env_var_or_falls_back_on_garbage() {
        // SAFETY: test-local key, no other thread reads it.
        unsafe { std::env::set_var("SHIFT_TEST_GARBAGE", "not-a-number") };
        let parsed: u32 = env_var_or("SHIFT_TEST_GARBAGE", 7);
        assert_eq!(parsed, 7);
        unsafe { std::env::remove_var("SHIFT_TEST_GARBAGE") };
    }
}
