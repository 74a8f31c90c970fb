use std::sync::{Mutex, OnceLock};

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

/// Sets environment variables for one test and restores them on drop.
pub struct TelePredictEnvGuard {
    previous: Vec<(&'static str, Option<String>)>,
    _lock: std::sync::MutexGuard<'static, ()>,
}

impl TelePredictEnvGuard {
    pub fn new() -> Self {
        let lock = ENV_LOCK
            .get_or_init(|| Mutex::new(()))
            .lock()
            .unwrap_or_else(|err| err.into_inner());
        Self {
            previous: Vec::new(),
            _lock: lock,
        }
    }

    pub fn set(mut self, key: &'static str, value: impl AsRef<std::ffi::OsStr>) -> Self {
        self.previous.push((key, std::env::var(key).ok()));
        // SAFETY: tests run under a global lock to prevent concurrent env mutations.
        unsafe {
            std::env::set_var(key, value);
        }
        self
    }

    pub fn unset(mut self, key: &'static str) -> Self {
        self.previous.push((key, std::env::var(key).ok()));
        // SAFETY: tests run under a global lock to prevent concurrent env mutations.
        unsafe {
            std::env::remove_var(key);
        }
        self
    }
}

impl Drop for TelePredictEnvGuard {
    fn drop(&mut self) {
        for (key, value) in self.previous.drain(..).rev() {
            match value {
                // SAFETY: tests run under a global lock to prevent concurrent env mutations.
                Some(value) => unsafe { std::env::set_var(key, value) },
                // SAFETY: tests run under a global lock to prevent concurrent env mutations.
                None => unsafe { std::env::remove_var(key) },
            }
        }
    }
}
