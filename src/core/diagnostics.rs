use fxhash::FxHashSet;
use once_cell::sync::Lazy;
use std::sync::Mutex;

static WARNED: Lazy<Mutex<FxHashSet<String>>> = Lazy::new(|| Mutex::new(FxHashSet::default()));

/// Logs `message` at warn level the first time it is seen in this process.
/// Returns whether the message was emitted.
pub fn warn_once(message: &str) -> bool {
    let mut warned = match WARNED.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    };
    if warned.insert(message.to_string()) {
        log::warn!("{}", message);
        true
    } else {
        false
    }
}

/// Installs `env_logger` as the log backend, honoring `RUST_LOG`. Safe to
/// call more than once; later calls are ignored.
#[cfg(feature = "debug")]
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();
}
