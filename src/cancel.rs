use std::{
    sync::{Arc, Condvar, Mutex, PoisonError},
    time::Duration,
};

use color_eyre::eyre::{Result, WrapErr};
use nix::sys::signal::{SigSet, Signal};

/// A flag that stops repeating work. Waiting on it wakes up as soon as it's cancelled.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    inner: Arc<(Mutex<bool>, Condvar)>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        let (lock, cvar) = &*self.inner;
        *lock.lock().unwrap_or_else(PoisonError::into_inner) = true;
        cvar.notify_all();
    }

    /// Sleep for up to `timeout`. Returns `true` if the token was cancelled.
    pub fn wait_timeout(&self, timeout: Duration) -> bool {
        let (lock, cvar) = &*self.inner;
        let guard = lock.lock().unwrap_or_else(PoisonError::into_inner);
        let (guard, _) = cvar
            .wait_timeout_while(guard, timeout, |cancelled| !*cancelled)
            .unwrap_or_else(PoisonError::into_inner);
        *guard
    }
}

/// Cancel `token` once the process receives SIGINT or SIGTERM.
///
/// The signals are blocked on the calling thread and picked up by a dedicated thread instead,
/// so this has to run before any other threads are spawned.
pub fn cancel_on_signal(token: &CancelToken) -> Result<()> {
    let mut signals = SigSet::empty();
    signals.add(Signal::SIGINT);
    signals.add(Signal::SIGTERM);
    signals
        .thread_block()
        .wrap_err("Failed to block termination signals")?;

    let token = token.clone();
    std::thread::Builder::new()
        .name("signals".into())
        .spawn(move || match signals.wait() {
            Ok(signal) => {
                tracing::info!("Received {signal}, stopping");
                token.cancel();
            }
            Err(err) => tracing::error!("Failed to wait for signals: {err}"),
        })
        .wrap_err("Failed to spawn signal thread")?;
    Ok(())
}
