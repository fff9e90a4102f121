//! Ctrl-C handling: the first SIGINT cancels the running batch, the second one kills the process.

use compliguard_app::CancelToken;
use std::sync::{Once, OnceLock};

static TOKEN: OnceLock<CancelToken> = OnceLock::new();
static INSTALL: Once = Once::new();

/// Token cancelled by the first Ctrl-C. Every call returns a clone of the same token.
///
/// Items already submitted stay submitted; items not yet started report `cancelled`.
pub fn interrupt_token() -> CancelToken {
    let token = TOKEN.get_or_init(CancelToken::new).clone();
    INSTALL.call_once(install);
    token
}

#[cfg(unix)]
extern "C" fn on_sigint(_: libc::c_int) {
    if let Some(token) = TOKEN.get() {
        token.cancel();
    }
    // SAFETY: `signal` is async-signal-safe; restoring the default lets a second Ctrl-C terminate.
    unsafe {
        libc::signal(libc::SIGINT, libc::SIG_DFL);
    }
}

#[cfg(unix)]
fn install() {
    let handler = on_sigint as extern "C" fn(libc::c_int) as libc::sighandler_t;
    // SAFETY: the handler only touches atomics and calls `signal`.
    let previous = unsafe { libc::signal(libc::SIGINT, handler) };
    if previous == libc::SIG_ERR {
        tracing::warn!("could not install Ctrl-C handler; batches run to completion");
    } else {
        tracing::debug!("Ctrl-C cancels the running batch");
    }
}

#[cfg(not(unix))]
fn install() {
    tracing::debug!("Ctrl-C cancellation is not wired on this platform");
}
