//! src/facade.rs
//! Process-wide router with explicit setup and teardown.
//!
//! The facade owns at most one [`LogRouter`] per process. It is built on first
//! use, either by a factory registered with [`install`] or with default
//! settings, and lives until [`shutdown`] closes it. Call [`shutdown`] before
//! the process exits so the log file receives its session footer.
//!
//! ```no_run
//! use logging::Severity;
//! use tierlog::facade;
//!
//! facade::write_line("service started", Severity::Notice);
//! facade::shutdown();
//! ```

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use logging::{HostEnvironment, Settings, Severity};

use crate::provider::StaticProvider;
use crate::router::LogRouter;
use crate::status::Status;

type Factory = Box<dyn Fn() -> LogRouter + Send + Sync>;

// Lock order: ROUTER before FACTORY.
static ROUTER: Mutex<Option<Arc<LogRouter>>> = Mutex::new(None);
static FACTORY: Mutex<Option<Factory>> = Mutex::new(None);

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

fn default_router() -> LogRouter {
    let environment = HostEnvironment::detect(env!("CARGO_PKG_VERSION"));
    LogRouter::new(StaticProvider::new(Settings::default(), environment))
}

/// Registers the factory used to build the process-wide router.
///
/// Returns `false`, leaving the current router in place, when a router has
/// already been built. The factory is kept across [`shutdown`] and builds the
/// next router too. It must not call back into this module.
pub fn install(factory: impl Fn() -> LogRouter + Send + Sync + 'static) -> bool {
    let router = lock(&ROUTER);
    if router.is_some() {
        return false;
    }
    *lock(&FACTORY) = Some(Box::new(factory));
    true
}

/// Returns the process-wide router, building it on first use.
///
/// Concurrent first callers build it exactly once.
pub fn router() -> Arc<LogRouter> {
    let mut slot = lock(&ROUTER);
    if let Some(router) = slot.as_ref() {
        return Arc::clone(router);
    }

    let router = Arc::new(match lock(&FACTORY).as_ref() {
        Some(factory) => factory(),
        None => default_router(),
    });
    tracing::debug!(status = ?router.status(), "built process-wide log router");
    *slot = Some(Arc::clone(&router));
    router
}

/// Reports whether the process-wide router currently exists.
pub fn is_initialized() -> bool {
    lock(&ROUTER).is_some()
}

/// Routes `message` through the process-wide router.
pub fn write(message: &str, level: Severity, header_override: Option<&str>) {
    router().write(message, level, header_override);
}

/// Routes `message` with the configured keyword.
pub fn write_line(message: &str, level: Severity) {
    router().write_line(message, level);
}

/// Switches detail mode on the process-wide router.
pub fn set_detail_mode(enabled: bool) {
    router().set_detail_mode(enabled);
}

/// Returns the status of the process-wide router.
pub fn status() -> Status {
    router().status()
}

/// Closes and releases the process-wide router.
///
/// The log file is finished even if other threads still hold a handle from
/// [`router`]. Returns `false` when no router existed. The next call into this
/// module builds a fresh router.
pub fn shutdown() -> bool {
    let Some(router) = lock(&ROUTER).take() else {
        return false;
    };
    router.close();
    tracing::debug!("shut down process-wide log router");
    true
}
