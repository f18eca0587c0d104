use std::future::Future;
use std::pin::Pin;

use parking_lot::Mutex;

/// A boxed teardown future.
pub type CleanupFuture = Pin<Box<dyn Future<Output = ()> + Send>>;

/// A deferred teardown callback.
pub type Cleanup = Box<dyn FnOnce() -> CleanupFuture + Send>;

/// The capabilities the lifecycle manager needs from a test runner.
///
/// Modeled on what `testing.TB` offers a Go test: a name for diagnostics, a
/// fatal reporting path that aborts the current test, a non-fatal one that
/// does not, and cleanup registration. The lifecycle manager is written
/// against this trait only, so it can be driven by any runner - or outside a
/// test entirely, with [`RecordingHarness`] or a custom adapter.
pub trait TestHarness: Send + Sync {
    /// Human-readable name of the running test, used in diagnostics.
    fn name(&self) -> String;

    /// Report an error and abort the current test.
    fn fatal(&self, message: &str) -> !;

    /// Report an error without aborting.
    fn error(&self, message: &str);

    /// Register a callback to run when the test finishes. Callbacks run in
    /// reverse registration order.
    fn register_cleanup(&self, cleanup: Cleanup);
}

/// The harness used by ordinary `#[tokio::test]` functions.
///
/// `fatal` panics (which is how a Rust test aborts), `error` logs through
/// tracing, and registered cleanups run when [`run_cleanups`] is awaited or
/// when the harness is dropped. Dropping only works on a multi-thread
/// runtime; on a current-thread runtime await [`run_cleanups`] explicitly.
///
/// [`run_cleanups`]: SimpleTestHarness::run_cleanups
pub struct SimpleTestHarness {
    name: String,
    cleanups: Mutex<Vec<Cleanup>>,
}

impl SimpleTestHarness {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cleanups: Mutex::new(Vec::new()),
        }
    }

    /// Run all registered cleanups, most recent first.
    pub async fn run_cleanups(&self) {
        loop {
            // take one at a time so a cleanup registering another is honored
            let cleanup = self.cleanups.lock().pop();
            match cleanup {
                Some(cleanup) => cleanup().await,
                None => break,
            }
        }
    }
}

impl TestHarness for SimpleTestHarness {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn fatal(&self, message: &str) -> ! {
        panic!("{}: {}", self.name, message);
    }

    fn error(&self, message: &str) {
        tracing::error!(test = %self.name, "{}", message);
    }

    fn register_cleanup(&self, cleanup: Cleanup) {
        self.cleanups.lock().push(cleanup);
    }
}

impl Drop for SimpleTestHarness {
    fn drop(&mut self) {
        let mut cleanups: Vec<Cleanup> = std::mem::take(&mut *self.cleanups.lock());
        if cleanups.is_empty() {
            return;
        }
        match tokio::runtime::Handle::try_current() {
            Ok(handle)
                if matches!(
                    handle.runtime_flavor(),
                    tokio::runtime::RuntimeFlavor::MultiThread
                ) =>
            {
                tokio::task::block_in_place(|| {
                    handle.block_on(async {
                        while let Some(cleanup) = cleanups.pop() {
                            cleanup().await;
                        }
                    })
                });
            }
            Ok(_) => {
                tracing::warn!(
                    test = %self.name,
                    "cleanups pending on a current-thread runtime; await run_cleanups() before dropping"
                );
            }
            Err(_) => {
                // no runtime at all, e.g. the harness outlived the test body
                match tokio::runtime::Builder::new_current_thread().enable_all().build() {
                    Ok(rt) => rt.block_on(async {
                        while let Some(cleanup) = cleanups.pop() {
                            cleanup().await;
                        }
                    }),
                    Err(e) => {
                        tracing::error!(test = %self.name, error = %e, "unable to run cleanups")
                    }
                }
            }
        }
    }
}

/// A stub harness that records non-fatal errors and holds cleanups for
/// inspection. Useful for testing harness-driven code and for running the
/// lifecycle manager outside a test context, e.g. in a setup script.
#[derive(Default)]
pub struct RecordingHarness {
    name: String,
    errors: Mutex<Vec<String>>,
    cleanups: Mutex<Vec<Cleanup>>,
}

impl RecordingHarness {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            errors: Mutex::new(Vec::new()),
            cleanups: Mutex::new(Vec::new()),
        }
    }

    /// Every message reported through [`TestHarness::error`] so far.
    pub fn errors(&self) -> Vec<String> {
        self.errors.lock().clone()
    }

    /// Run all registered cleanups, most recent first.
    pub async fn run_cleanups(&self) {
        loop {
            let cleanup = self.cleanups.lock().pop();
            match cleanup {
                Some(cleanup) => cleanup().await,
                None => break,
            }
        }
    }

    /// Number of cleanups registered and not yet run.
    pub fn pending_cleanups(&self) -> usize {
        self.cleanups.lock().len()
    }
}

impl TestHarness for RecordingHarness {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn fatal(&self, message: &str) -> ! {
        panic!("{}: {}", self.name, message);
    }

    fn error(&self, message: &str) {
        self.errors.lock().push(message.to_string());
    }

    fn register_cleanup(&self, cleanup: Cleanup) {
        self.cleanups.lock().push(cleanup);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    #[tokio::test]
    async fn test_cleanups_run_in_reverse_order() {
        let harness = SimpleTestHarness::new("test_cleanups_run_in_reverse_order");
        let order = Arc::new(Mutex::new(Vec::new()));
        for i in 0..3 {
            let order = Arc::clone(&order);
            harness.register_cleanup(Box::new(move || {
                Box::pin(async move {
                    order.lock().push(i);
                })
            }));
        }
        harness.run_cleanups().await;
        assert_eq!(*order.lock(), vec![2, 1, 0]);
        // nothing left for the Drop path
        harness.run_cleanups().await;
    }

    #[tokio::test]
    async fn test_recording_harness_records_errors() {
        let harness = RecordingHarness::new("test_recording_harness_records_errors");
        assert!(harness.errors().is_empty());
        harness.error("first");
        harness.error("second");
        assert_eq!(harness.errors(), vec!["first", "second"]);
    }

    #[test]
    #[should_panic(expected = "boom")]
    fn test_fatal_panics() {
        let harness = RecordingHarness::new("test_fatal_panics");
        harness.fatal("boom");
    }

    #[tokio::test]
    async fn test_recording_harness_holds_cleanups() {
        let harness = RecordingHarness::new("test_recording_harness_holds_cleanups");
        let ran = Arc::new(Mutex::new(false));
        let flag = Arc::clone(&ran);
        harness.register_cleanup(Box::new(move || {
            Box::pin(async move {
                *flag.lock() = true;
            })
        }));
        assert_eq!(harness.pending_cleanups(), 1);
        harness.run_cleanups().await;
        assert_eq!(harness.pending_cleanups(), 0);
        assert!(*ran.lock());
    }
}
