//! Observer trait for per-stage run events.
//!
//! Inject an [`Arc<dyn RunObserver>`] via
//! [`crate::config::RunConfigBuilder::observer`] to be told what the pipeline
//! is doing: how many bytes were read, where the artifact was written, how
//! the child exited and whether the artifact was removed.
//!
//! [`RunObserver::on_materialized`] fires after the mode bits are set and
//! before the child is spawned, so it is the place to inspect the artifact
//! exactly as the child will see it.
//!
//! # Example
//!
//! ```rust
//! use elfexec::{RunConfig, RunObserver};
//! use std::path::Path;
//! use std::sync::Arc;
//!
//! struct Announce;
//!
//! impl RunObserver for Announce {
//!     fn on_materialized(&self, path: &Path) {
//!         eprintln!("about to run {}", path.display());
//!     }
//! }
//!
//! let config = RunConfig::builder()
//!     .observer(Arc::new(Announce))
//!     .build()
//!     .unwrap();
//! ```

use crate::output::ChildOutcome;
use std::path::Path;
use std::sync::Arc;

/// Called by the pipeline as it moves through each stage.
///
/// All methods have default no-op implementations so implementors only
/// override what they care about. Calls are made from the thread driving the
/// run, in pipeline order.
pub trait RunObserver: Send + Sync {
    /// Called once the input bytes are in memory.
    ///
    /// # Arguments
    /// * `source`: input path, or `None` when running from a byte buffer
    /// * `len`: number of bytes read
    fn on_read(&self, source: Option<&Path>, len: usize) {
        let _ = (source, len);
    }

    /// Called when the artifact is on disk, executable, and about to be spawned.
    fn on_materialized(&self, path: &Path) {
        let _ = path;
    }

    /// Called after the child has exited or failed to start.
    fn on_child_exit(&self, outcome: &ChildOutcome) {
        let _ = outcome;
    }

    /// Called after the cleanup attempt.
    ///
    /// # Arguments
    /// * `path`: artifact path
    /// * `removed`: `false` if removing the artifact failed
    fn on_cleanup(&self, path: &Path, removed: bool) {
        let _ = (path, removed);
    }
}

/// A no-op implementation for callers that don't need events.
pub struct NoopObserver;

impl RunObserver for NoopObserver {}

/// Convenience alias matching the type stored in [`crate::config::RunConfig`].
pub type SharedObserver = Arc<dyn RunObserver>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recorder {
        events: Mutex<Vec<String>>,
    }

    impl RunObserver for Recorder {
        fn on_read(&self, _source: Option<&Path>, len: usize) {
            self.events.lock().unwrap().push(format!("read {len}"));
        }

        fn on_cleanup(&self, _path: &Path, removed: bool) {
            self.events.lock().unwrap().push(format!("cleanup {removed}"));
        }
    }

    #[test]
    fn noop_observer_does_not_panic() {
        let o = NoopObserver;
        o.on_read(None, 0);
        o.on_materialized(Path::new("/tmp/x"));
        o.on_child_exit(&ChildOutcome::Success);
        o.on_cleanup(Path::new("/tmp/x"), true);
    }

    #[test]
    fn overridden_methods_receive_events() {
        let rec = Recorder::default();
        rec.on_read(Some(Path::new("/bin/true")), 12);
        rec.on_materialized(Path::new("/tmp/x"));
        rec.on_cleanup(Path::new("/tmp/x"), true);
        assert_eq!(*rec.events.lock().unwrap(), vec!["read 12", "cleanup true"]);
    }

    #[test]
    fn arc_dyn_observer_works() {
        let o: SharedObserver = Arc::new(NoopObserver);
        o.on_read(None, 5);
    }
}
