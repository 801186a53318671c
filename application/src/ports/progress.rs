//! Progress notification port
//!
//! Defines the interface for reporting which pipeline stage a request is in.

use ganesha_domain::Stage;

/// Callback for stage transitions during a respond request
///
/// Implementations live in the presentation layer (spinner, plain log
/// lines, nothing at all).
pub trait StageNotifier: Send + Sync {
    /// Called when the request enters `stage`. Terminal stages are reported last.
    fn on_stage(&self, stage: Stage);
}

/// No-op notifier for when progress reporting is not needed
pub struct NoProgress;

impl StageNotifier for NoProgress {
    fn on_stage(&self, _stage: Stage) {}
}
