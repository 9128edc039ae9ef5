use crate::Probability;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;
use std::sync::Arc;

/// fraction-of-trials-completed callback, invoked after every trial.
/// the callback must not block and cannot fail; callers wanting to
/// stop a run cancel through an [`Abort`] instead.
pub struct Ticker(Box<dyn Fn(Probability) + Send + Sync>);

impl Ticker {
    pub fn tick(&self, fraction: Probability) {
        (self.0)(fraction)
    }
}

impl<F> From<F> for Ticker
where
    F: Fn(Probability) + Send + Sync + 'static,
{
    fn from(f: F) -> Self {
        Self(Box::new(f))
    }
}

/// cooperative cancellation token, checked between trials. clones
/// share one flag so any holder can stop the run.
#[derive(Debug, Clone, Default)]
pub struct Abort(Arc<AtomicBool>);

impl Abort {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed)
    }
    pub fn cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}
