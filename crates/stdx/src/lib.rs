//! Small shared helpers that have no better home.

struct DeferGuard<F: FnOnce()>(Option<F>);

impl<F: FnOnce()> Drop for DeferGuard<F> {
    fn drop(&mut self) {
        if let Some(f) = self.0.take() {
            f()
        }
    }
}

/// Returns a guard that runs `f` when dropped.
pub fn defer<F: FnOnce()>(f: F) -> impl Drop {
    DeferGuard(Some(f))
}

/// Logs (at debug level) when a scope is entered and how long it took once
/// the returned guard is dropped.
pub fn time_scope(label: &'static str) -> impl Drop {
    let start = std::time::Instant::now();
    log::debug!("{}: started", label);
    defer(move || log::debug!("{}: done in {:?}", label, start.elapsed()))
}
