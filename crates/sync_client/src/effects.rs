//! UI capabilities the sync trigger needs: a busy overlay and modal notices.

use shared::domain::{Notice, Severity};
use tracing::{error, info};

pub trait UiEffects: Send + Sync {
    /// Shows a blocking overlay with `message`.
    fn show_busy(&self, message: &str);
    fn hide_busy(&self);
    fn notify(&self, notice: &Notice);
}

/// Keeps the busy overlay up for its own lifetime.
///
/// `hide_busy` runs exactly once: on [`BusyScope::release`] or on drop.
pub struct BusyScope<'a> {
    effects: &'a dyn UiEffects,
    active: bool,
}

impl<'a> BusyScope<'a> {
    pub fn enter(effects: &'a dyn UiEffects, message: &str) -> Self {
        effects.show_busy(message);
        Self {
            effects,
            active: true,
        }
    }

    pub fn release(mut self) {
        self.clear();
    }

    fn clear(&mut self) {
        if self.active {
            self.active = false;
            self.effects.hide_busy();
        }
    }
}

impl Drop for BusyScope<'_> {
    fn drop(&mut self) {
        self.clear();
    }
}

/// Renders notices as log events, for headless runs.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingEffects;

impl UiEffects for TracingEffects {
    fn show_busy(&self, message: &str) {
        info!(text = message, "busy");
    }

    fn hide_busy(&self) {}

    fn notify(&self, notice: &Notice) {
        let indicator = notice.severity.indicator();
        match notice.severity {
            Severity::Info => info!(indicator, title = %notice.title, "{}", notice.message),
            Severity::Success => info!(indicator, title = %notice.title, "{}", notice.message),
            Severity::Error => error!(indicator, title = %notice.title, "{}", notice.message),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use tracing::{Event, Level, Subscriber};
    use tracing_subscriber::{
        layer::{Context, SubscriberExt},
        Layer,
    };

    use super::*;

    #[derive(Clone, Default)]
    struct LevelRecorder(Arc<Mutex<Vec<Level>>>);

    impl<S: Subscriber> Layer<S> for LevelRecorder {
        fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
            self.0.lock().expect("lock").push(*event.metadata().level());
        }
    }

    fn levels_for(notice: &Notice) -> Vec<Level> {
        let recorder = LevelRecorder::default();
        let subscriber = tracing_subscriber::registry().with(recorder.clone());
        tracing::subscriber::with_default(subscriber, || TracingEffects.notify(notice));
        let levels = recorder.0.lock().expect("lock").clone();
        levels
    }

    #[test]
    fn tracing_effects_log_info_notices_at_info_level() {
        let empty = Notice::new(Severity::Info, "Sync", "No new orders were found to sync.");
        let synced = Notice::new(Severity::Success, "Sync", "1 order(s) synced successfully.");
        let failed = Notice::new(Severity::Error, "Sync", "Order sync failed.");

        assert_eq!(levels_for(&empty), [Level::INFO]);
        assert_eq!(levels_for(&synced), [Level::INFO]);
        assert_eq!(levels_for(&failed), [Level::ERROR]);
    }

    #[derive(Default)]
    struct Counter {
        shown: Mutex<u32>,
        hidden: Mutex<u32>,
    }

    impl UiEffects for Counter {
        fn show_busy(&self, _message: &str) {
            *self.shown.lock().expect("lock") += 1;
        }

        fn hide_busy(&self) {
            *self.hidden.lock().expect("lock") += 1;
        }

        fn notify(&self, _notice: &Notice) {}
    }

    #[test]
    fn release_hides_once() {
        let counter = Counter::default();
        let scope = BusyScope::enter(&counter, "working");
        scope.release();
        assert_eq!(*counter.shown.lock().expect("lock"), 1);
        assert_eq!(*counter.hidden.lock().expect("lock"), 1);
    }

    #[test]
    fn drop_hides_when_not_released() {
        let counter = Counter::default();
        {
            let _scope = BusyScope::enter(&counter, "working");
        }
        assert_eq!(*counter.hidden.lock().expect("lock"), 1);
    }

    #[test]
    fn unwinding_hides_overlay() {
        let counter = Counter::default();
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _scope = BusyScope::enter(&counter, "working");
            panic!("boom");
        }));
        assert!(result.is_err());
        assert_eq!(*counter.hidden.lock().expect("lock"), 1);
    }
}
