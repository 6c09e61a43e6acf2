use shared::domain::{Notice, Severity};
use sync_client::UiEffects;

/// Renders the busy overlay and notices on stderr.
#[derive(Debug, Default)]
pub struct TerminalEffects;

impl UiEffects for TerminalEffects {
    fn show_busy(&self, message: &str) {
        eprint!("{message}");
    }

    fn hide_busy(&self) {
        eprintln!();
    }

    fn notify(&self, notice: &Notice) {
        eprintln!("{}", render_notice(notice));
    }
}

pub fn render_notice(notice: &Notice) -> String {
    let marker = match notice.severity {
        Severity::Info => "!",
        Severity::Success => "✓",
        Severity::Error => "✗",
    };
    format!(
        "{marker} [{}] {}: {}",
        notice.severity.indicator(),
        notice.title,
        notice.message
    )
}
