//! Local notification side effects for break transitions.
//!
//! The delivery mechanism is a collaborator behind the `Notifier` trait so
//! the executor stays headless; the default implementation writes to the
//! log. Notifications are local-only and never block a transition.

pub trait Notifier: Send + Sync {
    fn notify(&self, title: &str, body: &str);
}

/// Default notifier: structured log lines.
#[derive(Debug, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, title: &str, body: &str) {
        log::info!("notification: {} - {}", title, body);
    }
}

/// Notify that a break has begun.
pub fn notify_break_started(notifier: &dyn Notifier, break_type: &str, duration_minutes: u32) {
    notifier.notify(
        "Break started",
        &format!(
            "Your {} break has begun ({} min). Take your time!",
            break_type, duration_minutes
        ),
    );
}

/// Notify that a break finished.
pub fn notify_break_completed(notifier: &dyn Notifier, break_type: &str) {
    let body = match break_type {
        "meditation" | "breathing" => "Great job! A calmer stretch of the day ahead.",
        "walk" | "stretch" | "desk_exercise" => "Great job! Your body will thank you.",
        _ => "Great job! You took time for yourself.",
    };
    notifier.notify("Break completed", body);
}

/// Notify that a break was skipped.
pub fn notify_break_skipped(notifier: &dyn Notifier, break_type: &str) {
    notifier.notify(
        "Break skipped",
        &format!("Skipped the {} break. The rest of today's schedule is unchanged.", break_type),
    );
}
