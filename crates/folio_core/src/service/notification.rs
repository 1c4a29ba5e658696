//! Notification lifecycle.
//!
//! # Responsibility
//! - Keep at most one toast alive and drive it through
//!   `Entering -> Visible -> Dismissing -> Removed` with timers.
//!
//! # Invariants
//! - Creating a toast synchronously removes the previous one (no exit
//!   animation) and cancels every timer in the previous toast's group.
//! - A timer callback only mutates the toast it was scheduled for, and only
//!   from the state it was scheduled in.
//! - Message text is never written to logs.

use crate::config::NotificationConfig;
use crate::model::effect::Effect;
use crate::model::notification::{Notification, NotificationId, NotificationState, Severity};
use crate::service::{NotificationStep, ScheduledTask, Timers};
use log::{debug, info, warn};

/// Class that keeps the toast off-screen.
pub const OFFSCREEN_CLASS: &str = "translate-x-full";

const BASE_CLASSES: &[&str] = &[
    "notification",
    "fixed",
    "top-24",
    "right-4",
    "z-50",
    "p-4",
    "rounded-lg",
    "shadow-lg",
    "transform",
    OFFSCREEN_CLASS,
    "transition-all",
    "duration-300",
    "max-w-sm",
];

#[derive(Debug)]
pub struct NotificationCenter {
    current: Option<Notification>,
    config: NotificationConfig,
}

impl NotificationCenter {
    pub fn new(config: NotificationConfig) -> Self {
        Self {
            current: None,
            config,
        }
    }

    /// The live toast, if any.
    pub fn current(&self) -> Option<&Notification> {
        self.current.as_ref()
    }

    /// Replaces any live toast with a new one in `Entering`.
    pub fn show(
        &mut self,
        message: impl Into<String>,
        severity: Severity,
        timers: &mut Timers,
    ) -> Vec<Effect> {
        let mut effects = Vec::new();
        if let Some(previous) = self.current.take() {
            let cancelled = timers.cancel_group(previous.id);
            effects.push(Effect::RemoveElement {
                target: previous.element(),
            });
            debug!(
                "event=notification_replace module=notification previous_state={:?} cancelled_timers={}",
                previous.state, cancelled
            );
        }

        let notification = Notification::new(message, severity);
        let mut classes: Vec<String> = BASE_CLASSES.iter().map(|class| class.to_string()).collect();
        classes.push(severity.background_class().to_string());
        classes.push("text-white".to_string());

        effects.push(Effect::MountNotification {
            target: notification.element(),
            message: notification.message.clone(),
            severity,
            icon: severity.icon_name().to_string(),
            classes,
        });
        effects.push(Effect::RenderIcons);

        schedule_step(
            notification.id,
            self.config.enter_delay_ms,
            NotificationStep::Show,
            timers,
        );
        info!(
            "event=notification_show module=notification status=ok severity={} message_chars={}",
            severity.as_str(),
            notification.message.chars().count()
        );
        self.current = Some(notification);
        effects
    }

    /// Timer callback for toast `id`.
    pub fn on_timer(
        &mut self,
        id: NotificationId,
        step: NotificationStep,
        timers: &mut Timers,
    ) -> Vec<Effect> {
        let Some(current) = self.current.as_mut() else {
            debug!("event=notification_timer_stale module=notification reason=no_live_toast");
            return Vec::new();
        };
        if current.id != id {
            debug!("event=notification_timer_stale module=notification reason=superseded");
            return Vec::new();
        }

        let element = current.element();
        match (step, current.state) {
            (NotificationStep::Show, NotificationState::Entering) => {
                current.state = NotificationState::Visible;
                schedule_step(id, self.config.visible_ms, NotificationStep::Dismiss, timers);
                vec![Effect::remove_class(&element, OFFSCREEN_CLASS)]
            }
            (NotificationStep::Dismiss, NotificationState::Visible) => {
                current.state = NotificationState::Dismissing;
                schedule_step(id, self.config.exit_ms, NotificationStep::Remove, timers);
                vec![Effect::add_class(&element, OFFSCREEN_CLASS)]
            }
            (NotificationStep::Remove, NotificationState::Dismissing) => {
                current.state = NotificationState::Removed;
                self.current = None;
                debug!("event=notification_removed module=notification status=ok");
                vec![Effect::RemoveElement { target: element }]
            }
            (step, state) => {
                warn!(
                    "event=notification_timer_unexpected module=notification step={:?} state={:?}",
                    step, state
                );
                Vec::new()
            }
        }
    }
}

fn schedule_step(id: NotificationId, delay_ms: u64, step: NotificationStep, timers: &mut Timers) {
    timers.schedule(delay_ms, Some(id), ScheduledTask::Notification { id, step });
}
