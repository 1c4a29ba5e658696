//! Page components.
//!
//! # Responsibility
//! - Hold each component's state object and its event handlers.
//! - Turn (event, state) into effect lists; never touch the page directly.
//!
//! # Invariants
//! - Components are independent: none reads another component's state.
//! - Every delayed action goes through the shared timer queue.

pub mod contact_form;
pub mod form_validator;
pub mod menu;
pub mod navigation;
pub mod notification;
pub mod scroll_extras;
pub mod skills;
pub mod theme;
pub mod visibility;

use crate::model::notification::NotificationId;
use crate::timer::TimerQueue;

/// Step of the toast lifecycle driven by a timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationStep {
    Show,
    Dismiss,
    Remove,
}

/// Every delayed action the runtime can schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduledTask {
    Notification {
        id: NotificationId,
        step: NotificationStep,
    },
    SkillsSettle,
    SkillBarWidth {
        index: usize,
    },
    ContactSendComplete,
}

pub type Timers = TimerQueue<ScheduledTask>;
