//! Navigation state derived from scroll offset.

use serde::Serialize;

/// Result of one navigation recomputation.
///
/// Never persisted; rebuilt from scratch on every scroll tick.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NavState {
    /// Section id of the active entry, `None` when no section qualifies.
    pub active_section_id: Option<String>,
    pub header_elevated: bool,
}
