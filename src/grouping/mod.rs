//! Date-bucketed conversation history.
//!
//! Conversations are assigned to named [`TimeWindow`]s for display. Windows
//! are evaluated in the order given and the first one whose cutoff a
//! conversation's `modified_time` is strictly after wins, so overlapping
//! cutoffs still produce exclusive buckets:
//!
//! ```text
//! Today      cutoff = now - 1d   <- claims everything newer than 1d
//! Yesterday  cutoff = now - 2d   <- only sees what Today left: 1d..2d
//! Older      cutoff = epoch      <- the rest
//! ```
//!
//! Windows are never sorted. Reordering them changes the result.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::model::Conversation;

/// A named lower bound on recency.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeWindow {
    /// Display label, e.g. "Today".
    pub label: String,
    /// Conversations modified strictly after this instant match.
    pub cutoff: DateTime<Utc>,
}

impl TimeWindow {
    /// Create a window.
    pub fn new(label: impl Into<String>, cutoff: DateTime<Utc>) -> Self {
        Self {
            label: label.into(),
            cutoff,
        }
    }

    fn admits(&self, conversation: &Conversation) -> bool {
        conversation.modified_time() > self.cutoff
    }
}

/// Configuration form of a [`TimeWindow`], relative to a reference instant.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct WindowSpec {
    /// Display label.
    pub label: String,
    /// Maximum age in hours; absent means "since the epoch".
    #[serde(default)]
    pub max_age_hours: Option<u32>,
}

impl WindowSpec {
    /// Create a spec.
    pub fn new(label: impl Into<String>, max_age_hours: Option<u32>) -> Self {
        Self {
            label: label.into(),
            max_age_hours,
        }
    }

    /// Resolve against `now`.
    pub fn resolve(&self, now: DateTime<Utc>) -> TimeWindow {
        let cutoff = match self.max_age_hours {
            Some(hours) => now - Duration::hours(i64::from(hours)),
            None => DateTime::UNIX_EPOCH,
        };
        TimeWindow::new(self.label.clone(), cutoff)
    }
}

/// The stock bucket configuration: Today, Yesterday, Older.
pub fn default_window_specs() -> Vec<WindowSpec> {
    vec![
        WindowSpec::new("Today", Some(24)),
        WindowSpec::new("Yesterday", Some(48)),
        WindowSpec::new("Older", None),
    ]
}

/// [`default_window_specs`] resolved against `now`.
pub fn default_windows(now: DateTime<Utc>) -> Vec<TimeWindow> {
    resolve_windows(&default_window_specs(), now)
}

/// Resolve every spec against the same `now`, keeping order.
pub fn resolve_windows(specs: &[WindowSpec], now: DateTime<Utc>) -> Vec<TimeWindow> {
    specs.iter().map(|spec| spec.resolve(now)).collect()
}

/// One display bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConversationGroup {
    /// Label of the window this group came from.
    pub name: String,
    /// Members, in input order.
    pub conversations: Vec<Conversation>,
}

/// Buckets in window order, one per window (possibly empty).
pub type GroupedConversations = Vec<ConversationGroup>;

/// Partition `conversations` into one group per window.
///
/// Each conversation goes to the first window that admits it; a conversation
/// admitted by none is dropped. Relative order within a group follows the
/// input.
pub fn group(conversations: Vec<Conversation>, windows: &[TimeWindow]) -> GroupedConversations {
    let mut groups: GroupedConversations = windows
        .iter()
        .map(|window| ConversationGroup {
            name: window.label.clone(),
            conversations: Vec::new(),
        })
        .collect();

    for conversation in conversations {
        match windows.iter().position(|window| window.admits(&conversation)) {
            Some(index) => groups[index].conversations.push(conversation),
            None => debug!(
                id = %conversation.id(),
                modified_time = %conversation.modified_time(),
                "Conversation older than every window, omitted"
            ),
        }
    }

    groups
}
