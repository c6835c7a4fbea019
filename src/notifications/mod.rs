//! 未读告警轮询与已读回执协调
//!
//! Two cooperating pieces over one shared unread-alert state:
//! - [`AlertPoller`]: fixed-interval polling loop that replaces the local
//!   unread collection wholesale and derives the badge count and the
//!   one-shot attention pulse.
//! - [`NotificationReconciler`]: optimistic mark-as-read with a scheduled
//!   follow-up poll; server state is the single source of truth after
//!   reconciliation.

mod history;
mod poller;
mod reconciler;

pub use history::{AlertHistoryFeed, HistoryFeedConfig};
pub use poller::{AlertPoller, NotificationSnapshot, PollerConfig};
pub use reconciler::NotificationReconciler;
