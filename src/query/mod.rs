//! 日志查询子系统
//!
//! Two pieces:
//! - [`LogQuery`]: the canonical, field-omitting query descriptor built from
//!   a [`crate::models::LogFilter`]. Value equality between descriptors is
//!   the sole gate for re-fetching.
//! - [`LogQueryController`]: the Idle/Fetching state machine that issues a
//!   fetch whenever the canonical query changes and suppresses stale
//!   responses with a generation tag.

mod builder;
mod controller;
mod suggestions;


pub use builder::{LogQuery, DEFAULT_PAGE_SIZE};
pub use controller::{LogQueryController, LogViewSnapshot};
pub use suggestions::{load_filter_suggestions, FilterSuggestions};
