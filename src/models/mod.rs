pub mod aggregates;
pub mod alert;
pub mod filters;
pub mod log_entry;
pub mod settings;

// 重新导出核心类型
pub use aggregates::{LevelCount, LogCount, ServiceCount};
pub use alert::Alert;
pub use filters::LogFilter;
pub use log_entry::{LogEntry, LogLevel, LogPage, ParseLevelError, INVALID_TIMESTAMP};
pub use settings::{AlertLevelPreference, UserSettings};
