//! Input records: per-user settings plus habits, goals and reminders.
//!
//! Records deserialize leniently: malformed fields become neutral values instead of errors.

pub(crate) mod lenient;
/// Habits, goals, reminders and focus-goal selection.
pub mod records;
/// Settings, enums and per-request query overrides.
pub mod settings;
