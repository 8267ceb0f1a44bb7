pub mod notice;
pub mod notifier;
pub mod task;

pub use notice::*;
pub use notifier::{ArcNotifier, Notifier};
pub use task::{ParseStatusError, Status, Task};
