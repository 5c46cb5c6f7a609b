//! Client core: catalog, best-server policy, connect timer and the session
//! context that ties them together.

pub mod catalog;
pub mod context;
pub mod selector;
pub mod timer;

pub use catalog::Catalog;
pub use context::SessionContext;
pub use timer::{ConnectScheduler, ManualScheduler, ThreadScheduler, TimerHandle};
