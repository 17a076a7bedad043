pub mod lifecycle;
pub mod sweep;

pub use lifecycle::DebtLifecycleService;
