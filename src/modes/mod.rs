pub mod human;
pub mod scheduler;

pub use human::HumanMode;
pub use scheduler::TokioScheduler;
