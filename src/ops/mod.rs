pub mod dashboard;
pub mod filter;
pub mod productivity;
pub mod search;
pub mod task_ops;
