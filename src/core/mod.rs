pub mod aggregation;
pub mod category;
pub mod clock;
pub mod log;
pub mod report;
pub mod task;
pub mod validation;
pub mod work;
