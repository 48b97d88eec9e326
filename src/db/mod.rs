pub mod categories;
pub mod initialize;
pub mod log;
pub mod migrate;
pub mod pool;
pub mod reports;
pub mod stats;
pub mod tasks;
pub mod work_items;
