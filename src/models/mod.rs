pub mod category;
pub mod page;
pub mod report;
pub mod task;
pub mod work_item;
