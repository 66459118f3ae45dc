pub mod analyzer_panel;
pub mod logs_view;
pub mod page;
pub mod rule_list;

pub use page::AdminDashboard;
