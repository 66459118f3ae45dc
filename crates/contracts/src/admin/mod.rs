pub mod analyzer;
pub mod logs;
pub mod rules;
