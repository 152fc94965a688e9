pub mod command;
pub mod rel_path;
