pub mod project_manager;

pub use project_manager::TestProject;
