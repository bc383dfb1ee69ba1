pub mod file;
pub mod registry;
pub mod run_build_test;
pub mod r#trait;
