pub mod cmd;
pub mod file;
pub mod path;
pub mod report;
pub mod settings;
pub mod tools;

// Public library API - if you are embedding workshop as a library these are
// the types you want (but everything is public so go nuts).
pub use file::manager::FileManager;
pub use path::{PathAuthority, PathError};
pub use settings::Settings;
pub use tools::r#trait::ToolExecutor;
pub use tools::registry::ToolRegistry;
