//! Configuration: project file locations and user settings

pub mod paths;
pub mod settings;

pub use paths::ProjectPaths;
pub use settings::Settings;
