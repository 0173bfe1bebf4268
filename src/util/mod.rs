//! Utility modules for filesystem, paths, masking and logging.

pub mod fs;
pub mod logging;
pub mod mask;
pub mod path;
