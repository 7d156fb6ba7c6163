//! Command implementations

pub mod file;
pub mod fix;
pub mod inspect;
pub mod list;

pub use file::fix_file;
pub use fix::fix_directory;
pub use inspect::inspect_paths;
pub use list::list_tomograms;
