//! SFF container format: record layout and directory table parser.

pub mod directory;
pub mod record;

// Re-export main types for convenience
pub use directory::parse_directory;
pub use directory::read_directory;
pub use record::NAME_FIELD_LEN;
pub use record::RECORD_SIZE;
pub use record::SENTINEL;
