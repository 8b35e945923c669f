//! Validated path types used during extraction.
//!
//! Both types are validated upon construction: a [`SanitizedName`] can only
//! come out of [`sanitize`], a [`DestDir`] only out of a checked existing
//! directory. The engine never joins raw entry names onto the filesystem.

pub mod dest_dir;
pub mod sanitized_name;

pub use dest_dir::DestDir;
pub use sanitized_name::PLACEHOLDER;
pub use sanitized_name::SanitizedName;
pub use sanitized_name::sanitize;
