//! postgen is a post-generation hook for project scaffolding.
//! After a host tool renders a template into a new project, it finds the
//! template's bundled `hooks/source` directory and copies a fixed set of
//! files from it into the project unrendered.

/// Command-line interface module for the hook
pub mod cli;

/// Fixed manifest, directory names and search locations
pub mod constants;

/// Manifest copying into the generated project
pub mod copier;

/// Error types and handling for the hook
pub mod error;

/// Payload the host writes to the hook's stdin
pub mod hooks;

pub mod logger;

/// Template directory discovery
/// Tries, in order:
/// - an explicit template directory
/// - the hook binary's own location
/// - the project directory and its parents
/// - container install paths
/// - checkouts under the user's home directory
pub mod resolver;
