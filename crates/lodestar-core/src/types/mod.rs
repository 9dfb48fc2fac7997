//! Type definitions for extension manifests, the remote catalog, and devfiles

mod catalog_types;
mod devfile_types;
mod manifest_types;

pub use catalog_types::*;
pub use devfile_types::*;
pub use manifest_types::*;
