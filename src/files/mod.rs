//! Static-file machinery: request-path resolution, content-type inference
//! and directory listing generation.

pub mod listing;
pub mod mime;
pub mod resolve;

pub use resolve::{resolve, Resolved};
