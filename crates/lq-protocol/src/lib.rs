pub mod lead;
pub mod profile;
pub mod scoring;
pub mod summary;

pub use lead::*;
pub use profile::*;
pub use scoring::*;
pub use summary::*;
