pub mod downloads;
pub mod pages;
pub mod requests;

pub use downloads::*;
pub use pages::*;
pub use requests::*;
