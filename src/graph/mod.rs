pub mod conversion;
pub mod definition;
pub mod store;

pub use conversion::*;
pub use definition::*;
pub use store::*;
