mod error;
mod traits;

pub mod filesystem;

pub use error::StorageError;
pub use filesystem::FsObjectStore;
pub use traits::ObjectStore;
