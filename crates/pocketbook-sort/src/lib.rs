pub mod category;
pub mod error;
pub mod sorter;

pub use category::Category;
pub use error::SortError;
pub use sorter::{sort_directory, MovedFile, SortReport};
