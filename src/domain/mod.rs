pub mod book;
pub mod catalog;
pub mod commands;
pub mod errors;
pub mod events;
pub mod value_objects;

pub use book::*;
pub use commands::*;
pub use errors::*;
pub use events::*;
pub use value_objects::*;
