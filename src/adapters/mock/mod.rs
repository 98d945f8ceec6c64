pub mod book_repository;

pub use book_repository::{BookRepository as InMemoryBookRepository, LoadFailure};
