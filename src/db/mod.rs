pub mod books;
pub mod postgres;

pub use books::{BookStore, MemoryBookStore, PgBookStore};
pub use postgres::create_pool;
