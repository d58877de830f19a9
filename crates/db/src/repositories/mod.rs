//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod book_repo;
pub mod borrowing_repo;
pub mod role_repo;
pub mod session_repo;
pub mod user_repo;

pub use book_repo::BookRepo;
pub use borrowing_repo::BorrowingRepo;
pub use role_repo::RoleRepo;
pub use session_repo::SessionRepo;
pub use user_repo::UserRepo;
