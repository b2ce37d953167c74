//! In-memory stores backed by an ordered map behind a single mutex.

mod ads;
mod users;

pub use ads::InMemoryAdRepository;
pub use users::InMemoryUserRepository;
