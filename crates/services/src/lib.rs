//! # services
//!
//! Business rules layered over the stores: ownership checks, input
//! validation, and session token issuance.

mod ads;
mod board;
mod users;
pub mod validation;

pub use board::BoardService;
