//! Movie catalog domain module.
//!
//! This crate contains the business rules for movie records (shape, field
//! validation, partial updates), implemented purely as deterministic domain
//! logic (no IO, no HTTP, no storage).

pub mod movie;
pub mod validation;

pub use movie::{Movie, MoviePatch, NewMovie, Payload};
pub use validation::validate;
