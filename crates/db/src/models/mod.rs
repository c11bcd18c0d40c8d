//! Row structs and DTOs owned by the persistence layer.
//!
//! Todo and project entities live in `taskdeck_core` because the client
//! shares them; only account rows stay here.

pub mod user;
