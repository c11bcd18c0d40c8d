//! Typed client for the Taskdeck HTTP API.
//!
//! [`api::TaskdeckApi`] wraps the REST endpoints, [`auth`] runs the
//! sign-in and sign-up flows, and [`board::Board`] keeps a local mirror of
//! the caller's todos for the dashboard.

pub mod api;
pub mod auth;
pub mod board;

pub use api::{ApiError, TaskdeckApi};
pub use auth::Session;
pub use board::{Board, BoardView};
