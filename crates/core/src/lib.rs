//! Domain types and pure logic shared by the server and the client.

pub mod board;
pub mod error;
pub mod project;
pub mod session;
pub mod signup;
pub mod todo;
pub mod types;
