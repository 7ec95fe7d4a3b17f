//! The boundary between query construction and the database wire client.
//!
//! This crate does not speak any protocol itself. A [`Connection`] is
//! supplied by the application; on top of it this crate offers result rows,
//! single-result accessors, index and constraint management and a port poll
//! for freshly started servers.

pub mod config;
pub mod connection;
pub mod database;
pub mod err;
pub mod result;
mod wait;

pub use config::{ConnectionConfig, PollConfig};
pub use connection::{no_rows, Connection, Parameters, Rows};
pub use database::GraphDatabase;
pub use err::{ClientError, ClientResult};
pub use result::{first, single, ResultRow};
pub use wait::wait_for_port;
