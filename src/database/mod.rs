//! Database layer for the persistent store.
//!
//! # Usage
//!
//! ```no_run
//! use chapter_reader::database::Database;
//!
//! let db = Database::open("chapter-reader.db").expect("failed to open database");
//! let conn = db.connection();
//! ```

pub mod connection;
pub mod migrations;

pub use connection::Database;
