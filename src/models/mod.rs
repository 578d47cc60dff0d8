pub mod message;
pub mod schema;

pub use message::{Message, Role};
pub use schema::{Column, Constraint, Index, Schema, Table};
