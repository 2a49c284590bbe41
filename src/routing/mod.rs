//! Routing module
//!
//! Prefix-based route table consulted by the dispatcher. Routing order is a
//! value built at startup rather than control flow.

mod table;

pub use table::{Route, RouteTable, RouteTarget};
