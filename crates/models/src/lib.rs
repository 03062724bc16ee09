//! Domain types shared by the catalog service and the HTTP layer.

pub mod errors;
pub mod filter;
pub mod toy;
pub mod user;
