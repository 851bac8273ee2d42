//! Building blocks of the newznab indexer protocol.
//!
//! - [`codec`]: yes/no booleans and the timestamp formats indexers emit.
//! - [`Category`]: the fixed category table.
//! - [`nerror`]: error codes and code ranges an indexer can respond with.
//! - [`caps`]: the capabilities document.
//! - [`response`]: error documents and the small account/cart responses.

pub mod caps;
mod category;
pub mod codec;
pub mod error;
pub mod nerror;
pub mod response;

pub use crate::caps::Capabilities;
pub use crate::category::Category;
pub use crate::nerror::{IndexerError, NError, NErrorRange};
