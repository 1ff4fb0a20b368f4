//! Newtype wrappers for domain values.
//!
//! Everything in here validates at the boundary and is plain data afterwards.

mod email;
mod id;
mod quantity;
mod role;

pub use email::{Email, EmailError};
pub use id::{ProductId, UserId};
pub use quantity::{Quantity, QuantityError};
pub use role::Role;
