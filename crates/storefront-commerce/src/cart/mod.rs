//! Shopping cart module.
//!
//! Contains the cart and its entries.

mod cart;

pub use cart::{Cart, CartEntry};
