//! Persisted cart.

use storefront_cache::{Cache, Slot};
use tracing::debug;

use crate::cart::{Cart, CartEntry};
use crate::catalog::Product;
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::Money;

/// Storage key holding the cart.
pub const CART_KEY: &str = "cartItems";

/// The cart, persisted after every mutation.
///
/// Each mutation re-reads the stored cart, applies the change and writes
/// it back, so the last writer wins when several processes share storage.
#[derive(Debug, Clone)]
pub struct CartStore {
    slot: Slot<Cart>,
    cart: Cart,
}

impl CartStore {
    /// Open the cart stored in `cache`, empty if none is stored.
    pub fn open(cache: Cache) -> Result<Self, CommerceError> {
        let slot: Slot<Cart> = Slot::new(cache, CART_KEY);
        let cart = slot.get_or_default()?;
        debug!(entries = cart.len(), "cart opened");
        Ok(Self { slot, cart })
    }

    /// Re-read the stored cart.
    pub fn reload(&mut self) -> Result<(), CommerceError> {
        self.cart = self.slot.get_or_default()?;
        Ok(())
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn entries(&self) -> &[CartEntry] {
        self.cart.entries()
    }

    /// Add one unit of `product`. Returns the entry's new quantity.
    pub fn add(&mut self, product: &Product) -> Result<u32, CommerceError> {
        let mut quantity = 0;
        self.cart = self.slot.update(|cart| quantity = cart.add(product))?;
        debug!(id = %product.id, quantity, "added to cart");
        Ok(quantity)
    }

    /// Remove the entry for `id`. Returns whether one was removed.
    pub fn remove(&mut self, id: ProductId) -> Result<bool, CommerceError> {
        let mut removed = false;
        self.cart = self.slot.update(|cart| removed = cart.remove(id))?;
        debug!(%id, removed, "removed from cart");
        Ok(removed)
    }

    /// Set the quantity for `id`. A quantity below 1 is ignored and nothing
    /// is written.
    pub fn set_quantity(&mut self, id: ProductId, quantity: i64) -> Result<bool, CommerceError> {
        if quantity < 1 {
            debug!(%id, quantity, "quantity below one ignored");
            return Ok(false);
        }
        let mut changed = false;
        self.cart = self
            .slot
            .update(|cart| changed = cart.set_quantity(id, quantity))?;
        Ok(changed)
    }

    pub fn increase(&mut self, id: ProductId) -> Result<bool, CommerceError> {
        let mut changed = false;
        self.cart = self.slot.update(|cart| changed = cart.increase(id))?;
        Ok(changed)
    }

    /// Lower the quantity for `id` by one. No-op at 1.
    pub fn decrease(&mut self, id: ProductId) -> Result<bool, CommerceError> {
        let mut changed = false;
        self.cart = self.slot.update(|cart| changed = cart.decrease(id))?;
        Ok(changed)
    }

    /// Empty the cart and delete the stored key.
    pub fn clear(&mut self) -> Result<(), CommerceError> {
        self.slot.delete()?;
        self.cart = Cart::new();
        debug!("cart cleared");
        Ok(())
    }

    pub fn total(&self) -> Money {
        self.cart.total()
    }

    /// Total with two decimals, e.g. "12.00".
    pub fn total_display(&self) -> String {
        self.cart.total_display()
    }

    pub fn item_count(&self) -> u64 {
        self.cart.item_count()
    }

    pub fn len(&self) -> usize {
        self.cart.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cart.is_empty()
    }
}
