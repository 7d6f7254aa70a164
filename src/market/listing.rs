use serde::{Deserialize, Serialize};

/// A seller's currently offered energy: remaining quantity and the price
/// per unit in native value units. At most one listing per seller; re-listing
/// replaces it wholesale.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Listing {
    quantity: u64,
    unit_price: u64,
}

impl Listing {
    pub fn new(quantity: u64, unit_price: u64) -> Self {
        Self {
            quantity,
            unit_price,
        }
    }

    pub fn quantity(&self) -> u64 {
        self.quantity
    }

    pub fn unit_price(&self) -> u64 {
        self.unit_price
    }

    /// A listing with nothing left to sell is inactive but stays recorded
    pub fn is_active(&self) -> bool {
        self.quantity > 0
    }

    /// Total price for buying `quantity` units; None on overflow
    pub fn total_price(&self, quantity: u64) -> Option<u64> {
        self.unit_price.checked_mul(quantity)
    }

    pub(crate) fn deduct(&mut self, quantity: u64) {
        self.quantity -= quantity;
    }

    pub(crate) fn restore(&mut self, quantity: u64) {
        self.quantity += quantity;
    }
}
