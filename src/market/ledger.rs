use crate::host::{CallContext, Identity, TransferError, ValueTransfer};
use crate::market::{Listing, MarketEvent};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Errors that can occur during marketplace ledger operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MarketError {
    #[error("amount must be greater than zero, or attached value must equal the total price")]
    InvalidAmount,

    #[error("insufficient supply: listed {listed}, requested {requested}")]
    InsufficientSupply { listed: u64, requested: u64 },

    #[error("re-entrant call into the marketplace ledger rejected")]
    ReentrancyBlocked,

    #[error("price or balance arithmetic overflowed")]
    Overflow,

    #[error("value transfer to seller failed: {0}")]
    TransferFailed(#[from] TransferError),

    #[error("ledger snapshot decode failed")]
    DecodeFailed,
}

/// Statistics about the marketplace state
#[derive(Clone, Debug)]
pub struct MarketStatistics {
    pub active_listings: usize,
    pub listed_quantity: u64,
    pub energy_traded: u64,
    pub event_count: usize,
}

/// Peer-to-peer energy marketplace ledger.
///
/// Each seller holds at most one listing; a purchase pays the seller the
/// exact total price out of ledger-held escrow and credits the buyer's
/// accumulated energy balance. Every call fully commits or fully rejects.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MarketLedger {
    /// Seller identity -> current listing (replaced wholesale on re-list)
    listings: HashMap<Identity, Listing>,
    /// Buyer identity -> accumulated purchased quantity, never decreases
    energy_balance: HashMap<Identity, u64>,
    /// Append-only notification log for external observers
    events: Vec<MarketEvent>,
    /// In-call guard: rejects nested re-entry during a purchase
    #[serde(skip)]
    in_call: bool,
}

impl MarketLedger {
    pub fn new() -> Self {
        Self {
            listings: HashMap::new(),
            energy_balance: HashMap::new(),
            events: Vec::new(),
            in_call: false,
        }
    }

    /// A seller's current listing, if it ever listed
    pub fn listing(&self, seller: &Identity) -> Option<&Listing> {
        self.listings.get(seller)
    }

    /// Accumulated energy purchased by an identity (zero when unknown)
    pub fn energy_balance(&self, id: &Identity) -> u64 {
        self.energy_balance.get(id).copied().unwrap_or(0)
    }

    /// All notification events, oldest first
    pub fn events(&self) -> &[MarketEvent] {
        &self.events
    }

    /// Get statistics about the marketplace state
    pub fn statistics(&self) -> MarketStatistics {
        MarketStatistics {
            active_listings: self.listings.values().filter(|l| l.is_active()).count(),
            listed_quantity: self.listings.values().map(|l| l.quantity()).sum(),
            energy_traded: self.energy_balance.values().sum(),
            event_count: self.events.len(),
        }
    }

    /// Create or replace the caller's listing. A re-list discards whatever
    /// remained of the prior listing; quantities are not merged.
    pub fn list_energy(
        &mut self,
        ctx: &CallContext,
        quantity: u64,
        unit_price: u64,
    ) -> Result<(), MarketError> {
        if self.in_call {
            return Err(MarketError::ReentrancyBlocked);
        }
        if quantity == 0 || unit_price == 0 {
            return Err(MarketError::InvalidAmount);
        }

        self.listings
            .insert(ctx.caller().clone(), Listing::new(quantity, unit_price));
        self.events.push(MarketEvent::EnergyListed {
            seller: ctx.caller().clone(),
            quantity,
            unit_price,
        });

        tracing::info!(
            seller = %ctx.caller(),
            quantity,
            unit_price,
            "energy listed"
        );

        Ok(())
    }

    /// Buy `quantity` units from `seller`, paying exactly the listed total
    /// price as attached value; the payment is forwarded to the seller
    /// through the host's transfer primitive.
    ///
    /// Bookkeeping is applied before the transfer and restored if the
    /// transfer fails, so seller-side code triggered by the payment can
    /// never observe a listing that still carries the sold quantity.
    pub fn buy_energy(
        &mut self,
        ctx: &CallContext,
        seller: &Identity,
        quantity: u64,
        host: &mut dyn ValueTransfer,
    ) -> Result<(), MarketError> {
        if self.in_call {
            return Err(MarketError::ReentrancyBlocked);
        }
        self.in_call = true;
        let result = self.execute_purchase(ctx, seller, quantity, host);
        self.in_call = false;
        result
    }

    fn execute_purchase(
        &mut self,
        ctx: &CallContext,
        seller: &Identity,
        quantity: u64,
        host: &mut dyn ValueTransfer,
    ) -> Result<(), MarketError> {
        // An absent seller is simply a listing with nothing to sell
        let listing = match self.listings.get(seller) {
            Some(listing) => listing,
            None => {
                return Err(MarketError::InsufficientSupply {
                    listed: 0,
                    requested: quantity,
                })
            }
        };
        if listing.quantity() < quantity {
            return Err(MarketError::InsufficientSupply {
                listed: listing.quantity(),
                requested: quantity,
            });
        }

        let total_price = listing.total_price(quantity).ok_or(MarketError::Overflow)?;
        if ctx.value() != total_price {
            return Err(MarketError::InvalidAmount);
        }

        let balance = self.energy_balance(ctx.caller());
        let new_balance = balance.checked_add(quantity).ok_or(MarketError::Overflow)?;

        // All checks passed: apply bookkeeping before the value transfer
        if let Some(listing) = self.listings.get_mut(seller) {
            listing.deduct(quantity);
        }
        self.energy_balance.insert(ctx.caller().clone(), new_balance);

        if let Err(source) = host.transfer(seller, total_price) {
            // restore both fields so the call is a full rejection
            if let Some(listing) = self.listings.get_mut(seller) {
                listing.restore(quantity);
            }
            self.energy_balance.insert(ctx.caller().clone(), balance);
            return Err(MarketError::TransferFailed(source));
        }

        self.events.push(MarketEvent::EnergyPurchased {
            buyer: ctx.caller().clone(),
            seller: seller.clone(),
            quantity,
            total_price,
        });

        tracing::info!(
            buyer = %ctx.caller(),
            seller = %seller,
            quantity,
            total_price,
            "energy purchased"
        );

        Ok(())
    }

    /// Serialize a snapshot of the ledger to bytes
    pub fn to_bytes(&self) -> Vec<u8> {
        postcard::to_allocvec(self).unwrap_or_default()
    }

    /// Restore a ledger from a snapshot
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, MarketError> {
        postcard::from_bytes(bytes).map_err(|_| MarketError::DecodeFailed)
    }
}

impl Default for MarketLedger {
    fn default() -> Self {
        Self::new()
    }
}
