use crate::host::Identity;
use serde::{Deserialize, Serialize};

/// Notification events appended by the marketplace ledger for external
/// observers (indexers, reporting). Non-authoritative: the ledger state is
/// the source of truth, the log only records what happened.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarketEvent {
    EnergyListed {
        seller: Identity,
        quantity: u64,
        unit_price: u64,
    },
    EnergyPurchased {
        buyer: Identity,
        seller: Identity,
        quantity: u64,
        total_price: u64,
    },
}
