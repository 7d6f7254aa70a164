// Market module - peer-to-peer energy marketplace ledger
// Sellers list energy at a unit price; buyers purchase with exact payment
// forwarded to the seller

mod event;
mod ledger;
mod listing;

pub use event::MarketEvent;
pub use ledger::{MarketError, MarketLedger, MarketStatistics};
pub use listing::Listing;
