// Auction module - sealed reverse-auction ledger
// Lowest unique bid wins; bid value is escrowed by the ledger for its lifetime

mod ledger;

pub use ledger::{AuctionError, AuctionLedger, LowestBid, Phase};
