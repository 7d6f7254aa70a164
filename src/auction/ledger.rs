use crate::host::{CallContext, Identity};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

/// Lifecycle stage of the auction ledger. The only transition is
/// Open -> Closed, performed by the owner; it never reverses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Open,
    Closed,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Open => write!(f, "open"),
            Phase::Closed => write!(f, "closed"),
        }
    }
}

/// Errors that can occur during auction ledger operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuctionError {
    #[error("operation requires the {required} phase, ledger is {current}")]
    PhaseViolation { required: Phase, current: Phase },

    #[error("only the owner may perform this operation")]
    AccessDenied,

    #[error("caller has already placed a bid")]
    DuplicateBid,

    #[error("bid value must be greater than zero")]
    InvalidAmount,

    #[error("held value would overflow")]
    Overflow,

    #[error("ledger snapshot decode failed")]
    DecodeFailed,
}

/// The current lowest bid and the identity that placed it
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LowestBid {
    bidder: Identity,
    amount: u64,
}

impl LowestBid {
    pub fn bidder(&self) -> &Identity {
        &self.bidder
    }

    pub fn amount(&self) -> u64 {
        self.amount
    }
}

/// Sealed reverse-auction ledger: each identity places at most one nonzero
/// bid while the ledger is open, and the lowest bid wins once the owner
/// closes bidding.
///
/// Attached bid value stays held by the ledger for its lifetime; there is
/// no refund or withdrawal path.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AuctionLedger {
    /// Identity that created the auction, immutable
    owner: Identity,
    /// Open until the owner closes bidding, then frozen
    phase: Phase,
    /// One recorded bid per identity for the ledger's lifetime
    bids: HashMap<Identity, u64>,
    /// Running minimum; None until the first bid lands
    lowest: Option<LowestBid>,
    /// Total value escrowed by the ledger
    held_value: u64,
}

impl AuctionLedger {
    /// Create a new open auction owned by the creating identity
    pub fn new(owner: Identity) -> Self {
        Self {
            owner,
            phase: Phase::Open,
            bids: HashMap::new(),
            lowest: None,
            held_value: 0,
        }
    }

    pub fn owner(&self) -> &Identity {
        &self.owner
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Recorded bid for an identity (zero when it never bid)
    pub fn bid(&self, id: &Identity) -> u64 {
        self.bids.get(id).copied().unwrap_or(0)
    }

    pub fn bid_count(&self) -> usize {
        self.bids.len()
    }

    /// Current lowest bid, readable in any phase
    pub fn lowest_bid(&self) -> Option<&LowestBid> {
        self.lowest.as_ref()
    }

    /// Total value the ledger holds on behalf of bidders
    pub fn held_value(&self) -> u64 {
        self.held_value
    }

    /// Record the caller's one-and-only bid, carried as attached value.
    ///
    /// The lowest slot changes hands only on a strictly lower bid, so ties
    /// keep the earlier holder.
    pub fn place_bid(&mut self, ctx: &CallContext) -> Result<(), AuctionError> {
        if self.phase != Phase::Open {
            return Err(AuctionError::PhaseViolation {
                required: Phase::Open,
                current: self.phase,
            });
        }
        if ctx.value() == 0 {
            return Err(AuctionError::InvalidAmount);
        }
        if self.bids.contains_key(ctx.caller()) {
            return Err(AuctionError::DuplicateBid);
        }

        let held_value = self
            .held_value
            .checked_add(ctx.value())
            .ok_or(AuctionError::Overflow)?;

        self.bids.insert(ctx.caller().clone(), ctx.value());
        self.held_value = held_value;

        let takes_lowest = match &self.lowest {
            Some(lowest) => ctx.value() < lowest.amount,
            None => true,
        };
        if takes_lowest {
            self.lowest = Some(LowestBid {
                bidder: ctx.caller().clone(),
                amount: ctx.value(),
            });
        }

        tracing::debug!(
            bidder = %ctx.caller(),
            amount = ctx.value(),
            takes_lowest,
            "bid recorded"
        );

        Ok(())
    }

    /// Close bidding, freezing the lowest bid. Owner only. There is no
    /// phase precondition on close itself, so a repeated owner call is a
    /// successful no-op.
    pub fn close_bidding(&mut self, ctx: &CallContext) -> Result<(), AuctionError> {
        if ctx.caller() != &self.owner {
            return Err(AuctionError::AccessDenied);
        }

        self.phase = Phase::Closed;
        tracing::info!(owner = %self.owner, bids = self.bids.len(), "bidding closed");

        Ok(())
    }

    /// The winning (lowest) bid, available once bidding is closed.
    /// None if the auction closed without a single bid.
    pub fn winner(&self) -> Result<Option<&LowestBid>, AuctionError> {
        if self.phase != Phase::Closed {
            return Err(AuctionError::PhaseViolation {
                required: Phase::Closed,
                current: self.phase,
            });
        }
        Ok(self.lowest.as_ref())
    }

    /// Serialize a snapshot of the ledger to bytes
    pub fn to_bytes(&self) -> Vec<u8> {
        postcard::to_allocvec(self).unwrap_or_default()
    }

    /// Restore a ledger from a snapshot
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, AuctionError> {
        postcard::from_bytes(bytes).map_err(|_| AuctionError::DecodeFailed)
    }
}
