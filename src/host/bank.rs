// Bank - in-memory native value accounts and the value-transfer primitive
// Stands in for the host chain's account model in tests and the demo binary

use crate::host::{CallContext, Identity};
use std::collections::HashMap;
use thiserror::Error;

/// Errors raised by the native value-transfer primitive
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransferError {
    #[error("insufficient funds: available {available}, required {required}")]
    InsufficientFunds { available: u64, required: u64 },

    #[error("escrow underflow: held {held}, required {required}")]
    EscrowUnderflow { held: u64, required: u64 },

    #[error("recipient balance would overflow")]
    BalanceOverflow,

    #[error("transfer rejected by host")]
    Rejected,
}

/// The host's atomic value-transfer primitive: moves native units from
/// ledger-held escrow to an arbitrary identity.
pub trait ValueTransfer {
    fn transfer(&mut self, to: &Identity, amount: u64) -> Result<(), TransferError>;
}

// ============================================================================
// BANK
// ============================================================================

/// In-memory account table with a ledger-held escrow counter.
///
/// Value attached to a call is debited from the caller up front via
/// `call_with_value`; a later `transfer` pays it out of escrow. Escrowed
/// value that is never transferred stays held, which is exactly the
/// retained-bid behavior of the auction ledger.
#[derive(Clone, Debug, Default)]
pub struct Bank {
    balances: HashMap<Identity, u64>,
    escrow: u64,
}

impl Bank {
    pub fn new() -> Self {
        Self::default()
    }

    /// Credit an account with native value
    pub fn deposit(&mut self, id: &Identity, amount: u64) {
        let balance = self.balances.entry(id.clone()).or_insert(0);
        *balance = balance.saturating_add(amount);
    }

    /// Native balance of an account (zero when unknown)
    pub fn balance(&self, id: &Identity) -> u64 {
        self.balances.get(id).copied().unwrap_or(0)
    }

    /// Total value currently held in ledger escrow
    pub fn escrow(&self) -> u64 {
        self.escrow
    }

    /// Build a call context with value attached: debits the caller and moves
    /// the value into ledger-held escrow, the way the host chain deducts
    /// attached value when a call is executed.
    pub fn call_with_value(
        &mut self,
        caller: &Identity,
        value: u64,
    ) -> Result<CallContext, TransferError> {
        let available = self.balance(caller);
        if available < value {
            return Err(TransferError::InsufficientFunds {
                available,
                required: value,
            });
        }

        self.balances.insert(caller.clone(), available - value);
        self.escrow += value;

        Ok(CallContext::with_value(caller.clone(), value))
    }
}

impl ValueTransfer for Bank {
    fn transfer(&mut self, to: &Identity, amount: u64) -> Result<(), TransferError> {
        if self.escrow < amount {
            return Err(TransferError::EscrowUnderflow {
                held: self.escrow,
                required: amount,
            });
        }

        let balance = self.balance(to);
        let new_balance = balance
            .checked_add(amount)
            .ok_or(TransferError::BalanceOverflow)?;

        self.escrow -= amount;
        self.balances.insert(to.clone(), new_balance);

        Ok(())
    }
}

// ============================================================================
// MOCK TRANSFER
// ============================================================================

/// Mock implementation of ValueTransfer for testing failure paths
pub struct MockTransfer {
    should_succeed: bool,
    transfers: Vec<(Identity, u64)>,
}

impl MockTransfer {
    /// Create a new mock (defaults to failure)
    pub fn new() -> Self {
        Self {
            should_succeed: false,
            transfers: Vec::new(),
        }
    }

    /// Configure to always succeed
    pub fn with_success(mut self) -> Self {
        self.should_succeed = true;
        self
    }

    /// Configure to always fail
    pub fn with_failure(mut self) -> Self {
        self.should_succeed = false;
        self
    }

    /// Transfers that were accepted by this mock
    pub fn transfers(&self) -> &[(Identity, u64)] {
        &self.transfers
    }
}

impl Default for MockTransfer {
    fn default() -> Self {
        Self::new()
    }
}

impl ValueTransfer for MockTransfer {
    fn transfer(&mut self, to: &Identity, amount: u64) -> Result<(), TransferError> {
        if !self.should_succeed {
            return Err(TransferError::Rejected);
        }
        self.transfers.push((to.clone(), amount));
        Ok(())
    }
}
