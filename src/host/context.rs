use crate::host::Identity;

/// What the host environment attributes to a single call: the caller's
/// identity and the native value attached to the call.
///
/// The ledgers trust this completely; authenticating the caller and actually
/// moving the attached value into ledger-held escrow are host concerns
/// (see `Bank::call_with_value`).
#[derive(Clone, Debug)]
pub struct CallContext {
    caller: Identity,
    value: u64,
}

impl CallContext {
    /// Context for a call with no attached value
    pub fn new(caller: Identity) -> Self {
        Self { caller, value: 0 }
    }

    /// Context for a value-bearing call
    pub fn with_value(caller: Identity, value: u64) -> Self {
        Self { caller, value }
    }

    pub fn caller(&self) -> &Identity {
        &self.caller
    }

    pub fn value(&self) -> u64 {
        self.value
    }
}
