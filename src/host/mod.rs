// Host module - the execution environment the ledgers run atop
// Provides caller identity, attached value, and the native value-transfer primitive

mod bank;
mod context;
mod identity;

pub use bank::{Bank, MockTransfer, TransferError, ValueTransfer};
pub use context::CallContext;
pub use identity::Identity;
