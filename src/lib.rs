// GridTrade - settlement ledgers for peer-to-peer energy trading
// Two deterministic state machines (reverse auction, energy marketplace)
// driven one call at a time by a host execution environment

pub mod auction;
pub mod host;
pub mod market;
