// Auction ledger tests - bidding, phase transitions, winner selection

use gridtrade::auction::{AuctionError, AuctionLedger, Phase};
use gridtrade::host::{Bank, CallContext, Identity};

fn open_auction() -> (Identity, AuctionLedger) {
    let owner = Identity::from_seed("owner");
    let auction = AuctionLedger::new(owner.clone());
    (owner, auction)
}

// ============================================================================
// PLACING BIDS
// ============================================================================

#[test]
fn test_place_bid_records_amount() {
    let (_, mut auction) = open_auction();
    let alice = Identity::from_seed("alice");

    auction
        .place_bid(&CallContext::with_value(alice.clone(), 3))
        .unwrap();

    assert_eq!(auction.bid(&alice), 3);
    assert_eq!(auction.bid_count(), 1);
    assert_eq!(auction.held_value(), 3);
}

#[test]
fn test_lowest_bid_tracks_running_minimum() {
    let (_, mut auction) = open_auction();

    for (name, amount) in [("alice", 9u64), ("bob", 4), ("carol", 6)] {
        auction
            .place_bid(&CallContext::with_value(Identity::from_seed(name), amount))
            .unwrap();
    }

    let lowest = auction.lowest_bid().unwrap();
    assert_eq!(lowest.bidder(), &Identity::from_seed("bob"));
    assert_eq!(lowest.amount(), 4);
}

#[test]
fn test_equal_bid_does_not_displace_earlier_holder() {
    let (_, mut auction) = open_auction();
    let first = Identity::from_seed("first");
    let second = Identity::from_seed("second");

    auction
        .place_bid(&CallContext::with_value(first.clone(), 2))
        .unwrap();
    auction
        .place_bid(&CallContext::with_value(second, 2))
        .unwrap();

    assert_eq!(auction.lowest_bid().unwrap().bidder(), &first);
}

#[test]
fn test_zero_value_bid_rejected() {
    let (_, mut auction) = open_auction();
    let alice = Identity::from_seed("alice");

    let err = auction.place_bid(&CallContext::new(alice.clone())).unwrap_err();

    assert_eq!(err, AuctionError::InvalidAmount);
    assert_eq!(auction.bid(&alice), 0);
    assert_eq!(auction.bid_count(), 0);
}

#[test]
fn test_second_bid_by_same_caller_rejected() {
    let (_, mut auction) = open_auction();
    let alice = Identity::from_seed("alice");

    auction
        .place_bid(&CallContext::with_value(alice.clone(), 5))
        .unwrap();
    let err = auction
        .place_bid(&CallContext::with_value(alice.clone(), 1))
        .unwrap_err();

    assert_eq!(err, AuctionError::DuplicateBid);
    assert_eq!(auction.bid(&alice), 5);
    assert_eq!(auction.held_value(), 5);
    // the rejected lower bid must not have taken the lowest slot
    assert_eq!(auction.lowest_bid().unwrap().amount(), 5);
}

#[test]
fn test_bid_after_close_rejected() {
    let (owner, mut auction) = open_auction();
    auction.close_bidding(&CallContext::new(owner)).unwrap();

    let err = auction
        .place_bid(&CallContext::with_value(Identity::from_seed("late"), 1))
        .unwrap_err();

    assert_eq!(
        err,
        AuctionError::PhaseViolation {
            required: Phase::Open,
            current: Phase::Closed,
        }
    );
    assert_eq!(auction.bid_count(), 0);
}

// ============================================================================
// CLOSING AND WINNER SELECTION
// ============================================================================

#[test]
fn test_non_owner_cannot_close() {
    let (_, mut auction) = open_auction();
    let intruder = Identity::from_seed("intruder");

    let err = auction
        .close_bidding(&CallContext::new(intruder))
        .unwrap_err();

    assert_eq!(err, AuctionError::AccessDenied);
    assert_eq!(auction.phase(), Phase::Open);
}

#[test]
fn test_winner_unavailable_while_open() {
    let (_, auction) = open_auction();

    let err = auction.winner().unwrap_err();

    assert_eq!(
        err,
        AuctionError::PhaseViolation {
            required: Phase::Closed,
            current: Phase::Open,
        }
    );
}

#[test]
fn test_lowest_of_three_bids_wins() {
    let (owner, mut auction) = open_auction();
    let a = Identity::from_seed("a");
    let b = Identity::from_seed("b");
    let c = Identity::from_seed("c");

    auction.place_bid(&CallContext::with_value(a, 3)).unwrap();
    auction
        .place_bid(&CallContext::with_value(b.clone(), 2))
        .unwrap();
    auction.place_bid(&CallContext::with_value(c, 5)).unwrap();
    auction.close_bidding(&CallContext::new(owner)).unwrap();

    let winner = auction.winner().unwrap().unwrap();
    assert_eq!(winner.bidder(), &b);
    assert_eq!(winner.amount(), 2);
}

#[test]
fn test_close_without_bids_yields_no_winner() {
    let (owner, mut auction) = open_auction();
    auction.close_bidding(&CallContext::new(owner)).unwrap();

    assert!(auction.winner().unwrap().is_none());
}

#[test]
fn test_repeated_close_by_owner_is_a_no_op() {
    let (owner, mut auction) = open_auction();

    auction
        .close_bidding(&CallContext::new(owner.clone()))
        .unwrap();
    auction.close_bidding(&CallContext::new(owner)).unwrap();

    assert_eq!(auction.phase(), Phase::Closed);
}

#[test]
fn test_winner_frozen_after_close() {
    let (owner, mut auction) = open_auction();
    let bob = Identity::from_seed("bob");

    auction
        .place_bid(&CallContext::with_value(bob.clone(), 2))
        .unwrap();
    auction.close_bidding(&CallContext::new(owner)).unwrap();

    // a lower bid arriving after close must not change the outcome
    let _ = auction.place_bid(&CallContext::with_value(Identity::from_seed("late"), 1));

    let winner = auction.winner().unwrap().unwrap();
    assert_eq!(winner.bidder(), &bob);
    assert_eq!(winner.amount(), 2);
}

// ============================================================================
// VALUE ESCROW
// ============================================================================

#[test]
fn test_bid_value_stays_escrowed_by_the_host() {
    let (owner, mut auction) = open_auction();
    let alice = Identity::from_seed("alice");
    let mut bank = Bank::new();
    bank.deposit(&alice, 10);

    let ctx = bank.call_with_value(&alice, 3).unwrap();
    auction.place_bid(&ctx).unwrap();
    auction.close_bidding(&CallContext::new(owner)).unwrap();

    // no refund or withdrawal path: value remains held
    assert_eq!(bank.balance(&alice), 7);
    assert_eq!(bank.escrow(), 3);
    assert_eq!(auction.held_value(), 3);
}
