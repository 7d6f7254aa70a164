// grid - demo driver for the GridTrade settlement ledgers
// Replays the reference scenarios against an in-memory bank

use clap::{Parser, Subcommand};
use gridtrade::auction::AuctionLedger;
use gridtrade::host::{Bank, CallContext, Identity};
use gridtrade::market::MarketLedger;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "grid", about = "Settlement ledgers for P2P energy trading")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the sealed reverse-auction scenario
    Auction,
    /// Run the energy marketplace scenario
    Market,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Auction => run_auction(),
        Command::Market => run_market(),
    }
}

fn run_auction() -> Result<(), Box<dyn std::error::Error>> {
    let owner = Identity::from_seed("owner");
    let mut bank = Bank::new();
    let mut auction = AuctionLedger::new(owner.clone());

    println!("--- Placing bids ---");
    for (name, amount) in [("alice", 3u64), ("bob", 2), ("carol", 5)] {
        let bidder = Identity::from_seed(name);
        bank.deposit(&bidder, 10);
        let ctx = bank.call_with_value(&bidder, amount)?;
        auction.place_bid(&ctx)?;
        println!("{name} bid {amount} units");
    }

    auction.close_bidding(&CallContext::new(owner))?;
    println!("Bidding closed.");

    match auction.winner()? {
        Some(winner) => println!(
            "Winner: {} with the lowest bid of {} units",
            winner.bidder(),
            winner.amount()
        ),
        None => println!("No bids were placed."),
    }
    println!("Value held by the ledger: {} units", auction.held_value());

    Ok(())
}

fn run_market() -> Result<(), Box<dyn std::error::Error>> {
    let seller = Identity::from_seed("producer");
    let buyer = Identity::from_seed("consumer");
    let mut bank = Bank::new();
    bank.deposit(&buyer, 100);
    let mut market = MarketLedger::new();

    println!("--- Producer lists 100 units at 1 each, consumer buys 30 ---");
    market.list_energy(&CallContext::new(seller.clone()), 100, 1)?;

    let ctx = bank.call_with_value(&buyer, 30)?;
    market.buy_energy(&ctx, &seller, 30, &mut bank)?;

    if let Some(listing) = market.listing(&seller) {
        println!(
            "Remaining listing: {} units at {} each",
            listing.quantity(),
            listing.unit_price()
        );
    }
    println!("Buyer energy balance: {} units", market.energy_balance(&buyer));
    println!("Seller native balance: {} units", bank.balance(&seller));

    Ok(())
}
