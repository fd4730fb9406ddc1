use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use dotenvy::dotenv;
use log::{info, warn};

use bookfeed::book::OrderBook;
use bookfeed::error::FeedError;
use bookfeed::export;
use bookfeed::gap::GapTracker;
use bookfeed::ingest::stream_all;
use bookfeed::resend::resend;
use bookfeed::transport::Session;

#[derive(Debug, Parser)]
#[command(version, about = "Order book retrieval client with gap recovery")]
struct Args {
    /// Feed server host
    #[arg(long, env = "FEED_HOST", default_value = "127.0.0.1")]
    host: String,

    /// Feed server port
    #[arg(long, env = "FEED_PORT", default_value_t = 3000)]
    port: u16,

    /// Output path for the order book snapshot
    #[arg(long, env = "OUT_FILE", default_value = "output.json")]
    out: PathBuf,

    /// TCP connect timeout in milliseconds
    #[arg(long, default_value_t = 500)]
    connect_timeout_ms: u64,

    /// Connection attempts per request before giving up
    #[arg(long, default_value_t = 3)]
    max_retries: u32,

    /// Leave detected gaps unrecovered (skip resend requests)
    #[arg(long, default_value_t = false)]
    no_recover: bool,

    /// Pin the process to this CPU core
    #[arg(long, env = "PIN_CORE")]
    core: Option<usize>,
}

/// Open a session, retrying up to `max_retries` times. Retry policy lives
/// here, not in the transport.
fn connect(args: &Args) -> Result<Session, FeedError> {
    let timeout = Duration::from_millis(args.connect_timeout_ms);
    let mut last_err = None;
    for attempt in 1..=args.max_retries {
        match Session::connect(&args.host, args.port, timeout) {
            Ok(session) => return Ok(session),
            Err(e) => {
                warn!("connect attempt {attempt}/{}: {e}", args.max_retries);
                last_err = Some(e);
            }
        }
    }
    Err(last_err.unwrap_or_else(|| FeedError::Connection("no attempts configured".into())))
}

fn main() -> Result<()> {
    let _ = dotenv();
    env_logger::init();
    let args = Args::parse();

    if let Some(core) = args.core {
        if core_affinity::set_for_current(core_affinity::CoreId { id: core }) {
            info!("pinned to core {core}");
        } else {
            warn!("could not pin to core {core}");
        }
    }

    let mut book = OrderBook::new();
    let mut tracker = GapTracker::new();

    let session = connect(&args).context("open stream session")?;
    let mut received = 0usize;
    for pkt in stream_all(session)? {
        tracker.observe(&mut book, pkt);
        received += 1;
    }
    info!(
        "stream complete: {received} packets received, {} book entries, {} missing",
        book.len(),
        book.missing().count()
    );

    let missing: Vec<u32> = book.missing().collect();
    if missing.is_empty() {
        println!("No missing packets.");
    } else {
        println!("Missing packets:");
        for seq in &missing {
            println!("  sequence {seq}");
        }
    }

    if !args.no_recover {
        // One best-effort resend per missing sequence, each over a fresh
        // session. Failures are skipped; a dead server abandons recovery
        // but the snapshot is still written.
        for seq in missing {
            let session = match connect(&args) {
                Ok(session) => session,
                Err(e) => {
                    warn!("recovery abandoned: {e}");
                    break;
                }
            };
            match resend(session, &mut book, seq) {
                Ok(pkt) => info!(
                    "recovered sequence {seq}: {} {} qty={} price={}",
                    pkt.symbol, pkt.indicator, pkt.quantity, pkt.price
                ),
                Err(e) => warn!("resend for sequence {seq} failed: {e}"),
            }
        }
        let unrecovered = book.missing().count();
        if unrecovered > 0 {
            warn!("{unrecovered} sequences still missing after recovery");
        }
    }

    export::save_snapshot(&args.out, &book).context("save snapshot")?;
    println!("Order book saved to {}", args.out.display());
    Ok(())
}
