//! JSON snapshot export of a reconciled order book.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::book::OrderBook;

#[derive(Serialize)]
struct Row<'a> {
    sequence: u32,
    symbol: &'a str,
    indicator: char,
    quantity: u32,
    price: u32,
}

#[derive(Serialize)]
struct Snapshot<'a> {
    order_book: Vec<Row<'a>>,
}

/// Write the book to `w` as `{"order_book": [...]}`, entries ascending by
/// sequence, pretty-printed.
pub fn write_snapshot<W: Write>(w: W, book: &OrderBook) -> Result<()> {
    let snapshot = Snapshot {
        order_book: book
            .snapshot()
            .map(|p| Row {
                sequence: p.sequence,
                symbol: &p.symbol,
                indicator: p.indicator,
                quantity: p.quantity,
                price: p.price,
            })
            .collect(),
    };
    serde_json::to_writer_pretty(w, &snapshot).context("serialize order book")
}

/// Write the book snapshot to a file at `path`, replacing any previous one.
pub fn save_snapshot(path: &Path, book: &OrderBook) -> Result<()> {
    let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
    let mut w = BufWriter::new(file);
    write_snapshot(&mut w, book)?;
    w.flush().context("flush snapshot")?;
    Ok(())
}
