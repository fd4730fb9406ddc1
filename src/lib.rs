//! Market-data retrieval client library.
//!
//! This crate implements the protocol core used by the `bookfeed` binary:
//!
//! - `wire`: the fixed 17-byte packet frame and the request opcodes
//! - `transport`: one blocking TCP session per request/response exchange
//! - `ingest`: the stream-all request as a lazy packet iterator
//! - `gap`: sequence-gap detection over the arrival stream
//! - `resend`: per-sequence retransmission and reconciliation
//! - `book`: the order book and its missing-sequence set
//! - `export`: JSON snapshot output
//!
//! The binary (`src/main.rs`) drives these modules end to end: stream the
//! full feed, report gaps, recover missing packets over fresh sessions, and
//! export the reconciled book.
pub mod book;
pub mod error;
pub mod export;
pub mod gap;
pub mod ingest;
pub mod resend;
pub mod transport;
pub mod wire;
