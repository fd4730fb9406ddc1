//! Resend reconciliation for a single missing sequence.

use std::io::Read;

use crate::book::OrderBook;
use crate::error::FeedError;
use crate::transport::Session;
use crate::wire::{FRAME_LEN, OP_RESEND, Packet, decode_packet};

/// Request retransmission of one packet and reconcile it into the book.
///
/// Fails with [`FeedError::NotFound`] unless `sequence` is currently in the
/// book's missing set — callers pick targets from [`OrderBook::missing`].
/// The response must be exactly one packet frame; a response shorter than
/// that fails with [`FeedError::MalformedPacket`]. On success the decoded
/// packet is merged under its own sequence field (which should, but is not
/// guaranteed to, equal the requested one) and the requested sequence
/// leaves the missing set.
pub fn resend(
    mut session: Session,
    book: &mut OrderBook,
    sequence: u32,
) -> Result<Packet, FeedError> {
    if !book.is_missing(sequence) {
        return Err(FeedError::NotFound(sequence));
    }

    // The wire carries the resend target in a single byte: sequences above
    // 255 wrap. Known protocol limitation, kept for compatibility.
    session.send_request(&[OP_RESEND, sequence as u8])?;

    let mut stream = session.into_stream();
    let mut frame = [0u8; FRAME_LEN];
    let mut filled = 0usize;
    while filled < FRAME_LEN {
        match stream.read(&mut frame[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        }
    }

    let pkt = decode_packet(&frame[..filled])?;
    book.merge(pkt.clone());
    book.resolve(sequence);
    Ok(pkt)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::TcpListener;
    use std::time::Duration;

    #[test]
    fn unknown_sequence_is_rejected_before_any_io() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let session = Session::connect(
            &addr.ip().to_string(),
            addr.port(),
            Duration::from_millis(500),
        )
        .unwrap();

        let mut book = OrderBook::new();
        let err = resend(session, &mut book, 42).unwrap_err();
        assert!(matches!(err, FeedError::NotFound(42)));
    }
}
