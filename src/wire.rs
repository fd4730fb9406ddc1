//! Wire format for the feed protocol.
//!
//! Every packet on the wire is a fixed 17-byte frame, integers in network
//! byte order:
//!
//! ```text
//! symbol[4] ASCII | indicator[1] ASCII | quantity u32 | price u32 | sequence u32
//! ```
//!
//! The client sends tiny opcode frames ([`OP_STREAM_ALL`], [`OP_RESEND`])
//! and decodes packet frames from the responses. Full-packet encoding is
//! not part of the protocol.

use crate::error::FeedError;

/// Fixed byte length of one packet frame.
pub const FRAME_LEN: usize = 17;

/// Request opcode: stream every packet the server holds.
pub const OP_STREAM_ALL: u8 = 1;
/// Request opcode: resend one packet, identified by sequence number.
pub const OP_RESEND: u8 = 2;

/// One decoded market event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Packet {
    /// 4-character ASCII ticker, no terminator on the wire.
    pub symbol: String,
    /// Side marker, e.g. 'B' or 'S'.
    pub indicator: char,
    pub quantity: u32,
    pub price: u32,
    /// Unique key within a session.
    pub sequence: u32,
}

/// Decode one packet frame.
///
/// Fails with [`FeedError::MalformedPacket`] if fewer than [`FRAME_LEN`]
/// bytes are supplied; bytes past the frame are ignored.
pub fn decode_packet(bytes: &[u8]) -> Result<Packet, FeedError> {
    if bytes.len() < FRAME_LEN {
        return Err(FeedError::MalformedPacket { len: bytes.len() });
    }
    let mut off = 0usize;
    let read_u32 = |b: &[u8], o: &mut usize| -> u32 {
        let mut tmp = [0u8; 4];
        tmp.copy_from_slice(&b[*o..*o + 4]);
        *o += 4;
        u32::from_be_bytes(tmp)
    };

    let symbol = String::from_utf8_lossy(&bytes[off..off + 4]).into_owned();
    off += 4;
    let indicator = bytes[off] as char;
    off += 1;
    let quantity = read_u32(bytes, &mut off);
    let price = read_u32(bytes, &mut off);
    let sequence = read_u32(bytes, &mut off);

    Ok(Packet { symbol, indicator, quantity, price, sequence })
}
