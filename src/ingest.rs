//! Stream-all ingestion: the full feed as a lazy packet iterator.

use std::io::{BufReader, Read};
use std::net::TcpStream;

use crate::error::FeedError;
use crate::transport::Session;
use crate::wire::{FRAME_LEN, OP_STREAM_ALL, Packet, decode_packet};

/// Send the stream-all request and return the response as a lazy sequence
/// of decoded packets.
///
/// The sequence is finite and non-restartable: it ends when the peer closes
/// the connection, and the session is consumed. Only the request write can
/// fail here; everything after that is reported through the iterator
/// terminating.
pub fn stream_all(mut session: Session) -> Result<PacketStream, FeedError> {
    session.send_request(&[OP_STREAM_ALL])?;
    Ok(PacketStream {
        reader: BufReader::new(session.into_stream()),
        done: false,
    })
}

/// Iterator over consecutive 17-byte frames of a stream-all response.
///
/// The protocol signals end-of-stream by closing the connection; there is
/// no record count or end marker. A trailing partial frame is discarded,
/// and a mid-stream transport error ends the sequence the same way a clean
/// close does.
pub struct PacketStream {
    reader: BufReader<TcpStream>,
    done: bool,
}

impl Iterator for PacketStream {
    type Item = Packet;

    fn next(&mut self) -> Option<Packet> {
        if self.done {
            return None;
        }
        let mut frame = [0u8; FRAME_LEN];
        if self.reader.read_exact(&mut frame).is_err() {
            self.done = true;
            return None;
        }
        decode_packet(&frame).ok()
    }
}
