//! Newline-delimited framing over a byte stream
//!
//! A stream socket carries no message boundaries: one read may hold part of a
//! frame, or several frames at once. [`LineFramer`] buffers raw bytes and hands
//! out complete lines; [`FramedStream`] drives it from a blocking reader.

use super::message::{ClientMessage, ServerMessage, decode_frame, encode_frame};
use crate::error::{ClientError, Result};
use std::io::{ErrorKind, Read, Write};
use tracing::{debug, trace};

/// Size of each socket read
const READ_CHUNK: usize = 4096;

/// Longest frame accepted from the peer, terminator excluded
pub const MAX_FRAME_LEN: usize = 1 << 20;

/// Reassembles newline-terminated frames from arbitrary byte chunks
///
/// Bytes past the last delimiter are kept for the next call. Bytes already
/// searched for a delimiter are not searched again.
#[derive(Debug)]
pub struct LineFramer {
    buffer: Vec<u8>,
    /// Prefix of `buffer` known to hold no delimiter
    scanned: usize,
    max_frame: usize,
}

impl Default for LineFramer {
    fn default() -> Self {
        Self::with_max_frame(MAX_FRAME_LEN)
    }
}

impl LineFramer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn with_max_frame(max_frame: usize) -> Self {
        Self {
            buffer: Vec::new(),
            scanned: 0,
            max_frame,
        }
    }

    /// Append bytes received from the peer
    pub fn extend(&mut self, bytes: &[u8]) {
        self.buffer.extend_from_slice(bytes);
    }

    /// Take the next complete frame, without its terminator
    ///
    /// A trailing `\r` is stripped. A blank line is returned as is and fails
    /// to decode like any other malformed frame.
    ///
    /// # Errors
    /// `ClientError::Protocol` once a frame grows past the size limit.
    ///
    /// # Examples
    /// ```
    /// use wordle_client::protocol::LineFramer;
    ///
    /// let mut framer = LineFramer::new();
    /// framer.extend(b"{\"a\":1}\n{\"b\"");
    /// assert_eq!(framer.next_frame().unwrap().as_deref(), Some(&b"{\"a\":1}"[..]));
    /// assert_eq!(framer.next_frame().unwrap(), None);
    ///
    /// framer.extend(b":2}\n");
    /// assert_eq!(framer.next_frame().unwrap().as_deref(), Some(&b"{\"b\":2}"[..]));
    /// ```
    pub fn next_frame(&mut self) -> Result<Option<Vec<u8>>> {
        let Some(offset) = self.buffer[self.scanned..].iter().position(|&b| b == b'\n') else {
            self.scanned = self.buffer.len();
            if self.buffer.len() > self.max_frame {
                return Err(self.oversized(self.buffer.len()));
            }
            return Ok(None);
        };

        let end = self.scanned + offset;
        self.scanned = 0;
        if end > self.max_frame {
            return Err(self.oversized(end));
        }

        let mut line: Vec<u8> = self.buffer.drain(..=end).collect();
        line.pop();
        if line.last() == Some(&b'\r') {
            line.pop();
        }
        Ok(Some(line))
    }

    /// True if an incomplete frame is waiting for more bytes
    #[must_use]
    pub fn has_partial(&self) -> bool {
        !self.buffer.is_empty()
    }

    /// Number of buffered bytes not yet returned
    #[must_use]
    pub fn buffered(&self) -> usize {
        self.buffer.len()
    }

    fn oversized(&self, len: usize) -> ClientError {
        ClientError::Protocol(format!(
            "frame of {len} bytes exceeds the {} byte limit",
            self.max_frame
        ))
    }
}

/// Sends and receives whole protocol messages
///
/// This is the seam the session drives; [`FramedStream`] implements it over a
/// socket and tests implement it in memory.
pub trait FrameTransport {
    /// Write one message as a single frame
    ///
    /// # Errors
    /// `ClientError::Connection` on write failure.
    fn send(&mut self, message: &ClientMessage) -> Result<()>;

    /// Block until one complete message has been received
    ///
    /// # Errors
    /// `ClientError::Connection` if the peer closes or the read fails,
    /// `ClientError::Protocol` if a complete frame does not decode.
    fn receive(&mut self) -> Result<ServerMessage>;
}

/// A blocking stream with newline framing on top
pub struct FramedStream<S> {
    stream: S,
    framer: LineFramer,
}

impl<S: Read + Write> FramedStream<S> {
    pub fn new(stream: S) -> Self {
        Self {
            stream,
            framer: LineFramer::new(),
        }
    }

    /// Give back the underlying stream
    pub fn into_inner(self) -> S {
        self.stream
    }

    /// Read until one complete frame is available
    ///
    /// # Errors
    /// `ClientError::Connection` if the read fails or the peer closes first,
    /// `ClientError::Protocol` if the frame is too long.
    pub fn read_frame(&mut self) -> Result<Vec<u8>> {
        let mut chunk = [0u8; READ_CHUNK];
        loop {
            if let Some(frame) = self.framer.next_frame()? {
                return Ok(frame);
            }

            let n = match self.stream.read(&mut chunk) {
                Ok(n) => n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(ClientError::connection("read frame", &e)),
            };
            trace!(bytes = n, "socket read");

            if n == 0 {
                let reason = if self.framer.has_partial() {
                    format!(
                        "peer closed connection mid-frame ({} bytes buffered)",
                        self.framer.buffered()
                    )
                } else {
                    "peer closed connection".to_string()
                };
                return Err(ClientError::Connection(reason));
            }
            self.framer.extend(&chunk[..n]);
        }
    }
}

impl<S: Read + Write> FrameTransport for FramedStream<S> {
    fn send(&mut self, message: &ClientMessage) -> Result<()> {
        let frame = encode_frame(message)?;
        debug!(kind = message.kind(), bytes = frame.len(), "sending frame");

        self.stream
            .write_all(&frame)
            .and_then(|()| self.stream.flush())
            .map_err(|e| ClientError::connection("write frame", &e))
    }

    fn receive(&mut self) -> Result<ServerMessage> {
        let frame = self.read_frame()?;
        let message: ServerMessage = decode_frame(&frame)?;
        debug!(kind = message.kind(), bytes = frame.len(), "received frame");
        Ok(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::VecDeque;
    use std::io;

    /// Replays scripted reads and records writes
    #[derive(Default)]
    struct ScriptedStream {
        reads: VecDeque<Vec<u8>>,
        written: Vec<u8>,
        fail_writes: bool,
    }

    impl ScriptedStream {
        fn with_reads(chunks: &[&[u8]]) -> Self {
            Self {
                reads: chunks.iter().map(|c| c.to_vec()).collect(),
                ..Self::default()
            }
        }
    }

    impl Read for ScriptedStream {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            let Some(mut chunk) = self.reads.pop_front() else {
                return Ok(0);
            };
            let n = chunk.len().min(buf.len());
            buf[..n].copy_from_slice(&chunk[..n]);
            if n < chunk.len() {
                self.reads.push_front(chunk.split_off(n));
            }
            Ok(n)
        }
    }

    impl Write for ScriptedStream {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            if self.fail_writes {
                return Err(io::Error::new(ErrorKind::BrokenPipe, "broken pipe"));
            }
            self.written.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    const START: &[u8] = b"{\"type\":\"start\",\"id\":\"g1\"}\n";

    #[test]
    fn framer_holds_partial_frame() {
        let mut framer = LineFramer::new();
        framer.extend(b"{\"type\":");
        assert_eq!(framer.next_frame().unwrap(), None);
        assert!(framer.has_partial());

        framer.extend(b"\"bye\"}\n");
        assert_eq!(framer.next_frame().unwrap().unwrap(), b"{\"type\":\"bye\"}");
        assert!(!framer.has_partial());
    }

    #[test]
    fn framer_splits_coalesced_frames() {
        let mut framer = LineFramer::new();
        framer.extend(b"{\"a\":1}\n{\"b\":2}\r\n\n{\"c\"");

        assert_eq!(framer.next_frame().unwrap().unwrap(), b"{\"a\":1}");
        assert_eq!(framer.next_frame().unwrap().unwrap(), b"{\"b\":2}");
        assert_eq!(framer.next_frame().unwrap().unwrap(), b"");
        assert_eq!(framer.next_frame().unwrap(), None);
        assert_eq!(framer.buffered(), 4);
    }

    #[test]
    fn framer_finds_delimiter_after_many_small_reads() {
        let mut framer = LineFramer::new();
        for &byte in &START[..START.len() - 1] {
            framer.extend(&[byte]);
            assert_eq!(framer.next_frame().unwrap(), None);
        }
        framer.extend(b"\n");
        assert_eq!(framer.next_frame().unwrap().unwrap(), &START[..START.len() - 1]);
        assert!(!framer.has_partial());
    }

    #[test]
    fn framer_rejects_oversized_frame() {
        let mut framer = LineFramer::with_max_frame(8);
        framer.extend(b"12345678\n");
        assert_eq!(framer.next_frame().unwrap().unwrap(), b"12345678");

        framer.extend(b"123456789");
        assert!(matches!(framer.next_frame(), Err(ClientError::Protocol(_))));
    }

    #[test]
    fn framer_rejects_oversized_complete_frame() {
        let mut framer = LineFramer::with_max_frame(4);
        framer.extend(b"{\"a\":1}\n");
        assert!(matches!(framer.next_frame(), Err(ClientError::Protocol(_))));
    }

    #[test]
    fn blank_line_is_protocol_error() {
        let mut stream = FramedStream::new(ScriptedStream::with_reads(&[b"\n".as_slice(), START]));
        assert!(matches!(stream.receive(), Err(ClientError::Protocol(_))));

        let mut stream = FramedStream::new(ScriptedStream::with_reads(&[b"   \r\n".as_slice()]));
        assert!(matches!(stream.receive(), Err(ClientError::Protocol(_))));
    }

    #[test]
    fn receive_reassembles_split_frame() {
        let mut stream = FramedStream::new(ScriptedStream::with_reads(&[&START[..10], &START[10..]]));
        assert_eq!(
            stream.receive().unwrap(),
            ServerMessage::Start { id: "g1".into() }
        );
    }

    #[test]
    fn receive_handles_multiple_frames_in_one_read() {
        let both = [START, b"{\"type\":\"bye\",\"flag\":\"F\"}\n".as_slice()].concat();
        let mut stream = FramedStream::new(ScriptedStream::with_reads(&[both.as_slice()]));

        assert_eq!(stream.receive().unwrap().kind(), "start");
        assert_eq!(
            stream.receive().unwrap(),
            ServerMessage::Bye { flag: "F".into() }
        );
    }

    #[test]
    fn receive_handles_frame_larger_than_read_chunk() {
        let flag = "x".repeat(READ_CHUNK * 2);
        let frame = format!("{{\"type\":\"bye\",\"flag\":\"{flag}\"}}\n");
        let mut stream = FramedStream::new(ScriptedStream::with_reads(&[frame.as_bytes()]));

        assert_eq!(stream.receive().unwrap(), ServerMessage::Bye { flag });
    }

    #[test]
    fn receive_handles_frame_of_exactly_one_chunk() {
        let prefix = "{\"type\":\"bye\",\"flag\":\"";
        let suffix = "\"}\n";
        let flag = "y".repeat(READ_CHUNK - prefix.len() - suffix.len());
        let frame = format!("{prefix}{flag}{suffix}");
        assert_eq!(frame.len(), READ_CHUNK);

        let mut stream = FramedStream::new(ScriptedStream::with_reads(&[frame.as_bytes(), START]));
        assert_eq!(stream.receive().unwrap(), ServerMessage::Bye { flag });
        assert_eq!(stream.receive().unwrap().kind(), "start");
    }

    #[test]
    fn peer_close_mid_frame_is_connection_error() {
        let mut stream = FramedStream::new(ScriptedStream::with_reads(&[b"{\"type\":\"st".as_slice()]));
        let err = stream.receive().unwrap_err();
        assert!(matches!(err, ClientError::Connection(ref m) if m.contains("mid-frame")));
    }

    #[test]
    fn peer_close_between_frames_is_connection_error() {
        let mut stream = FramedStream::new(ScriptedStream::with_reads(&[START]));
        stream.receive().unwrap();
        assert!(matches!(stream.receive(), Err(ClientError::Connection(_))));
    }

    #[test]
    fn undecodable_frame_is_protocol_error() {
        let mut stream = FramedStream::new(ScriptedStream::with_reads(&[b"{\"type\":\"nonsense\"}\n".as_slice()]));
        assert!(matches!(stream.receive(), Err(ClientError::Protocol(_))));
    }

    #[test]
    fn send_writes_one_line() {
        let mut stream = FramedStream::new(ScriptedStream::default());
        stream.send(&ClientMessage::hello("user")).unwrap();

        let written = stream.into_inner().written;
        assert_eq!(
            written.as_slice(),
            b"{\"type\":\"hello\",\"northeastern_username\":\"user\"}\n"
        );
    }

    #[test]
    fn send_failure_is_connection_error() {
        let mut stream = FramedStream::new(ScriptedStream {
            fail_writes: true,
            ..ScriptedStream::default()
        });
        assert!(matches!(
            stream.send(&ClientMessage::hello("user")),
            Err(ClientError::Connection(_))
        ));
    }

    proptest! {
        #[test]
        fn split_offset_does_not_change_result(offset in 1usize..START.len()) {
            let mut whole = FramedStream::new(ScriptedStream::with_reads(&[START]));
            let mut split = FramedStream::new(ScriptedStream::with_reads(&[&START[..offset], &START[offset..]]));

            prop_assert_eq!(whole.receive().unwrap(), split.receive().unwrap());
        }
    }
}
