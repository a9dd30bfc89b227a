//! Wire protocol
//!
//! One JSON object per line in both directions, over TCP or TLS.

pub mod connection;
pub mod framer;
pub mod message;
pub mod tls;

pub use connection::{Connection, TlsOptions};
pub use framer::{FrameTransport, FramedStream, LineFramer, MAX_FRAME_LEN};
pub use message::{ClientMessage, ServerMessage, decode_frame, encode_frame};
