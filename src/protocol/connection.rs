//! TCP connection, optionally wrapped in TLS
//!
//! Connecting is fully eager: DNS, TCP connect and the TLS handshake all happen
//! in [`Connection::connect`], so certificate problems surface before any
//! protocol message is sent.

use super::tls;
use crate::error::{ClientError, Result};
use rustls::pki_types::ServerName;
use rustls::{ClientConnection, StreamOwned};
use std::io::{self, Read, Write};
use std::net::{Shutdown, TcpStream};
use std::path::PathBuf;
use tracing::{debug, info};

/// TLS options for [`Connection::connect`]
#[derive(Debug, Clone, Default)]
pub struct TlsOptions {
    /// PEM bundle of trusted roots; platform trust store when unset
    pub ca_file: Option<PathBuf>,
}

/// An open connection to the game server
pub enum Connection {
    Plain(TcpStream),
    Tls(Box<StreamOwned<ClientConnection, TcpStream>>),
}

impl Connection {
    /// Open a connection, performing the TLS handshake when `tls` is set
    ///
    /// # Errors
    /// `ClientError::Connection` on DNS or socket failure,
    /// `ClientError::Tls` on handshake or certificate failure.
    pub fn connect(host: &str, port: u16, tls: Option<&TlsOptions>) -> Result<Self> {
        let tcp = TcpStream::connect((host, port))
            .map_err(|e| ClientError::connection(&format!("connect to {host}:{port}"), &e))?;
        tcp.set_nodelay(true)
            .map_err(|e| ClientError::connection("configure socket", &e))?;
        debug!(%host, port, "tcp connected");

        let Some(options) = tls else {
            info!(%host, port, "connected");
            return Ok(Self::Plain(tcp));
        };

        let config = tls::client_config(tls::root_store(options.ca_file.as_deref())?)?;
        let server_name = ServerName::try_from(host.to_string())
            .map_err(|e| ClientError::Tls(format!("invalid server name {host}: {e}")))?;

        let mut conn = ClientConnection::new(config, server_name)
            .map_err(|e| ClientError::Tls(format!("cannot start TLS session: {e}")))?;
        let mut tcp = tcp;
        while conn.is_handshaking() {
            conn.complete_io(&mut tcp)
                .map_err(|e| ClientError::Tls(format!("handshake with {host} failed: {e}")))?;
        }

        info!(
            %host,
            port,
            version = ?conn.protocol_version(),
            "connected with TLS"
        );
        Ok(Self::Tls(Box::new(StreamOwned::new(conn, tcp))))
    }

    /// True when the connection is TLS-wrapped
    #[must_use]
    pub const fn is_tls(&self) -> bool {
        matches!(self, Self::Tls(_))
    }

    /// Close the connection
    ///
    /// Sends a TLS `close_notify` when applicable, then shuts the socket down.
    /// Consumes the connection so it cannot be closed twice.
    pub fn close(mut self) {
        if let Self::Tls(stream) = &mut self {
            stream.conn.send_close_notify();
            if let Err(e) = stream.conn.complete_io(&mut stream.sock) {
                debug!("close_notify not delivered: {e}");
            }
        }
        let socket = match &self {
            Self::Plain(tcp) => tcp,
            Self::Tls(stream) => &stream.sock,
        };
        if let Err(e) = socket.shutdown(Shutdown::Both) {
            debug!("socket shutdown: {e}");
        }
        debug!(tls = self.is_tls(), "connection closed");
    }
}

impl Read for Connection {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            Self::Plain(tcp) => tcp.read(buf),
            Self::Tls(stream) => stream.read(buf),
        }
    }
}

impl Write for Connection {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Self::Plain(tcp) => tcp.write(buf),
            Self::Tls(stream) => stream.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Self::Plain(tcp) => tcp.flush(),
            Self::Tls(stream) => stream.flush(),
        }
    }
}
