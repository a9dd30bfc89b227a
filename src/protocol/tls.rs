//! TLS client configuration
//!
//! Trusted roots come from an explicit `--ca-file` PEM bundle, or else from the
//! platform trust store (`SSL_CERT_FILE` and `SSL_CERT_DIR` are honored). Server
//! names are always verified.

use crate::error::{ClientError, Result};
use rustls::pki_types::CertificateDer;
use rustls::{ClientConfig, RootCertStore};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, warn};

/// Build the root store for a connection
///
/// # Errors
/// `ClientError::Tls` if the bundle cannot be read or no usable root is found.
pub fn root_store(ca_file: Option<&Path>) -> Result<RootCertStore> {
    match ca_file {
        Some(path) => load_roots(path),
        None => native_roots(),
    }
}

/// Load every certificate in a PEM bundle into a root store
///
/// # Errors
/// `ClientError::Tls` if the file cannot be read or holds no usable certificate.
pub fn load_roots(path: &Path) -> Result<RootCertStore> {
    let file = File::open(path)
        .map_err(|e| ClientError::Tls(format!("cannot open CA bundle {}: {e}", path.display())))?;

    let certs = rustls_pemfile::certs(&mut BufReader::new(file))
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| ClientError::Tls(format!("cannot parse CA bundle {}: {e}", path.display())))?;

    store_from(certs, &format!("CA bundle {}", path.display()))
}

/// Load the platform trust store
fn native_roots() -> Result<RootCertStore> {
    let native = rustls_native_certs::load_native_certs();
    for e in &native.errors {
        warn!("skipping part of the system trust store: {e}");
    }
    store_from(native.certs, "system trust store")
}

fn store_from(certs: Vec<CertificateDer<'static>>, source: &str) -> Result<RootCertStore> {
    let mut roots = RootCertStore::empty();
    let (added, ignored) = roots.add_parsable_certificates(certs);
    debug!(source, added, ignored, "loaded trust roots");

    if added == 0 {
        return Err(ClientError::Tls(format!(
            "{source} contains no usable certificates; pass --ca-file"
        )));
    }
    Ok(roots)
}

/// Build a client config that verifies servers against `roots`
///
/// # Errors
/// `ClientError::Tls` if the crypto provider rejects the protocol versions.
pub fn client_config(roots: RootCertStore) -> Result<Arc<ClientConfig>> {
    let provider = Arc::new(rustls::crypto::ring::default_provider());
    let config = ClientConfig::builder_with_provider(provider)
        .with_safe_default_protocol_versions()
        .map_err(|e| ClientError::Tls(format!("invalid TLS config: {e}")))?
        .with_root_certificates(roots)
        .with_no_client_auth();
    Ok(Arc::new(config))
}
