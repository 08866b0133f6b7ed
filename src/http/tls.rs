use std::path::Path;

use rsa::pkcs8::{DecodePrivateKey, EncodePrivateKey, LineEnding};
use rsa::RsaPrivateKey;
use tracing::{event, Level};
use zeroize::Zeroizing;

use crate::util::config::TlsFiles;
use crate::util::error::StartupError;

/// PEM certificate chain and an unencrypted PEM private key, held in memory.
/// The key is wiped when dropped.
pub struct TlsMaterial {
    pub cert: Vec<u8>,
    pub key: Zeroizing<Vec<u8>>,
}

impl std::fmt::Debug for TlsMaterial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TlsMaterial {{ ... }}")
    }
}

fn read(path: &Path) -> Result<Vec<u8>, StartupError> {
    std::fs::read(path).map_err(|source| StartupError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Decrypts a passphrase-protected PKCS#8 RSA key into plain PKCS#8 PEM.
pub fn decrypt_key(pem: &[u8], passphrase: &str) -> Result<Zeroizing<Vec<u8>>, StartupError> {
    let pem = std::str::from_utf8(pem)
        .map_err(|_| StartupError::Options("TLS key is not PEM encoded".to_string()))?;
    let key = RsaPrivateKey::from_pkcs8_encrypted_pem(pem, passphrase.as_bytes())?;
    let plain = key.to_pkcs8_pem(LineEnding::LF)?;
    Ok(Zeroizing::new(plain.as_bytes().to_vec()))
}

impl TlsMaterial {
    pub fn load(files: &TlsFiles) -> Result<Self, StartupError> {
        let cert = read(&files.cert)?;
        let key = Zeroizing::new(read(&files.key)?);

        let key = match &files.passphrase {
            Some(passphrase) => {
                event!(Level::DEBUG, key = ?files.key, "Decrypting TLS key");
                decrypt_key(&key, passphrase)?
            }
            None => key,
        };

        Ok(Self { cert, key })
    }
}
