// Path: crates/crypto/src/address/mod.rs
//! Bech32 / Bech32m address codec.
//!
//! Wallet addresses carry a one-byte network tag and a 32-byte payload under
//! the `ws1` (classical) or `ws2` (post-quantum) human-readable part. New
//! addresses are always Bech32m (BIP-350); plain Bech32 (BIP-173) decoding is
//! retained only for legacy checks. The two checksum constants are mutually
//! exclusive: a Bech32 string never validates as Bech32m and vice versa.

use crate::error::CryptoError;
use bech32::primitives::decode::CheckedHrpstring;
use bech32::{Bech32, Bech32m, Hrp};

/// Human-readable part for classical-key addresses.
pub const HRP_CLASSICAL: &str = "ws1";
/// Human-readable part for post-quantum witness addresses.
pub const HRP_PQC: &str = "ws2";
/// Network tag plus 32-byte hash-or-key payload.
pub const ADDRESS_PAYLOAD_LEN: usize = 33;
/// Hard upper bound on an encoded wallet address.
pub const MAX_ADDRESS_LEN: usize = 100;

/// A decoded `ws1`/`ws2` wallet address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalletAddress {
    /// The human-readable part, `ws1` or `ws2`.
    pub hrp: String,
    /// Deployment network discriminator.
    pub network_tag: u8,
    /// For `ws1`: the classical public key (or its hash when the key is wider
    /// than 32 bytes). For `ws2`: `SHA-256(network_tag ‖ pqc_public_key)`.
    pub hash: [u8; 32],
}

impl WalletAddress {
    /// Assembles an address from parts. The HRP must be `ws1` or `ws2`.
    pub fn new(hrp: &str, network_tag: u8, hash: [u8; 32]) -> Result<Self, CryptoError> {
        if hrp != HRP_CLASSICAL && hrp != HRP_PQC {
            return Err(CryptoError::InvalidEncoding(format!(
                "unknown wallet address hrp: {hrp}"
            )));
        }
        Ok(Self {
            hrp: hrp.to_string(),
            network_tag,
            hash,
        })
    }

    /// The on-wire payload, `network_tag ‖ hash`.
    pub fn payload(&self) -> [u8; ADDRESS_PAYLOAD_LEN] {
        let mut out = [0u8; ADDRESS_PAYLOAD_LEN];
        let (tag_byte, hash_bytes) = out.split_at_mut(1);
        tag_byte.copy_from_slice(&[self.network_tag]);
        hash_bytes.copy_from_slice(&self.hash);
        out
    }

    /// Encodes the address as Bech32m.
    pub fn encode(&self) -> Result<String, CryptoError> {
        let encoded = encode_bech32m(&self.hrp, &self.payload())?;
        if encoded.len() > MAX_ADDRESS_LEN {
            return Err(CryptoError::InvalidEncoding(format!(
                "address exceeds {MAX_ADDRESS_LEN} characters"
            )));
        }
        Ok(encoded)
    }

    /// Decodes a Bech32m wallet address.
    ///
    /// Fails with `InvalidEncoding` on structural errors, unknown HRPs, or a
    /// payload that is not exactly 33 bytes. Strings longer than
    /// [`MAX_ADDRESS_LEN`] are rejected before checksum work.
    pub fn decode(s: &str) -> Result<Self, CryptoError> {
        if s.len() > MAX_ADDRESS_LEN {
            return Err(CryptoError::InvalidEncoding(format!(
                "address exceeds {MAX_ADDRESS_LEN} characters"
            )));
        }
        let (hrp, payload) = decode_bech32m(s)?;
        if hrp != HRP_CLASSICAL && hrp != HRP_PQC {
            return Err(CryptoError::InvalidEncoding(format!(
                "unknown wallet address hrp: {hrp}"
            )));
        }
        if payload.len() != ADDRESS_PAYLOAD_LEN {
            return Err(CryptoError::parameter_length(
                "address payload",
                ADDRESS_PAYLOAD_LEN,
                payload.len(),
            ));
        }
        let (network_tag, hash_bytes) = match payload.split_first() {
            Some(parts) => parts,
            None => return Err(CryptoError::InvalidEncoding("empty address payload".into())),
        };
        let mut hash = [0u8; 32];
        hash.copy_from_slice(hash_bytes);
        Ok(Self {
            hrp,
            network_tag: *network_tag,
            hash,
        })
    }
}

fn parse_hrp(hrp: &str) -> Result<Hrp, CryptoError> {
    Hrp::parse(hrp).map_err(|e| CryptoError::InvalidEncoding(format!("invalid hrp {hrp}: {e}")))
}

/// Encodes arbitrary data under `hrp` with the Bech32m checksum.
pub fn encode_bech32m(hrp: &str, data: &[u8]) -> Result<String, CryptoError> {
    bech32::encode::<Bech32m>(parse_hrp(hrp)?, data)
        .map_err(|e| CryptoError::InvalidEncoding(format!("bech32m encode: {e}")))
}

/// Encodes arbitrary data under `hrp` with the legacy Bech32 checksum.
pub fn encode_bech32(hrp: &str, data: &[u8]) -> Result<String, CryptoError> {
    bech32::encode::<Bech32>(parse_hrp(hrp)?, data)
        .map_err(|e| CryptoError::InvalidEncoding(format!("bech32 encode: {e}")))
}

/// Strict Bech32m decoding. Unknown HRPs are passed through to the caller.
pub fn decode_bech32m(s: &str) -> Result<(String, Vec<u8>), CryptoError> {
    let checked = CheckedHrpstring::new::<Bech32m>(s)
        .map_err(|e| CryptoError::InvalidEncoding(format!("bech32m decode: {e}")))?;
    let hrp = checked.hrp().to_string().to_lowercase();
    let data = checked.byte_iter().collect();
    Ok((hrp, data))
}

/// Strict legacy Bech32 decoding. Unknown HRPs are passed through.
pub fn decode_bech32(s: &str) -> Result<(String, Vec<u8>), CryptoError> {
    let checked = CheckedHrpstring::new::<Bech32>(s)
        .map_err(|e| CryptoError::InvalidEncoding(format!("bech32 decode: {e}")))?;
    let hrp = checked.hrp().to_string().to_lowercase();
    let data = checked.byte_iter().collect();
    Ok((hrp, data))
}

#[cfg(test)]
mod tests;
