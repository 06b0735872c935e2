//! ECDSA keys and signatures over the registered NIST curves.
//!
//! Provides private and public keys tagged with their curve, key pair
//! generation, DER container conversions, and fixed-width signatures.

pub mod private_key;
pub mod public_key;
pub mod signature;

pub use private_key::PrivateKey;
pub use public_key::PublicKey;
pub use signature::Signature;

use crate::curve::CurveId;
use crate::PrimitivesError;

/// A freshly generated private key and its public half.
#[derive(Clone, Debug)]
pub struct KeyPair {
    pub private_key: PrivateKey,
    pub public_key: PublicKey,
}

impl KeyPair {
    /// Wrap an existing private key, deriving its public key.
    pub fn from_private_key(private_key: PrivateKey) -> Self {
        let public_key = private_key.public_key();
        KeyPair {
            private_key,
            public_key,
        }
    }
}

/// Generate a key pair on the given curve.
///
/// # Returns
/// `UnsupportedCurve` for `CurveId::Invalid`.
pub fn generate_key(curve: CurveId) -> Result<KeyPair, PrimitivesError> {
    let private_key = PrivateKey::generate(curve.params()?)?;
    Ok(KeyPair::from_private_key(private_key))
}
