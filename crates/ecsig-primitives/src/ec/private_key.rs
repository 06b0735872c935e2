//! ECDSA private key tagged with its registered curve.
//!
//! Wraps the RustCrypto `SecretKey` for each supported curve and adds
//! generation from registry parameters, PKCS#8 and SEC1 DER containers,
//! and message signing.

use std::fmt;

use p256::elliptic_curve::ALGORITHM_OID;
use pkcs8::{DecodePrivateKey, EncodePrivateKey, PrivateKeyInfo};
use rand::rngs::OsRng;
use sec1::der::Encode;
use zeroize::Zeroizing;

use crate::curve::{CurveId, CurveParams};
use crate::ec::public_key::PublicKey;
use crate::ec::signature::{self, Signature};
use crate::PrimitivesError;

/// Curve-specific secret scalar.
#[derive(Clone, PartialEq, Eq)]
pub(crate) enum SecretKey {
    P256(p256::SecretKey),
    P521(p521::SecretKey),
}

/// An ECDSA private key on a registered curve.
///
/// The scalar is wiped from memory when the key is dropped.
#[derive(Clone, PartialEq, Eq)]
pub struct PrivateKey {
    inner: SecretKey,
}

impl PrivateKey {
    /// Generate a new random private key on the given curve using the OS
    /// random number generator.
    ///
    /// # Arguments
    /// * `params` - Parameters of a registered curve, e.g. `CURVE_P256`.
    ///
    /// # Returns
    /// A fresh key, or `UnsupportedCurve` if `params` is not a registry entry.
    pub fn generate(params: &CurveParams) -> Result<Self, PrimitivesError> {
        let registered = params.id.params()?;
        if registered != params {
            return Err(PrimitivesError::UnsupportedCurve(format!(
                "parameters for {} do not match the registry",
                params.name
            )));
        }
        let inner = match params.id {
            CurveId::P256 => SecretKey::P256(p256::SecretKey::random(&mut OsRng)),
            CurveId::P521 => SecretKey::P521(p521::SecretKey::random(&mut OsRng)),
            CurveId::Invalid => return Err(unsupported(params.id)),
        };
        tracing::debug!(curve = %params.id, "generated private key");
        Ok(PrivateKey { inner })
    }

    /// Create a private key from a raw big-endian scalar.
    ///
    /// # Arguments
    /// * `curve` - The curve the scalar belongs to.
    /// * `bytes` - The scalar, exactly `coordinate_len` bytes long.
    ///
    /// # Returns
    /// `Ok(PrivateKey)` if the scalar is non-zero and below the group order.
    pub fn from_bytes(curve: CurveId, bytes: &[u8]) -> Result<Self, PrimitivesError> {
        let expected = curve.coordinate_len()?;
        if bytes.len() != expected {
            return Err(PrimitivesError::ContainerParse(format!(
                "expected a {} byte scalar for {}, got {}",
                expected,
                curve,
                bytes.len()
            )));
        }
        let inner = match curve {
            CurveId::P256 => SecretKey::P256(p256::SecretKey::from_slice(bytes)?),
            CurveId::P521 => SecretKey::P521(p521::SecretKey::from_slice(bytes)?),
            CurveId::Invalid => return Err(unsupported(curve)),
        };
        Ok(PrivateKey { inner })
    }

    /// Create a private key from a hexadecimal scalar.
    pub fn from_hex(curve: CurveId, hex_str: &str) -> Result<Self, PrimitivesError> {
        let bytes = Zeroizing::new(
            hex::decode(hex_str).map_err(|e| PrimitivesError::ContainerParse(e.to_string()))?,
        );
        Self::from_bytes(curve, &bytes)
    }

    /// The curve this key was generated under.
    pub fn curve(&self) -> CurveId {
        match self.inner {
            SecretKey::P256(_) => CurveId::P256,
            SecretKey::P521(_) => CurveId::P521,
        }
    }

    /// Serialize the scalar as big-endian bytes, padded to the curve's
    /// coordinate width.
    pub fn to_bytes(&self) -> Zeroizing<Vec<u8>> {
        match &self.inner {
            SecretKey::P256(sk) => Zeroizing::new(sk.to_bytes().to_vec()),
            SecretKey::P521(sk) => Zeroizing::new(sk.to_bytes().to_vec()),
        }
    }

    /// Serialize the scalar as a lowercase hexadecimal string.
    pub fn to_hex(&self) -> Zeroizing<String> {
        Zeroizing::new(hex::encode(self.to_bytes().as_slice()))
    }

    /// Derive the corresponding public key.
    pub fn public_key(&self) -> PublicKey {
        match &self.inner {
            SecretKey::P256(sk) => PublicKey::from_p256(sk.public_key()),
            SecretKey::P521(sk) => PublicKey::from_p521(sk.public_key()),
        }
    }

    /// Hash `message` with the curve's bound algorithm and sign it.
    ///
    /// See [`signature::sign`].
    pub fn sign(&self, message: &[u8]) -> Result<Signature, PrimitivesError> {
        signature::sign(self, message)
    }

    /// Decode a PKCS#8 `PrivateKeyInfo` DER document.
    ///
    /// The algorithm must be id-ecPublicKey and its named curve must be
    /// registered.
    ///
    /// # Returns
    /// `KeyTypeMismatch` for non-EC keys, `UnsupportedCurve` for EC keys on
    /// an unregistered curve, `ContainerParse` for anything undecodable.
    pub fn from_pkcs8_der(der: &[u8]) -> Result<Self, PrimitivesError> {
        let info = PrivateKeyInfo::try_from(der)?;
        if info.algorithm.oid != ALGORITHM_OID {
            return Err(PrimitivesError::KeyTypeMismatch(format!(
                "the encoded private key is not an ECDSA key (algorithm {})",
                info.algorithm.oid
            )));
        }
        let curve_oid = info.algorithm.parameters_oid()?;
        let inner = match CurveId::from_oid(&curve_oid) {
            CurveId::P256 => SecretKey::P256(p256::SecretKey::from_pkcs8_der(der)?),
            CurveId::P521 => SecretKey::P521(p521::SecretKey::from_pkcs8_der(der)?),
            CurveId::Invalid => {
                return Err(PrimitivesError::UnsupportedCurve(format!(
                    "no curve registered for OID {}",
                    curve_oid
                )))
            }
        };
        Ok(PrivateKey { inner })
    }

    /// Encode as a PKCS#8 `PrivateKeyInfo` DER document.
    pub fn to_pkcs8_der(&self) -> Result<Zeroizing<Vec<u8>>, PrimitivesError> {
        let doc = match &self.inner {
            SecretKey::P256(sk) => sk.to_pkcs8_der()?,
            SecretKey::P521(sk) => sk.to_pkcs8_der()?,
        };
        Ok(Zeroizing::new(doc.as_bytes().to_vec()))
    }

    /// Decode a SEC1 `ECPrivateKey` DER document.
    ///
    /// The document must name its curve in the parameters field.
    pub fn from_sec1_der(der: &[u8]) -> Result<Self, PrimitivesError> {
        let ec_key = sec1::EcPrivateKey::try_from(der)?;
        let curve_oid = ec_key
            .parameters
            .and_then(|params| params.named_curve())
            .ok_or_else(|| {
                PrimitivesError::ContainerParse(
                    "SEC1 private key does not name its curve".to_string(),
                )
            })?;
        let inner = match CurveId::from_oid(&curve_oid) {
            CurveId::P256 => SecretKey::P256(p256::SecretKey::from_sec1_der(der)?),
            CurveId::P521 => SecretKey::P521(p521::SecretKey::from_sec1_der(der)?),
            CurveId::Invalid => {
                return Err(PrimitivesError::UnsupportedCurve(format!(
                    "no curve registered for OID {}",
                    curve_oid
                )))
            }
        };
        Ok(PrivateKey { inner })
    }

    /// Encode as a SEC1 `ECPrivateKey` DER document, including the
    /// named-curve OID and the public point.
    ///
    /// The named-curve OID is always written; `elliptic_curve`'s own SEC1
    /// encoder leaves it out.
    pub fn to_sec1_der(&self) -> Result<Zeroizing<Vec<u8>>, PrimitivesError> {
        let oid = self.curve().params()?.oid;
        let scalar = self.to_bytes();
        let point = self.public_key().to_sec1_bytes(false);
        let ec_key = sec1::EcPrivateKey {
            private_key: scalar.as_slice(),
            parameters: Some(sec1::EcParameters::NamedCurve(oid)),
            public_key: Some(point.as_slice()),
        };
        Ok(Zeroizing::new(ec_key.to_der()?))
    }

    pub(crate) fn secret(&self) -> &SecretKey {
        &self.inner
    }
}

fn unsupported(curve: CurveId) -> PrimitivesError {
    PrimitivesError::UnsupportedCurve(format!("the elliptic curve is not supported: {}", curve))
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrivateKey")
            .field("curve", &self.curve())
            .finish_non_exhaustive()
    }
}
