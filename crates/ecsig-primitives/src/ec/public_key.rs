//! ECDSA public key tagged with its registered curve.
//!
//! Supports SEC1 point encoding, PKIX `SubjectPublicKeyInfo` DER and
//! signature verification.

use p256::elliptic_curve::sec1::ToEncodedPoint;
use p256::elliptic_curve::ALGORITHM_OID;
use pkcs8::spki::{DecodePublicKey, EncodePublicKey, SubjectPublicKeyInfoRef};

use crate::curve::CurveId;
use crate::ec::signature::{self, Signature};
use crate::PrimitivesError;

/// Curve-specific public point.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Point {
    P256(p256::PublicKey),
    P521(p521::PublicKey),
}

/// An ECDSA public key on a registered curve.
///
/// Public data; safe to clone and share.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PublicKey {
    inner: Point,
}

impl PublicKey {
    pub(crate) fn from_p256(key: p256::PublicKey) -> Self {
        PublicKey {
            inner: Point::P256(key),
        }
    }

    pub(crate) fn from_p521(key: p521::PublicKey) -> Self {
        PublicKey {
            inner: Point::P521(key),
        }
    }

    /// Create a public key from SEC1 encoded point bytes.
    ///
    /// Accepts both compressed and uncompressed encodings.
    ///
    /// # Arguments
    /// * `curve` - The curve the point lies on.
    /// * `bytes` - SEC1-encoded point.
    ///
    /// # Returns
    /// `Ok(PublicKey)` if the bytes decode to a point on the curve.
    pub fn from_sec1_bytes(curve: CurveId, bytes: &[u8]) -> Result<Self, PrimitivesError> {
        let inner = match curve {
            CurveId::P256 => Point::P256(p256::PublicKey::from_sec1_bytes(bytes)?),
            CurveId::P521 => Point::P521(p521::PublicKey::from_sec1_bytes(bytes)?),
            CurveId::Invalid => {
                return Err(PrimitivesError::UnsupportedCurve(format!(
                    "the elliptic curve is not supported: {}",
                    curve
                )))
            }
        };
        Ok(PublicKey { inner })
    }

    /// The curve this key belongs to.
    pub fn curve(&self) -> CurveId {
        match self.inner {
            Point::P256(_) => CurveId::P256,
            Point::P521(_) => CurveId::P521,
        }
    }

    /// Serialize the point in SEC1 form.
    ///
    /// # Arguments
    /// * `compress` - Emit the compressed (x-only) form when true.
    pub fn to_sec1_bytes(&self, compress: bool) -> Vec<u8> {
        match &self.inner {
            Point::P256(pk) => pk.to_encoded_point(compress).as_bytes().to_vec(),
            Point::P521(pk) => pk.to_encoded_point(compress).as_bytes().to_vec(),
        }
    }

    /// Serialize the uncompressed point as a lowercase hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_sec1_bytes(false))
    }

    /// Verify a signature over `message`.
    ///
    /// See [`signature::verify`].
    pub fn verify(&self, message: &[u8], sig: &Signature) -> Result<(), PrimitivesError> {
        signature::verify(self, message, sig)
    }

    /// Decode a PKIX `SubjectPublicKeyInfo` DER document.
    ///
    /// # Returns
    /// `KeyTypeMismatch` for non-EC keys, `UnsupportedCurve` for EC keys on
    /// an unregistered curve, `ContainerParse` for anything undecodable.
    pub fn from_public_key_der(der: &[u8]) -> Result<Self, PrimitivesError> {
        let spki = SubjectPublicKeyInfoRef::try_from(der)?;
        if spki.algorithm.oid != ALGORITHM_OID {
            return Err(PrimitivesError::KeyTypeMismatch(format!(
                "the encoded public key is not an ECDSA key (algorithm {})",
                spki.algorithm.oid
            )));
        }
        let curve_oid = spki.algorithm.parameters_oid()?;
        let inner = match CurveId::from_oid(&curve_oid) {
            CurveId::P256 => Point::P256(p256::PublicKey::from_public_key_der(der)?),
            CurveId::P521 => Point::P521(p521::PublicKey::from_public_key_der(der)?),
            CurveId::Invalid => {
                return Err(PrimitivesError::UnsupportedCurve(format!(
                    "no curve registered for OID {}",
                    curve_oid
                )))
            }
        };
        Ok(PublicKey { inner })
    }

    /// Encode as a PKIX `SubjectPublicKeyInfo` DER document.
    pub fn to_public_key_der(&self) -> Result<Vec<u8>, PrimitivesError> {
        let doc = match &self.inner {
            Point::P256(pk) => pk.to_public_key_der()?,
            Point::P521(pk) => pk.to_public_key_der()?,
        };
        Ok(doc.as_bytes().to_vec())
    }

    pub(crate) fn point(&self) -> &Point {
        &self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::{CURVE_P256, CURVE_P521};
    use crate::ec::private_key::PrivateKey;

    #[test]
    fn test_sec1_roundtrip_both_encodings() {
        for params in [&CURVE_P256, &CURVE_P521] {
            let pub_key = PrivateKey::generate(params).unwrap().public_key();

            let uncompressed = pub_key.to_sec1_bytes(false);
            assert_eq!(uncompressed.len(), 1 + 2 * params.coordinate_len);
            assert_eq!(uncompressed[0], 0x04);
            let parsed = PublicKey::from_sec1_bytes(params.id, &uncompressed).unwrap();
            assert_eq!(parsed, pub_key);

            let compressed = pub_key.to_sec1_bytes(true);
            assert_eq!(compressed.len(), 1 + params.coordinate_len);
            let parsed = PublicKey::from_sec1_bytes(params.id, &compressed).unwrap();
            assert_eq!(parsed, pub_key);
        }
    }

    #[test]
    fn test_sec1_rejects_wrong_curve_and_garbage() {
        let pub_key = PrivateKey::generate(&CURVE_P256).unwrap().public_key();
        let bytes = pub_key.to_sec1_bytes(false);

        assert!(PublicKey::from_sec1_bytes(CurveId::P521, &bytes).is_err());
        assert!(PublicKey::from_sec1_bytes(CurveId::P256, &[]).is_err());
        assert!(matches!(
            PublicKey::from_sec1_bytes(CurveId::Invalid, &bytes),
            Err(PrimitivesError::UnsupportedCurve(_))
        ));
    }

    #[test]
    fn test_spki_der_roundtrip() {
        for params in [&CURVE_P256, &CURVE_P521] {
            let pub_key = PrivateKey::generate(params).unwrap().public_key();
            let der = pub_key.to_public_key_der().unwrap();
            let parsed = PublicKey::from_public_key_der(&der).unwrap();
            assert_eq!(parsed, pub_key);
            assert_eq!(parsed.curve(), params.id);
        }
    }

    #[test]
    fn test_spki_rejects_truncated_document() {
        let pub_key = PrivateKey::generate(&CURVE_P256).unwrap().public_key();
        let der = pub_key.to_public_key_der().unwrap();
        assert!(matches!(
            PublicKey::from_public_key_der(&der[..der.len() - 1]),
            Err(PrimitivesError::ContainerParse(_))
        ));
    }
}
