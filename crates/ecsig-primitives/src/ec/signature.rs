//! ECDSA signatures in fixed-width `r || s` form.
//!
//! The message is hashed with the algorithm bound to the key's curve, then
//! signed as a prehash. Each half of the signature is a big-endian integer
//! left-padded with zeros to the curve's coordinate width, so the buffer can
//! always be split exactly in half.

use ecdsa::signature::hazmat::{PrehashVerifier, RandomizedPrehashSigner};
use p256::NistP256;
use p521::NistP521;
use rand::rngs::OsRng;

use crate::curve::CurveId;
use crate::ec::private_key::{PrivateKey, SecretKey};
use crate::ec::public_key::{Point, PublicKey};
use crate::PrimitivesError;

/// An ECDSA signature with padded R and S components.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Signature {
    curve: CurveId,
    /// R, big-endian, `coordinate_len` bytes.
    r: Vec<u8>,
    /// S, big-endian, `coordinate_len` bytes.
    s: Vec<u8>,
}

impl Signature {
    /// Parse a serialized `r || s` signature.
    ///
    /// # Arguments
    /// * `curve` - Curve the signature was produced on.
    /// * `bytes` - Exactly `2 * coordinate_len` bytes.
    ///
    /// # Returns
    /// `MalformedSignature` on a length mismatch, `InvalidSignature` if
    /// either component is zero.
    pub fn from_bytes(curve: CurveId, bytes: &[u8]) -> Result<Self, PrimitivesError> {
        let width = curve.coordinate_len()?;
        if bytes.len() != 2 * width {
            return Err(PrimitivesError::MalformedSignature {
                expected: 2 * width,
                got: bytes.len(),
            });
        }
        let (r, s) = bytes.split_at(width);
        Self::checked(curve, r.to_vec(), s.to_vec())
    }

    /// Build a signature from unpadded big-endian integers.
    ///
    /// Redundant leading zeros are stripped and each component is left-padded
    /// to the curve's coordinate width. Signatures written by encoders that
    /// concatenated raw integer bytes can be recovered this way once their
    /// halves are known.
    ///
    /// # Returns
    /// `MalformedSignature` if a component is wider than the coordinate
    /// width, `InvalidSignature` if either component is zero.
    pub fn from_scalars(curve: CurveId, r: &[u8], s: &[u8]) -> Result<Self, PrimitivesError> {
        let width = curve.coordinate_len()?;
        let r = left_pad(r, width)?;
        let s = left_pad(s, width)?;
        Self::checked(curve, r, s)
    }

    fn checked(curve: CurveId, r: Vec<u8>, s: Vec<u8>) -> Result<Self, PrimitivesError> {
        if is_zero(&r) || is_zero(&s) {
            return Err(PrimitivesError::InvalidSignature);
        }
        Ok(Signature { curve, r, s })
    }

    /// The curve this signature was produced on.
    pub fn curve(&self) -> CurveId {
        self.curve
    }

    /// The padded R component.
    pub fn r(&self) -> &[u8] {
        &self.r
    }

    /// The padded S component.
    pub fn s(&self) -> &[u8] {
        &self.s
    }

    /// Serialize as `r || s`, `2 * coordinate_len` bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.r.len() + self.s.len());
        out.extend_from_slice(&self.r);
        out.extend_from_slice(&self.s);
        out
    }
}

/// Sign `message` with `key`.
///
/// The message is hashed with the algorithm bound to the key's curve. The
/// nonce is derived per RFC 6979 with fresh OS entropy mixed in.
pub fn sign(key: &PrivateKey, message: &[u8]) -> Result<Signature, PrimitivesError> {
    let curve = key.curve();
    let digest = curve.hash_algorithm()?.digest(message);

    let (r, s) = match key.secret() {
        SecretKey::P256(sk) => {
            let signer = ecdsa::SigningKey::<NistP256>::from(sk);
            let sig: ecdsa::Signature<NistP256> = signer
                .sign_prehash_with_rng(&mut OsRng, &digest)
                .map_err(|_| PrimitivesError::InvalidSignature)?;
            let (r, s) = sig.split_bytes();
            (r.to_vec(), s.to_vec())
        }
        SecretKey::P521(sk) => {
            // p521 only implements the prehash signer traits on its own newtype.
            let signer = p521::ecdsa::SigningKey::from(ecdsa::SigningKey::<NistP521>::from(sk));
            let sig: p521::ecdsa::Signature = signer
                .sign_prehash_with_rng(&mut OsRng, &digest)
                .map_err(|_| PrimitivesError::InvalidSignature)?;
            let (r, s) = sig.split_bytes();
            (r.to_vec(), s.to_vec())
        }
    };

    tracing::debug!(%curve, "created signature");
    Signature::from_scalars(curve, &r, &s)
}

/// Sign `message` and return the serialized `r || s` bytes.
pub fn create_signature(key: &PrivateKey, message: &[u8]) -> Result<Vec<u8>, PrimitivesError> {
    Ok(sign(key, message)?.to_bytes())
}

/// Verify `sig` over `message` against `key`.
///
/// Every cryptographic failure, including a signature made on another curve,
/// is reported as the same `InvalidSignature`.
pub fn verify(key: &PublicKey, message: &[u8], sig: &Signature) -> Result<(), PrimitivesError> {
    let curve = key.curve();
    let digest = curve.hash_algorithm()?.digest(message);
    if sig.curve() != curve {
        return Err(PrimitivesError::InvalidSignature);
    }
    let raw = sig.to_bytes();

    let verified = match key.point() {
        Point::P256(pk) => {
            let verifier = ecdsa::VerifyingKey::<NistP256>::from(pk);
            ecdsa::Signature::<NistP256>::from_slice(&raw)
                .and_then(|sig| verifier.verify_prehash(&digest, &sig))
                .is_ok()
        }
        Point::P521(pk) => {
            let verifier = ecdsa::VerifyingKey::<NistP521>::from(pk);
            ecdsa::Signature::<NistP521>::from_slice(&raw)
                .and_then(|sig| verifier.verify_prehash(&digest, &sig))
                .is_ok()
        }
    };

    if verified {
        Ok(())
    } else {
        Err(PrimitivesError::InvalidSignature)
    }
}

/// Verify a serialized `r || s` signature over `message`.
///
/// # Returns
/// `MalformedSignature` if `signature` is not exactly twice the key's
/// coordinate width, `InvalidSignature` if it does not verify.
pub fn verify_signature(
    key: &PublicKey,
    message: &[u8],
    signature: &[u8],
) -> Result<(), PrimitivesError> {
    let sig = Signature::from_bytes(key.curve(), signature)?;
    verify(key, message, &sig)
}

/// Strip leading zeros and left-pad a big-endian integer to `width` bytes.
fn left_pad(bytes: &[u8], width: usize) -> Result<Vec<u8>, PrimitivesError> {
    let start = bytes.iter().position(|&b| b != 0).unwrap_or(bytes.len());
    let trimmed = &bytes[start..];
    if trimmed.len() > width {
        return Err(PrimitivesError::MalformedSignature {
            expected: width,
            got: trimmed.len(),
        });
    }
    let mut out = vec![0u8; width];
    out[width - trimmed.len()..].copy_from_slice(trimmed);
    Ok(out)
}

fn is_zero(val: &[u8]) -> bool {
    val.iter().all(|&b| b == 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::{CURVE_P256, CURVE_P521};

    const MESSAGE: &[u8] = b"This is a secure message";

    #[test]
    fn test_sign_verify_each_curve() {
        for params in [&CURVE_P256, &CURVE_P521] {
            let key = PrivateKey::generate(params).unwrap();
            let sig = sign(&key, MESSAGE).unwrap();

            assert_eq!(sig.curve(), params.id);
            assert_eq!(sig.r().len(), params.coordinate_len);
            assert_eq!(sig.s().len(), params.coordinate_len);
            assert_eq!(sig.to_bytes().len(), 2 * params.coordinate_len);
            verify(&key.public_key(), MESSAGE, &sig).unwrap();
        }
    }

    #[test]
    fn test_signatures_are_randomized() {
        let key = PrivateKey::generate(&CURVE_P256).unwrap();
        let a = create_signature(&key, MESSAGE).unwrap();
        let b = create_signature(&key, MESSAGE).unwrap();
        assert_ne!(a, b);
        verify_signature(&key.public_key(), MESSAGE, &a).unwrap();
        verify_signature(&key.public_key(), MESSAGE, &b).unwrap();
    }

    #[test]
    fn test_altered_message_fails() {
        let key = PrivateKey::generate(&CURVE_P256).unwrap();
        let sig = sign(&key, MESSAGE).unwrap();
        assert!(matches!(
            verify(&key.public_key(), b"This is a secure message!", &sig),
            Err(PrimitivesError::InvalidSignature)
        ));
    }

    #[test]
    fn test_every_flipped_byte_fails() {
        let key = PrivateKey::generate(&CURVE_P256).unwrap();
        let pub_key = key.public_key();
        let raw = create_signature(&key, MESSAGE).unwrap();

        for i in 0..raw.len() {
            let mut tampered = raw.clone();
            tampered[i] ^= 0x01;
            assert!(
                matches!(
                    verify_signature(&pub_key, MESSAGE, &tampered),
                    Err(PrimitivesError::InvalidSignature)
                ),
                "flipping byte {} should invalidate the signature",
                i
            );
        }
    }

    #[test]
    fn test_wrong_length_is_malformed() {
        let key = PrivateKey::generate(&CURVE_P256).unwrap();
        let raw = create_signature(&key, MESSAGE).unwrap();

        let err = verify_signature(&key.public_key(), MESSAGE, &raw[1..]).unwrap_err();
        assert!(matches!(
            err,
            PrimitivesError::MalformedSignature { expected: 64, got: 63 }
        ));

        let mut long = raw.clone();
        long.push(0);
        assert!(matches!(
            verify_signature(&key.public_key(), MESSAGE, &long),
            Err(PrimitivesError::MalformedSignature { expected: 64, got: 65 })
        ));

        assert!(matches!(
            verify_signature(&key.public_key(), MESSAGE, &[]),
            Err(PrimitivesError::MalformedSignature { expected: 64, got: 0 })
        ));
    }

    #[test]
    fn test_zero_components_rejected() {
        let mut raw = vec![0u8; 64];
        raw[63] = 1;
        assert!(matches!(
            Signature::from_bytes(CurveId::P256, &raw),
            Err(PrimitivesError::InvalidSignature)
        ));
        assert!(matches!(
            Signature::from_scalars(CurveId::P256, &[1], &[]),
            Err(PrimitivesError::InvalidSignature)
        ));
    }

    #[test]
    fn test_signature_from_other_curve_fails() {
        let p256_key = PrivateKey::generate(&CURVE_P256).unwrap();
        let p521_key = PrivateKey::generate(&CURVE_P521).unwrap();
        let sig = sign(&p256_key, MESSAGE).unwrap();
        assert!(matches!(
            verify(&p521_key.public_key(), MESSAGE, &sig),
            Err(PrimitivesError::InvalidSignature)
        ));
    }

    #[test]
    fn test_from_scalars_pads_and_trims() {
        let sig = Signature::from_scalars(CurveId::P256, &[0x00, 0x00, 0x12], &[0xab; 31])
            .unwrap();
        let mut expected_r = vec![0u8; 32];
        expected_r[31] = 0x12;
        let mut expected_s = vec![0u8; 32];
        expected_s[1..].copy_from_slice(&[0xab; 31]);
        assert_eq!(sig.r(), expected_r.as_slice());
        assert_eq!(sig.s(), expected_s.as_slice());

        let parsed = Signature::from_bytes(CurveId::P256, &sig.to_bytes()).unwrap();
        assert_eq!(parsed, sig);

        assert!(matches!(
            Signature::from_scalars(CurveId::P256, &[0x01; 33], &[0x01]),
            Err(PrimitivesError::MalformedSignature { expected: 32, got: 33 })
        ));
    }

    #[test]
    fn test_invalid_curve_rejected() {
        assert!(matches!(
            Signature::from_bytes(CurveId::Invalid, &[1u8; 64]),
            Err(PrimitivesError::UnsupportedCurve(_))
        ));
    }

    /// Signatures produced by the earlier raw-concatenation encoder.
    /// Padded vectors verify as-is; unpadded ones are rejected by length and
    /// only verify once their halves are re-padded.
    #[test]
    fn test_legacy_signature_vectors() {
        use base64::{engine::general_purpose::STANDARD as BASE64, Engine};

        let vectors_json = include_str!("testdata/signature.vectors.json");
        let vectors: Vec<serde_json::Value> = serde_json::from_str(vectors_json).unwrap();

        for (i, v) in vectors.iter().enumerate() {
            let pem = v["privateKey"].as_str().unwrap();
            let message = v["message"].as_str().unwrap().as_bytes();
            let raw = BASE64.decode(v["signature"].as_str().unwrap()).unwrap();
            let padded = v["padded"].as_bool().unwrap();

            let key = crate::marshal::unmarshal_private_key_pem(
                pem.as_bytes(),
                crate::marshal::KeyFormat::Pkcs8,
            )
            .unwrap_or_else(|e| panic!("vector #{}: parse key: {}", i + 1, e));
            let pub_key = key.public_key();
            assert_eq!(key.curve().to_string(), v["curve"].as_str().unwrap());

            if padded {
                verify_signature(&pub_key, message, &raw)
                    .unwrap_or_else(|e| panic!("vector #{}: verify: {}", i + 1, e));
                continue;
            }

            let width = key.curve().coordinate_len().unwrap();
            assert!(
                matches!(
                    verify_signature(&pub_key, message, &raw),
                    Err(PrimitivesError::MalformedSignature { expected, got })
                        if expected == 2 * width && got == raw.len()
                ),
                "vector #{}: unpadded signature must be rejected by length",
                i + 1
            );

            let (r, s) = raw.split_at(raw.len() / 2);
            let sig = Signature::from_scalars(key.curve(), r, s).unwrap();
            verify(&pub_key, message, &sig)
                .unwrap_or_else(|e| panic!("vector #{}: verify re-padded: {}", i + 1, e));
        }
    }

    #[test]
    fn test_left_pad() {
        assert_eq!(left_pad(&[], 4).unwrap(), vec![0, 0, 0, 0]);
        assert_eq!(left_pad(&[0, 0, 0, 0, 0, 7], 4).unwrap(), vec![0, 0, 0, 7]);
        assert!(left_pad(&[1, 2, 3, 4, 5], 4).is_err());
    }
}
