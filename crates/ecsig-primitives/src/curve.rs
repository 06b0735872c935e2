//! Curve registry.
//!
//! Maps a [`CurveId`] to its [`CurveParams`]: group size, coordinate width,
//! named-curve OID and the hash algorithm every signature on that curve must
//! use. The hash binding is a field of the parameter entry, so a curve cannot
//! be registered without one.

use std::fmt;

use pkcs8::ObjectIdentifier;

use crate::hash::HashAlgorithm;
use crate::PrimitivesError;

/// Identifies an elliptic curve supported by this crate.
///
/// `Invalid` is the sentinel produced by reverse lookups that match nothing;
/// operations that need real curve parameters reject it with
/// [`PrimitivesError::UnsupportedCurve`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CurveId {
    #[default]
    Invalid,
    /// NIST P-256 (secp256r1).
    P256,
    /// NIST P-521 (secp521r1).
    P521,
}

/// Parameters of a registered curve.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CurveParams {
    pub id: CurveId,
    /// Display name, e.g. `P-256`.
    pub name: &'static str,
    /// Bit size of the field.
    pub bit_size: usize,
    /// Byte width of a field element / scalar, used to pad signature halves.
    pub coordinate_len: usize,
    /// Named-curve object identifier carried in PKCS#8 and SEC1 containers.
    pub oid: ObjectIdentifier,
    /// The one hash algorithm signatures on this curve use.
    pub hash: HashAlgorithm,
}

/// NIST P-256 parameters, hashed with SHA-256.
pub const CURVE_P256: CurveParams = CurveParams {
    id: CurveId::P256,
    name: "P-256",
    bit_size: 256,
    coordinate_len: 32,
    oid: ObjectIdentifier::new_unwrap("1.2.840.10045.3.1.7"),
    hash: HashAlgorithm::Sha256,
};

/// NIST P-521 parameters, hashed with SHA-512.
pub const CURVE_P521: CurveParams = CurveParams {
    id: CurveId::P521,
    name: "P-521",
    bit_size: 521,
    coordinate_len: 66,
    oid: ObjectIdentifier::new_unwrap("1.3.132.0.35"),
    hash: HashAlgorithm::Sha512,
};

static REGISTRY: [CurveParams; 2] = [CURVE_P256, CURVE_P521];

/// Iterate over every registered curve.
pub fn registered() -> impl Iterator<Item = &'static CurveParams> {
    REGISTRY.iter()
}

impl CurveId {
    /// Look up the parameters registered for this curve.
    ///
    /// # Returns
    /// The registry entry, or `UnsupportedCurve` for `Invalid`.
    pub fn params(self) -> Result<&'static CurveParams, PrimitivesError> {
        REGISTRY
            .iter()
            .find(|params| params.id == self)
            .ok_or_else(|| {
                PrimitivesError::UnsupportedCurve(format!(
                    "the elliptic curve is not supported: {}",
                    self
                ))
            })
    }

    /// The hash algorithm signatures on this curve must use.
    pub fn hash_algorithm(self) -> Result<HashAlgorithm, PrimitivesError> {
        Ok(self.params()?.hash)
    }

    /// Byte width used for each signature component on this curve.
    pub fn coordinate_len(self) -> Result<usize, PrimitivesError> {
        Ok(self.params()?.coordinate_len)
    }

    /// Bit size of the curve's field.
    pub fn bit_size(self) -> Result<usize, PrimitivesError> {
        Ok(self.params()?.bit_size)
    }

    /// Reverse lookup by field bit size.
    ///
    /// Unknown sizes yield `CurveId::Invalid` rather than an error, so the
    /// failure surfaces at the first operation that needs the curve.
    pub fn for_size(bit_size: usize) -> CurveId {
        REGISTRY
            .iter()
            .find(|params| params.bit_size == bit_size)
            .map_or(CurveId::Invalid, |params| params.id)
    }

    /// Reverse lookup by named-curve OID. Unknown OIDs yield `Invalid`.
    pub fn from_oid(oid: &ObjectIdentifier) -> CurveId {
        REGISTRY
            .iter()
            .find(|params| params.oid == *oid)
            .map_or(CurveId::Invalid, |params| params.id)
    }
}

impl fmt::Display for CurveId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CurveId::Invalid => write!(f, "invalid"),
            CurveId::P256 => write!(f, "P-256"),
            CurveId::P521 => write!(f, "P-521"),
        }
    }
}
