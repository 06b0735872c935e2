/// Unified error type for all primitives operations.
///
/// Covers curve lookup, key container encoding and decoding, text armor,
/// and signature encoding/verification.
#[derive(Debug, thiserror::Error)]
pub enum PrimitivesError {
    #[error("unsupported curve: {0}")]
    UnsupportedCurve(String),

    #[error("unsupported key format: {0}")]
    UnsupportedFormat(String),

    #[error("key format not applicable: {0}")]
    FormatNotApplicable(String),

    #[error("malformed armor: {0}")]
    MalformedArmor(String),

    #[error("unrecognized armor label {0:?}: not a PKCS#8 or SEC1 private key")]
    UnrecognizedLabel(String),

    #[error("container parse error: {0}")]
    ContainerParse(String),

    #[error("key type mismatch: {0}")]
    KeyTypeMismatch(String),

    /// Verification failed. Carries no reason on purpose.
    #[error("the signature is not valid for the message")]
    InvalidSignature,

    #[error("malformed signature: expected {expected} bytes, got {got}")]
    MalformedSignature { expected: usize, got: usize },
}

impl From<pkcs8::Error> for PrimitivesError {
    fn from(e: pkcs8::Error) -> Self {
        PrimitivesError::ContainerParse(e.to_string())
    }
}

impl From<pkcs8::spki::Error> for PrimitivesError {
    fn from(e: pkcs8::spki::Error) -> Self {
        PrimitivesError::ContainerParse(e.to_string())
    }
}

impl From<pkcs8::der::Error> for PrimitivesError {
    fn from(e: pkcs8::der::Error) -> Self {
        PrimitivesError::ContainerParse(e.to_string())
    }
}

impl From<sec1::Error> for PrimitivesError {
    fn from(e: sec1::Error) -> Self {
        PrimitivesError::ContainerParse(e.to_string())
    }
}

impl From<p256::elliptic_curve::Error> for PrimitivesError {
    fn from(_: p256::elliptic_curve::Error) -> Self {
        // elliptic_curve::Error is opaque; it only fires on invalid key material.
        PrimitivesError::ContainerParse("invalid elliptic curve key material".to_string())
    }
}

impl From<pem_rfc7468::Error> for PrimitivesError {
    fn from(e: pem_rfc7468::Error) -> Self {
        PrimitivesError::MalformedArmor(e.to_string())
    }
}
