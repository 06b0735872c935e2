//! ECDSA signing primitives.
//!
//! This crate provides:
//! - A curve registry binding each supported curve (P-256, P-521) to its hash
//! - Key pair generation
//! - Armored PKCS#8 / SEC1 key encoding with label-based format detection
//! - Fixed-width `r || s` signatures over curve-bound message digests

pub mod curve;
pub mod hash;
pub mod ec;
pub mod marshal;

mod error;
pub use error::PrimitivesError;

pub use curve::{CurveId, CurveParams, CURVE_P256, CURVE_P521};
pub use ec::signature::{create_signature, sign, verify, verify_signature};
pub use ec::{generate_key, KeyPair, PrivateKey, PublicKey, Signature};
pub use marshal::{
    marshal_private_key_pem, marshal_private_key_pem_str, marshal_public_key_pem,
    unmarshal_private_key_pem, unmarshal_private_key_pem_best_guess, unmarshal_public_key_pem,
    KeyFormat,
};
