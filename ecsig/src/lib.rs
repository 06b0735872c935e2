#![deny(missing_docs)]

//! ECDSA signing SDK.
//!
//! Re-exports the signing primitives for convenient single-crate usage and
//! provides the logging setup shared by the bundled tools.

pub use ecsig_primitives as primitives;

pub use ecsig_primitives::{
    create_signature, generate_key, marshal_private_key_pem, marshal_public_key_pem,
    unmarshal_private_key_pem, unmarshal_private_key_pem_best_guess, unmarshal_public_key_pem,
    verify_signature, CurveId, KeyFormat, KeyPair, PrimitivesError, PrivateKey, PublicKey,
    Signature,
};

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install a compact stderr subscriber filtered by `RUST_LOG`.
///
/// Falls back to `ecsig=info,ecsig_primitives=info` when `RUST_LOG` is unset.
/// Output goes to stderr so stdout stays free for key material.
///
/// # Errors
///
/// Returns an error if a global subscriber is already set.
pub fn init_tracing() -> Result<(), tracing_subscriber::util::TryInitError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("ecsig=info,ecsig_primitives=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .try_init()
}
