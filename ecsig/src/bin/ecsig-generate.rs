//! Generate a P-256 key pair and print it as PKCS#8 armored text.
//!
//! The private key is written first, then the public key, both to stdout.

use std::io::Write;

use anyhow::Context;
use ecsig::{generate_key, marshal_private_key_pem, marshal_public_key_pem, CurveId, KeyFormat};

fn main() -> anyhow::Result<()> {
    ecsig::init_tracing().context("failed to initialize logging")?;

    let pair = generate_key(CurveId::P256).context("key generation failed")?;
    let private_pem = marshal_private_key_pem(&pair.private_key, KeyFormat::Pkcs8)
        .context("failed to encode private key")?;
    let public_pem = marshal_public_key_pem(&pair.public_key, KeyFormat::Pkcs8)
        .context("failed to encode public key")?;

    let mut out = std::io::stdout().lock();
    out.write_all(&private_pem)?;
    out.write_all(&public_pem)?;
    out.flush()?;

    tracing::info!(curve = %CurveId::P256, "generated key pair");
    Ok(())
}
