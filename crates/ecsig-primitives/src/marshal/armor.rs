//! Text armor for DER key containers.
//!
//! ```text
//! -----BEGIN <LABEL>-----
//! <base64 body, 64-char lines>
//! -----END <LABEL>-----
//! ```
//!
//! Framing and the base64 body are handled by `pem-rfc7468`, whose decoder
//! is constant-time over the body.

use pem_rfc7468::LineEnding;
use zeroize::Zeroizing;

use crate::PrimitivesError;

/// Label for PKCS#8 `PrivateKeyInfo` bodies.
pub const PRIVATE_KEY_LABEL: &str = "PRIVATE KEY";

/// Label for SEC1 `ECPrivateKey` bodies.
pub const EC_PRIVATE_KEY_LABEL: &str = "EC PRIVATE KEY";

/// Label for PKIX `SubjectPublicKeyInfo` bodies.
pub const PUBLIC_KEY_LABEL: &str = "PUBLIC KEY";

const BEGIN_MARKER: &[u8] = b"-----BEGIN ";

/// A decoded armor block.
///
/// The body is held in zeroizing storage since it may carry a private key.
pub struct Block {
    pub label: String,
    pub body: Zeroizing<Vec<u8>>,
}

/// Armor `body` under `label` with LF line endings.
///
/// The output always ends with a newline.
pub fn encode(label: &str, body: &[u8]) -> Result<Zeroizing<Vec<u8>>, PrimitivesError> {
    let text = pem_rfc7468::encode_string(label, LineEnding::LF, body)?;
    Ok(Zeroizing::new(text.into_bytes()))
}

/// Decode the first armor block found in `input`.
///
/// Text before the BEGIN line is skipped. The END line must carry the same
/// label. LF and CRLF line endings are both accepted.
pub fn decode(input: &[u8]) -> Result<Block, PrimitivesError> {
    let start = input
        .windows(BEGIN_MARKER.len())
        .position(|window| window == BEGIN_MARKER)
        .ok_or_else(|| {
            PrimitivesError::MalformedArmor("failed to find an armored block in input".to_string())
        })?;

    let (label, body) = pem_rfc7468::decode_vec(&input[start..])?;
    let body = Zeroizing::new(body);
    if body.is_empty() {
        return Err(PrimitivesError::MalformedArmor(format!(
            "{} block has an empty body",
            label
        )));
    }

    Ok(Block {
        label: label.to_string(),
        body,
    })
}
