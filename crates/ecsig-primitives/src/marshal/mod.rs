//! Armored key encoding.
//!
//! Converts keys to and from text armor over one of two DER containers:
//! PKCS#8 (`PRIVATE KEY` / `PUBLIC KEY`) or SEC1 (`EC PRIVATE KEY`, private
//! keys only). Every operation is a stateless transform.

pub mod armor;

use std::fmt;
use std::str::FromStr;

use zeroize::Zeroizing;

use crate::ec::{PrivateKey, PublicKey};
use crate::PrimitivesError;

pub use armor::{EC_PRIVATE_KEY_LABEL, PRIVATE_KEY_LABEL, PUBLIC_KEY_LABEL};

/// Binary container applied to a key before armoring.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum KeyFormat {
    /// PKCS#8 `PrivateKeyInfo` for private keys, PKIX
    /// `SubjectPublicKeyInfo` for public keys.
    #[default]
    Pkcs8,
    /// SEC1 `ECPrivateKey`. Has no public key form.
    Sec1,
}

impl KeyFormat {
    /// Armor label used for private keys in this format.
    pub fn private_label(self) -> &'static str {
        match self {
            KeyFormat::Pkcs8 => PRIVATE_KEY_LABEL,
            KeyFormat::Sec1 => EC_PRIVATE_KEY_LABEL,
        }
    }
}

impl fmt::Display for KeyFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyFormat::Pkcs8 => write!(f, "PKCS8"),
            KeyFormat::Sec1 => write!(f, "SEC1"),
        }
    }
}

impl FromStr for KeyFormat {
    type Err = PrimitivesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("PKCS8") {
            Ok(KeyFormat::Pkcs8)
        } else if s.eq_ignore_ascii_case("SEC1") {
            Ok(KeyFormat::Sec1)
        } else {
            Err(PrimitivesError::UnsupportedFormat(format!(
                "the specified key format is not supported: {:?}",
                s
            )))
        }
    }
}

/// Encode a private key as armored text.
///
/// PKCS#8 is armored as `PRIVATE KEY`, SEC1 as `EC PRIVATE KEY`.
pub fn marshal_private_key_pem(
    key: &PrivateKey,
    format: KeyFormat,
) -> Result<Zeroizing<Vec<u8>>, PrimitivesError> {
    let der = match format {
        KeyFormat::Pkcs8 => key.to_pkcs8_der()?,
        KeyFormat::Sec1 => key.to_sec1_der()?,
    };
    tracing::debug!(curve = %key.curve(), %format, "marshaled private key");
    armor::encode(format.private_label(), &der)
}

/// Like [`marshal_private_key_pem`], with the format given by name.
///
/// # Returns
/// `UnsupportedFormat` for names other than `PKCS8` and `SEC1`.
pub fn marshal_private_key_pem_str(
    key: &PrivateKey,
    format: &str,
) -> Result<Zeroizing<Vec<u8>>, PrimitivesError> {
    marshal_private_key_pem(key, format.parse()?)
}

/// Encode a public key as armored `PUBLIC KEY` text.
///
/// # Returns
/// `FormatNotApplicable` for SEC1, which has no public key container.
pub fn marshal_public_key_pem(
    key: &PublicKey,
    format: KeyFormat,
) -> Result<Vec<u8>, PrimitivesError> {
    match format {
        KeyFormat::Pkcs8 => {
            let der = key.to_public_key_der()?;
            tracing::debug!(curve = %key.curve(), %format, "marshaled public key");
            Ok(armor::encode(PUBLIC_KEY_LABEL, &der)?.to_vec())
        }
        KeyFormat::Sec1 => Err(sec1_public_key()),
    }
}

/// Decode an armored private key stored in `format`.
///
/// The armor label is not checked against `format`.
///
/// # Returns
/// `MalformedArmor` when no block is found, `ContainerParse` when the body
/// does not decode as `format`, `KeyTypeMismatch` for non-EC keys.
pub fn unmarshal_private_key_pem(
    input: &[u8],
    format: KeyFormat,
) -> Result<PrivateKey, PrimitivesError> {
    let block = armor::decode(input)?;
    if block.label != format.private_label() {
        tracing::debug!(
            label = %block.label,
            %format,
            "armor label does not match requested format"
        );
    }
    let key = decode_private_key(&block.body, format)?;
    tracing::debug!(curve = %key.curve(), %format, "unmarshaled private key");
    Ok(key)
}

/// Decode an armored public key stored in `format`.
///
/// # Returns
/// `FormatNotApplicable` for SEC1, otherwise as [`unmarshal_private_key_pem`].
pub fn unmarshal_public_key_pem(
    input: &[u8],
    format: KeyFormat,
) -> Result<PublicKey, PrimitivesError> {
    if format == KeyFormat::Sec1 {
        return Err(sec1_public_key());
    }
    let block = armor::decode(input)?;
    let key = PublicKey::from_public_key_der(&block.body)?;
    tracing::debug!(curve = %key.curve(), %format, "unmarshaled public key");
    Ok(key)
}

/// Decode an armored private key, picking the container from the label.
///
/// `EC PRIVATE KEY` selects SEC1; every other label is tried as PKCS#8.
/// When a label that is neither `EC PRIVATE KEY` nor `PRIVATE KEY` also
/// fails to parse as PKCS#8, the error names the label instead of the
/// container failure.
pub fn unmarshal_private_key_pem_best_guess(
    input: &[u8],
) -> Result<PrivateKey, PrimitivesError> {
    let block = armor::decode(input)?;
    let format = match block.label.as_str() {
        EC_PRIVATE_KEY_LABEL => KeyFormat::Sec1,
        _ => KeyFormat::Pkcs8,
    };

    let result = decode_private_key(&block.body, format);
    if block.label != EC_PRIVATE_KEY_LABEL && block.label != PRIVATE_KEY_LABEL {
        return match result {
            Ok(key) => {
                tracing::warn!(
                    label = %block.label,
                    "non-standard private key label decoded as PKCS8"
                );
                Ok(key)
            }
            Err(PrimitivesError::ContainerParse(_)) => {
                Err(PrimitivesError::UnrecognizedLabel(block.label))
            }
            Err(e) => Err(e),
        };
    }

    let key = result?;
    tracing::debug!(curve = %key.curve(), %format, "unmarshaled private key by label");
    Ok(key)
}

fn decode_private_key(der: &[u8], format: KeyFormat) -> Result<PrivateKey, PrimitivesError> {
    match format {
        KeyFormat::Pkcs8 => PrivateKey::from_pkcs8_der(der),
        KeyFormat::Sec1 => PrivateKey::from_sec1_der(der),
    }
}

fn sec1_public_key() -> PrimitivesError {
    PrimitivesError::FormatNotApplicable(
        "SEC1 defines no public key container; use PKCS8".to_string(),
    )
}
