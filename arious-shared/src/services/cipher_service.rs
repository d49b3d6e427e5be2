use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig, STANDARD};
use base64::engine::DecodePaddingMode;
use base64::Engine;
use cbc::cipher::block_padding::{NoPadding, Pkcs7};
use cbc::cipher::{BlockDecryptMut, KeyIvInit};
use once_cell::sync::Lazy;
use regex::Regex;
use crate::models::errors::{CipherConfigError, DecryptionError};
use crate::utilities::config;

type Aes256CbcDec = cbc::Decryptor<aes::Aes256>;

pub const KEY_LEN: usize = 32;
pub const IV_LEN: usize = 16;
pub const BLOCK_SIZE: usize = 16;

/// Returned in place of the plaintext when no strategy can decrypt a message.
pub const DECRYPTION_FAILED_SENTINEL: &str = "[Message could not be decrypted]";

static BASE64_TEXT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9+/]*={0,2}$").expect("base64 pattern is valid"));

// Producers are not consistent about trailing '=' padding.
const LENIENT_BASE64: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

/// Key material shared out-of-band with the client that encrypts message content.
#[derive(Clone, PartialEq, Eq)]
pub struct CipherConfig {
    key: [u8; KEY_LEN],
    iv: [u8; IV_LEN],
}

impl std::fmt::Debug for CipherConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CipherConfig").finish_non_exhaustive()
    }
}

impl CipherConfig {
    pub fn new(key: [u8; KEY_LEN], iv: [u8; IV_LEN]) -> Self {
        Self { key, iv }
    }

    pub fn from_base64(key: &str, iv: &str) -> Result<Self, CipherConfigError> {
        Ok(Self {
            key: decode_fixed::<KEY_LEN>("key", key)?,
            iv: decode_fixed::<IV_LEN>("iv", iv)?,
        })
    }

    pub fn from_env() -> Result<Self, CipherConfigError> {
        Self::from_base64(&config::get_message_cipher_key(), &config::get_message_cipher_iv())
    }

    pub fn key(&self) -> &[u8; KEY_LEN] {
        &self.key
    }

    pub fn iv(&self) -> &[u8; IV_LEN] {
        &self.iv
    }
}

fn decode_fixed<const N: usize>(name: &'static str, encoded: &str) -> Result<[u8; N], CipherConfigError> {
    let bytes = STANDARD
        .decode(encoded.trim())
        .map_err(|e| CipherConfigError::Encoding(name, e))?;

    let actual = bytes.len();
    bytes.try_into().map_err(|_| CipherConfigError::Length {
        name,
        expected: N,
        actual,
    })
}

/// Padding handling attempted in order until one produces UTF-8 plaintext.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaddingStrategy {
    /// PKCS#7 removal with validation.
    Pkcs7,
    /// Raw decrypt, then drop as many bytes as the last byte says (if <= block size).
    TrailingLength,
    /// Same as `TrailingLength`; a separate attempt in the sequence.
    TrailingLengthRetry,
}

impl PaddingStrategy {
    pub const ORDERED: [PaddingStrategy; 3] = [
        PaddingStrategy::Pkcs7,
        PaddingStrategy::TrailingLength,
        PaddingStrategy::TrailingLengthRetry,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            PaddingStrategy::Pkcs7 => "pkcs7",
            PaddingStrategy::TrailingLength => "trailing-length",
            PaddingStrategy::TrailingLengthRetry => "trailing-length-retry",
        }
    }
}

fn strip_trailing_length(plaintext: &mut Vec<u8>) {
    if let Some(&last) = plaintext.last() {
        let pad = last as usize;
        if pad <= BLOCK_SIZE && pad <= plaintext.len() {
            plaintext.truncate(plaintext.len() - pad);
        }
    }
}

pub struct CipherService {
    config: CipherConfig,
}

impl CipherService {
    pub fn new(config: CipherConfig) -> Self {
        Self { config }
    }

    /// Decrypts message content, never failing: empty and non-base64 input is returned
    /// as-is, and total failure yields [`DECRYPTION_FAILED_SENTINEL`].
    pub fn decrypt(&self, ciphertext: &str, message_id: &str) -> String {
        if ciphertext.is_empty() {
            log::info!("[decrypt] Empty text for message {}", message_id);
            return ciphertext.to_string();
        }

        if !BASE64_TEXT.is_match(ciphertext) {
            log::info!("[decrypt] Text appears to be plain text for message {}", message_id);
            return ciphertext.to_string();
        }

        let bytes = match LENIENT_BASE64.decode(ciphertext) {
            Ok(bytes) => bytes,
            Err(e) => {
                log::error!("[decrypt] Could not decode base64 for message {}: {}", message_id, e);
                return DECRYPTION_FAILED_SENTINEL.to_string();
            }
        };

        for strategy in PaddingStrategy::ORDERED {
            match self.decrypt_with(strategy, &bytes) {
                Ok(plaintext) => {
                    log::info!(
                        "[decrypt] Strategy {} succeeded for message {} ({} chars)",
                        strategy.label(),
                        message_id,
                        plaintext.chars().count()
                    );
                    return plaintext;
                }
                Err(e) => log::warn!("[decrypt] Strategy {} failed for message {}: {}", strategy.label(), message_id, e),
            }
        }

        log::error!("[decrypt] All decryption strategies failed for message {}", message_id);
        DECRYPTION_FAILED_SENTINEL.to_string()
    }

    pub fn decrypt_with(&self, strategy: PaddingStrategy, ciphertext: &[u8]) -> Result<String, DecryptionError> {
        let decryptor = Aes256CbcDec::new_from_slices(&self.config.key, &self.config.iv)
            .map_err(|_| DecryptionError::KeyLength)?;

        let plaintext = match strategy {
            PaddingStrategy::Pkcs7 => decryptor
                .decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
                .map_err(|_| DecryptionError::Unpad)?,
            PaddingStrategy::TrailingLength | PaddingStrategy::TrailingLengthRetry => {
                let mut raw = decryptor
                    .decrypt_padded_vec_mut::<NoPadding>(ciphertext)
                    .map_err(|_| DecryptionError::Unpad)?;
                strip_trailing_length(&mut raw);
                raw
            }
        };

        Ok(String::from_utf8(plaintext)?)
    }
}
