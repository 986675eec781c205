//! Block-wise Hill cipher transform over the 26-letter alphabet.

use crate::errors::{HillCryptoError, TextKind};
use crate::key::KeyMatrix;
use crate::preset::alphabet::{ALPHABET_SIZE, PADDING_INDEX, index_to_letter, letter_to_index};
use crate::ring::matrix_ops::{matrix_mod_inv, matrix_vector_mul};
use crate::ring::{Matrix, Ring, Vector};

/// A key together with its precomputed inverse, for encrypting and decrypting many messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HillCipher {
    key: KeyMatrix,
    inverse: KeyMatrix,
}

impl HillCipher {
    /// Validates that `key` can decrypt and caches its inverse.
    ///
    /// # Errors
    ///
    /// Returns `HillCryptoError::NotInvertible` if the key's determinant is not a unit mod 26.
    pub fn try_with(key: KeyMatrix) -> Result<Self, HillCryptoError> {
        let inverse = key.inverse()?;
        Ok(Self { key, inverse })
    }

    pub fn key(&self) -> &KeyMatrix {
        &self.key
    }

    pub fn inverse(&self) -> &KeyMatrix {
        &self.inverse
    }

    pub fn encrypt(&self, plaintext: &str) -> Result<String, HillCryptoError> {
        encrypt(plaintext, &self.key)
    }

    pub fn decrypt(&self, ciphertext: &str) -> Result<String, HillCryptoError> {
        let blocks = prepare_ciphertext(ciphertext, self.key.order())?;
        transform(self.inverse.rows(), &blocks)
    }
}

/// Encrypts `plaintext` with `key`.
///
/// The message is uppercased and stripped of spaces, then right-padded with `Z` until its length
/// is a multiple of the key order. Each block `p` becomes `K · p mod 26`, blocks kept in order.
/// The key does not have to be invertible to encrypt.
///
/// # Errors
///
/// Returns `HillCryptoError::InvalidAlphabet` if anything but letters and spaces is present.
///
/// # Example
///
/// ```
/// # use hill_crypto::{encrypt, KeyMatrix};
/// let key: KeyMatrix = "6,24,1;13,16,10;20,17,15".parse().unwrap();
/// assert_eq!(encrypt("act", &key).unwrap(), "POH");
/// assert_eq!(encrypt("HELLO", &key).unwrap(), "TFJLTB");
/// ```
pub fn encrypt(plaintext: &str, key: &KeyMatrix) -> Result<String, HillCryptoError> {
    let order = key.order();
    let mut values = prepare(plaintext, TextKind::Plaintext)?;
    values.resize(values.len().next_multiple_of(order), PADDING_INDEX);

    transform(key.rows(), &values)
}

/// Decrypts `ciphertext` with `key`.
///
/// Ciphertext goes through the same cleanup as plaintext but is never padded.
///
/// # Errors
///
/// * `HillCryptoError::InvalidAlphabet` for characters other than letters and spaces.
/// * `HillCryptoError::LengthMismatch` if the letter count is not a multiple of the key order.
/// * `HillCryptoError::NotInvertible` if the key cannot be inverted mod 26.
///
/// # Example
///
/// ```
/// # use hill_crypto::{decrypt, KeyMatrix};
/// let key: KeyMatrix = "6,24,1;13,16,10;20,17,15".parse().unwrap();
/// assert_eq!(decrypt("POH", &key).unwrap(), "ACT");
/// ```
pub fn decrypt(ciphertext: &str, key: &KeyMatrix) -> Result<String, HillCryptoError> {
    let blocks = prepare_ciphertext(ciphertext, key.order())?;
    let inverse = key.inverse()?;

    transform(inverse.rows(), &blocks)
}

/// Computes the inverse of `key` modulo `modulus` (26 for the cipher itself).
///
/// The result is again a key matrix, so `modulus` is limited to `2..=26`.
///
/// # Errors
///
/// * `HillCryptoError::InvalidModulus` if `modulus <= 1` or `modulus > 26`.
/// * `HillCryptoError::NotInvertible` if the determinant is zero or not coprime with `modulus`.
/// * `HillCryptoError::NoModularInverse` if no inverse of the determinant was found.
pub fn invert_key(key: &KeyMatrix, modulus: u64) -> Result<KeyMatrix, HillCryptoError> {
    if modulus > ALPHABET_SIZE {
        return Err(HillCryptoError::InvalidModulus(format!(
            "Modulus must not exceed the alphabet size {}, got {}",
            ALPHABET_SIZE, modulus
        )));
    }

    let ring = Ring::try_with(modulus)?;
    let inverse = matrix_mod_inv(key.rows(), &ring)?;
    log::debug!("inverted {}x{} key mod {}", key.order(), key.order(), modulus);

    KeyMatrix::try_with(inverse)
}

/// Uppercases, drops spaces and maps every letter to `0..=25`.
fn prepare(text: &str, kind: TextKind) -> Result<Vector, HillCryptoError> {
    text.chars()
        .filter(|&c| c != ' ')
        .map(|c| c.to_ascii_uppercase())
        .map(|c| {
            letter_to_index(c).ok_or(HillCryptoError::InvalidAlphabet {
                text: kind,
                found: c,
            })
        })
        .collect()
}

fn prepare_ciphertext(ciphertext: &str, order: usize) -> Result<Vector, HillCryptoError> {
    let values = prepare(ciphertext, TextKind::Ciphertext)?;
    if values.len() % order != 0 {
        return Err(HillCryptoError::LengthMismatch {
            length: values.len(),
            order,
        });
    }

    Ok(values)
}

/// Multiplies every consecutive block of `values` by `matrix` and spells the result.
///
/// `values.len()` must already be a multiple of the matrix order.
fn transform(matrix: &Matrix, values: &[i64]) -> Result<String, HillCryptoError> {
    let ring = Ring::alphabet();
    let order = matrix.len();

    let mut text = String::with_capacity(values.len());
    for (i, block) in values.chunks_exact(order).enumerate() {
        let out = matrix_vector_mul(matrix, block, &ring)?;
        log::trace!("block {}: {:?} -> {:?}", i, block, out);

        for value in out {
            let letter = index_to_letter(value).ok_or_else(|| {
                HillCryptoError::InternalError(format!("{} is outside the alphabet", value))
            })?;
            text.push(letter);
        }
    }

    Ok(text)
}
