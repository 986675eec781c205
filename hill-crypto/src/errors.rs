use std::fmt;

/// Which side of the cipher a rejected message was on.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum TextKind {
    Plaintext,
    Ciphertext,
}

impl fmt::Display for TextKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextKind::Plaintext => write!(f, "Plaintext"),
            TextKind::Ciphertext => write!(f, "Ciphertext"),
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum HillCryptoError {
    /// Key matrix is empty, ragged, not square, or has an entry outside `[0, 25]`.
    #[error("InvalidKey: {0}")]
    InvalidKey(String),
    /// Square matrix whose order is neither 2 nor 3.
    #[error("Unsupported matrix size {0}x{0}, only 2x2 and 3x3 keys are supported")]
    UnsupportedSize(usize),
    /// Determinant (already reduced) is zero or shares a factor with the modulus.
    #[error("The key matrix is not invertible (reduced determinant {determinant})")]
    NotInvertible { determinant: i64 },
    /// Error when trying to find a modular inverse that doesn't exist (gcd(a, m) != 1).
    #[error("NoModularInverse: {value} has no inverse mod {modulus}")]
    NoModularInverse { value: i64, modulus: u64 },
    #[error("{text} must contain only uppercase letters (A-Z), found {found:?}")]
    InvalidAlphabet { text: TextKind, found: char },
    /// Ciphertext is never padded, so its length must already fit the key order.
    #[error("Ciphertext length {length} is not a multiple of the key order {order}")]
    LengthMismatch { length: usize, order: usize },

    /// Error when creating a ring with an invalid modulus (m <= 1).
    #[error("InvalidModulus: {0}")]
    InvalidModulus(String),
    #[error("DimensionMismatch: {0}")]
    DimensionMismatch(String),
    #[error("InternalError: {0}")]
    InternalError(String),

    #[error("Key serialization: {0}")]
    SerializationError(#[from] serde_json::Error),
}
