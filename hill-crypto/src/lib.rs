//! Hill cipher engine: 2×2 and 3×3 key matrices over the 26-letter alphabet.
//!
//! ```
//! use hill_crypto::{KeyMatrix, decrypt, encrypt};
//!
//! let key = KeyMatrix::try_with(vec![vec![3, 3], vec![2, 5]]).unwrap();
//! let ciphertext = encrypt("help", &key).unwrap();
//! assert_eq!(ciphertext, "HIAT");
//! assert_eq!(decrypt(&ciphertext, &key).unwrap(), "HELP");
//! ```

pub mod cipher;
pub mod errors;
pub mod key;
pub mod preset;
pub mod ring;

pub use cipher::{HillCipher, decrypt, encrypt, invert_key};
pub use errors::{HillCryptoError, TextKind};
pub use key::KeyMatrix;
