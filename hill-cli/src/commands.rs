use anyhow::Context;
use hill_crypto::{KeyMatrix, decrypt, encrypt};

/// One request to the cipher engine, with the key already resolved.
#[derive(Debug)]
pub enum Command {
    Encrypt { key: KeyMatrix, text: String },
    Decrypt { key: KeyMatrix, text: String },
    Invert { key: KeyMatrix },
    GenKey { order: usize, json: bool },
}

impl Command {
    /// Runs the request and returns what should be printed.
    pub fn run(self) -> anyhow::Result<String> {
        match self {
            Command::Encrypt { key, text } => {
                log::info!(
                    "encrypting {} characters with a {}x{} key",
                    text.chars().count(),
                    key.order(),
                    key.order()
                );
                encrypt(&text, &key).context("encryption failed")
            }
            Command::Decrypt { key, text } => {
                log::info!(
                    "decrypting {} characters with a {}x{} key",
                    text.chars().count(),
                    key.order(),
                    key.order()
                );
                decrypt(&text, &key).context("decryption failed")
            }
            Command::Invert { key } => {
                let inverse = key.inverse().context("key cannot be inverted")?;
                Ok(inverse.to_string())
            }
            Command::GenKey { order, json } => {
                let key = KeyMatrix::random(order, &mut rand::rng())
                    .context("key generation failed")?;
                if json {
                    Ok(key.to_json()?)
                } else {
                    Ok(key.to_string())
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use hill_crypto::HillCryptoError;

    fn textbook_key() -> KeyMatrix {
        "6,24,1;13,16,10;20,17,15".parse().unwrap()
    }

    #[test]
    fn test_encrypt_and_decrypt() {
        let encrypted = Command::Encrypt {
            key: textbook_key(),
            text: "act".to_string(),
        }
        .run()
        .unwrap();
        assert_eq!(encrypted, "POH");

        let decrypted = Command::Decrypt {
            key: textbook_key(),
            text: encrypted,
        }
        .run()
        .unwrap();
        assert_eq!(decrypted, "ACT");
    }

    #[test]
    fn test_invert_prints_key() {
        let output = Command::Invert {
            key: textbook_key(),
        }
        .run()
        .unwrap();
        assert_eq!(output, "8,5,10;21,8,21;21,12,8");
    }

    #[test]
    fn test_gen_key_output_parses_back() {
        let output = Command::GenKey {
            order: 2,
            json: false,
        }
        .run()
        .unwrap();
        let key: KeyMatrix = output.parse().unwrap();
        assert!(key.is_invertible().unwrap());

        let output = Command::GenKey {
            order: 3,
            json: true,
        }
        .run()
        .unwrap();
        assert_eq!(KeyMatrix::from_json(&output).unwrap().order(), 3);
    }

    #[test]
    fn test_engine_error_kind_survives_context() {
        let err = Command::Encrypt {
            key: textbook_key(),
            text: "HELLO!".to_string(),
        }
        .run()
        .unwrap_err();

        assert_eq!(err.to_string(), "encryption failed");
        assert!(matches!(
            err.downcast_ref::<HillCryptoError>(),
            Some(HillCryptoError::InvalidAlphabet { found: '!', .. })
        ));
    }
}
