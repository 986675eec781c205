use hill_crypto::errors::HillCryptoError;
use hill_crypto::{HillCipher, KeyMatrix};

use fake::Fake;
use fake::faker::lorem::en::Words;

use rand::SeedableRng;
use rand::rngs::StdRng;

#[test]
fn showcase_cipher_decipher_lorem_text() -> Result<(), HillCryptoError> {
    let mut rng = StdRng::seed_from_u64(12345);

    for order in [2, 3] {
        let key = KeyMatrix::random(order, &mut rng)?;
        let cipher = HillCipher::try_with(key)?;

        let words: Vec<String> = Words(10..20).fake_with_rng(&mut rng);
        let original = words.join(" ");

        let ciphertext = cipher.encrypt(&original)?;
        dbg!(cipher.key().to_string(), &ciphertext);

        let decoded = cipher.decrypt(&ciphertext)?;
        let expected: String = original.replace(' ', "").to_ascii_uppercase();

        assert_eq!(ciphertext.len() % order, 0);
        assert!(decoded.starts_with(&expected));

        let padding = &decoded[expected.len()..];
        assert!(padding.len() < order);
        assert!(padding.chars().all(|c| c == 'Z'));
    }

    Ok(())
}
