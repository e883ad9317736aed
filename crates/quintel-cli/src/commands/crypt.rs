use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;

use quintel_core::{Ciphertext, Codec, SecretKey};

/// Environment fallback for the key flag.
const KEY_ENV: &str = "QUINTEL_KEY";

pub fn keygen() -> Result<(), String> {
    let key = SecretKey::generate();
    println!("{}", BASE64.encode(key.as_bytes()));
    Ok(())
}

pub fn encrypt(data: &str, key_flag: Option<&str>) -> Result<(), String> {
    let codec = Codec::new(load_key(key_flag)?);
    let ciphertext = codec.encrypt(data.as_bytes()).map_err(|e| e.to_string())?;
    println!("{}", BASE64.encode(ciphertext.as_bytes()));
    Ok(())
}

pub fn decrypt(token: &str, key_flag: Option<&str>) -> Result<(), String> {
    let codec = Codec::new(load_key(key_flag)?);
    let wire = BASE64
        .decode(token.trim())
        .map_err(|e| format!("token is not valid base64: {e}"))?;
    let ciphertext = Ciphertext::from_bytes(&wire).map_err(|e| e.to_string())?;
    let plaintext = codec.decrypt(&ciphertext).map_err(|e| e.to_string())?;

    match String::from_utf8(plaintext) {
        Ok(text) => println!("{text}"),
        Err(err) => {
            // Binary plaintext goes back out base64-encoded.
            log::warn!("plaintext is not UTF-8; printing base64");
            println!("{}", BASE64.encode(err.into_bytes()));
        }
    }
    Ok(())
}

/// Key from `--key` or the QUINTEL_KEY environment variable, base64-decoded.
fn load_key(flag: Option<&str>) -> Result<SecretKey, String> {
    let encoded = match flag {
        Some(k) => k.to_string(),
        None => std::env::var(KEY_ENV)
            .map_err(|_| format!("no key: pass --key or set {KEY_ENV}"))?,
    };
    let bytes = BASE64
        .decode(encoded.trim())
        .map_err(|e| format!("key is not valid base64: {e}"))?;
    let raw: [u8; 32] = bytes
        .try_into()
        .map_err(|_| "key must decode to exactly 32 bytes".to_string())?;
    Ok(SecretKey::from_bytes(raw))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_key_roundtrip() {
        let encoded = BASE64.encode([7u8; 32]);
        let key = load_key(Some(&encoded)).unwrap();
        assert_eq!(key.as_bytes(), &[7u8; 32]);
    }

    #[test]
    fn test_load_key_rejects_bad_input() {
        assert!(load_key(Some("not base64!!")).is_err());
        assert!(load_key(Some(&BASE64.encode([1u8; 16]))).is_err());
    }
}
