//! Format 1 cipher: AES-256-CBC keyed directly from the passphrase.
//!
//! The key is SHA-256 of the passphrase with no salt and no work factor,
//! so these files are only as strong as the passphrase itself. The store
//! reads them for migration and never writes them.
//!
//! Layout: [ 16-byte IV | PKCS#7-padded ciphertext ]
//!
//! CBC has no integrity check. A wrong passphrase usually fails the
//! padding check here, but can also yield garbage that only the codec
//! rejects.

use aes::Aes256;
use cbc::cipher::block_padding::Pkcs7;
use cbc::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use rand::RngCore;
use sha2::{Digest, Sha256};
use zeroize::Zeroizing;

use crate::errors::{LockboxError, Result};

type Aes256CbcEnc = cbc::Encryptor<Aes256>;
type Aes256CbcDec = cbc::Decryptor<Aes256>;

/// AES block and IV size in bytes.
pub const BLOCK_LEN: usize = 16;

fn passphrase_key(passphrase: &[u8]) -> Zeroizing<[u8; 32]> {
    Zeroizing::new(Sha256::digest(passphrase).into())
}

/// Encrypt in the legacy layout. Only used to produce historical files.
pub fn encrypt(plaintext: &[u8], passphrase: &[u8]) -> Result<Vec<u8>> {
    let key = passphrase_key(passphrase);
    let mut iv = [0u8; BLOCK_LEN];
    rand::rng().fill_bytes(&mut iv);

    let cipher = Aes256CbcEnc::new_from_slices(&key[..], &iv)
        .map_err(|e| LockboxError::EncryptionFailed(format!("legacy cipher init: {e}")))?;
    let ciphertext = cipher.encrypt_padded_vec_mut::<Pkcs7>(plaintext);

    let mut output = Vec::with_capacity(BLOCK_LEN + ciphertext.len());
    output.extend_from_slice(&iv);
    output.extend_from_slice(&ciphertext);
    Ok(output)
}

/// Decrypt a legacy blob.
pub fn decrypt(data: &[u8], passphrase: &[u8]) -> Result<Vec<u8>> {
    if data.len() < 2 * BLOCK_LEN || data.len() % BLOCK_LEN != 0 {
        return Err(LockboxError::DecryptOrFormat);
    }

    let (iv, ciphertext) = data.split_at(BLOCK_LEN);
    let key = passphrase_key(passphrase);

    let cipher =
        Aes256CbcDec::new_from_slices(&key[..], iv).map_err(|_| LockboxError::DecryptOrFormat)?;
    cipher
        .decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
        .map_err(|_| LockboxError::DecryptOrFormat)
}
