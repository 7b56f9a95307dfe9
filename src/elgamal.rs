//! ElGamal encryption over [`GroupParameters`](crate::group::GroupParameters).
//!
//! Independent of the key generation ceremony: any scalar in `[0, q)` works as
//! a secret key, including a key assembled by the ceremony. Both ciphertext
//! components are group elements and are kept reduced mod `p`; decryption
//! divides by modular inverse.

use num_bigint::BigUint;
use num_traits::Zero;
use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::{error::DkgError, group::GroupParameters};

/// An ElGamal keypair: `public_key = G^{secret_key} mod P`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Keypair {
    pub secret_key: BigUint,
    pub public_key: BigUint,
}

/// `a = G^r mod P`, `b = PK^r * m mod P` for encryption randomness `r`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CipherText {
    pub a: BigUint,
    pub b: BigUint,
}

/// Samples a keypair: secret key uniform in `[0, q)`.
pub fn generate_keys<R: RngCore>(rng: &mut R, params: &GroupParameters) -> Keypair {
    let secret_key = params.random_scalar(rng);
    let public_key = params.g.modpow(&secret_key, &params.p);
    Keypair {
        secret_key,
        public_key,
    }
}

/// Encrypts `m` under `public_key`. The plaintext must be a group element,
/// i.e. lie in `(0, p)`.
pub fn encrypt<R: RngCore>(
    rng: &mut R,
    m: &BigUint,
    public_key: &BigUint,
    params: &GroupParameters,
) -> Result<CipherText, DkgError> {
    if m.is_zero() || *m >= params.p {
        return Err(DkgError::MessageOutOfRange);
    }
    let r = params.random_scalar(rng);
    let a = params.g.modpow(&r, &params.p);
    let b = public_key.modpow(&r, &params.p) * m % &params.p;
    Ok(CipherText { a, b })
}

/// Decrypts `ciphertext` with `secret_key`: `m = b * (a^{secret_key})^{-1} mod p`.
pub fn decrypt(
    ciphertext: &CipherText,
    secret_key: &BigUint,
    params: &GroupParameters,
) -> Result<BigUint, DkgError> {
    let d = ciphertext.a.modpow(secret_key, &params.p);
    let d_inv = d.modinv(&params.p).ok_or(DkgError::NonInvertibleElement)?;
    Ok(&ciphertext.b * d_inv % &params.p)
}
