//! Multiplicative group parameters for the secret sharing and ElGamal layers.
//!
//! A [`GroupParameters`] value is threaded explicitly through every operation;
//! scalars (secrets, shares, exponents) are reduced mod `q`, group elements
//! (commitments, keys, ciphertext components) mod `p`. Two pre-agreed
//! prime-order MODP groups from RFC 5114 are available through
//! [`StandardGroup`]; fresh safe-prime groups (`p = 2q + 1`) come from
//! [`GroupParameters::generate`].

use glass_pumpkin::prime;
use num_bigint::{BigUint, RandBigInt};
use num_integer::Integer;
use num_traits::{One, Zero};
use rand::{CryptoRng, RngCore};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::DkgError;

/// Smallest subgroup-order bit length accepted by [`GroupParameters::generate`];
/// the underlying prime generator does not go below this.
pub const MIN_GENERATED_BITS: usize = 128;

/// A prime-order subgroup of `Z_p^*`: modulus `p`, subgroup order `q` with
/// `q | p - 1`, and a generator `g` of the order-`q` subgroup.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupParameters {
    pub p: BigUint,
    pub q: BigUint,
    pub g: BigUint,
}

impl GroupParameters {
    /// Validates the group structure. Primality of `p` and `q` is the caller's
    /// contract (checking it on every construction would dwarf the protocol
    /// itself); the divisibility and generator-order checks below are cheap and
    /// catch every malformed-input class that would otherwise surface as
    /// undefined arithmetic later.
    pub fn new(p: BigUint, q: BigUint, g: BigUint) -> Result<Self, DkgError> {
        let one = BigUint::one();
        if p.is_zero() || p <= BigUint::from(2u32) {
            return Err(DkgError::InvalidGroupParameters(
                "modulus must be an odd prime greater than 2",
            ));
        }
        if q <= one {
            return Err(DkgError::InvalidGroupParameters(
                "subgroup order must be greater than 1",
            ));
        }
        if !(&p - &one).is_multiple_of(&q) {
            return Err(DkgError::InvalidGroupParameters(
                "subgroup order must divide p - 1",
            ));
        }
        if g <= one || g >= p {
            return Err(DkgError::InvalidGroupParameters(
                "generator must lie strictly between 1 and p",
            ));
        }
        if g.modpow(&q, &p) != one {
            return Err(DkgError::InvalidGroupParameters(
                "generator must generate the order-q subgroup",
            ));
        }
        Ok(GroupParameters { p, q, g })
    }

    /// Generates a fresh safe-prime group: a Sophie Germain prime `q` of `bits`
    /// bits with `p = 2q + 1` also prime, and `g = b^2 mod p` for random
    /// non-trivial `b`, which pins `g` inside the order-`q` subgroup of squares.
    ///
    /// Each candidate `q` is itself a generated probable prime, so the search
    /// consumes one candidate per attempt; `max_attempts` bounds the search and
    /// exceeding it fails with `GenerationTimeout`.
    pub fn generate<R: RngCore + CryptoRng>(
        bits: usize,
        max_attempts: u32,
        rng: &mut R,
    ) -> Result<Self, DkgError> {
        if bits < MIN_GENERATED_BITS {
            return Err(DkgError::InvalidGroupParameters(
                "bit length below generation minimum",
            ));
        }
        let one = BigUint::one();
        for attempt in 1..=max_attempts {
            let q = prime::from_rng(bits, rng)
                .map_err(|e| DkgError::PrimeGeneration(e.to_string()))?;
            let p = (&q << 1) + &one;
            if !prime::check(&p) {
                continue;
            }
            debug!(bits, attempt, "found Sophie Germain prime");
            let g = loop {
                let b = rng.gen_biguint_below(&p);
                let g = (&b * &b) % &p;
                // b in {0, 1, p-1} squares to 0 or 1, neither of which generates
                if g > one {
                    break g;
                }
            };
            return Ok(GroupParameters { p, q, g });
        }
        Err(DkgError::GenerationTimeout(max_attempts))
    }

    /// Uniform scalar in `[0, q)`.
    pub fn random_scalar<R: RngCore>(&self, rng: &mut R) -> BigUint {
        rng.gen_biguint_below(&self.q)
    }
}

/// Pre-agreed groups from RFC 5114: the 1024-bit MODP group with a 160-bit
/// prime-order subgroup and the 2048-bit MODP group with a 256-bit
/// prime-order subgroup.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum StandardGroup {
    Modp1024,
    Modp2048,
}

// RFC 5114 section 2.1
const MODP_1024_160_P: &str = "B10B8F96A080E01DDE92DE5EAE5D54EC52C99FBCFB06A3C69A6A9DCA52D23B616073E28675A23D189838EF1E2EE652C013ECB4AEA906112324975C3CD49B83BFACCBDD7D90C4BD7098488E9C219A73724EFFD6FAE5644738FAA31A4FF55BCCC0A151AF5F0DC8B4BD45BF37DF365C1A65E68CFDA76D4DA708DF1FB2BC2E4A4371";
const MODP_1024_160_G: &str = "A4D1CBD5C3FD34126765A442EFB99905F8104DD258AC507FD6406CFF14266D31266FEA1E5C41564B777E690F5504F213160217B4B01B886A5E91547F9E2749F4D7FBD7D3B9A92EE1909D0D2263F80A76A6A24C087A091F531DBF0A0169B6A28AD662A4D18E73AFA32D779D5918D08BC8858F4DCEF97C2A24855E6EEB22B3B2E5";
const MODP_1024_160_Q: &str = "F518AA8781A8DF278ABA4E7D64B7CB9D49462353";

// RFC 5114 section 2.3
const MODP_2048_256_P: &str = "87A8E61DB4B6663CFFBBD19C651959998CEEF608660DD0F25D2CEED4435E3B00E00DF8F1D61957D4FAF7DF4561B2AA3016C3D91134096FAA3BF4296D830E9A7C209E0C6497517ABD5A8A9D306BCF67ED91F9E6725B4758C022E0B1EF4275BF7B6C5BFC11D45F9088B941F54EB1E59BB8BC39A0BF12307F5C4FDB70C581B23F76B63ACAE1CAA6B7902D52526735488A0EF13C6D9A51BFA4AB3AD8347796524D8EF6A167B5A41825D967E144E5140564251CCACB83E6B486F6B3CA3F7971506026C0B857F689962856DED4010ABD0BE621C3A3960A54E710C375F26375D7014103A4B54330C198AF126116D2276E11715F693877FAD7EF09CADB094AE91E1A1597";
const MODP_2048_256_G: &str = "3FB32C9B73134D0B2E77506660EDBD484CA7B18F21EF205407F4793A1A0BA12510DBC15077BE463FFF4FED4AAC0BB555BE3A6C1B0C6B47B1BC3773BF7E8C6F62901228F8C28CBB18A55AE31341000A650196F931C77A57F2DDF463E5E9EC144B777DE62AAAB8A8628AC376D282D6ED3864E67982428EBC831D14348F6F2F9193B5045AF2767164E1DFC967C1FB3F2E55A4BD1BFFE83B9C80D052B985D182EA0ADB2A3B7313D3FE14C8484B1E052588B9B7D2BBD2DF016199ECD06E1557CD0915B3353BBB64E0EC377FD028370DF92B52C7891428CDC67EB6184B523D1DB246C32F63078490F00EF8D647D148D47954515E2327CFEF98C582664B4C0F6CC41659";
const MODP_2048_256_Q: &str = "8CF83642A709A097B447997640129DA299B1A47D1EB3750BA308B0FE64F5FBD3";

impl StandardGroup {
    pub fn parameters(self) -> GroupParameters {
        let (p, q, g) = match self {
            StandardGroup::Modp1024 => (MODP_1024_160_P, MODP_1024_160_Q, MODP_1024_160_G),
            StandardGroup::Modp2048 => (MODP_2048_256_P, MODP_2048_256_Q, MODP_2048_256_G),
        };
        GroupParameters {
            p: from_hex(p),
            q: from_hex(q),
            g: from_hex(g),
        }
    }
}

fn from_hex(s: &str) -> BigUint {
    // only called on the compile-time RFC constants above
    BigUint::parse_bytes(s.as_bytes(), 16).expect("hardcoded group constant")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn standard_groups_are_well_formed() {
        for group in [StandardGroup::Modp1024, StandardGroup::Modp2048] {
            let params = group.parameters();
            assert!(prime::check(&params.p));
            assert!(prime::check(&params.q));
            assert!(((&params.p - 1u32) % &params.q).is_zero());
            assert!(params.g > BigUint::one());
            assert_eq!(params.g.modpow(&params.q, &params.p), BigUint::one());
            // the full validator accepts its own constants
            GroupParameters::new(params.p.clone(), params.q.clone(), params.g.clone()).unwrap();
        }
    }

    #[test]
    fn standard_group_sizes() {
        assert_eq!(StandardGroup::Modp1024.parameters().p.bits(), 1024);
        assert_eq!(StandardGroup::Modp1024.parameters().q.bits(), 160);
        assert_eq!(StandardGroup::Modp2048.parameters().p.bits(), 2048);
        assert_eq!(StandardGroup::Modp2048.parameters().q.bits(), 256);
    }

    #[test]
    fn generated_group_is_a_safe_prime_group() {
        let mut rng = StdRng::seed_from_u64(0u64);
        let params = GroupParameters::generate(MIN_GENERATED_BITS, 10_000, &mut rng).unwrap();

        assert_eq!(params.p, (&params.q << 1) + 1u32);
        assert!(prime::check(&params.p));
        assert!(prime::check(&params.q));
        assert!(params.q.bits() as usize >= MIN_GENERATED_BITS);
        assert!(params.g > BigUint::one());
        assert_eq!(params.g.modpow(&params.q, &params.p), BigUint::one());
    }

    #[test]
    fn generation_rejects_small_bit_lengths() {
        let mut rng = StdRng::seed_from_u64(0u64);
        assert!(matches!(
            GroupParameters::generate(64, 100, &mut rng),
            Err(DkgError::InvalidGroupParameters(_))
        ));
    }

    #[test]
    fn construction_rejects_malformed_parameters() {
        let params = StandardGroup::Modp1024.parameters();

        // q does not divide p - 1
        assert!(GroupParameters::new(
            params.p.clone(),
            &params.q + 2u32,
            params.g.clone()
        )
        .is_err());

        // degenerate generator
        assert!(
            GroupParameters::new(params.p.clone(), params.q.clone(), BigUint::one()).is_err()
        );
        assert!(
            GroupParameters::new(params.p.clone(), params.q.clone(), params.p.clone()).is_err()
        );

        // generator outside the order-q subgroup: any element whose order is
        // not a divisor of q; g + 1 works for these fixed groups
        assert!(GroupParameters::new(
            params.p.clone(),
            params.q.clone(),
            &params.g + 1u32
        )
        .is_err());

        // degenerate moduli
        assert!(GroupParameters::new(
            BigUint::zero(),
            params.q.clone(),
            params.g.clone()
        )
        .is_err());
        assert!(GroupParameters::new(
            params.p.clone(),
            BigUint::one(),
            params.g.clone()
        )
        .is_err());
    }
}
