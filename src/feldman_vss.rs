//! Feldman Verifiable Secret Sharing Scheme. Based on the paper [A practical scheme for non-interactive verifiable secret sharing](https://www.cs.umd.edu/~gasarch/TOPICS/secretsharing/feldmanVSS.pdf)

use num_bigint::BigUint;
use num_traits::One;
use rand::RngCore;

use crate::{
    common::{CommitmentToCoefficients, Share, ShareId, Shares},
    error::DkgError,
    group::GroupParameters,
    polynomial::Polynomial,
    shamir_ss,
};

/// Generate a random secret with its shares according to Feldman's verifiable secret sharing.
/// Returns the secret, shares, and commitments to coefficients of the polynomial for
/// the secret and the polynomial
pub fn deal_random_secret<R: RngCore>(
    rng: &mut R,
    threshold: ShareId,
    total: ShareId,
    params: &GroupParameters,
) -> Result<(BigUint, Shares, CommitmentToCoefficients, Polynomial), DkgError> {
    let secret = params.random_scalar(rng);
    let (shares, coeff_comms, poly) = deal_secret(rng, secret.clone(), threshold, total, params)?;
    Ok((secret, shares, coeff_comms, poly))
}

/// Same as `deal_random_secret` above but accepts the secret to share
pub fn deal_secret<R: RngCore>(
    rng: &mut R,
    secret: BigUint,
    threshold: ShareId,
    total: ShareId,
    params: &GroupParameters,
) -> Result<(Shares, CommitmentToCoefficients, Polynomial), DkgError> {
    let (shares, poly) = shamir_ss::deal_secret(rng, secret, threshold, total, params)?;
    let coeff_comms = commit_to_poly(&poly, params);
    Ok((shares, coeff_comms.into(), poly))
}

pub(crate) fn commit_to_poly(poly: &Polynomial, params: &GroupParameters) -> Vec<BigUint> {
    poly.coefficients
        .iter()
        .map(|c| params.g.modpow(c, &params.p))
        .collect()
}

impl Share {
    /// Executed by each participant to verify its share received from the dealer:
    /// `G^value == prod_j commitments[j]^(id^j) mod P`.
    pub fn verify(
        &self,
        commitment_coeffs: &CommitmentToCoefficients,
        params: &GroupParameters,
    ) -> Result<(), DkgError> {
        let len = commitment_coeffs.0.len() as ShareId;
        if self.threshold > len {
            return Err(DkgError::BelowThreshold(self.threshold, len));
        }
        let lhs = params.g.modpow(&self.value, &params.p);
        let x = BigUint::from(self.id);
        // every commitment has order dividing q, so the exponent id^j is
        // maintained incrementally mod q instead of recomputed per term
        let mut xpow = BigUint::one();
        let mut rhs = BigUint::one();
        for c in commitment_coeffs.0.iter() {
            rhs = rhs * c.modpow(&xpow, &params.p) % &params.p;
            xpow = xpow * &x % &params.q;
        }
        if lhs != rhs {
            return Err(DkgError::InvalidShare);
        }
        Ok(())
    }
}
