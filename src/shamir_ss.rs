//! Shamir secret sharing

use num_bigint::BigUint;
use rand::RngCore;

use crate::{
    common::{Share, ShareId, Shares},
    error::DkgError,
    group::GroupParameters,
    polynomial::{interpolate_at_zero, Point, Polynomial},
};

/// Generate a random secret with its shares according to Shamir secret sharing.
/// At least `threshold` number of shares are needed to reconstruct the secret.
/// Returns the secret, shares and the polynomial whose evaluations are the secret and the shares
pub fn deal_random_secret<R: RngCore>(
    rng: &mut R,
    threshold: ShareId,
    total: ShareId,
    params: &GroupParameters,
) -> Result<(BigUint, Shares, Polynomial), DkgError> {
    let secret = params.random_scalar(rng);
    let (shares, poly) = deal_secret(rng, secret.clone(), threshold, total, params)?;
    Ok((secret, shares, poly))
}

/// Same as `deal_random_secret` above but accepts the secret to share
pub fn deal_secret<R: RngCore>(
    rng: &mut R,
    secret: BigUint,
    threshold: ShareId,
    total: ShareId,
    params: &GroupParameters,
) -> Result<(Shares, Polynomial), DkgError> {
    if threshold > total {
        return Err(DkgError::InvalidThresholdOrTotal(threshold, total));
    }
    if total < 2 {
        return Err(DkgError::InvalidThresholdOrTotal(threshold, total));
    }
    if threshold < 1 {
        return Err(DkgError::InvalidThresholdOrTotal(threshold, total));
    }
    let poly = Polynomial::random(rng, &secret, threshold as usize - 1, &params.q)?;
    // x stepped over [1, total + 1) in increments of 1, i.e. evaluated at 1..=total
    let points = poly.points(
        &BigUint::from(1u32),
        &BigUint::from(total as u32 + 1),
        total as usize,
    )?;
    let shares = points
        .into_iter()
        .enumerate()
        .map(|(i, point)| (i as ShareId + 1, threshold, point.y).into())
        .collect::<Vec<_>>();
    Ok((Shares(shares), poly))
}

impl Shares {
    /// Reconstruct the secret from the first `threshold` shares. Fewer shares
    /// than the dealing threshold cannot be detected by the arithmetic (it
    /// would interpolate some other polynomial and return a wrong scalar), so
    /// the count is checked up front instead.
    pub fn reconstruct_secret(&self, params: &GroupParameters) -> Result<BigUint, DkgError> {
        if self.0.is_empty() {
            return Err(DkgError::BelowThreshold(0, 0));
        }
        let threshold = self.threshold();
        let len = self.0.len() as ShareId;
        if threshold > len {
            return Err(DkgError::BelowThreshold(threshold, len));
        }
        let shares = &self.0[0..threshold as usize];
        for (i, share) in shares.iter().enumerate() {
            if share.id == 0 {
                return Err(DkgError::InvalidParticipantId(share.id));
            }
            if shares[..i].iter().any(|s| s.id == share.id) {
                return Err(DkgError::DuplicateShareId(share.id));
            }
        }
        let points = shares
            .iter()
            .map(|s| Point {
                x: BigUint::from(s.id),
                y: s.value.clone(),
            })
            .collect::<Vec<_>>();
        interpolate_at_zero(&points, &params.q)
    }
}
