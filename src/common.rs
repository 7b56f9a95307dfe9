use num_bigint::BigUint;
use serde::{Deserialize, Serialize};

pub type ShareId = u16;

pub type ParticipantId = u16;

/// Share used in Shamir secret sharing and Feldman verifiable secret sharing.
/// `id` is the evaluation point of the dealing polynomial, `value` its value there.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Share {
    pub id: ShareId,
    pub threshold: ShareId,
    pub value: BigUint,
}

/// Collection of `Share`s. A sufficient number of `Share`s reconstruct the secret.
/// Expects unique shares, i.e. each share has a different `ShareId` and each has the same threshold.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shares(pub Vec<Share>);

/// Commitments to coefficients of the polynomial created during secret sharing,
/// `commitments[i] = G^{coefficients[i]} mod P`. Public; derived once per polynomial.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitmentToCoefficients(pub Vec<BigUint>);

impl From<(ShareId, ShareId, BigUint)> for Share {
    fn from((i, t, v): (ShareId, ShareId, BigUint)) -> Self {
        Share {
            id: i,
            threshold: t,
            value: v,
        }
    }
}

impl Shares {
    pub fn threshold(&self) -> ShareId {
        self.0[0].threshold
    }
}

impl From<Vec<BigUint>> for CommitmentToCoefficients {
    fn from(coeffs: Vec<BigUint>) -> Self {
        CommitmentToCoefficients(coeffs)
    }
}

impl CommitmentToCoefficients {
    /// The constant coefficient is the secret and thus this returns the commitment to that.
    pub fn commitment_to_secret(&self) -> &BigUint {
        &self.0[0]
    }

    /// The degree of the polynomial whose coefficients were committed
    pub fn poly_degree(&self) -> usize {
        self.0.len() - 1
    }

    pub fn supports_threshold(&self, threshold: ShareId) -> bool {
        threshold as usize - 1 == self.poly_degree()
    }
}
