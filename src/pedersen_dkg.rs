//! Pedersen-style distributed key generation. Does not involve a trusted
//! third party but assumes that all participants (and not just a threshold)
//! participate till the end.
//! - `n` participants want to generate a shared secret `s` in an `n-of-n` manner
//! - Each of the `n` participants chooses a secret and runs a Feldman VSS for
//!   that secret in `n-of-n` manner. Say participant `i` chooses a secret `{s_i}_0`
//! - The shared secret `s` then becomes the sum of secrets chosen by all `n`
//!   participants, so `s = {s_1}_0 + {s_2}_0 + ... + {s_n}_0`
//! - After receiving and verifying every peer's share against that peer's
//!   published commitments, each participant folds the shares into its final
//!   additive share of `s`
//!
//! Even if one participant aborts, or a share fails verification against its
//! commitments, the protocol needs to be restarted without the faulty
//! participant; an unverifiable share is never folded into the result.

use num_bigint::BigUint;
use num_traits::{One, Zero};
use rand::RngCore;
use tracing::{debug, warn};

use crate::{
    common::{CommitmentToCoefficients, ParticipantId, Share, ShareId, Shares},
    error::DkgError,
    feldman_vss,
    group::GroupParameters,
    polynomial::{lagrange_basis_at_zero, Polynomial},
    transport::CeremonyTransport,
};

/// Ceremony lifecycle of a single participant. Transitions only move forward.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParticipantState {
    Initialized,
    SharesGenerated,
    AwaitingPeerData,
    Verifying,
    Finalized,
}

impl ParticipantState {
    fn name(self) -> &'static str {
        match self {
            ParticipantState::Initialized => "Initialized",
            ParticipantState::SharesGenerated => "SharesGenerated",
            ParticipantState::AwaitingPeerData => "AwaitingPeerData",
            ParticipantState::Verifying => "Verifying",
            ParticipantState::Finalized => "Finalized",
        }
    }
}

/// One party's piece of the ceremony: its own dealing plus everything received
/// from peers. Exclusively owned and mutated by the participant it represents;
/// peers only ever see the values that went over the transport. Handing the
/// struct itself to anyone else leaks the secret contribution.
#[derive(Clone, Debug)]
pub struct Participant {
    pub id: ParticipantId,
    pub total: ShareId,
    pub params: GroupParameters,
    pub state: ParticipantState,
    /// This participant's contribution to the joint secret (its intercept).
    pub secret: Option<BigUint>,
    /// The dealing polynomial. Never consulted after dealing and never shared.
    pub polynomial: Option<Polynomial>,
    /// One share per participant (self included), dealt from `polynomial`.
    pub dealt_shares: Option<Shares>,
    pub commitments: Option<CommitmentToCoefficients>,
    // Peer data lives in dense arenas indexed by participant ordinal (id - 1);
    // membership is fixed for the ceremony, so "everyone responded" is a counter.
    pub received_shares: Vec<Option<Share>>,
    pub received_commitments: Vec<Option<CommitmentToCoefficients>>,
    /// Per-peer verification verdicts; `Some(false)` marks a flagged peer.
    pub verdicts: Vec<Option<bool>>,
    verified_peers: ShareId,
    pub final_share: Option<BigUint>,
}

impl Participant {
    pub fn new(
        id: ParticipantId,
        total: ShareId,
        params: GroupParameters,
    ) -> Result<Self, DkgError> {
        if total < 2 {
            return Err(DkgError::InvalidThresholdOrTotal(total, total));
        }
        if id == 0 || id > total {
            return Err(DkgError::InvalidParticipantId(id));
        }
        Ok(Participant {
            id,
            total,
            params,
            state: ParticipantState::Initialized,
            secret: None,
            polynomial: None,
            dealt_shares: None,
            commitments: None,
            received_shares: vec![None; total as usize],
            received_commitments: vec![None; total as usize],
            verdicts: vec![None; total as usize],
            verified_peers: 0,
            final_share: None,
        })
    }

    /// Samples this participant's contribution to the joint secret and deals
    /// it `total`-of-`total`: every share is needed for reconstruction, so no
    /// strict subset of the ceremony learns anything about the contribution.
    pub fn generate_shares<R: RngCore>(&mut self, rng: &mut R) -> Result<(), DkgError> {
        self.expect_state(&[ParticipantState::Initialized], "generate_shares")?;
        let (secret, shares, commitments, poly) =
            feldman_vss::deal_random_secret(rng, self.total, self.total, &self.params)?;

        // own slice of the own dealing is recorded like an already-verified peer's
        let own = self.id as usize - 1;
        self.received_shares[own] = Some(shares.0[own].clone());
        self.received_commitments[own] = Some(commitments.clone());
        self.verdicts[own] = Some(true);

        self.secret = Some(secret);
        self.polynomial = Some(poly);
        self.dealt_shares = Some(shares);
        self.commitments = Some(commitments);
        self.state = ParticipantState::SharesGenerated;
        debug!(id = self.id, "dealt shares and committed to coefficients");
        Ok(())
    }

    /// Broadcasts the commitment vector and sends every peer its designated
    /// share over the point-to-point channel.
    pub fn publish<T: CeremonyTransport>(&mut self, transport: &mut T) -> Result<(), DkgError> {
        self.expect_state(&[ParticipantState::SharesGenerated], "publish")?;
        let commitments = self
            .commitments
            .as_ref()
            .ok_or(DkgError::InvalidStateTransition {
                from: "SharesGenerated",
                action: "publish",
            })?;
        let shares = self
            .dealt_shares
            .as_ref()
            .ok_or(DkgError::InvalidStateTransition {
                from: "SharesGenerated",
                action: "publish",
            })?;
        transport.broadcast_commitments(self.id, commitments)?;
        for share in &shares.0 {
            if share.id != self.id {
                transport.send_share(self.id, share.id, share.clone())?;
            }
        }
        self.state = ParticipantState::AwaitingPeerData;
        debug!(id = self.id, "published commitments and dealt shares");
        Ok(())
    }

    /// Called when a peer's commitment broadcast arrives.
    pub fn receive_commitments(
        &mut self,
        from: ParticipantId,
        commitments: CommitmentToCoefficients,
    ) -> Result<(), DkgError> {
        self.expect_receiving("receive_commitments")?;
        if from == self.id {
            return Err(DkgError::SenderIdSameAsReceiver(from, self.id));
        }
        let slot = self.slot(from)?;
        if !commitments.supports_threshold(self.total) {
            return Err(DkgError::DoesNotSupportThreshold(self.total));
        }
        if self.received_commitments[slot].is_some() {
            return Err(DkgError::AlreadyProcessedFromSender(from));
        }
        self.received_commitments[slot] = Some(commitments);
        self.try_verify(slot);
        Ok(())
    }

    /// Called when a peer's point-to-point share arrives.
    pub fn receive_share(&mut self, from: ParticipantId, share: Share) -> Result<(), DkgError> {
        self.expect_receiving("receive_share")?;
        if from == self.id {
            return Err(DkgError::SenderIdSameAsReceiver(from, self.id));
        }
        let slot = self.slot(from)?;
        if share.id != self.id {
            return Err(DkgError::UnequalParticipantAndShareId(self.id, share.id));
        }
        if share.threshold != self.total {
            return Err(DkgError::UnequalThresholdInReceivedShare(
                self.total,
                share.threshold,
            ));
        }
        if self.received_shares[slot].is_some() {
            return Err(DkgError::AlreadyProcessedFromSender(from));
        }
        self.received_shares[slot] = Some(share);
        self.try_verify(slot);
        Ok(())
    }

    /// Folds the verified shares into this participant's final additive share
    /// of the joint secret. Every peer must have delivered both messages and
    /// passed verification: a flagged peer aborts the ceremony here rather
    /// than contaminating the sum with an unverifiable contribution.
    pub fn finalize(&mut self) -> Result<&BigUint, DkgError> {
        self.expect_receiving("finalize")?;
        if self.verified_peers != self.total - 1 {
            return Err(DkgError::MissingSomeParticipants(
                self.total - 1 - self.verified_peers,
            ));
        }
        if let Some(&peer) = self.flagged_peers().first() {
            return Err(DkgError::VerificationFailed(peer));
        }

        let mut acc = BigUint::zero();
        for share in self.received_shares.iter().flatten() {
            acc += &share.value;
        }
        // Scaling the accumulated evaluation of sum_j f_j at this id by the
        // public Lagrange coefficient at zero turns the full fixed share set
        // into an additive sharing: the final shares sum to the joint secret.
        let ids: Vec<ShareId> = (1..=self.total).collect();
        let basis = lagrange_basis_at_zero(&ids, self.id, &self.params.q)?;
        let final_share = acc * basis % &self.params.q;

        self.state = ParticipantState::Finalized;
        debug!(id = self.id, "computed final additive share");
        Ok(self.final_share.insert(final_share))
    }

    /// Peers whose shares failed verification against their commitments.
    pub fn flagged_peers(&self) -> Vec<ParticipantId> {
        self.verdicts
            .iter()
            .enumerate()
            .filter(|(_, v)| **v == Some(false))
            .map(|(i, _)| i as ParticipantId + 1)
            .collect()
    }

    /// Runs Feldman verification as soon as both of a peer's messages are
    /// present. Verification is independent per peer; a failure flags the
    /// sender without blocking receipt of other peers' data.
    fn try_verify(&mut self, slot: usize) {
        if self.verdicts[slot].is_some() {
            return;
        }
        let (Some(share), Some(commitments)) = (
            &self.received_shares[slot],
            &self.received_commitments[slot],
        ) else {
            return;
        };
        let ok = share.verify(commitments, &self.params).is_ok();
        self.verdicts[slot] = Some(ok);
        self.verified_peers += 1;
        self.state = ParticipantState::Verifying;
        let peer = slot as ParticipantId + 1;
        if ok {
            debug!(id = self.id, peer, "peer share verified");
        } else {
            warn!(id = self.id, peer, "peer share failed verification");
        }
    }

    fn expect_state(
        &self,
        allowed: &[ParticipantState],
        action: &'static str,
    ) -> Result<(), DkgError> {
        if allowed.contains(&self.state) {
            Ok(())
        } else {
            Err(DkgError::InvalidStateTransition {
                from: self.state.name(),
                action,
            })
        }
    }

    fn expect_receiving(&self, action: &'static str) -> Result<(), DkgError> {
        self.expect_state(
            &[
                ParticipantState::AwaitingPeerData,
                ParticipantState::Verifying,
            ],
            action,
        )
    }

    fn slot(&self, id: ParticipantId) -> Result<usize, DkgError> {
        if id == 0 || id > self.total {
            return Err(DkgError::InvalidParticipantId(id));
        }
        Ok(id as usize - 1)
    }
}

/// Assembles the group public key from every participant's commitment to its
/// secret (the zero-order coefficient):
/// `prod_i G^{secret_i} = G^{sum_i secret_i} mod P`. The result is a group
/// element and is reduced mod `P`.
pub fn assemble_public_key(
    commitments: &[CommitmentToCoefficients],
    params: &GroupParameters,
) -> Result<BigUint, DkgError> {
    if commitments.is_empty() {
        return Err(DkgError::InvalidThresholdOrTotal(0, 0));
    }
    let mut acc = BigUint::one();
    for c in commitments {
        acc = acc * c.commitment_to_secret() % &params.p;
    }
    Ok(acc)
}

/// Sums disclosed final shares into the group private key, `sum_i secret_i`
/// mod `Q`. Only meaningful when every participant discloses its final share,
/// which defeats the purpose of the ceremony outside tests and simulations.
pub fn combine_final_shares(
    shares: &[BigUint],
    params: &GroupParameters,
) -> Result<BigUint, DkgError> {
    if shares.is_empty() {
        return Err(DkgError::InvalidThresholdOrTotal(0, 0));
    }
    let mut acc = BigUint::zero();
    for share in shares {
        acc += share;
    }
    Ok(acc % &params.q)
}
