//! Delivery seam between ceremony participants.
//!
//! The protocol itself never touches a network; it hands outgoing messages to
//! a [`CeremonyTransport`] and is fed incoming ones. Implementations must make
//! commitment broadcasts reliable and ceremony-wide, and share delivery
//! reliable, point-to-point and confidential (a share must not be observable
//! by any participant other than its addressee). Real-network implementations
//! should also bound how long a recipient waits for a peer's data, so that a
//! silent peer fails the ceremony instead of stalling it forever.

use crate::{
    common::{CommitmentToCoefficients, ParticipantId, Share, ShareId},
    error::DkgError,
};

pub trait CeremonyTransport {
    fn broadcast_commitments(
        &mut self,
        from: ParticipantId,
        commitments: &CommitmentToCoefficients,
    ) -> Result<(), DkgError>;

    fn send_share(
        &mut self,
        from: ParticipantId,
        to: ParticipantId,
        share: Share,
    ) -> Result<(), DkgError>;
}

/// In-process transport with one queue per recipient, for tests and local
/// simulations of the ceremony.
#[derive(Clone, Debug)]
pub struct InMemoryTransport {
    total: ShareId,
    commitments: Vec<Vec<(ParticipantId, CommitmentToCoefficients)>>,
    shares: Vec<Vec<(ParticipantId, Share)>>,
}

impl InMemoryTransport {
    pub fn new(total: ShareId) -> Self {
        InMemoryTransport {
            total,
            commitments: vec![Vec::new(); total as usize],
            shares: vec![Vec::new(); total as usize],
        }
    }

    /// Pending commitment broadcasts addressed to `to`.
    pub fn drain_commitments(
        &mut self,
        to: ParticipantId,
    ) -> Result<Vec<(ParticipantId, CommitmentToCoefficients)>, DkgError> {
        let slot = self.slot(to)?;
        Ok(std::mem::take(&mut self.commitments[slot]))
    }

    /// Pending shares addressed to `to`.
    pub fn drain_shares(
        &mut self,
        to: ParticipantId,
    ) -> Result<Vec<(ParticipantId, Share)>, DkgError> {
        let slot = self.slot(to)?;
        Ok(std::mem::take(&mut self.shares[slot]))
    }

    fn slot(&self, id: ParticipantId) -> Result<usize, DkgError> {
        if id == 0 || id > self.total {
            return Err(DkgError::InvalidParticipantId(id));
        }
        Ok(id as usize - 1)
    }
}

impl CeremonyTransport for InMemoryTransport {
    fn broadcast_commitments(
        &mut self,
        from: ParticipantId,
        commitments: &CommitmentToCoefficients,
    ) -> Result<(), DkgError> {
        self.slot(from)?;
        for to in 1..=self.total {
            if to != from {
                self.commitments[to as usize - 1].push((from, commitments.clone()));
            }
        }
        Ok(())
    }

    fn send_share(
        &mut self,
        from: ParticipantId,
        to: ParticipantId,
        share: Share,
    ) -> Result<(), DkgError> {
        self.slot(from)?;
        let slot = self.slot(to)?;
        self.shares[slot].push((from, share));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_bigint::BigUint;

    fn share(id: ShareId) -> Share {
        Share {
            id,
            threshold: 3,
            value: BigUint::from(7u32),
        }
    }

    #[test]
    fn broadcast_reaches_everyone_but_the_sender() {
        let mut transport = InMemoryTransport::new(3);
        let commitments = CommitmentToCoefficients(vec![BigUint::from(5u32)]);
        transport.broadcast_commitments(1, &commitments).unwrap();

        assert!(transport.drain_commitments(1).unwrap().is_empty());
        assert_eq!(
            transport.drain_commitments(2).unwrap(),
            vec![(1, commitments.clone())]
        );
        assert_eq!(
            transport.drain_commitments(3).unwrap(),
            vec![(1, commitments)]
        );
        // drained queues stay drained
        assert!(transport.drain_commitments(2).unwrap().is_empty());
    }

    #[test]
    fn shares_are_point_to_point() {
        let mut transport = InMemoryTransport::new(3);
        transport.send_share(1, 2, share(2)).unwrap();

        assert!(transport.drain_shares(1).unwrap().is_empty());
        assert!(transport.drain_shares(3).unwrap().is_empty());
        assert_eq!(transport.drain_shares(2).unwrap(), vec![(1, share(2))]);
    }

    #[test]
    fn unknown_participants_are_rejected() {
        let mut transport = InMemoryTransport::new(3);
        let commitments = CommitmentToCoefficients(vec![BigUint::from(5u32)]);
        assert!(transport.broadcast_commitments(0, &commitments).is_err());
        assert!(transport.broadcast_commitments(4, &commitments).is_err());
        assert!(transport.send_share(1, 4, share(4)).is_err());
        assert!(transport.send_share(0, 2, share(2)).is_err());
        assert!(transport.drain_shares(0).is_err());
    }
}
