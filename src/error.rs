use crate::common::{ParticipantId, ShareId};

#[derive(Debug)]
pub enum DkgError {
    InvalidThresholdOrTotal(ShareId, ShareId),
    BelowThreshold(ShareId, ShareId),
    InvalidShare,
    InvalidParticipantId(ParticipantId),
    AlreadyProcessedFromSender(ParticipantId),
    MissingSomeParticipants(ShareId),
    UnequalThresholdInReceivedShare(ShareId, ShareId),
    UnequalParticipantAndShareId(ParticipantId, ShareId),
    SenderIdSameAsReceiver(ParticipantId, ParticipantId),
    DoesNotSupportThreshold(ShareId),
    /// A peer's share did not match its published commitments; the ceremony
    /// cannot produce a key that includes the accused participant.
    VerificationFailed(ParticipantId),
    InvalidStateTransition {
        from: &'static str,
        action: &'static str,
    },
    InvalidGroupParameters(&'static str),
    InvalidPolynomialDegree,
    InvalidEvaluationPoint,
    DuplicateEvaluationPoint,
    DuplicateShareId(ShareId),
    NonInvertibleElement,
    MessageOutOfRange,
    PrimeGeneration(String),
    GenerationTimeout(u32),
    Transport(String),
}
