//! End-to-end ceremony: three participants deal, exchange, verify and
//! finalize through the public API and the in-memory transport, then the
//! assembled group key encrypts and the combined final shares decrypt.

use num_bigint::BigUint;

use elgamal_dkg::{
    common::ShareId,
    elgamal,
    group::StandardGroup,
    pedersen_dkg::{assemble_public_key, combine_final_shares, Participant, ParticipantState},
    transport::InMemoryTransport,
};
use rand::{rngs::StdRng, SeedableRng};

#[test]
fn three_party_ceremony_produces_a_working_keypair() {
    let mut rng = StdRng::seed_from_u64(0u64);
    let params = StandardGroup::Modp2048.parameters();
    let total: ShareId = 3;

    let mut transport = InMemoryTransport::new(total);
    let mut participants = (1..=total)
        .map(|id| Participant::new(id, total, params.clone()).unwrap())
        .collect::<Vec<_>>();

    // deal and publish
    for p in participants.iter_mut() {
        p.generate_shares(&mut rng).unwrap();
        p.publish(&mut transport).unwrap();
        assert_eq!(p.state, ParticipantState::AwaitingPeerData);
    }

    // deliver: everyone verifies everyone
    for p in participants.iter_mut() {
        for (from, commitments) in transport.drain_commitments(p.id).unwrap() {
            p.receive_commitments(from, commitments).unwrap();
        }
        for (from, share) in transport.drain_shares(p.id).unwrap() {
            p.receive_share(from, share).unwrap();
        }
        assert_eq!(p.state, ParticipantState::Verifying);
        assert!(p.flagged_peers().is_empty());
    }

    // finalize
    let mut final_shares = vec![];
    for p in participants.iter_mut() {
        final_shares.push(p.finalize().unwrap().clone());
        assert_eq!(p.state, ParticipantState::Finalized);
    }

    // the group public key matches the combined private key
    let commitment_sets = participants
        .iter()
        .map(|p| p.commitments.clone().unwrap())
        .collect::<Vec<_>>();
    let public_key = assemble_public_key(&commitment_sets, &params).unwrap();
    let private_key = combine_final_shares(&final_shares, &params).unwrap();
    assert_eq!(public_key, params.g.modpow(&private_key, &params.p));

    // encrypt under the group key, decrypt with the combined shares
    let m = BigUint::from(2528u32);
    let ciphertext = elgamal::encrypt(&mut rng, &m, &public_key, &params).unwrap();
    assert_eq!(elgamal::decrypt(&ciphertext, &private_key, &params).unwrap(), m);
}

#[test]
fn ceremony_survives_share_before_commitment_delivery() {
    let mut rng = StdRng::seed_from_u64(1u64);
    let params = StandardGroup::Modp1024.parameters();
    let total: ShareId = 3;

    let mut transport = InMemoryTransport::new(total);
    let mut participants = (1..=total)
        .map(|id| Participant::new(id, total, params.clone()).unwrap())
        .collect::<Vec<_>>();
    for p in participants.iter_mut() {
        p.generate_shares(&mut rng).unwrap();
        p.publish(&mut transport).unwrap();
    }

    for p in participants.iter_mut() {
        // shares first; verification waits for the matching commitments
        for (from, share) in transport.drain_shares(p.id).unwrap() {
            p.receive_share(from, share).unwrap();
        }
        assert_eq!(p.state, ParticipantState::AwaitingPeerData);
        for (from, commitments) in transport.drain_commitments(p.id).unwrap() {
            p.receive_commitments(from, commitments).unwrap();
        }
        assert_eq!(p.state, ParticipantState::Verifying);
    }

    for p in participants.iter_mut() {
        p.finalize().unwrap();
    }
}

#[test]
fn exchanged_values_round_trip_through_serde() {
    let mut rng = StdRng::seed_from_u64(2u64);
    let params = StandardGroup::Modp1024.parameters();

    let mut p = Participant::new(1, 2, params.clone()).unwrap();
    p.generate_shares(&mut rng).unwrap();

    let commitments = p.commitments.clone().unwrap();
    let json = serde_json::to_string(&commitments).unwrap();
    assert_eq!(
        serde_json::from_str::<elgamal_dkg::common::CommitmentToCoefficients>(&json).unwrap(),
        commitments
    );

    let share = p.dealt_shares.clone().unwrap().0[1].clone();
    let json = serde_json::to_string(&share).unwrap();
    assert_eq!(
        serde_json::from_str::<elgamal_dkg::common::Share>(&json).unwrap(),
        share
    );

    let keypair = elgamal::generate_keys(&mut rng, &params);
    let ciphertext =
        elgamal::encrypt(&mut rng, &BigUint::from(7u32), &keypair.public_key, &params).unwrap();
    let json = serde_json::to_string(&ciphertext).unwrap();
    assert_eq!(
        serde_json::from_str::<elgamal_dkg::elgamal::CipherText>(&json).unwrap(),
        ciphertext
    );

    let json = serde_json::to_string(&params).unwrap();
    assert_eq!(
        serde_json::from_str::<elgamal_dkg::group::GroupParameters>(&json).unwrap(),
        params
    );
}
