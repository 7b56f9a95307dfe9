//! # Distributed key generation for ElGamal over safe-prime groups
//!
//! Implements an n-of-n Pedersen-style distributed key generation (DKG)
//! ceremony built from Feldman verifiable secret sharing (VSS) over a
//! multiplicative prime-order group, together with the ElGamal cipher that
//! consumes the resulting keys. No party ever learns the combined secret;
//! every party can verify the shares it receives against publicly committed
//! values and flag a cheating peer.
//!
//! 1. [Group parameters, RFC 5114 fixed groups and safe-prime generation](./src/group.rs)
//! 1. [Polynomials over the scalar field and Lagrange interpolation](./src/polynomial.rs)
//! 1. [Shamir secret sharing (requires a trusted dealer)](./src/shamir_ss.rs)
//! 1. [Feldman Verifiable Secret Sharing](./src/feldman_vss.rs)
//! 1. [Pedersen-style distributed key generation](./src/pedersen_dkg.rs)
//! 1. [ElGamal encryption](./src/elgamal.rs)
//! 1. [Ceremony transport seam](./src/transport.rs)

pub mod common;
pub mod elgamal;
pub mod error;
pub mod feldman_vss;
pub mod group;
pub mod pedersen_dkg;
pub mod polynomial;
pub mod shamir_ss;
pub mod transport;
