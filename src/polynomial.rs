//! Dense polynomials over the scalar field `Z_q`, plus Lagrange interpolation
//! at zero as a reusable building block.
//!
//! Coefficient 0 is the intercept; for a dealing polynomial it is the secret,
//! which is why evaluation points with `x = 0` are rejected everywhere.

use num_bigint::{BigUint, RandBigInt};
use num_traits::{One, Zero};
use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::{common::ShareId, error::DkgError};

/// Evaluation of a polynomial at a point.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Point {
    pub x: BigUint,
    pub y: BigUint,
}

/// Coefficient representation of a polynomial over `Z_q`. Immutable once
/// constructed; a dealing polynomial stays with the dealer and only
/// evaluations ([`Point`]s) and commitments leave it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Polynomial {
    pub coefficients: Vec<BigUint>,
    pub modulus: BigUint,
}

impl Polynomial {
    pub fn new(coefficients: Vec<BigUint>, modulus: BigUint) -> Result<Self, DkgError> {
        if modulus.is_zero() {
            return Err(DkgError::InvalidGroupParameters("zero scalar modulus"));
        }
        if coefficients.is_empty() {
            return Err(DkgError::InvalidPolynomialDegree);
        }
        let coefficients = coefficients.into_iter().map(|c| c % &modulus).collect();
        Ok(Polynomial {
            coefficients,
            modulus,
        })
    }

    /// Polynomial of the given degree with `coefficients[0] = intercept` and
    /// the remaining coefficients independent uniform scalars in `[0, q)`.
    pub fn random<R: RngCore>(
        rng: &mut R,
        intercept: &BigUint,
        degree: usize,
        modulus: &BigUint,
    ) -> Result<Self, DkgError> {
        if modulus.is_zero() {
            return Err(DkgError::InvalidGroupParameters("zero scalar modulus"));
        }
        let mut coefficients = Vec::with_capacity(degree + 1);
        coefficients.push(intercept % modulus);
        for _ in 0..degree {
            coefficients.push(rng.gen_biguint_below(modulus));
        }
        Ok(Polynomial {
            coefficients,
            modulus: modulus.clone(),
        })
    }

    pub fn degree(&self) -> usize {
        self.coefficients.len() - 1
    }

    /// Horner evaluation mod `q`.
    pub fn evaluate(&self, x: &BigUint) -> BigUint {
        let mut acc = BigUint::zero();
        for c in self.coefficients.iter().rev() {
            acc = (acc * x + c) % &self.modulus;
        }
        acc
    }

    /// `n` points with `x` stepped linearly from `a` toward `b` in increments
    /// of `(b - a) / n`. The division truncates, so the final `x` does not
    /// necessarily land on `b`. `a = 0` is rejected (the value there is the
    /// intercept), as is a step of zero, which cannot yield distinct points.
    pub fn points(&self, a: &BigUint, b: &BigUint, n: usize) -> Result<Vec<Point>, DkgError> {
        if n == 0 || a.is_zero() || b <= a {
            return Err(DkgError::InvalidEvaluationPoint);
        }
        let delta = (b - a) / BigUint::from(n);
        if delta.is_zero() {
            return Err(DkgError::DuplicateEvaluationPoint);
        }
        let mut x = a.clone();
        let mut points = Vec::with_capacity(n);
        for _ in 0..n {
            points.push(Point {
                x: x.clone(),
                y: self.evaluate(&x),
            });
            x += &delta;
        }
        Ok(points)
    }
}

/// Lagrange interpolation at `x = 0`: recovers the intercept of the unique
/// polynomial of degree `points.len() - 1` through the given points, mod
/// `modulus`. Division happens by modular inverse, so duplicate `x`
/// coordinates (a zero denominator) and `x = 0` are rejected up front.
pub fn interpolate_at_zero(points: &[Point], modulus: &BigUint) -> Result<BigUint, DkgError> {
    if modulus.is_zero() {
        return Err(DkgError::InvalidGroupParameters("zero scalar modulus"));
    }
    if points.is_empty() {
        return Err(DkgError::InvalidEvaluationPoint);
    }
    // distinctness has to hold after reduction, which is what the arithmetic sees
    let xs: Vec<BigUint> = points.iter().map(|p| &p.x % modulus).collect();
    for (i, x) in xs.iter().enumerate() {
        if x.is_zero() {
            return Err(DkgError::InvalidEvaluationPoint);
        }
        if xs[..i].contains(x) {
            return Err(DkgError::DuplicateEvaluationPoint);
        }
    }

    let mut acc = BigUint::zero();
    for (j, point) in points.iter().enumerate() {
        let mut numerator = BigUint::one();
        let mut denominator = BigUint::one();
        for (m, x) in xs.iter().enumerate() {
            if m == j {
                continue;
            }
            numerator = numerator * x % modulus;
            denominator = denominator * sub_mod(x, &xs[j], modulus) % modulus;
        }
        let denominator_inv = denominator
            .modinv(modulus)
            .ok_or(DkgError::NonInvertibleElement)?;
        let basis = numerator * denominator_inv % modulus;
        acc = (acc + (&point.y % modulus) * basis) % modulus;
    }
    Ok(acc)
}

/// Lagrange basis polynomial at `x = 0` for the coordinate `i` within
/// `x_coords`: `prod_{m != i} x_m / prod_{m != i} (x_m - i)` mod `modulus`.
/// Scaling a share of a degree-`n-1` polynomial at `i` by this value turns a
/// fixed full set of Shamir shares into additive shares of the intercept.
pub fn lagrange_basis_at_zero(
    x_coords: &[ShareId],
    i: ShareId,
    modulus: &BigUint,
) -> Result<BigUint, DkgError> {
    if modulus.is_zero() {
        return Err(DkgError::InvalidGroupParameters("zero scalar modulus"));
    }
    for (n, x) in x_coords.iter().enumerate() {
        if *x == 0 {
            return Err(DkgError::InvalidEvaluationPoint);
        }
        if x_coords[..n].contains(x) {
            return Err(DkgError::DuplicateEvaluationPoint);
        }
    }
    let i_reduced = BigUint::from(i) % modulus;
    let mut numerator = BigUint::one();
    let mut denominator = BigUint::one();
    for x in x_coords {
        if *x == i {
            continue;
        }
        let x = BigUint::from(*x) % modulus;
        denominator = denominator * sub_mod(&x, &i_reduced, modulus) % modulus;
        numerator = numerator * x % modulus;
    }
    let denominator_inv = denominator
        .modinv(modulus)
        .ok_or(DkgError::NonInvertibleElement)?;
    Ok(numerator * denominator_inv % modulus)
}

/// `(a - b) mod m` for operands already reduced mod `m`.
fn sub_mod(a: &BigUint, b: &BigUint, m: &BigUint) -> BigUint {
    if a >= b {
        a - b
    } else {
        m - (b - a)
    }
}
