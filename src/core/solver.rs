use crate::core::chain::TransitionMatrix;
use crate::utils::error::{EngineError, Result};
use nalgebra::DMatrix;

/// Absorption probabilities of an absorbing chain, `(I - Q)^-1 R`.
///
/// Entry `(s, a)` is the probability that the chain started in transient
/// state `s` ends in absorbing state `a` (both indices relative to their block).
#[derive(Debug, Clone)]
pub struct FundamentalMatrix {
    matrix: DMatrix<f64>,
}

impl FundamentalMatrix {
    pub fn absorption(&self, from: usize, into: usize) -> f64 {
        self.matrix[(from, into)]
    }

    pub fn row(&self, from: usize) -> Vec<f64> {
        self.matrix.row(from).iter().copied().collect()
    }

    pub fn num_transient(&self) -> usize {
        self.matrix.nrows()
    }

    pub fn num_absorbing(&self) -> usize {
        self.matrix.ncols()
    }
}

pub fn solve(transition: &TransitionMatrix) -> Result<FundamentalMatrix> {
    let fundamental = solve_raw(transition.matrix(), transition.num_absorbing())
        .map_err(|e| match e {
            EngineError::InternalComputationError { message, .. } => {
                EngineError::internal(transition.name(), message)
            }
            other => other,
        })?;
    tracing::trace!(
        chain = transition.name(),
        states = transition.size(),
        absorbing = transition.num_absorbing(),
        "solved absorbing chain"
    );
    Ok(fundamental)
}

/// Solves a bare matrix whose last `num_absorbing` rows and columns are absorbing.
///
/// Uses Grassmann-Taksar-Heyman elimination. Transient states are removed
/// from the last one down and each removed state's outgoing mass is folded
/// into the rows that reach it. A state's escape mass is summed from its
/// remaining edges instead of being taken as `1 - self_loop`, so every
/// intermediate value is a sum of non-negative terms. Long loops with very
/// little escape mass stay accurate.
pub fn solve_raw(transition: &DMatrix<f64>, num_absorbing: usize) -> Result<FundamentalMatrix> {
    let n = transition.nrows();
    if transition.ncols() != n {
        return Err(EngineError::internal(
            "raw",
            format!("transition matrix is {}x{}, not square", n, transition.ncols()),
        ));
    }
    if num_absorbing == 0 || num_absorbing >= n {
        return Err(EngineError::internal(
            "raw",
            format!("{} absorbing states out of {}", num_absorbing, n),
        ));
    }

    let t = n - num_absorbing;
    let mut reduced = transition.clone();
    let mut escape = vec![0.0; t];

    for k in (0..t).rev() {
        // States still present once k is removed.
        let kept: Vec<usize> = (0..k).chain(t..n).collect();
        let out: f64 = kept.iter().map(|&j| reduced[(k, j)]).sum();
        if !out.is_finite() || out <= 0.0 {
            return Err(EngineError::internal(
                "raw",
                format!("transient state {} never reaches an absorbing state", k),
            ));
        }
        escape[k] = out;

        for i in 0..k {
            let into = reduced[(i, k)];
            if into == 0.0 {
                continue;
            }
            let scale = into / out;
            for &j in &kept {
                let via = reduced[(k, j)];
                if via != 0.0 {
                    reduced[(i, j)] += scale * via;
                }
            }
        }
    }

    // Back-substitute: state k only leads to lower states and the absorbing block.
    let mut matrix = DMatrix::<f64>::zeros(t, num_absorbing);
    for k in 0..t {
        for a in 0..num_absorbing {
            let through: f64 = (0..k).map(|j| reduced[(k, j)] * matrix[(j, a)]).sum();
            matrix[(k, a)] = (reduced[(k, t + a)] + through) / escape[k];
        }
    }

    if matrix.iter().any(|x| !x.is_finite()) {
        return Err(EngineError::internal("raw", "absorption probabilities are not finite"));
    }

    Ok(FundamentalMatrix { matrix })
}
