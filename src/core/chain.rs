use crate::utils::error::{EngineError, Result};
use nalgebra::DMatrix;
use std::collections::HashMap;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// The two ways a point (or game) can go from a transient state.
///
/// `win` is the successor when the favoured side of the chain takes the
/// point: the server in a game chain, player 1 in tiebreak and set chains.
/// Both edge probabilities are explicit: a returner's edge carries the
/// server's probability itself, not one recovered from its complement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Step<S> {
    pub win: S,
    pub loss: S,
    pub win_probability: f64,
    pub loss_probability: f64,
}

/// Largest accepted gap between an edge pair's sum and 1.
const EDGE_SUM_TOLERANCE: f64 = 1e-12;

/// A scoring unit described as a rule rather than a table of indices.
///
/// `states` lists every score in a fixed order with the absorbing states at
/// the end; `step` returns `None` exactly for the absorbing ones.
pub trait ScoreChain {
    type State: Copy + Eq + Hash + Debug + Display;

    fn name(&self) -> &'static str;

    fn states(&self) -> Vec<Self::State>;

    fn step(&self, state: Self::State) -> Option<Step<Self::State>>;
}

/// Row-stochastic matrix with a trailing block of absorbing states.
#[derive(Debug, Clone)]
pub struct TransitionMatrix {
    name: &'static str,
    matrix: DMatrix<f64>,
    num_absorbing: usize,
    labels: Vec<String>,
}

impl TransitionMatrix {
    /// Generates the matrix from a chain's successor rule.
    pub fn build<C: ScoreChain>(chain: &C) -> Result<Self> {
        let states = chain.states();
        let n = states.len();
        let index: HashMap<C::State, usize> =
            states.iter().enumerate().map(|(i, s)| (*s, i)).collect();
        if index.len() != n {
            return Err(EngineError::internal(chain.name(), "duplicate score state"));
        }

        let lookup = |state: C::State| {
            index.get(&state).copied().ok_or_else(|| {
                EngineError::internal(chain.name(), format!("successor {} is not a known state", state))
            })
        };

        let mut matrix = DMatrix::zeros(n, n);
        let mut num_absorbing = 0;
        for (row, state) in states.iter().enumerate() {
            match chain.step(*state) {
                None => {
                    matrix[(row, row)] = 1.0;
                    num_absorbing += 1;
                }
                Some(step) => {
                    if num_absorbing > 0 {
                        return Err(EngineError::internal(
                            chain.name(),
                            format!("transient state {} listed after an absorbing state", state),
                        ));
                    }
                    let (win, loss) = (step.win_probability, step.loss_probability);
                    if !(win.is_finite() && loss.is_finite() && win >= 0.0 && loss >= 0.0)
                        || (win + loss - 1.0).abs() > EDGE_SUM_TOLERANCE
                    {
                        return Err(EngineError::internal(
                            chain.name(),
                            format!("edges from {} are {} and {}", state, win, loss),
                        ));
                    }
                    matrix[(row, lookup(step.win)?)] += win;
                    matrix[(row, lookup(step.loss)?)] += loss;
                }
            }
        }

        if num_absorbing == 0 || num_absorbing == n {
            return Err(EngineError::internal(
                chain.name(),
                format!("{} absorbing states out of {}", num_absorbing, n),
            ));
        }

        Ok(Self {
            name: chain.name(),
            matrix,
            num_absorbing,
            labels: states.iter().map(|s| s.to_string()).collect(),
        })
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn matrix(&self) -> &DMatrix<f64> {
        &self.matrix
    }

    pub fn size(&self) -> usize {
        self.matrix.nrows()
    }

    pub fn num_absorbing(&self) -> usize {
        self.num_absorbing
    }

    pub fn num_transient(&self) -> usize {
        self.size() - self.num_absorbing
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    #[cfg(test)]
    pub(crate) fn index_of(&self, label: &str) -> Option<usize> {
        self.labels.iter().position(|l| l == label)
    }

    pub fn is_row_stochastic(&self, tolerance: f64) -> bool {
        self.matrix.row_iter().all(|row| {
            row.iter().all(|&x| x >= 0.0) && (row.sum() - 1.0).abs() <= tolerance
        })
    }

    pub fn nonzero_in_row(&self, row: usize) -> usize {
        self.matrix.row(row).iter().filter(|&&x| x != 0.0).count()
    }

    /// States reachable from `start` along nonzero edges, `start` included.
    pub fn reachable_from(&self, start: usize) -> Vec<bool> {
        let n = self.size();
        let mut seen = vec![false; n];
        let mut stack = vec![start];
        seen[start] = true;
        while let Some(row) = stack.pop() {
            for col in 0..n {
                if self.matrix[(row, col)] > 0.0 && !seen[col] {
                    seen[col] = true;
                    stack.push(col);
                }
            }
        }
        seen
    }
}
