use crate::core::chain::{ScoreChain, Step, TransitionMatrix};
use crate::core::solver::solve;
use crate::domain::model::{ServeProbability, WinProbability};
use crate::utils::error::Result;
use std::fmt;

/// Points at which a level score becomes an advantage race.
const LEVEL_CAP: u8 = 6;

/// Points played when either player holds an advantage past 6-6.
const ADVANTAGE_POINTS_PLAYED: u8 = 13;

/// Score of a tiebreak, player 1 first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TiebreakScore {
    Points { player1: u8, player2: u8 },
    AdvantagePlayer1,
    AdvantagePlayer2,
    GamePlayer1,
    GamePlayer2,
}

impl TiebreakScore {
    fn points_played(self) -> u8 {
        match self {
            TiebreakScore::Points { player1, player2 } => player1 + player2,
            _ => ADVANTAGE_POINTS_PLAYED,
        }
    }
}

impl fmt::Display for TiebreakScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TiebreakScore::Points { player1, player2 } => write!(f, "{}-{}", player1, player2),
            TiebreakScore::AdvantagePlayer1 => write!(f, "Ad Player 1"),
            TiebreakScore::AdvantagePlayer2 => write!(f, "Ad Player 2"),
            TiebreakScore::GamePlayer1 => write!(f, "Game Player 1"),
            TiebreakScore::GamePlayer2 => write!(f, "Game Player 2"),
        }
    }
}

/// Player 1 serves the first point, then the serve changes every two points.
pub fn player1_serves(points_played: u8) -> bool {
    matches!(points_played % 4, 0 | 3)
}

/// Tiebreak to seven, win by two.
///
/// Losing an advantage goes back to 5-5: the score is level again and 5-5 has
/// the same serve rotation as 7-7, so the chain needs no states beyond 6-6.
pub struct TiebreakChain {
    player1: ServeProbability,
    player2: ServeProbability,
}

impl TiebreakChain {
    pub fn new(player1: ServeProbability, player2: ServeProbability) -> Self {
        Self { player1, player2 }
    }

    /// Player 1's chances of winning and losing the next point.
    fn point_probabilities(&self, points_played: u8) -> (f64, f64) {
        if player1_serves(points_played) {
            (self.player1.value(), self.player1.complement())
        } else {
            (self.player2.complement(), self.player2.value())
        }
    }
}

impl ScoreChain for TiebreakChain {
    type State = TiebreakScore;

    fn name(&self) -> &'static str {
        "tiebreak"
    }

    fn states(&self) -> Vec<TiebreakScore> {
        let mut states = Vec::with_capacity(53);
        for played in 0..=2 * LEVEL_CAP {
            for player1 in (0..=played.min(LEVEL_CAP)).rev() {
                let player2 = played - player1;
                if player2 <= LEVEL_CAP {
                    states.push(TiebreakScore::Points { player1, player2 });
                }
            }
        }
        states.extend([
            TiebreakScore::AdvantagePlayer1,
            TiebreakScore::AdvantagePlayer2,
            TiebreakScore::GamePlayer1,
            TiebreakScore::GamePlayer2,
        ]);
        states
    }

    fn step(&self, state: TiebreakScore) -> Option<Step<TiebreakScore>> {
        let deuce = TiebreakScore::Points {
            player1: LEVEL_CAP - 1,
            player2: LEVEL_CAP - 1,
        };
        let (win, loss) = match state {
            TiebreakScore::Points { player1, player2 } if player1 == LEVEL_CAP && player2 == LEVEL_CAP => {
                (TiebreakScore::AdvantagePlayer1, TiebreakScore::AdvantagePlayer2)
            }
            TiebreakScore::Points { player1, player2 } => (
                if player1 == LEVEL_CAP {
                    TiebreakScore::GamePlayer1
                } else {
                    TiebreakScore::Points { player1: player1 + 1, player2 }
                },
                if player2 == LEVEL_CAP {
                    TiebreakScore::GamePlayer2
                } else {
                    TiebreakScore::Points { player1, player2: player2 + 1 }
                },
            ),
            TiebreakScore::AdvantagePlayer1 => (TiebreakScore::GamePlayer1, deuce),
            TiebreakScore::AdvantagePlayer2 => (deuce, TiebreakScore::GamePlayer2),
            TiebreakScore::GamePlayer1 | TiebreakScore::GamePlayer2 => return None,
        };
        let (win_probability, loss_probability) = self.point_probabilities(state.points_played());
        Some(Step {
            win,
            loss,
            win_probability,
            loss_probability,
        })
    }
}

pub fn build_tiebreak_chain(
    player1: ServeProbability,
    player2: ServeProbability,
) -> Result<TransitionMatrix> {
    TransitionMatrix::build(&TiebreakChain::new(player1, player2))
}

/// Probability of each player winning a tiebreak in which player 1 serves first.
pub fn tiebreak_win_probability(
    player1: ServeProbability,
    player2: ServeProbability,
) -> Result<WinProbability> {
    let fundamental = solve(&build_tiebreak_chain(player1, player2)?)?;
    Ok(WinProbability::new(
        fundamental.absorption(0, 0),
        fundamental.absorption(0, 1),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn serve(p: f64) -> ServeProbability {
        ServeProbability::new(p).unwrap()
    }

    #[test]
    fn test_serve_rotation() {
        let servers: Vec<bool> = (0..8).map(player1_serves).collect();
        assert_eq!(servers, vec![true, false, false, true, true, false, false, true]);
        assert!(player1_serves(12));
        assert!(!player1_serves(ADVANTAGE_POINTS_PLAYED));
        assert_eq!(player1_serves(10), player1_serves(14));
    }

    #[test]
    fn test_chain_shape() {
        let tm = build_tiebreak_chain(serve(0.6), serve(0.55)).unwrap();
        assert_eq!(tm.size(), 53);
        assert_eq!(tm.num_absorbing(), 2);
        assert_eq!(tm.labels()[48], "6-6");
        assert_eq!(tm.labels()[49], "Ad Player 1");
        assert_eq!(tm.labels()[51], "Game Player 1");
    }

    #[test]
    fn test_edges_use_current_server() {
        let tm = build_tiebreak_chain(serve(0.7), serve(0.6)).unwrap();
        let at = |from: &str, to: &str| tm.matrix()[(tm.index_of(from).unwrap(), tm.index_of(to).unwrap())];
        // Player 1 serves at 0-0, player 2 at 1-0 and 1-1, player 1 again at 2-1.
        assert_eq!(at("0-0", "1-0"), 0.7);
        assert!((at("1-0", "2-0") - 0.4).abs() < 1e-12);
        assert!((at("1-1", "1-2") - 0.6).abs() < 1e-12);
        assert_eq!(at("2-1", "3-1"), 0.7);
        assert!((at("6-4", "Game Player 1") - 0.4).abs() < 1e-12);
        assert_eq!(at("6-6", "Ad Player 1"), 0.7);
        assert!((at("Ad Player 1", "5-5") - 0.6).abs() < 1e-12);
        assert!((at("Ad Player 2", "Game Player 2") - 0.6).abs() < 1e-12);
    }

    #[test]
    fn test_equal_servers_split_evenly() {
        let w = tiebreak_win_probability(serve(0.6), serve(0.6)).unwrap();
        assert!((w.player1 - 0.5).abs() < 1e-9);
        assert!((w.player2 - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_stronger_server_favoured() {
        let w = tiebreak_win_probability(serve(0.7), serve(0.55)).unwrap();
        assert!((w.player1 - 0.7327197943437012).abs() < 1e-9);
        assert!((w.total() - 1.0).abs() < 1e-12);
    }
}
