use crate::core::chain::{ScoreChain, Step, TransitionMatrix};
use crate::utils::error::Result;
use crate::utils::validation::validate_probability;
use std::fmt;

const GAMES_TO_WIN: u8 = 6;

/// Score of a set in games, player 1 first. 6-6 is terminal here; the
/// tiebreak is solved as its own chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SetScore {
    Games { player1: u8, player2: u8 },
    SetPlayer1,
    SetPlayer2,
    Tiebreak,
}

impl fmt::Display for SetScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SetScore::Games { player1, player2 } => write!(f, "{}-{}", player1, player2),
            SetScore::SetPlayer1 => write!(f, "Set Player 1"),
            SetScore::SetPlayer2 => write!(f, "Set Player 2"),
            SetScore::Tiebreak => write!(f, "6-6"),
        }
    }
}

/// Column of each absorbing state in the set chain's fundamental matrix.
pub const SET_PLAYER1: usize = 0;
pub const SET_PLAYER2: usize = 1;
pub const SET_TIEBREAK: usize = 2;

/// A set in which player 1 serves the first game and the serve alternates
/// every game. Inputs are each player's probability of holding serve.
pub struct SetChain {
    player1_hold: f64,
    player2_hold: f64,
}

impl SetChain {
    pub fn new(player1_hold: f64, player2_hold: f64) -> Result<Self> {
        validate_probability("player1_hold", player1_hold)?;
        validate_probability("player2_hold", player2_hold)?;
        Ok(Self {
            player1_hold,
            player2_hold,
        })
    }

    fn is_live(player1: u8, player2: u8) -> bool {
        (player1 < GAMES_TO_WIN && player2 < GAMES_TO_WIN)
            || (player1, player2) == (GAMES_TO_WIN, GAMES_TO_WIN - 1)
            || (player1, player2) == (GAMES_TO_WIN - 1, GAMES_TO_WIN)
    }

    fn resolve(player1: u8, player2: u8) -> SetScore {
        if player1 == GAMES_TO_WIN && player2 == GAMES_TO_WIN {
            SetScore::Tiebreak
        } else if player1 > GAMES_TO_WIN || (player1 == GAMES_TO_WIN && player2 + 2 <= GAMES_TO_WIN) {
            SetScore::SetPlayer1
        } else if player2 > GAMES_TO_WIN || (player2 == GAMES_TO_WIN && player1 + 2 <= GAMES_TO_WIN) {
            SetScore::SetPlayer2
        } else {
            SetScore::Games { player1, player2 }
        }
    }

    fn game_probabilities(&self, games_played: u8) -> (f64, f64) {
        if games_played % 2 == 0 {
            (self.player1_hold, 1.0 - self.player1_hold)
        } else {
            (1.0 - self.player2_hold, self.player2_hold)
        }
    }
}

impl ScoreChain for SetChain {
    type State = SetScore;

    fn name(&self) -> &'static str {
        "set"
    }

    fn states(&self) -> Vec<SetScore> {
        let mut states = Vec::with_capacity(41);
        for played in 0..2 * GAMES_TO_WIN {
            for player1 in (0..=played.min(GAMES_TO_WIN)).rev() {
                let player2 = played - player1;
                if player2 <= GAMES_TO_WIN && Self::is_live(player1, player2) {
                    states.push(SetScore::Games { player1, player2 });
                }
            }
        }
        states.extend([SetScore::SetPlayer1, SetScore::SetPlayer2, SetScore::Tiebreak]);
        states
    }

    fn step(&self, state: SetScore) -> Option<Step<SetScore>> {
        match state {
            SetScore::Games { player1, player2 } => {
                let (win_probability, loss_probability) = self.game_probabilities(player1 + player2);
                Some(Step {
                    win: Self::resolve(player1 + 1, player2),
                    loss: Self::resolve(player1, player2 + 1),
                    win_probability,
                    loss_probability,
                })
            }
            SetScore::SetPlayer1 | SetScore::SetPlayer2 | SetScore::Tiebreak => None,
        }
    }
}

pub fn build_set_chain(player1_hold: f64, player2_hold: f64) -> Result<TransitionMatrix> {
    TransitionMatrix::build(&SetChain::new(player1_hold, player2_hold)?)
}
