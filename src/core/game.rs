use crate::core::chain::{ScoreChain, Step, TransitionMatrix};
use crate::core::solver::solve;
use crate::domain::model::ServeProbability;
use crate::utils::error::Result;
use std::fmt;

const POINT_CALLS: [&str; 4] = ["0", "15", "30", "40"];

/// Score of a service game, from the server's side.
///
/// `Points` never holds 40-40; that score is `Deuce`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameScore {
    Points { server: u8, returner: u8 },
    Deuce,
    AdvantageServer,
    AdvantageReturner,
    GameServer,
    GameReturner,
}

impl fmt::Display for GameScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameScore::Points { server, returner } => write!(
                f,
                "{}-{}",
                POINT_CALLS[*server as usize], POINT_CALLS[*returner as usize]
            ),
            GameScore::Deuce => write!(f, "Deuce"),
            GameScore::AdvantageServer => write!(f, "Advantage Server"),
            GameScore::AdvantageReturner => write!(f, "Advantage Returner"),
            GameScore::GameServer => write!(f, "Game Server"),
            GameScore::GameReturner => write!(f, "Game Returner"),
        }
    }
}

/// One service game. Deuce and advantage loop back on each other, so the
/// chain stays finite while allowing an unbounded number of points.
pub struct GameChain {
    serve: ServeProbability,
}

impl GameChain {
    pub fn new(serve: ServeProbability) -> Self {
        Self { serve }
    }

    fn after_point(server: u8, returner: u8, server_won: bool) -> GameScore {
        let (winner, loser) = if server_won { (server, returner) } else { (returner, server) };
        if winner == 3 {
            return if server_won { GameScore::GameServer } else { GameScore::GameReturner };
        }
        if winner + 1 == 3 && loser == 3 {
            return GameScore::Deuce;
        }
        if server_won {
            GameScore::Points { server: server + 1, returner }
        } else {
            GameScore::Points { server, returner: returner + 1 }
        }
    }
}

impl ScoreChain for GameChain {
    type State = GameScore;

    fn name(&self) -> &'static str {
        "game"
    }

    fn states(&self) -> Vec<GameScore> {
        let mut states = Vec::with_capacity(20);
        for played in 0..=5u8 {
            for server in (0..=played.min(3)).rev() {
                let returner = played - server;
                if returner <= 3 && !(server == 3 && returner == 3) {
                    states.push(GameScore::Points { server, returner });
                }
            }
        }
        states.extend([
            GameScore::Deuce,
            GameScore::AdvantageServer,
            GameScore::AdvantageReturner,
            GameScore::GameServer,
            GameScore::GameReturner,
        ]);
        states
    }

    fn step(&self, state: GameScore) -> Option<Step<GameScore>> {
        let (win, loss) = match state {
            GameScore::Points { server, returner } => (
                Self::after_point(server, returner, true),
                Self::after_point(server, returner, false),
            ),
            GameScore::Deuce => (GameScore::AdvantageServer, GameScore::AdvantageReturner),
            GameScore::AdvantageServer => (GameScore::GameServer, GameScore::Deuce),
            GameScore::AdvantageReturner => (GameScore::Deuce, GameScore::GameReturner),
            GameScore::GameServer | GameScore::GameReturner => return None,
        };
        Some(Step {
            win,
            loss,
            win_probability: self.serve.value(),
            loss_probability: self.serve.complement(),
        })
    }
}

pub fn build_game_chain(serve: ServeProbability) -> Result<TransitionMatrix> {
    TransitionMatrix::build(&GameChain::new(serve))
}

/// Probability that the server holds from 0-0.
pub fn game_win_probability(serve: ServeProbability) -> Result<f64> {
    let fundamental = solve(&build_game_chain(serve)?)?;
    Ok(fundamental.absorption(0, 0))
}
