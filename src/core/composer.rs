use crate::core::game::game_win_probability;
use crate::core::set::{build_set_chain, SET_PLAYER1, SET_PLAYER2, SET_TIEBREAK};
use crate::core::solver::solve;
use crate::core::tiebreak::tiebreak_win_probability;
use crate::domain::model::{MatchFormat, ServeProbability, WinProbability};
use crate::utils::error::Result;
use serde::Serialize;

/// Intermediate results of one set in which player 1 serves first.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SetBreakdown {
    pub player1_hold: f64,
    pub player2_hold: f64,
    /// Sets decided before 6-6.
    pub direct: WinProbability,
    pub tiebreak_reached: f64,
    pub tiebreak: WinProbability,
}

impl SetBreakdown {
    pub fn set_win(&self) -> WinProbability {
        WinProbability::new(
            self.direct.player1 + self.tiebreak_reached * self.tiebreak.player1,
            self.direct.player2 + self.tiebreak_reached * self.tiebreak.player2,
        )
    }
}

/// Combines the game, set and tiebreak chains into set and match odds.
#[derive(Debug, Clone, Copy, Default)]
pub struct MatchComposer {
    format: MatchFormat,
}

impl MatchComposer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_format(format: MatchFormat) -> Self {
        Self { format }
    }

    pub fn format(&self) -> MatchFormat {
        self.format
    }

    pub fn set_breakdown(
        &self,
        player1: ServeProbability,
        player2: ServeProbability,
    ) -> Result<SetBreakdown> {
        let player1_hold = game_win_probability(player1)?;
        let player2_hold = game_win_probability(player2)?;

        let set = solve(&build_set_chain(player1_hold, player2_hold)?)?;
        let tiebreak = tiebreak_win_probability(player1, player2)?;

        let breakdown = SetBreakdown {
            player1_hold,
            player2_hold,
            direct: WinProbability::new(set.absorption(0, SET_PLAYER1), set.absorption(0, SET_PLAYER2)),
            tiebreak_reached: set.absorption(0, SET_TIEBREAK),
            tiebreak,
        };
        tracing::debug!(
            player1_hold,
            player2_hold,
            tiebreak_reached = breakdown.tiebreak_reached,
            "set chain solved"
        );
        Ok(breakdown)
    }

    /// Set odds when player 1 serves the first game.
    pub fn set_win_probability(
        &self,
        player1: ServeProbability,
        player2: ServeProbability,
    ) -> Result<WinProbability> {
        Ok(self.set_breakdown(player1, player2)?.set_win())
    }

    /// Match odds, averaged over which player serves the opening game.
    pub fn match_win_probability(
        &self,
        player1: ServeProbability,
        player2: ServeProbability,
    ) -> Result<WinProbability> {
        let player1_opens = self.set_win_probability(player1, player2)?;
        let player2_opens = self.set_win_probability(player2, player1)?.reversed();

        let sets_to_win = self.format.sets_to_win();
        let first = alternating_sets(player1_opens, player2_opens, sets_to_win);
        let second = alternating_sets(player2_opens, player1_opens, sets_to_win);

        let result = WinProbability::new(
            (first.player1 + second.player1) / 2.0,
            (first.player2 + second.player2) / 2.0,
        );
        tracing::debug!(
            format = ?self.format,
            player1 = result.player1,
            player2 = result.player2,
            "match composed"
        );
        Ok(result)
    }
}

/// Match odds when odd-numbered sets follow `first` and even-numbered sets
/// follow `second`.
fn alternating_sets(first: WinProbability, second: WinProbability, sets_to_win: u8) -> WinProbability {
    let n = sets_to_win as usize;
    // reach[i][j]: probability the match passes through i sets to j.
    let mut reach = vec![vec![0.0; n]; n];
    reach[0][0] = 1.0;
    let mut player1 = 0.0;
    let mut player2 = 0.0;

    for played in 0..(2 * n - 1) {
        let set = if played % 2 == 0 { first } else { second };
        for won in 0..=played.min(n - 1) {
            let lost = played - won;
            if lost >= n {
                continue;
            }
            let mass = reach[won][lost];
            if mass == 0.0 {
                continue;
            }
            if won + 1 == n {
                player1 += mass * set.player1;
            } else {
                reach[won + 1][lost] += mass * set.player1;
            }
            if lost + 1 == n {
                player2 += mass * set.player2;
            } else {
                reach[won][lost + 1] += mass * set.player2;
            }
        }
    }

    WinProbability::new(player1, player2)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn serve(p: f64) -> ServeProbability {
        ServeProbability::new(p).unwrap()
    }

    #[test]
    fn test_best_of_three_closed_form() {
        let a = WinProbability::new(0.62, 0.38);
        let b = WinProbability::new(0.55, 0.45);
        let got = alternating_sets(a, b, 2);
        let straight = a.player1 * b.player1;
        let decider = (a.player1 * b.player2 + a.player2 * b.player1) * a.player1;
        assert!((got.player1 - (straight + decider)).abs() < 1e-15);
        assert!((got.total() - 1.0).abs() < 1e-15);
    }

    #[test]
    fn test_best_of_five_sums_to_one() {
        let a = WinProbability::new(0.7, 0.3);
        let b = WinProbability::new(0.4, 0.6);
        let got = alternating_sets(a, b, 3);
        assert!((got.total() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_set_breakdown_parts() {
        let breakdown = MatchComposer::new().set_breakdown(serve(0.7), serve(0.55)).unwrap();
        assert!((breakdown.player1_hold - 0.9007889655172414).abs() < 1e-9);
        assert!((breakdown.player2_hold - 0.6231485024752477).abs() < 1e-9);
        let mass = breakdown.direct.total() + breakdown.tiebreak_reached;
        assert!((mass - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_set_win_known_value() {
        let w = MatchComposer::new().set_win_probability(serve(0.7), serve(0.55)).unwrap();
        assert!((w.player1 - 0.8971707476864829).abs() < 1e-9);
        assert!((w.total() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_match_known_value() {
        let w = MatchComposer::new().match_win_probability(serve(0.7), serve(0.55)).unwrap();
        assert!((w.player1 - 0.9704530378403868).abs() < 1e-9);
    }

    #[test]
    fn test_longer_format_favours_stronger_player() {
        let three = MatchComposer::new().match_win_probability(serve(0.64), serve(0.6)).unwrap();
        let five = MatchComposer::with_format(MatchFormat::BestOfFive)
            .match_win_probability(serve(0.64), serve(0.6))
            .unwrap();
        assert!(five.player1 > three.player1);
        assert!((five.total() - 1.0).abs() < 1e-9);
    }
}
