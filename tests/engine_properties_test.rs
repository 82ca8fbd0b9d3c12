use tennis_mdp::{
    game_win_probability, match_win_probability, set_win_probability, tiebreak_win_probability,
    EngineError,
};

const GRID: [f64; 9] = [0.05, 0.2, 0.35, 0.5, 0.55, 0.62, 0.7, 0.85, 0.97];

// Valid inputs at the edges of (0, 1), where the tiebreak's 6-6 loop has
// almost no escape mass.
const EXTREMES: [f64; 8] = [
    f64::MIN_POSITIVE,
    1e-17,
    1e-16,
    1e-12,
    1e-9,
    1.0 - 1e-9,
    1.0 - 1e-12,
    1.0 - f64::EPSILON / 2.0,
];

#[test]
fn test_game_probability_is_monotonic() {
    let mut previous = 0.0;
    for i in 1..100 {
        let p = i as f64 / 100.0;
        let hold = game_win_probability(p).unwrap();
        assert!(hold > previous, "hold({}) = {} not above {}", p, hold, previous);
        assert!(hold > 0.0 && hold < 1.0);
        previous = hold;
    }
}

#[test]
fn test_game_symmetry_at_half() {
    assert!((game_win_probability(0.5).unwrap() - 0.5).abs() < 1e-12);
}

#[test]
fn test_game_boundary_limits() {
    assert!(game_win_probability(1.0 - 1e-6).unwrap() > 1.0 - 1e-9);
    assert!(game_win_probability(1e-6).unwrap() < 1e-9);
    assert!(matches!(
        game_win_probability(1.0),
        Err(EngineError::ValidationError { .. })
    ));
    assert!(matches!(
        game_win_probability(0.0),
        Err(EngineError::ValidationError { .. })
    ));
}

#[test]
fn test_equal_players_split_sets() {
    for p in GRID {
        let set = set_win_probability(p, p).unwrap();
        assert!((set.player1 - 0.5).abs() < 1e-9, "p = {}: {:?}", p, set);
        assert!((set.player2 - 0.5).abs() < 1e-9, "p = {}: {:?}", p, set);
    }
}

#[test]
fn test_exchange_law() {
    for p1 in GRID {
        for p2 in GRID {
            let forward = match_win_probability(p1, p2).unwrap();
            let backward = match_win_probability(p2, p1).unwrap().reversed();
            assert!((forward.player1 - backward.player1).abs() < 1e-9, "({}, {})", p1, p2);
            assert!((forward.player2 - backward.player2).abs() < 1e-9, "({}, {})", p1, p2);
        }
    }
}

#[test]
fn test_results_sum_to_one() {
    for p1 in GRID {
        for p2 in GRID {
            let set = set_win_probability(p1, p2).unwrap();
            let tiebreak = tiebreak_win_probability(p1, p2).unwrap();
            let game = match_win_probability(p1, p2).unwrap();
            assert!((set.total() - 1.0).abs() < 1e-6, "set ({}, {})", p1, p2);
            assert!((tiebreak.total() - 1.0).abs() < 1e-6, "tiebreak ({}, {})", p1, p2);
            assert!((game.total() - 1.0).abs() < 1e-6, "match ({}, {})", p1, p2);
        }
    }
}

#[test]
fn test_equal_servers_even_match() {
    let result = match_win_probability(0.65, 0.65).unwrap();
    assert!((result.player1 - 0.5).abs() < 1e-9);
    assert!((result.player2 - 0.5).abs() < 1e-9);
}

#[test]
fn test_serve_advantage_compounds() {
    let result = match_win_probability(0.70, 0.55).unwrap();
    assert!(result.player1 > 0.65);
    assert!(result.player1 > set_win_probability(0.70, 0.55).unwrap().player1);
}

#[test]
fn test_even_tiebreak() {
    let result = tiebreak_win_probability(0.6, 0.6).unwrap();
    assert!((result.player1 - 0.5).abs() < 1e-9);
    assert!((result.player2 - 0.5).abs() < 1e-9);
}

#[test]
fn test_invalid_inputs_rejected() {
    for bad in [0.0, 1.0, -0.5, 1.5, f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
        assert!(match_win_probability(bad, 0.6).is_err(), "{} accepted", bad);
        assert!(match_win_probability(0.6, bad).is_err(), "{} accepted", bad);
        assert!(set_win_probability(bad, 0.6).is_err(), "{} accepted", bad);
    }
}

#[test]
fn test_equal_players_split_at_extremes() {
    for p in EXTREMES {
        let set = set_win_probability(p, p).unwrap();
        let tiebreak = tiebreak_win_probability(p, p).unwrap();
        let result = match_win_probability(p, p).unwrap();
        assert!((set.player1 - 0.5).abs() < 1e-9, "set p = {:e}: {:?}", p, set);
        assert!((set.player2 - 0.5).abs() < 1e-9, "set p = {:e}: {:?}", p, set);
        assert!((tiebreak.player1 - 0.5).abs() < 1e-9, "tiebreak p = {:e}: {:?}", p, tiebreak);
        assert!((result.player1 - 0.5).abs() < 1e-9, "match p = {:e}: {:?}", p, result);
        assert!((result.player2 - 0.5).abs() < 1e-9, "match p = {:e}: {:?}", p, result);
    }
}

#[test]
fn test_extreme_inputs_keep_laws() {
    let values: Vec<f64> = EXTREMES.iter().chain([0.05, 0.62, 0.97].iter()).copied().collect();
    for &p1 in &values {
        for &p2 in &values {
            let set = set_win_probability(p1, p2).unwrap();
            let tiebreak = tiebreak_win_probability(p1, p2).unwrap();
            let forward = match_win_probability(p1, p2).unwrap();
            let backward = match_win_probability(p2, p1).unwrap().reversed();

            assert!((set.total() - 1.0).abs() < 1e-12, "set ({:e}, {:e})", p1, p2);
            assert!((tiebreak.total() - 1.0).abs() < 1e-12, "tiebreak ({:e}, {:e})", p1, p2);
            assert!((forward.total() - 1.0).abs() < 1e-12, "match ({:e}, {:e})", p1, p2);
            assert!((forward.player1 - backward.player1).abs() < 1e-9, "({:e}, {:e})", p1, p2);
            for x in [set.player1, set.player2, tiebreak.player1, forward.player1, forward.player2] {
                assert!((-1e-12..=1.0 + 1e-12).contains(&x), "({:e}, {:e}) gave {}", p1, p2, x);
            }
        }
    }
}

#[test]
fn test_tiny_serve_loses_tiebreak_to_strong_server() {
    let result = tiebreak_win_probability(1e-12, 0.9).unwrap();
    assert!(result.player1 < 1e-6);
    assert!((result.total() - 1.0).abs() < 1e-12);
}
