// End-to-end playback scenarios through the public API

use std::rc::Rc;
use std::time::Duration;

use algotrace::config::PlayerConfig;
use algotrace::player::{PlaybackStatus, Player};
use algotrace::registry::Params;
use algotrace::snapshot::{Mark, TraceResult};

fn odds() -> Vec<i64> {
    (0..10).map(|i| 2 * i + 1).collect()
}

#[test]
fn test_bubble_sort_scenario() {
    let mut player = Player::default();
    player
        .load_algorithm("bubble-sort", &[5, 2, 4, 1], &Params::new())
        .expect("bubble sort accepts four elements");

    let first = player.step();
    assert_eq!(first.step, 1);
    let compare = player.current_snapshot().unwrap();
    assert_eq!(compare.mark_at(0), Some(Mark::Comparing));
    assert_eq!(compare.mark_at(1), Some(Mark::Comparing));

    player.step();
    let swapped = player.current_snapshot().unwrap();
    assert_eq!(swapped.array_state, vec![2, 5, 4, 1]);
    assert_eq!(swapped.metrics.swaps, 1);

    let end = player.seek(player.total_steps());
    assert_eq!(end.status, PlaybackStatus::Finished);
    let terminal = player.current_snapshot().unwrap();
    assert_eq!(terminal.array_state, vec![1, 2, 4, 5]);
    assert_eq!(terminal.indices_marked(Mark::Sorted), vec![0, 1, 2, 3]);
}

#[test]
fn test_binary_search_scenario() {
    let mut player = Player::default();
    player
        .load_algorithm(
            "binary-search",
            &odds(),
            &Params::new().with_number("target", 13),
        )
        .unwrap();
    let trace = player.trace().unwrap();

    let probes: Vec<usize> = trace
        .iter()
        .filter_map(|s| s.indices_marked(Mark::Comparing).first().copied())
        .collect();
    assert_eq!(probes, vec![4, 7, 5, 6]);

    player.seek(player.total_steps());
    let result = player.current_snapshot().unwrap().result.clone();
    assert_eq!(result, Some(TraceResult::Search(Some(6))));
    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json, serde_json::json!({ "type": "search", "value": 6 }));
}

#[test]
fn test_validation_scenario() {
    let mut player = Player::default();
    player
        .load_algorithm("insertion-sort", &[3, 1, 2], &Params::new())
        .unwrap();
    player.seek(2);
    let before = player.trace().unwrap();

    assert!(player
        .load_algorithm("insertion-sort", &[9], &Params::new())
        .is_err());
    assert!(!player.validation_error().unwrap_or_default().is_empty());
    assert_eq!(player.current_step(), 2);
    assert!(Rc::ptr_eq(&before, &player.trace().unwrap()));
    assert_eq!(player.input(), Some(&[3, 1, 2][..]));
}

#[test]
fn test_boundary_snapshots() {
    let input = [4, 8, 1, 6, 3];
    let mut player = Player::default();
    player
        .load_algorithm("heap-sort", &input, &Params::new())
        .unwrap();

    let start = player.seek(0);
    assert_eq!(start.status, PlaybackStatus::Idle);
    let initial = player.current_snapshot().unwrap();
    assert_eq!(initial.array_state, input);
    assert!(initial.marked_indices.is_empty());

    let total = player.total_steps();
    assert_eq!(total, player.trace().unwrap().len() - 1);
    assert_eq!(player.seek(total + 100).step, total);
}

#[test]
fn test_autoplay_runs_to_completion_with_custom_speed() {
    let config = PlayerConfig {
        speed: Duration::from_millis(100),
        ..PlayerConfig::default()
    };
    let mut player = Player::new(config);
    player
        .load_algorithm("reverse-string", &[97, 98, 99, 100], &Params::new())
        .unwrap();
    let total = player.total_steps();

    player.play();
    let mut ticks = 0;
    while player.is_playing() {
        let due = player.next_tick_in().unwrap();
        assert_eq!(due, Duration::from_millis(100));
        player.advance_time(due);
        ticks += 1;
    }
    assert_eq!(ticks, total);
    assert_eq!(player.status(), PlaybackStatus::Finished);
    assert_eq!(
        player.current_snapshot().unwrap().result,
        Some(TraceResult::Text("dcba".into()))
    );
}

#[test]
fn test_reload_replaces_trace_wholesale() {
    let mut player = Player::default();
    player
        .load_algorithm("selection-sort", &[2, 1], &Params::new())
        .unwrap();
    let first = player.trace().unwrap();
    player.seek(1);

    player
        .load_algorithm("mode", &[1, 1, 2], &Params::new())
        .unwrap();
    let second = player.trace().unwrap();
    assert!(!Rc::ptr_eq(&first, &second));
    assert_eq!(player.current_step(), 0);
    assert_eq!(player.algorithm_id(), Some("mode"));
    // the old trace is untouched
    assert_eq!(first.initial().array_state, vec![2, 1]);
}

#[test]
fn test_pair_sum_at_i64_limits_loads() {
    let mut player = Player::default();
    let state = player
        .load_algorithm(
            "two-pointer-sum",
            &[i64::MAX - 1, i64::MAX],
            &Params::new().with_number("target", 0),
        )
        .expect("extreme values are valid input");
    assert!(state.total > 0);
    assert!(player.validation_error().is_none());

    player.seek(state.total);
    assert_eq!(
        player.current_snapshot().unwrap().result,
        Some(TraceResult::Indices(Vec::new()))
    );
}
