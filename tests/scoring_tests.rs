use falling_blocks::core::{
    check_level_up, drop_interval_ms, points_for_lines, score_multiplier, total_score_for_level,
    HighScoreList,
};
use falling_blocks::types::MAX_LEVEL;

#[test]
fn test_level_thresholds() {
    assert_eq!(total_score_for_level(0), 0);
    assert_eq!(total_score_for_level(1), 2000);
    assert_eq!(total_score_for_level(2), 4200);
    assert_eq!(total_score_for_level(3), 6800);
}

#[test]
fn test_multiplier_is_clamped() {
    assert_eq!(score_multiplier(-3), 1.0);
    assert_eq!(score_multiplier(MAX_LEVEL as i32 + 5), score_multiplier(MAX_LEVEL as i32));
}

#[test]
fn test_points_scale_with_level() {
    assert_eq!(points_for_lines(1, 0), 100);
    assert_eq!(points_for_lines(2, 0), 220);
    assert_eq!(points_for_lines(3, 0), 350);
    assert_eq!(points_for_lines(4, 0), 500);
    // 1.1x
    assert_eq!(points_for_lines(1, 1), 110);
    assert_eq!(points_for_lines(4, 1), 550);
    // 1.3x
    assert_eq!(points_for_lines(2, 2), 286);
    assert_eq!(points_for_lines(0, 3), 0);
    assert_eq!(points_for_lines(5, 3), 0);
}

#[test]
fn test_level_up_can_skip_levels() {
    let up = check_level_up(4500, 0, 2000);
    assert_eq!(up.level, 2);
    assert_eq!(up.next_level_score, 6800);
    assert!(up.changed);

    let same = check_level_up(1999, 0, 2000);
    assert_eq!(same.level, 0);
    assert!(!same.changed);
}

#[test]
fn test_level_stops_at_max() {
    let up = check_level_up(u32::MAX, 0, 2000);
    assert_eq!(up.level, MAX_LEVEL);
}

#[test]
fn test_drop_interval() {
    assert_eq!(drop_interval_ms(0, true), 1000);
    assert_eq!(drop_interval_ms(1, true), 935);
    assert_eq!(drop_interval_ms(10, true), 350);
    assert_eq!(drop_interval_ms(14, true), 100);
    assert_eq!(drop_interval_ms(15, true), 100);
    assert_eq!(drop_interval_ms(7, false), 1000);
}

#[test]
fn test_high_score_insertion() {
    let mut list = HighScoreList::from_scores([1000, 800, 600, 400, 200]);
    assert!(list.insert(500));
    assert_eq!(list.as_slice(), &[1000, 800, 600, 500, 400]);

    assert!(!list.insert(100));
    assert_eq!(list.as_slice(), &[1000, 800, 600, 500, 400]);

    assert!(list.insert(1200));
    assert_eq!(list.best(), Some(1200));
    assert_eq!(list.len(), 5);
}

#[test]
fn test_high_score_list_is_sorted_and_capped() {
    let list = HighScoreList::from_scores([5, 50, 500, 5000, 50000, 500000, 1]);
    assert_eq!(list.as_slice(), &[500000, 50000, 5000, 500, 50]);
    assert!(!list.qualifies(10));
    assert!(list.qualifies(60));
}
