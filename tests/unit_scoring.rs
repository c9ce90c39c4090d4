// Unit tests for post scoring and ranking.
//
// Tests isolated pure functions: the overlap components, the personalized
// blend, the trending formula, and the rank() sort/page contract.

mod common;

use common::{engaged, post, topics};
use forumrank::ranking::posts::{rank, RankingMode};
use forumrank::scoring::post::{personalized_score, trending_score, PersonalizationWeights};
use forumrank::topics::interests::InterestProfile;
use forumrank::topics::overlap::{overlap_score, OverlapWeights};

// ============================================================
// Personalized score
// ============================================================

#[test]
fn single_authored_topic_scores_three_point_two() {
    let profile = InterestProfile {
        authored: topics(&["golang"]),
        ..Default::default()
    };
    let candidate = post(1, 2, &["golang", "rust"]);
    let scored =
        personalized_score(&candidate, 1, &profile, &PersonalizationWeights::default()).unwrap();
    // authored = 8 (one shared, not all shared), * 0.40
    assert!((scored.score - 3.2).abs() < 1e-9, "Expected 3.2, got {}", scored.score);
    assert_eq!(scored.interaction, 0.0);
    assert_eq!(scored.friends, 0.0);
}

#[test]
fn interaction_component_uses_its_own_weights() {
    let profile = InterestProfile {
        interacted: topics(&["rust", "wasm"]),
        ..Default::default()
    };
    let candidate = post(1, 2, &["rust", "wasm"]);
    let scored =
        personalized_score(&candidate, 1, &profile, &PersonalizationWeights::default()).unwrap();
    // 2 * 6 + 4 (all shared) + 1 * 2 (one extra) = 18, * 0.35 = 6.3
    assert!((scored.interaction - 18.0).abs() < 1e-9);
    assert!((scored.score - 6.3).abs() < 1e-9, "Expected 6.3, got {}", scored.score);
}

#[test]
fn personalized_score_is_never_negative() {
    let profiles = [
        InterestProfile::default(),
        InterestProfile {
            authored: topics(&["rust"]),
            interacted: topics(&["golang"]),
            friends: topics(&["cooking", "rust"]),
        },
    ];
    let candidates = [
        post(1, 2, &[]),
        post(2, 2, &["rust"]),
        post(3, 2, &["cooking", "golang", "rust", "zig"]),
        post(4, 2, &["music"]),
    ];
    let weights = PersonalizationWeights::default();
    for profile in &profiles {
        for candidate in &candidates {
            let scored = personalized_score(candidate, 1, profile, &weights).unwrap();
            assert!(scored.score >= 0.0, "Negative score for post {}", candidate.id);
        }
    }
}

#[test]
fn own_posts_and_reshares_are_never_scored() {
    let profile = InterestProfile {
        authored: topics(&["rust"]),
        interacted: topics(&["rust"]),
        friends: topics(&["rust"]),
    };
    let weights = PersonalizationWeights::default();

    assert!(personalized_score(&post(1, 1, &["rust"]), 1, &profile, &weights).is_none());

    let mut reshare = post(2, 3, &["rust"]);
    reshare.original_post_id = Some(1);
    assert!(personalized_score(&reshare, 1, &profile, &weights).is_none());
}

#[test]
fn overlap_with_empty_interests_is_zero() {
    let score = overlap_score(&topics(&["rust"]), &topics(&[]), &OverlapWeights::AUTHORED);
    assert_eq!(score, 0.0);
}

// ============================================================
// Trending score
// ============================================================

#[test]
fn trending_example_values() {
    assert_eq!(trending_score(&engaged(post(1, 2, &[]), 2, 0, 0)), 2.0);
    assert_eq!(trending_score(&engaged(post(1, 2, &[]), 2, 1, 0)), 4.0);
    assert_eq!(trending_score(&engaged(post(1, 2, &[]), 2, 1, 1)), 7.0);
}

#[test]
fn trending_is_monotonic_in_each_counter() {
    for base in 0..5u64 {
        for bump in 1..4u64 {
            let start = trending_score(&engaged(post(1, 2, &[]), base, base, base));
            assert!(trending_score(&engaged(post(1, 2, &[]), base + bump, base, base)) > start);
            assert!(trending_score(&engaged(post(1, 2, &[]), base, base + bump, base)) > start);
            assert!(trending_score(&engaged(post(1, 2, &[]), base, base, base + bump)) > start);
        }
    }
}

// ============================================================
// rank() — ordering and paging
// ============================================================

#[test]
fn rank_preserves_order_of_equal_scores() {
    // Scores [10, 7, 7, 3] in a shuffled input order
    let candidates = vec![
        engaged(post(1, 2, &[]), 7, 0, 0),
        engaged(post(2, 2, &[]), 3, 0, 0),
        engaged(post(3, 2, &[]), 10, 0, 0),
        engaged(post(4, 2, &[]), 7, 0, 0),
    ];
    let ranked = rank(
        candidates,
        1,
        RankingMode::Trending,
        &PersonalizationWeights::default(),
        10,
        0,
    );
    let order: Vec<i64> = ranked.iter().map(|s| s.post.id).collect();
    assert_eq!(order, vec![3, 1, 4, 2]);
}

#[test]
fn trending_pages_concatenate_to_unpaged_prefix() {
    let candidates: Vec<_> = (1..=9)
        .map(|id| engaged(post(id, 2, &[]), (id as u64 * 7) % 5, id as u64 % 2, 0))
        .collect();
    let weights = PersonalizationWeights::default();

    let unpaged = rank(candidates.clone(), 1, RankingMode::Trending, &weights, 100, 0);
    for k in 1..=4 {
        let mut paged = rank(candidates.clone(), 1, RankingMode::Trending, &weights, k, 0);
        paged.extend(rank(candidates.clone(), 1, RankingMode::Trending, &weights, k, k));
        let paged_ids: Vec<i64> = paged.iter().map(|s| s.post.id).collect();
        let prefix: Vec<i64> = unpaged.iter().take(2 * k).map(|s| s.post.id).collect();
        assert_eq!(paged_ids, prefix, "Paging mismatch for k={k}");
    }
}

#[test]
fn personalized_rank_respects_limit() {
    let profile = InterestProfile {
        authored: topics(&["rust"]),
        ..Default::default()
    };
    let candidates: Vec<_> = (1..=5).map(|id| post(id, 2, &["rust"])).collect();
    let ranked = rank(
        candidates,
        1,
        RankingMode::Personalized(&profile),
        &PersonalizationWeights::default(),
        2,
        0,
    );
    let order: Vec<i64> = ranked.iter().map(|s| s.post.id).collect();
    assert_eq!(order, vec![1, 2]);
}

#[test]
fn rank_with_offset_past_end_is_empty() {
    let candidates = vec![post(1, 2, &[]), post(2, 2, &[])];
    let ranked = rank(
        candidates,
        1,
        RankingMode::Trending,
        &PersonalizationWeights::default(),
        10,
        5,
    );
    assert!(ranked.is_empty());
}
