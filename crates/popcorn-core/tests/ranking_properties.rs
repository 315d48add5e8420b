use popcorn_core::{Catalog, Item, Recommender, SimilarityMatrix};

/// Deterministic pseudo-random symmetric matrix with a few gaps and ties.
fn engine(n: usize) -> Recommender {
    let catalog = Catalog::new(
        (0..n)
            .map(|i| Item::new(format!("Title {i}"), format!("id-{i}")))
            .collect(),
    );

    let mut rows = vec![vec![0.0f64; n]; n];
    let mut state: u64 = 0x9E37_79B9_7F4A_7C15;
    for i in 0..n {
        rows[i][i] = 1.0;
        for j in (i + 1)..n {
            state = state
                .wrapping_mul(6_364_136_223_846_793_005)
                .wrapping_add(1_442_695_040_888_963_407);
            let bucket = (state >> 33) % 20;
            let score = if bucket == 0 {
                f64::NAN
            } else {
                (bucket as f64) / 20.0
            };
            rows[i][j] = score;
            rows[j][i] = score;
        }
    }

    Recommender::new(catalog, SimilarityMatrix::from_rows(rows).unwrap()).unwrap()
}

#[test]
fn never_recommends_the_query_itself() {
    let engine = engine(25);
    for i in 0..25 {
        let title = format!("Title {i}");
        assert!(engine.recommend(&title, 24).iter().all(|r| r.index != i));
    }
}

#[test]
fn result_length_is_min_of_k_and_others() {
    let engine = engine(8);
    for k in 0..12 {
        assert_eq!(engine.recommend("Title 3", k).len(), k.min(7));
    }
}

#[test]
fn three_item_catalog_returns_at_most_two() {
    let engine = engine(3);
    assert_eq!(engine.recommend("Title 0", 5).len(), 2);
}

#[test]
fn ranking_covers_every_other_position_once() {
    let engine = engine(30);
    for i in 0..30 {
        let mut ranked = engine.ranking(i);
        assert_eq!(ranked.len(), 29);
        ranked.sort_unstable();
        let expected: Vec<usize> = (0..30).filter(|&j| j != i).collect();
        assert_eq!(ranked, expected);
    }
}

#[test]
fn non_finite_scores_follow_all_finite_ones() {
    let engine = engine(30);
    for i in 0..30 {
        let row = engine.matrix().row(i);
        let ranked = engine.ranking(i);
        let first_gap = ranked.iter().position(|&j| !row[j].is_finite());
        if let Some(first_gap) = first_gap {
            assert!(ranked[first_gap..].iter().all(|&j| !row[j].is_finite()));
        }
    }
}

#[test]
fn ranking_is_deterministic_and_case_insensitive() {
    let engine = engine(20);
    let first = engine.recommend("Title 7", 6);
    assert_eq!(first, engine.recommend("Title 7", 6));
    assert_eq!(first, engine.recommend("TITLE 7", 6));
    assert_eq!(first, engine.recommend("title 7", 6));
}

#[test]
fn unknown_titles_yield_nothing() {
    let engine = engine(5);
    assert!(engine.recommend("Title 99", 5).is_empty());
    assert!(engine.recommend("Title", 5).is_empty());
}

#[test]
fn top_k_agrees_with_ranking_prefix() {
    let engine = engine(40);
    for i in [0, 13, 39] {
        let full = engine.ranking(i);
        for k in [1, 5, 10, 39, 50] {
            let expected: Vec<usize> = full.iter().copied().take(k).collect();
            assert_eq!(engine.top_k(i, k), expected);
        }
    }
}

#[test]
fn non_finite_candidate_only_fills_leftover_slots() {
    let catalog = Catalog::new(vec![
        Item::new("Q", "q"),
        Item::new("Gap", "gap"),
        Item::new("Low", "low"),
        Item::new("High", "high"),
    ]);
    let matrix = SimilarityMatrix::from_rows(vec![
        vec![1.0, f64::NAN, 0.1, 0.8],
        vec![f64::NAN, 1.0, 0.0, 0.0],
        vec![0.1, 0.0, 1.0, 0.0],
        vec![0.8, 0.0, 0.0, 1.0],
    ])
    .unwrap();
    let engine = Recommender::new(catalog, matrix).unwrap();

    let titles = |k| {
        engine
            .recommend("q", k)
            .into_iter()
            .map(|r| r.title)
            .collect::<Vec<_>>()
    };
    assert_eq!(titles(2), vec!["High", "Low"]);
    assert_eq!(titles(3), vec!["High", "Low", "Gap"]);
}
