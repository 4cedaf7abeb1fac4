use cascade_core::config::CascadeConfig;
use cascade_core::models::{ScoreBreakdown, ScoreWeights};
use proptest::prelude::*;

proptest! {
    #[test]
    fn config_survives_toml_round_trip(
        m in 1usize..64,
        ef in 1usize..512,
        prefilter in 0usize..2000,
        li in 0.0f32..1.0,
        seed in proptest::option::of(0u64..1_000_000),
    ) {
        let mut config = CascadeConfig::default();
        config.index.m = m;
        config.index.ef_construction = ef;
        config.index.seed = seed;
        config.retrieval.prefilter_limit = prefilter;
        config.retrieval.late_interaction_weight = li;

        let parsed = CascadeConfig::from_toml(&config.to_toml().unwrap()).unwrap();
        prop_assert_eq!(parsed.index.m, m);
        prop_assert_eq!(parsed.index.ef_construction, ef);
        prop_assert_eq!(parsed.index.seed, seed);
        prop_assert_eq!(parsed.retrieval.prefilter_limit, prefilter);
        prop_assert_eq!(parsed.retrieval.late_interaction_weight, li);
    }

    #[test]
    fn combined_score_is_monotonic_in_each_signal(
        li in 0.0f32..1.0,
        cos in 0.0f32..1.0,
        bump in 0.0f32..0.5,
    ) {
        let weights = ScoreWeights::default();
        let base = ScoreBreakdown { binary: 0, late_interaction: li, final_cosine: cos };
        let more_li = ScoreBreakdown { late_interaction: li + bump, ..base };
        let more_cos = ScoreBreakdown { final_cosine: cos + bump, ..base };
        prop_assert!(more_li.combined(&weights) >= base.combined(&weights));
        prop_assert!(more_cos.combined(&weights) >= base.combined(&weights));
    }
}
