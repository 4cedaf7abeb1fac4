use cascade_core::config::EmbeddingConfig;
use cascade_core::traits::IEmbeddingProvider;
use cascade_embeddings::{cosine_similarity, hamming_distance, EmbeddingEngine, HashedProvider};
use proptest::prelude::*;

fn provider() -> HashedProvider {
    let config = EmbeddingConfig::default();
    HashedProvider::new(config.tier_dims(), config.bit_threshold).unwrap()
}

proptest! {
    #[test]
    fn generation_is_deterministic(s in ".{0,200}") {
        let p = provider();
        let a = p.embed(&s).unwrap();
        let b = p.embed(&s).unwrap();
        prop_assert_eq!(a, b);
    }

    #[test]
    fn engine_agrees_with_raw_provider(s in "[a-z ]{0,80}") {
        let engine = EmbeddingEngine::new(EmbeddingConfig::default()).unwrap();
        let cached_twice = {
            engine.embed(&s).unwrap();
            engine.embed(&s).unwrap()
        };
        prop_assert_eq!(cached_twice, provider().embed(&s).unwrap());
    }

    #[test]
    fn tiers_nest(s in ".{0,200}") {
        let b = provider().embed(&s).unwrap().bundle;
        prop_assert_eq!(&b.full[..256], b.medium.as_slice());
        prop_assert_eq!(&b.full[..128], b.small.as_slice());
    }

    #[test]
    fn token_arrays_are_parallel(s in ".{0,200}") {
        let t = provider().embed(&s).unwrap().tokens;
        prop_assert_eq!(t.tokens.len(), t.embeddings.len());
        prop_assert_eq!(t.tokens.len(), t.weights.len());
        prop_assert!(t.tokens.iter().all(|tok| !tok.is_empty()));
        prop_assert!(t.weights.iter().all(|&w| w >= 0.0));
    }

    #[test]
    fn hamming_is_symmetric(a in any::<u32>(), b in any::<u32>()) {
        prop_assert_eq!(hamming_distance(a, b), hamming_distance(b, a));
    }

    #[test]
    fn hamming_identity(a in any::<u64>()) {
        prop_assert_eq!(hamming_distance(a, a), 0);
    }

    #[test]
    fn hamming_triangle_inequality(a in any::<u32>(), b in any::<u32>(), c in any::<u32>()) {
        prop_assert!(hamming_distance(a, c) <= hamming_distance(a, b) + hamming_distance(b, c));
    }

    #[test]
    fn cosine_stays_in_bounds(
        a in prop::collection::vec(-100.0f32..100.0, 0..64),
        b in prop::collection::vec(-100.0f32..100.0, 0..64),
    ) {
        let sim = cosine_similarity(&a, &b);
        prop_assert!((-1.0..=1.0).contains(&sim));
    }

    #[test]
    fn cosine_self_is_one(v in prop::collection::vec(-100.0f32..100.0, 1..64)) {
        prop_assume!(v.iter().map(|x| x * x).sum::<f32>() > 1e-3);
        prop_assert!((cosine_similarity(&v, &v) - 1.0).abs() < 1e-4);
    }

    #[test]
    fn cosine_with_zero_is_zero(v in prop::collection::vec(-100.0f32..100.0, 0..64)) {
        let zeros = vec![0.0f32; v.len()];
        prop_assert_eq!(cosine_similarity(&zeros, &v), 0.0);
    }
}
