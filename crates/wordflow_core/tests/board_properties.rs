use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use wordflow_core::board::{
    duration_sec, font_size_rem, frequency, normalize_weight, MAX_COPIES_PER_WORD,
};
use wordflow_core::{lane_count, layout, LayoutParams, SpeedRange, WordEntry};

#[test]
fn lightest_word_scenario() {
    assert_eq!(frequency(1.0, 1.0), 1);
    assert_eq!(font_size_rem(1.0), 1.5);
    assert_eq!(duration_sec(1.0, SpeedRange::default()), 17.5);
}

#[test]
fn heaviest_word_scenario() {
    assert_eq!(frequency(999.0, 1.0), 6);
    assert_eq!(font_size_rem(999.0), 4.5);
    assert_eq!(duration_sec(999.0, SpeedRange::default()), 28.0);
}

#[test]
fn lane_count_examples() {
    assert_eq!(lane_count(360.0), 3);
    assert_eq!(lane_count(0.0), 8);
    assert_eq!(lane_count(2000.0), 14);
}

fn entries() -> impl Strategy<Value = Vec<WordEntry>> {
    prop::collection::vec((1i64..=999, "[a-z]{1,6}"), 0..12).prop_map(|raw| {
        raw.into_iter()
            .enumerate()
            .map(|(index, (weight, text))| WordEntry::new(index.to_string(), text, weight as f64))
            .collect()
    })
}

proptest! {
    #[test]
    fn norm_is_bounded_and_monotonic(w in 1i64..999) {
        let here = normalize_weight(w as f64);
        let next = normalize_weight((w + 1) as f64);
        prop_assert!((0.0..=1.0).contains(&here));
        prop_assert!(here <= next);
    }

    #[test]
    fn frequency_is_at_least_one(w in 1i64..=999, density in 0.0f64..10.0) {
        prop_assert!(frequency(w as f64, density) >= 1);
    }

    #[test]
    fn frequency_never_exceeds_copy_cap(w in 1i64..=999, density in 0.0f64..1e300) {
        let copies = frequency(w as f64, density);
        prop_assert!((1..=MAX_COPIES_PER_WORD).contains(&copies));
    }

    #[test]
    fn layout_length_matches_total_frequency(
        words in entries(),
        density in 0.0f64..3.0,
        seed in any::<u64>(),
    ) {
        let expected: usize = words.iter().map(|w| frequency(w.weight, density)).sum();
        let params = LayoutParams { density, ..LayoutParams::default() };
        let items = layout(&words, &params, &mut ChaCha8Rng::seed_from_u64(seed));
        prop_assert_eq!(items.len(), expected);
    }

    #[test]
    fn layout_is_a_permutation_of_replicated_texts(
        words in entries(),
        seed in any::<u64>(),
    ) {
        let params = LayoutParams::default();
        let mut expected: Vec<String> = words
            .iter()
            .flat_map(|w| std::iter::repeat(w.text.clone()).take(frequency(w.weight, 1.0)))
            .collect();
        let mut actual: Vec<String> = layout(&words, &params, &mut ChaCha8Rng::seed_from_u64(seed))
            .into_iter()
            .map(|item| item.text)
            .collect();
        expected.sort();
        actual.sort();
        prop_assert_eq!(actual, expected);
    }

    #[test]
    fn lane_count_stays_in_bounds(height in 0.0f64..10_000.0) {
        let lanes = lane_count(height);
        prop_assert!((3..=14).contains(&lanes));
    }
}
