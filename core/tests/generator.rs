//! Series generator tests: memoization, window bounds, value shape.

use realty_core::{
    catalog::{DimensionSpec, SeriesKey, SeriesSpec},
    config::{DashConfig, GeneratorConfig},
    generator::{build_series, SeriesGenerator},
    rate_table::{RateBand, RateTable},
    rng::ZeroNoise,
    types::{Period, YearMonth},
};
use std::sync::Arc;

fn generator() -> SeriesGenerator {
    SeriesGenerator::new(&DashConfig::default_test())
}

#[test]
fn repeated_access_returns_the_same_series() {
    let gen = generator();

    let first = gen.house_price_index();
    let second = gen.house_price_index();

    assert!(Arc::ptr_eq(&first, &second), "Second access should hit the cache");
    assert_eq!(*first, *second);
}

#[test]
fn monthly_series_spans_exact_window() {
    let gen = generator();
    let points = gen.house_price_index();

    assert_eq!(points.len(), 26 * 12 + 1, "2000-01 through 2026-01 inclusive");
    assert_eq!(points.first().unwrap().period, Period::Month { year: 2000, month: 1 });
    assert_eq!(points.last().unwrap().period, Period::Month { year: 2026, month: 1 });

    let past_end = points
        .iter()
        .any(|p| p.period.first_month() > YearMonth::new(2026, 1));
    assert!(!past_end, "No point may fall after the configured end");
}

#[test]
fn quarterly_and_yearly_series_stop_at_partial_period() {
    let gen = generator();

    let gdp = gen.gdp();
    assert_eq!(gdp.len(), 26 * 4 + 1);
    assert_eq!(gdp.last().unwrap().period.to_string(), "2026-Q1");

    let regional = gen.regional_snapshot();
    assert_eq!(regional.len(), 27);
    assert_eq!(regional.first().unwrap().period.to_string(), "2000");
    assert_eq!(regional.last().unwrap().period.to_string(), "2026");
}

#[test]
fn every_value_is_positive_and_rounded_to_one_decimal() {
    let gen = generator();
    gen.generate_all();

    for key in SeriesKey::ALL {
        for point in gen.series(key).iter() {
            for (dim, v) in &point.values {
                assert!(*v > 0.0, "{key}.{dim} at {} is not positive: {v}", point.period);
                let scaled = v * 10.0;
                assert!(
                    (scaled - scaled.round()).abs() < 1e-6,
                    "{key}.{dim} at {} not rounded to 1dp: {v}",
                    point.period
                );
            }
        }
    }
}

#[test]
fn every_point_carries_every_dimension() {
    let gen = generator();
    let points = gen.house_price_index();
    for p in points.iter() {
        for dim in ["national", "seoul", "gangnam", "gyeonggi", "busan"] {
            assert!(p.value(dim).is_some(), "{dim} missing at {}", p.period);
        }
    }
}

#[test]
fn clear_cache_forces_regeneration_with_new_noise() {
    let gen = generator();
    let before = gen.house_price_index();

    gen.clear_cache();
    assert!(gen.cached_keys().is_empty());
    assert_eq!(gen.epoch(), 1);

    let after = gen.house_price_index();
    assert!(!Arc::ptr_eq(&before, &after), "Cleared cache must not return the old Arc");
    assert_eq!(before.len(), after.len());

    let any_different = before.iter().zip(after.iter()).any(|(a, b)| a.values != b.values);
    assert!(any_different, "Regenerated series should re-roll noise");
}

#[test]
fn cached_keys_tracks_accessed_series() {
    let gen = generator();
    assert!(gen.cached_keys().is_empty());

    gen.interest_rates();
    gen.gdp();
    assert_eq!(gen.cached_keys(), vec![SeriesKey::InterestRate, SeriesKey::Gdp]);

    gen.generate_all();
    assert_eq!(gen.cached_keys().len(), SeriesKey::ALL.len());
}

#[test]
fn zero_noise_follows_rate_table_exactly() {
    // 12% a year spread monthly: ×1.01 each month.
    let spec = SeriesSpec {
        key: SeriesKey::HousePriceIndex,
        dimensions: vec![DimensionSpec {
            name: "flat",
            base: 100.0,
            noise_scale: 1.0,
            table: RateTable::new(vec![], 0.12),
        }],
    };
    let config = GeneratorConfig {
        start: YearMonth::new(2020, 1),
        end: YearMonth::new(2021, 1),
        ..GeneratorConfig::default()
    };

    let points = build_series(&spec, &config, &mut ZeroNoise);

    assert_eq!(points.len(), 13);
    assert_eq!(points[0].value("flat"), Some(100.0), "First period holds the base value");
    assert_eq!(points[12].value("flat"), Some(112.7));
}

#[test]
fn half_year_band_switches_direction_mid_year() {
    let spec = SeriesSpec {
        key: SeriesKey::HousePriceIndex,
        dimensions: vec![DimensionSpec {
            name: "idx",
            base: 100.0,
            noise_scale: 1.0,
            table: RateTable::new(
                vec![
                    RateBand::half(2008, realty_core::types::Half::H1, 0.12),
                    RateBand::half(2008, realty_core::types::Half::H2, -0.12),
                ],
                0.0,
            ),
        }],
    };
    let config = GeneratorConfig {
        start: YearMonth::new(2008, 1),
        end: YearMonth::new(2008, 12),
        ..GeneratorConfig::default()
    };

    let points = build_series(&spec, &config, &mut ZeroNoise);
    let june = points[5].value("idx").unwrap();
    let december = points[11].value("idx").unwrap();

    assert!(june > 100.0, "H1 should rise, got {june}");
    assert!(december < june, "H2 should fall from {june}, got {december}");
}

#[test]
fn rate_override_replaces_builtin_table() {
    let mut config = DashConfig::default_test();
    config.generator.noise_band = 0.0;
    config
        .rate_overrides
        .insert("house_price_index.national".into(), RateTable::new(vec![], 0.0));

    let gen = SeriesGenerator::new(&config);
    let points = gen.house_price_index();

    assert!(
        points.iter().all(|p| p.value("national") == Some(45.0)),
        "Flat override with no noise should hold the base value"
    );
    assert!(
        points.last().unwrap().value("seoul") != Some(38.0),
        "Dimensions without an override keep their built-in growth"
    );
}

#[test]
fn shared_generator_hands_every_thread_the_same_series() {
    let gen = generator();
    let reference = gen.money_supply();

    std::thread::scope(|s| {
        let handles: Vec<_> = (0..4).map(|_| s.spawn(|| gen.money_supply())).collect();
        for h in handles {
            let series = h.join().expect("thread panicked");
            assert!(Arc::ptr_eq(&reference, &series));
        }
    });
}
