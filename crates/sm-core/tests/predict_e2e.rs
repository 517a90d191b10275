//! End-to-end prediction scenarios with known-good expectations.
//!
//! Each scenario builds a ticker, predicts, and checks the per-pattern
//! chances, week counts, price ranges and spike windows, plus the
//! cross-cutting invariants every prediction must satisfy.

use sm_core::{predict, Error, Pattern, PricePeriod, PriceTicker, Prediction};

fn period(index: usize) -> PricePeriod {
    PricePeriod::new(index).expect("test period in range")
}

fn ticker_with_prices(purchase: i32, previous: Pattern, prices: &[i32]) -> PriceTicker {
    let current = period(prices.len().saturating_sub(1));
    let mut ticker = PriceTicker::new(purchase, previous, current);
    for (index, price) in prices.iter().enumerate() {
        ticker.set_price(period(index), *price);
    }
    ticker
}

struct ExpectedPattern {
    pattern: Pattern,
    chance: f64,
    weeks: usize,
    guaranteed: i32,
    max: i32,
}

fn assert_pattern(prediction: &Prediction, expected: &ExpectedPattern) {
    let potential = prediction
        .patterns()
        .get(expected.pattern)
        .expect("pattern always present");

    assert_eq!(
        potential.weeks().len(),
        expected.weeks,
        "{} week count",
        expected.pattern
    );
    assert!(
        (potential.chance() - expected.chance).abs() < 1e-9,
        "{} chance: expected {}, got {}",
        expected.pattern,
        expected.chance,
        potential.chance()
    );
    assert_eq!(
        potential.prices().guaranteed_price(),
        expected.guaranteed,
        "{} guaranteed price",
        expected.pattern
    );
    assert_eq!(
        potential.prices().max_price(),
        expected.max,
        "{} max price",
        expected.pattern
    );
}

/// Invariants that hold for every successful prediction.
fn assert_invariants(ticker: &PriceTicker, prediction: &Prediction) {
    let chance_total: f64 = prediction.patterns().iter().map(|p| p.chance()).sum();
    assert!(
        (chance_total - 1.0).abs() <= 5e-4,
        "pattern chances sum to {chance_total}"
    );

    for pattern in prediction.patterns() {
        // Each week's chance is rounded to four places, so the sum drifts
        // from the pattern chance by up to half a unit per week.
        let tolerance = 5e-4 + 5e-5 * pattern.weeks().len() as f64;
        let week_total: f64 = pattern.weeks().iter().map(|w| w.chance()).sum();
        assert!(
            (week_total - pattern.chance()).abs() <= tolerance,
            "{}: weeks sum {week_total}, pattern {}",
            pattern.pattern(),
            pattern.chance()
        );

        for week in pattern.weeks() {
            assert_eq!(week.periods().len(), 12);
            for potential in week.periods() {
                let observed = ticker.price(potential.period());
                if observed != 0 {
                    assert!(
                        observed >= potential.prices().min_price()
                            && observed <= potential.prices().max_price(),
                        "{}: observed {observed} outside [{}, {}] at {}",
                        pattern.pattern(),
                        potential.prices().min_price(),
                        potential.prices().max_price(),
                        potential.period()
                    );
                }
                // Period-level guaranteed price is the bracket minimum.
                assert_eq!(
                    potential.prices().guaranteed_price(),
                    potential.prices().min_price()
                );
            }
        }
    }

    let spikes = prediction.spikes();
    let mut big_total = 0.0;
    let mut small_total = 0.0;
    for index in 0..12 {
        let big = spikes.big().breakdown()[index];
        let small = spikes.small().breakdown()[index];
        let any = spikes.any().breakdown()[index];
        assert!(
            (big + small - any).abs() <= 5e-4,
            "breakdown mismatch at period {index}"
        );
        big_total += big;
        small_total += small;
    }

    let big_chance = spikes.big().chance();
    let small_chance = spikes.small().chance();
    let big_weeks = prediction
        .patterns()
        .get(Pattern::BigSpike)
        .map_or(0, |p| p.weeks().len());
    let small_weeks = prediction
        .patterns()
        .get(Pattern::SmallSpike)
        .map_or(0, |p| p.weeks().len());
    assert!(
        (big_total - big_chance).abs() <= 5e-4 + 5e-5 * big_weeks as f64,
        "big breakdown sums to {big_total}, chance {big_chance}"
    );
    // The small spike plateau spans three periods, so its breakdown
    // triple-counts the pattern chance.
    assert!(
        (small_total - 3.0 * small_chance).abs() <= 5e-4 + 1.5e-4 * small_weeks as f64,
        "small breakdown sums to {small_total}, chance {small_chance}"
    );
    assert!(
        (spikes.any().chance() - (big_chance + small_chance)).abs() <= 1e-12,
        "any chance is big + small"
    );
}

#[test]
fn unknown_previous_no_observations() {
    let ticker = ticker_with_prices(100, Pattern::Unknown, &[]);
    let prediction = predict(&ticker).expect("empty ticker is always possible");

    assert_pattern(
        &prediction,
        &ExpectedPattern {
            pattern: Pattern::Fluctuating,
            chance: 0.35,
            weeks: 56,
            guaranteed: 90,
            max: 140,
        },
    );
    assert_pattern(
        &prediction,
        &ExpectedPattern {
            pattern: Pattern::BigSpike,
            chance: 0.2625,
            weeks: 7,
            guaranteed: 200,
            max: 600,
        },
    );
    assert_pattern(
        &prediction,
        &ExpectedPattern {
            pattern: Pattern::Decreasing,
            chance: 0.1375,
            weeks: 1,
            guaranteed: 85,
            max: 90,
        },
    );
    assert_pattern(
        &prediction,
        &ExpectedPattern {
            pattern: Pattern::SmallSpike,
            chance: 0.25,
            weeks: 8,
            guaranteed: 140,
            max: 200,
        },
    );

    // Spike windows.
    let big_spike = prediction.patterns().get(Pattern::BigSpike).unwrap();
    assert_eq!(big_spike.spikes().big().start(), period(3));
    assert_eq!(big_spike.spikes().big().end(), period(9));
    let small_spike = prediction.patterns().get(Pattern::SmallSpike).unwrap();
    assert_eq!(small_spike.spikes().small().start(), period(2));
    assert_eq!(small_spike.spikes().small().end(), period(11));

    // Prediction-level summary.
    assert_eq!(prediction.guaranteed_price(), 85);
    assert_eq!(prediction.max_price(), 600);
    assert_eq!(prediction.guaranteed_periods(), vec![period(0)]);
    assert_eq!(
        prediction.max_periods(),
        (3..=9).map(period).collect::<Vec<_>>()
    );
    assert_eq!(prediction.spikes().any().start(), period(2));
    assert_eq!(prediction.spikes().any().end(), period(11));

    assert_eq!(prediction.heat(), 200);

    assert_invariants(&ticker, &prediction);
}

#[test]
fn early_surge_pins_big_spike() {
    let ticker = ticker_with_prices(100, Pattern::Unknown, &[86, 90, 160]);
    let prediction = predict(&ticker).expect("surge chain is possible");

    assert_pattern(
        &prediction,
        &ExpectedPattern {
            pattern: Pattern::BigSpike,
            chance: 1.0,
            weeks: 1,
            guaranteed: 200,
            max: 600,
        },
    );
    for pattern in [Pattern::Fluctuating, Pattern::Decreasing, Pattern::SmallSpike] {
        let potential = prediction.patterns().get(pattern).unwrap();
        assert!(potential.weeks().is_empty(), "{pattern} should be ruled out");
        assert_eq!(potential.chance(), 0.0);
    }

    // The spike lands on Tuesday PM exactly.
    let spikes = prediction.spikes();
    assert!(spikes.big().has());
    assert_eq!(spikes.big().start(), period(3));
    assert_eq!(spikes.big().end(), period(3));
    assert!(!spikes.small().has());
    assert!((spikes.big().breakdown()[3] - 1.0).abs() < 1e-12);

    assert_eq!(prediction.heat(), 480);

    assert_invariants(&ticker, &prediction);
}

#[test]
fn sustained_high_prices_pin_fluctuating() {
    let ticker = ticker_with_prices(
        100,
        Pattern::Decreasing,
        &[140, 140, 140, 140, 140, 140],
    );
    let prediction = predict(&ticker).expect("high plateau fits fluctuating");

    assert_pattern(
        &prediction,
        &ExpectedPattern {
            pattern: Pattern::Fluctuating,
            chance: 1.0,
            weeks: 2,
            guaranteed: 90,
            max: 140,
        },
    );
    assert_eq!(prediction.patterns().viable_count(), 1);
    assert!(!prediction.spikes().any().has());

    assert_eq!(prediction.heat(), 140);

    assert_invariants(&ticker, &prediction);
}

#[test]
fn steady_decline_pins_decreasing() {
    let ticker = ticker_with_prices(
        100,
        Pattern::Decreasing,
        &[86, 82, 78, 74, 70, 66, 62, 58],
    );
    let prediction = predict(&ticker).expect("decline fits decreasing");

    assert_pattern(
        &prediction,
        &ExpectedPattern {
            pattern: Pattern::Decreasing,
            chance: 1.0,
            weeks: 1,
            guaranteed: 85,
            max: 90,
        },
    );
    assert_eq!(prediction.patterns().viable_count(), 1);
    assert_eq!(prediction.guaranteed_periods(), vec![period(0)]);
    assert_eq!(prediction.max_periods(), vec![period(0)]);

    assert_eq!(prediction.heat(), 58);

    assert_invariants(&ticker, &prediction);
}

#[test]
fn shoulder_peak_pins_small_spike() {
    let ticker = ticker_with_prices(100, Pattern::SmallSpike, &[120, 120, 199]);
    let prediction = predict(&ticker).expect("bump fits small spike");

    assert_pattern(
        &prediction,
        &ExpectedPattern {
            pattern: Pattern::SmallSpike,
            chance: 1.0,
            weeks: 1,
            guaranteed: 140,
            max: 200,
        },
    );

    let spikes = prediction.spikes();
    assert!(spikes.small().has());
    assert_eq!(spikes.small().start(), period(2));
    assert_eq!(spikes.small().end(), period(4));
    assert!(!spikes.big().has());

    assert_eq!(prediction.heat(), 359);

    assert_invariants(&ticker, &prediction);
}

#[test]
fn unknown_purchase_price_spans_both_bounds() {
    let ticker = ticker_with_prices(0, Pattern::Unknown, &[]);
    let prediction = predict(&ticker).expect("empty ticker is always possible");

    assert_pattern(
        &prediction,
        &ExpectedPattern {
            pattern: Pattern::Fluctuating,
            chance: 0.35,
            weeks: 56,
            guaranteed: 81,
            max: 154,
        },
    );
    assert_pattern(
        &prediction,
        &ExpectedPattern {
            pattern: Pattern::BigSpike,
            chance: 0.2625,
            weeks: 7,
            guaranteed: 180,
            max: 660,
        },
    );
    assert_pattern(
        &prediction,
        &ExpectedPattern {
            pattern: Pattern::Decreasing,
            chance: 0.1375,
            weeks: 1,
            guaranteed: 77,
            max: 99,
        },
    );
    assert_pattern(
        &prediction,
        &ExpectedPattern {
            pattern: Pattern::SmallSpike,
            chance: 0.25,
            weeks: 8,
            guaranteed: 126,
            max: 220,
        },
    );

    assert_eq!(prediction.guaranteed_price(), 77);
    assert_eq!(prediction.max_price(), 660);
    assert_eq!(prediction.guaranteed_periods(), vec![period(0)]);
    assert_eq!(
        prediction.max_periods(),
        (3..=9).map(period).collect::<Vec<_>>()
    );

    assert_eq!(prediction.heat(), 207);

    assert_invariants(&ticker, &prediction);
}

#[test]
fn impossible_prices_are_rejected() {
    let ticker = ticker_with_prices(0, Pattern::Unknown, &[10]);
    assert_eq!(predict(&ticker), Err(Error::ImpossibleTickerPrices));
}

#[test]
fn lower_bound_chain_survives_width_underflow() {
    let ticker = ticker_with_prices(
        100,
        Pattern::SmallSpike,
        &[85, 80, 75, 70, 65, 60, 55, 50, 45, 40, 35, 30],
    );
    let prediction = predict(&ticker).expect("the exact lower-bound chain is possible");

    let decreasing = prediction.patterns().get(Pattern::Decreasing).unwrap();
    assert_eq!(decreasing.weeks().len(), 1);
    assert!((decreasing.chance() - 1.0).abs() < 1e-9);
    assert_eq!(prediction.patterns().viable_count(), 1);

    let chance_total: f64 = prediction.patterns().iter().map(|p| p.chance()).sum();
    assert!((chance_total - 1.0).abs() <= 5e-4);

    assert_eq!(prediction.heat(), 30);
}

#[test]
fn upper_bound_chain_pins_decreasing() {
    let ticker = ticker_with_prices(
        100,
        Pattern::SmallSpike,
        &[90, 87, 84, 81, 78, 75, 72, 69, 66, 63, 60, 57],
    );
    let prediction = predict(&ticker).expect("the exact upper-bound chain is possible");

    let decreasing = prediction.patterns().get(Pattern::Decreasing).unwrap();
    assert_eq!(decreasing.weeks().len(), 1);
    assert!((decreasing.chance() - 1.0).abs() < 1e-9);
    assert_eq!(prediction.patterns().viable_count(), 1);
}

#[test]
fn partial_decline_leaves_three_patterns_open() {
    let ticker = ticker_with_prices(100, Pattern::Decreasing, &[86, 82]);
    let prediction = predict(&ticker).expect("86, 82 fits several patterns");

    let fluctuating = prediction.patterns().get(Pattern::Fluctuating).unwrap();
    assert!(fluctuating.weeks().is_empty());
    assert_eq!(fluctuating.chance(), 0.0);

    let big_spike = prediction.patterns().get(Pattern::BigSpike).unwrap();
    let decreasing = prediction.patterns().get(Pattern::Decreasing).unwrap();
    let small_spike = prediction.patterns().get(Pattern::SmallSpike).unwrap();

    assert_eq!(big_spike.weeks().len(), 6);
    assert_eq!(decreasing.weeks().len(), 1);
    assert_eq!(small_spike.weeks().len(), 6);

    // After a Decreasing week, a Big Spike explains an 86-82 opening best.
    assert!(big_spike.chance() > small_spike.chance());
    assert!(small_spike.chance() > decreasing.chance());
    assert!(decreasing.chance() > 0.0);

    // The surge can no longer start before Wednesday AM.
    assert_eq!(big_spike.spikes().big().start(), period(4));
    assert_eq!(big_spike.spikes().big().end(), period(9));

    assert_invariants(&ticker, &prediction);
}

#[test]
fn predictions_serialize_to_json() {
    let ticker = ticker_with_prices(100, Pattern::Unknown, &[86, 90, 160]);
    let prediction = predict(&ticker).unwrap();

    let json = serde_json::to_value(&prediction).expect("prediction serializes");
    assert_eq!(json["heat"], 480);
    assert!(json["patterns"].is_array());
    assert_eq!(json["patterns"][1]["pattern"], "big_spike");
    assert_eq!(json["spikes"]["big"]["chance"], 1.0);
}
