//! Property-based invariants over randomly constructed tickers.
//!
//! Tickers are built to be satisfiable: a pattern and week are drawn from
//! the unconstrained prediction, and observed prices are sampled inside
//! that week's brackets. The constrained prediction must then succeed and
//! uphold the engine's probability and bounds invariants.

use proptest::prelude::*;
use sm_core::{predict, Pattern, PricePeriod, PriceTicker};

fn previous_pattern_strategy() -> impl Strategy<Value = Pattern> {
    prop_oneof![
        Just(Pattern::Fluctuating),
        Just(Pattern::BigSpike),
        Just(Pattern::Decreasing),
        Just(Pattern::SmallSpike),
        Just(Pattern::Unknown),
    ]
}

fn game_pattern_strategy() -> impl Strategy<Value = Pattern> {
    prop_oneof![
        Just(Pattern::Fluctuating),
        Just(Pattern::BigSpike),
        Just(Pattern::Decreasing),
        Just(Pattern::SmallSpike),
    ]
}

/// Builds a ticker whose first `observed_count` prices are drawn from one
/// candidate week of `source_pattern`, so the prediction cannot error.
fn satisfiable_ticker(
    purchase: i32,
    previous: Pattern,
    source_pattern: Pattern,
    week_index: usize,
    observed_count: usize,
    price_fraction: f64,
) -> PriceTicker {
    let unconstrained = predict(&PriceTicker::new(
        purchase,
        previous,
        PricePeriod::new(0).expect("period 0"),
    ))
    .expect("unconstrained prediction always succeeds");

    let source = unconstrained
        .patterns()
        .get(source_pattern)
        .expect("game pattern present");
    let weeks = source.weeks();
    let week = &weeks[week_index % weeks.len()];

    let current = PricePeriod::new(observed_count.saturating_sub(1))
        .expect("observed count within week");
    let mut ticker = PriceTicker::new(purchase, previous, current);
    for potential in week.periods().iter().take(observed_count) {
        let min = potential.prices().min_price();
        let max = potential.prices().max_price();
        let span = f64::from(max - min);
        let price = min + (span * price_fraction).floor() as i32;
        ticker.set_price(potential.period(), price.clamp(min, max));
    }
    ticker
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn constrained_predictions_uphold_invariants(
        purchase in prop_oneof![Just(0), 90..=110i32],
        previous in previous_pattern_strategy(),
        source_pattern in game_pattern_strategy(),
        week_index in 0usize..56,
        observed_count in 1usize..=6,
        price_fraction in 0.0f64..1.0,
    ) {
        let ticker = satisfiable_ticker(
            purchase,
            previous,
            source_pattern,
            week_index,
            observed_count,
            price_fraction,
        );

        let prediction = predict(&ticker)
            .expect("prices sampled from a candidate week are possible");

        // The source pattern must have survived its own prices.
        let source = prediction.patterns().get(source_pattern).unwrap();
        prop_assert!(!source.weeks().is_empty());

        // Pattern chances are a distribution.
        let total: f64 = prediction.patterns().iter().map(|p| p.chance()).sum();
        prop_assert!((total - 1.0).abs() <= 5e-4, "chance sum {total}");

        for pattern in prediction.patterns() {
            prop_assert!(pattern.chance() >= 0.0);

            let week_total: f64 = pattern.weeks().iter().map(|w| w.chance()).sum();
            let tolerance = 5e-4 + 5e-5 * pattern.weeks().len() as f64;
            prop_assert!(
                (week_total - pattern.chance()).abs() <= tolerance,
                "{}: weeks {week_total} vs pattern {}",
                pattern.pattern(),
                pattern.chance()
            );

            for week in pattern.weeks() {
                prop_assert_eq!(week.periods().len(), 12);
                prop_assert!(week.chance() >= 0.0);

                for potential in week.periods() {
                    let prices = potential.prices();
                    prop_assert_eq!(prices.guaranteed_price(), prices.min_price());
                    prop_assert!(prices.min_price() <= prices.max_price());
                    prop_assert!((0.0..=1.0).contains(&prices.min_chance()));
                    prop_assert!((0.0..=1.0).contains(&prices.max_chance()));
                    prop_assert!(prices.mid_chance() >= 0.0);

                    let observed = ticker.price(potential.period());
                    if observed != 0 {
                        prop_assert!(
                            observed >= prices.min_price() && observed <= prices.max_price(),
                            "observed {} outside [{}, {}]",
                            observed,
                            prices.min_price(),
                            prices.max_price()
                        );
                    }
                }

                // The week's aggregate bounds contain every period bracket.
                let week_prices = week.prices();
                prop_assert!(week_prices.min_price() <= week_prices.guaranteed_price());
                prop_assert!(week_prices.guaranteed_price() <= week_prices.max_price());
            }
        }

        // Spike breakdown identities.
        let spikes = prediction.spikes();
        let mut big_total = 0.0;
        let mut small_total = 0.0;
        for index in 0..12 {
            let big = spikes.big().breakdown()[index];
            let small = spikes.small().breakdown()[index];
            let any = spikes.any().breakdown()[index];
            prop_assert!((big + small - any).abs() <= 5e-4, "period {index}");
            big_total += big;
            small_total += small;
        }

        let big_weeks = prediction
            .patterns()
            .get(Pattern::BigSpike)
            .map_or(0, |p| p.weeks().len());
        let small_weeks = prediction
            .patterns()
            .get(Pattern::SmallSpike)
            .map_or(0, |p| p.weeks().len());
        prop_assert!(
            (big_total - spikes.big().chance()).abs() <= 5e-4 + 5e-5 * big_weeks as f64
        );
        prop_assert!(
            (small_total - 3.0 * spikes.small().chance()).abs()
                <= 5e-4 + 1.5e-4 * small_weeks as f64
        );

        // The spike chances are the pattern chances, verbatim.
        let big_pattern = prediction.patterns().get(Pattern::BigSpike).unwrap();
        let small_pattern = prediction.patterns().get(Pattern::SmallSpike).unwrap();
        prop_assert_eq!(spikes.big().chance(), big_pattern.chance());
        prop_assert_eq!(spikes.small().chance(), small_pattern.chance());
        prop_assert_eq!(
            spikes.any().chance(),
            big_pattern.chance() + small_pattern.chance()
        );
    }
}
