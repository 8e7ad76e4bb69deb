//! Unit tests for the sentiment engine - classification and aggregation.

#[cfg(test)]
mod engine_tests {
    use std::collections::HashMap;

    use crate::engine::*;
    use crate::models::*;

    fn snapshot(categories: Vec<CategoryRecord>) -> Snapshot {
        Snapshot {
            date: "16/10/2026".to_string(),
            categories,
        }
    }

    fn category(name: &str, future: i64, calls: i64, puts: i64) -> CategoryRecord {
        CategoryRecord::new(
            name,
            vec![
                InstrumentRecord::new("Future", future),
                InstrumentRecord::new("CE", calls),
                InstrumentRecord::new("PE", puts),
            ],
        )
    }

    fn sample_day() -> Snapshot {
        snapshot(vec![
            category("FII", -8384, -14952, 4664),
            category("PRO", 4380, -37748, 67757),
            category("DII", 366, 0, 0),
            category("RETAIL", 3638, 52701, -72421),
        ])
    }

    // ============= Activity Tests =============

    #[test]
    fn test_activity_future() {
        assert_eq!(classify_activity(&InstrumentKind::Future, 10), Activity::BoughtFutures);
        assert_eq!(classify_activity(&InstrumentKind::Future, -10), Activity::SoldFutures);
        assert_eq!(classify_activity(&InstrumentKind::Future, 0), Activity::NoChange);
    }

    #[test]
    fn test_activity_calls() {
        assert_eq!(classify_activity(&InstrumentKind::Call, 1), Activity::BoughtCalls);
        assert_eq!(classify_activity(&InstrumentKind::Call, -1), Activity::SoldCalls);
        assert_eq!(classify_activity(&InstrumentKind::Call, 0), Activity::NoChange);
    }

    #[test]
    fn test_activity_puts() {
        assert_eq!(classify_activity(&InstrumentKind::Put, 67757), Activity::BoughtPuts);
        assert_eq!(classify_activity(&InstrumentKind::Put, -72421), Activity::SoldPuts);
        assert_eq!(classify_activity(&InstrumentKind::Put, 0), Activity::NoChange);
    }

    #[test]
    fn test_activity_unknown_kind() {
        let kind = InstrumentKind::from("XX");
        assert_eq!(classify_activity(&kind, 500), Activity::Unknown);
        assert_eq!(classify_activity(&kind, 0), Activity::Unknown);
    }

    #[test]
    fn test_activity_extreme_values() {
        assert_eq!(classify_activity(&InstrumentKind::Future, i64::MIN), Activity::SoldFutures);
        assert_eq!(classify_activity(&InstrumentKind::Future, i64::MAX), Activity::BoughtFutures);
    }

    // ============= Trend Tests =============

    #[test]
    fn test_trend_bearish_labels() {
        assert_eq!(classify_trend(Activity::SoldFutures), Trend::Bearish);
        assert_eq!(classify_trend(Activity::SoldCalls), Trend::Bearish);
        assert_eq!(classify_trend(Activity::BoughtPuts), Trend::Bearish);
    }

    #[test]
    fn test_trend_bullish_labels() {
        assert_eq!(classify_trend(Activity::BoughtFutures), Trend::Bullish);
        assert_eq!(classify_trend(Activity::BoughtCalls), Trend::Bullish);
        assert_eq!(classify_trend(Activity::SoldPuts), Trend::Bullish);
    }

    #[test]
    fn test_trend_neutral_labels() {
        assert_eq!(classify_trend(Activity::NoChange), Trend::Neutral);
        assert_eq!(classify_trend(Activity::Unknown), Trend::Neutral);
    }

    // ============= WeightTable Tests =============

    #[test]
    fn test_default_weights() {
        let table = WeightTable::default();
        assert_eq!(table.weight(&ParticipantCategory::Fii), 3.0);
        assert_eq!(table.weight(&ParticipantCategory::Pro), 2.0);
        assert_eq!(table.weight(&ParticipantCategory::Retail), 1.0);
        assert_eq!(table.weight(&ParticipantCategory::Dii), 0.3);
    }

    #[test]
    fn test_unknown_category_uses_default_weight() {
        let table = WeightTable::default();
        assert_eq!(table.weight(&ParticipantCategory::from("HNI")), 1.0);
    }

    #[test]
    fn test_weight_overrides() {
        let overrides = HashMap::from([(ParticipantCategory::Dii, 1.5)]);
        let table = WeightTable::default()
            .with_overrides(&overrides)
            .with_default_weight(0.5);

        assert_eq!(table.weight(&ParticipantCategory::Dii), 1.5);
        assert_eq!(table.weight(&ParticipantCategory::Fii), 3.0);
        assert_eq!(table.weight(&ParticipantCategory::from("HNI")), 0.5);
    }

    // ============= SentimentScore Tests =============

    #[test]
    fn test_score_neutral_contributes_nothing() {
        let mut score = SentimentScore::default();
        score.add(Trend::Neutral, 1_000.0);
        assert_eq!(score.total(), 0.0);
        assert_eq!(score.verdict(5.0), OverallTrend::Neutral);
    }

    #[test]
    fn test_score_dead_zone_boundary() {
        assert_eq!(SentimentScore::new(52.0, 48.0).verdict(5.0), OverallTrend::Neutral);
        assert_eq!(SentimentScore::new(53.0, 47.0).verdict(5.0), OverallTrend::Bearish);
        assert_eq!(SentimentScore::new(47.0, 53.0).verdict(5.0), OverallTrend::Bullish);
    }

    #[test]
    fn test_score_exact_threshold_is_not_neutral() {
        // 52.5 / 47.5 differ by exactly 5 points
        assert_eq!(SentimentScore::new(52.5, 47.5).verdict(5.0), OverallTrend::Bearish);
    }

    #[test]
    fn test_score_percentages() {
        let score = SentimentScore::new(75.0, 25.0);
        assert_eq!(score.bearish_pct(), 75.0);
        assert_eq!(score.bullish_pct(), 25.0);

        let empty = SentimentScore::default();
        assert_eq!(empty.bearish_pct(), 0.0);
        assert_eq!(empty.bullish_pct(), 0.0);
    }

    // ============= Engine Tests =============

    #[test]
    fn test_sample_day_is_bearish() {
        let assessment = SentimentEngine::default().assess(&sample_day());

        assert_eq!(assessment.snapshot.overall_trend, OverallTrend::Bearish);
        assert!((assessment.score.bearish - 295_010.0).abs() < 1e-6);
        assert!((assessment.score.bullish - 137_629.8).abs() < 1e-6);
    }

    #[test]
    fn test_sample_day_labels() {
        let annotated = annotate(&sample_day());
        let fii = &annotated.categories[0];
        assert_eq!(fii.instruments[0].activity, Activity::SoldFutures);
        assert_eq!(fii.instruments[1].activity, Activity::SoldCalls);
        assert_eq!(fii.instruments[2].activity, Activity::BoughtPuts);
        assert!(fii.instruments.iter().all(|i| i.trend == Trend::Bearish));

        let dii = &annotated.categories[2];
        assert_eq!(dii.instruments[0].trend, Trend::Bullish);
        assert_eq!(dii.instruments[1].activity, Activity::NoChange);
        assert_eq!(dii.instruments[2].trend, Trend::Neutral);

        let retail = &annotated.categories[3];
        assert_eq!(retail.instruments[2].activity, Activity::SoldPuts);
        assert_eq!(retail.instruments[2].trend, Trend::Bullish);
    }

    #[test]
    fn test_all_zero_snapshot_is_neutral() {
        let snap = snapshot(vec![
            category("FII", 0, 0, 0),
            category("PRO", 0, 0, 0),
            category("DII", 0, 0, 0),
            category("RETAIL", 0, 0, 0),
        ]);
        let annotated = annotate(&snap);

        assert_eq!(annotated.overall_trend, OverallTrend::Neutral);
        for c in &annotated.categories {
            for i in &c.instruments {
                assert_eq!(i.activity, Activity::NoChange);
                assert_eq!(i.trend, Trend::Neutral);
            }
        }
    }

    #[test]
    fn test_unknown_kind_excluded_from_score() {
        let snap = snapshot(vec![CategoryRecord::new(
            "FII",
            vec![
                InstrumentRecord::new("XX", 1_000_000),
                InstrumentRecord::new("Future", 100),
            ],
        )]);
        let assessment = SentimentEngine::default().assess(&snap);

        let unknown = &assessment.snapshot.categories[0].instruments[0];
        assert_eq!(unknown.activity, Activity::Unknown);
        assert_eq!(unknown.trend, Trend::Neutral);
        assert_eq!(unknown.kind.as_str(), "XX");
        assert_eq!(assessment.score.bearish, 0.0);
        assert_eq!(assessment.score.bullish, 300.0);
        assert_eq!(assessment.snapshot.overall_trend, OverallTrend::Bullish);
    }

    #[test]
    fn test_unknown_category_weighs_one() {
        let snap = snapshot(vec![CategoryRecord::new(
            "HNI",
            vec![InstrumentRecord::new("CE", -250)],
        )]);
        let assessment = SentimentEngine::default().assess(&snap);

        assert_eq!(assessment.score.bearish, 250.0);
        assert_eq!(assessment.snapshot.overall_trend, OverallTrend::Bearish);
    }

    #[test]
    fn test_dii_neutral_lines_do_not_count() {
        let snap = snapshot(vec![
            category("DII", 0, 0, 0),
            category("FII", 10, 0, 0),
        ]);
        let assessment = SentimentEngine::default().assess(&snap);
        assert_eq!(assessment.score.bearish, 0.0);
        assert_eq!(assessment.score.bullish, 30.0);
    }

    #[test]
    fn test_near_balanced_day_is_neutral() {
        // FII sells 100 futures (300 bearish), RETAIL buys 290 calls (290 bullish)
        let snap = snapshot(vec![
            category("FII", -100, 0, 0),
            category("RETAIL", 0, 290, 0),
        ]);
        assert_eq!(annotate(&snap).overall_trend, OverallTrend::Neutral);
    }

    #[test]
    fn test_custom_dead_zone() {
        let snap = snapshot(vec![
            category("FII", -100, 0, 0),
            category("RETAIL", 0, 200, 0),
        ]);
        // 60/40 split: 20 points apart
        let strict = SentimentEngine::new(WeightTable::default(), 25.0);
        let loose = SentimentEngine::new(WeightTable::default(), 5.0);
        assert_eq!(strict.annotate(&snap).overall_trend, OverallTrend::Neutral);
        assert_eq!(loose.annotate(&snap).overall_trend, OverallTrend::Bearish);
    }

    #[test]
    fn test_annotate_preserves_input_fields() {
        let snap = sample_day();
        let before = snap.clone();
        let annotated = annotate(&snap);

        assert_eq!(snap, before);
        assert_eq!(annotated.date, snap.date);
        assert_eq!(annotated.to_snapshot(), snap);
    }

    #[test]
    fn test_annotate_is_idempotent() {
        let first = annotate(&sample_day());
        let second = annotate(&first.to_snapshot());
        assert_eq!(first, second);
    }

    #[test]
    fn test_duplicate_kinds_are_not_deduplicated() {
        let snap = snapshot(vec![CategoryRecord::new(
            "PRO",
            vec![InstrumentRecord::new("PE", 10), InstrumentRecord::new("PE", 10)],
        )]);
        let assessment = SentimentEngine::default().assess(&snap);
        assert_eq!(assessment.snapshot.categories[0].instruments.len(), 2);
        assert_eq!(assessment.score.bearish, 40.0);
    }
}
