// Pure calculators behind the tabular pages. Each one consumes plain records
// and returns plain derived records; console printing and file export live in
// `reports`/`output`.
use crate::config::ActivityWeights;
use crate::types::{
    ActivityGroup, ActivityScorecard, CumulativePoint, DistributionRecord, GroupScore,
    IndicatorRecord, IndicatorSummary, IndicatorView, PerformanceBand, ScoredActivityIndicator,
    ScoredIndicator, SeriesPoint, Snapshot,
};
use crate::util::{mean, pct, round1};
use anyhow::{bail, Result};

/// Coverage, delivery and undelivered cash for one distribution.
/// Reach above plan is valid data: rates may exceed 100 and undelivered
/// may go negative.
pub fn compute_snapshot(d: &DistributionRecord) -> Snapshot {
    Snapshot {
        coverage_rate: pct(d.households_reach as f64, d.households_plan as f64),
        delivery_rate: pct(d.cash_reach, d.cash_plan),
        undelivered: d.cash_plan - d.cash_reach,
    }
}

/// Logframe view filter. `None` means unfiltered; the "Tous"/"all"
/// sentinel of the selector collapses to `None` in `new`.
#[derive(Debug, Clone, Default)]
pub struct IndicatorFilter {
    pub result_group: Option<String>,
    pub search: Option<String>,
}

impl IndicatorFilter {
    pub fn new(result_group: Option<&str>, search: &str) -> Self {
        let result_group = result_group
            .map(str::trim)
            .filter(|g| !g.is_empty() && !g.eq_ignore_ascii_case("all") && !g.eq_ignore_ascii_case("tous"))
            .map(str::to_string);
        let search = search.trim();
        IndicatorFilter {
            result_group,
            search: (!search.is_empty()).then(|| search.to_string()),
        }
    }

    fn matches(&self, r: &IndicatorRecord) -> bool {
        if let Some(group) = &self.result_group {
            if r.result_group != *group {
                return false;
            }
        }
        if let Some(needle) = &self.search {
            let needle = needle.to_lowercase();
            // Indicator OR theme, case-insensitive.
            return r.indicator_name.to_lowercase().contains(&needle)
                || r.theme.to_lowercase().contains(&needle);
        }
        true
    }
}

/// Completion of one logframe indicator, percent rounded to 1 decimal.
/// An unset target reads as no progress expressed, never a division error.
pub fn completion_rate(achieved: f64, target: f64) -> f64 {
    round1(pct(achieved, target))
}

pub fn aggregate_indicators(records: &[IndicatorRecord], filter: &IndicatorFilter) -> IndicatorView {
    let rows: Vec<ScoredIndicator> = records
        .iter()
        .filter(|r| filter.matches(r))
        .map(|r| ScoredIndicator {
            completion_rate: completion_rate(r.achieved, r.target),
            record: r.clone(),
        })
        .collect();

    let rates: Vec<f64> = rows.iter().map(|r| r.completion_rate).collect();
    let summary = IndicatorSummary {
        avg_rate: round1(mean(&rates)),
        count: rows.len(),
        count_below_50: rates.iter().filter(|r| **r < 50.0).count(),
    };
    IndicatorView { rows, summary }
}

/// Verdict on beneficiary coverage, read off the first logframe row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoverageReading {
    Exceeded,
    NearTarget,
    ToReinforce,
}

impl CoverageReading {
    pub fn from_rate(rate: f64) -> Self {
        if rate >= 100.0 {
            CoverageReading::Exceeded
        } else if rate >= 90.0 {
            CoverageReading::NearTarget
        } else {
            CoverageReading::ToReinforce
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CoverageReading::Exceeded => "Objectif bénéficiaires dépassé.",
            CoverageReading::NearTarget => "Couverture bénéficiaires proche de la cible.",
            CoverageReading::ToReinforce => "Couverture bénéficiaires à renforcer.",
        }
    }
}

/// Running prefix sums over the chronological cash series. Input order is
/// preserved; this never sorts.
pub fn cumulative(series: &[SeriesPoint]) -> Vec<CumulativePoint> {
    let mut reach_sum = 0.0;
    let mut plan_sum = 0.0;
    series
        .iter()
        .map(|p| {
            reach_sum += p.reach;
            plan_sum += p.plan;
            CumulativePoint {
                label: p.label.clone(),
                reach: p.reach,
                plan: p.plan,
                cumulative_reach: reach_sum,
                cumulative_plan: plan_sum,
            }
        })
        .collect()
}

/// Per-indicator rates, per-group mean rates and the weighted composite for
/// the three DCT 2 activity groups.
pub fn score_activities(
    groups: &[ActivityGroup],
    weights: &ActivityWeights,
) -> Result<ActivityScorecard> {
    weights.validate()?;
    if groups.len() != 3 {
        bail!("expected 3 activity groups, got {}", groups.len());
    }

    let scored: Vec<GroupScore> = groups
        .iter()
        .map(|g| {
            let indicators: Vec<ScoredActivityIndicator> = g
                .indicators
                .iter()
                .map(|i| ScoredActivityIndicator {
                    name: i.name.clone(),
                    planned: i.planned,
                    achieved: i.achieved,
                    gap: i.achieved - i.planned,
                    rate: round1(pct(i.achieved, i.planned)),
                })
                .collect();
            let rates: Vec<f64> = indicators.iter().map(|i| i.rate).collect();
            GroupScore {
                name: g.name.clone(),
                indicators,
                group_rate: round1(mean(&rates)),
            }
        })
        .collect();

    let composite = round1(
        scored
            .iter()
            .zip(weights.as_array())
            .map(|(g, w)| g.group_rate * w)
            .sum(),
    );
    Ok(ActivityScorecard {
        band: PerformanceBand::from_score(composite),
        groups: scored,
        composite,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data;
    use crate::types::ActivityIndicator;

    #[test]
    fn snapshot_distribution_one() {
        let d = data::realized_distributions().remove(0);
        let s = compute_snapshot(&d);
        assert!((s.coverage_rate - 16487.0 / 17788.0 * 100.0).abs() < 1e-9);
        assert_eq!(format!("{:.2}", s.coverage_rate), "92.69");
        assert_eq!(format!("{:.2}", s.delivery_rate), "93.72");
        assert_eq!(s.undelivered, 122_120_000.0);
    }

    #[test]
    fn snapshot_tolerates_overachievement() {
        let d = DistributionRecord {
            name: "Distribution X".to_string(),
            coverage_period: "4 Months".to_string(),
            payment_code: "PP-0000-00-00000000".to_string(),
            households_plan: 100,
            households_reach: 120,
            cash_plan: 1_000.0,
            cash_reach: 1_200.0,
        };
        let s = compute_snapshot(&d);
        assert!(s.coverage_rate > 100.0);
        assert_eq!(s.undelivered, -200.0);
    }

    #[test]
    fn completion_rate_guards_zero_target() {
        assert_eq!(completion_rate(42.0, 0.0), 0.0);
        assert_eq!(completion_rate(76_541.0, 71_500.0), 107.1);
    }

    #[test]
    fn aggregate_unfiltered_logframe() {
        let view = aggregate_indicators(&data::indicator_records(), &IndicatorFilter::default());
        assert_eq!(view.summary.count, 22);
        // Only the payment-coverage row has progress; every other rate is 0.
        assert_eq!(view.summary.count_below_50, 21);
        assert_eq!(view.summary.avg_rate, 4.9);
        assert_eq!(view.rows[0].completion_rate, 107.1);
    }

    #[test]
    fn aggregate_filters_by_result_group() {
        let filter = IndicatorFilter::new(Some("Résultat 3"), "");
        let view = aggregate_indicators(&data::indicator_records(), &filter);
        assert_eq!(view.summary.count, 3);
        assert!(view.rows.iter().all(|r| r.record.result_group == "Résultat 3"));
    }

    #[test]
    fn sentinel_group_means_unfiltered() {
        for sentinel in ["Tous", "all", "  "] {
            let filter = IndicatorFilter::new(Some(sentinel), "");
            assert!(filter.result_group.is_none());
        }
    }

    #[test]
    fn search_matches_indicator_or_theme_case_insensitive() {
        let records = data::indicator_records();
        // "peas" appears in themes; matching is an OR over both fields.
        let view = aggregate_indicators(&records, &IndicatorFilter::new(None, "PEAS"));
        assert_eq!(view.summary.count, 3);
        let view = aggregate_indicators(&records, &IndicatorFilter::new(None, "grm"));
        assert_eq!(view.summary.count, 1);
        // Whitespace-only search is no filter at all.
        let view = aggregate_indicators(&records, &IndicatorFilter::new(None, "   "));
        assert_eq!(view.summary.count, 22);
    }

    #[test]
    fn empty_view_has_zero_summary() {
        let view = aggregate_indicators(
            &data::indicator_records(),
            &IndicatorFilter::new(None, "no such indicator"),
        );
        assert_eq!(view.summary.count, 0);
        assert_eq!(view.summary.avg_rate, 0.0);
        assert_eq!(view.summary.count_below_50, 0);
    }

    #[test]
    fn coverage_reading_thresholds() {
        assert_eq!(CoverageReading::from_rate(107.1), CoverageReading::Exceeded);
        assert_eq!(CoverageReading::from_rate(100.0), CoverageReading::Exceeded);
        assert_eq!(CoverageReading::from_rate(92.3), CoverageReading::NearTarget);
        assert_eq!(CoverageReading::from_rate(89.9), CoverageReading::ToReinforce);
    }

    #[test]
    fn cumulative_is_a_prefix_sum() {
        let points = cumulative(&data::cash_series());
        assert_eq!(points.len(), 3);
        assert_eq!(points[0].cumulative_reach, 1_821_600_000.0);
        assert_eq!(points[1].cumulative_reach, 3_775_600_000.0);
        assert_eq!(points[2].cumulative_reach, 5_878_600_000.0);
        assert_eq!(points[2].cumulative_plan, 6_193_720_000.0);
        // Monotone for non-negative inputs, and the last entry is the total.
        assert!(points.windows(2).all(|w| w[0].cumulative_reach <= w[1].cumulative_reach));
        let total: f64 = data::cash_series().iter().map(|p| p.reach).sum();
        assert_eq!(points.last().unwrap().cumulative_reach, total);
    }

    #[test]
    fn cumulative_preserves_input_order() {
        let series = vec![
            SeriesPoint { label: "b".into(), reach: 5.0, plan: 5.0 },
            SeriesPoint { label: "a".into(), reach: 1.0, plan: 1.0 },
        ];
        let points = cumulative(&series);
        assert_eq!(points[0].label, "b");
        assert_eq!(points[1].cumulative_reach, 6.0);
    }

    #[test]
    fn activity_scorecard_on_program_data() {
        let card = score_activities(&data::activity_groups(), &ActivityWeights::default())
            .expect("valid groups and weights");
        let rates: Vec<f64> = card.groups[0].indicators.iter().map(|i| i.rate).collect();
        assert_eq!(rates, vec![101.0, 105.0, 103.3, 100.0, 100.0, 100.0, 36.4]);
        assert_eq!(card.groups[0].group_rate, 92.2);
        assert_eq!(card.groups[1].group_rate, 99.4);
        assert_eq!(card.groups[2].group_rate, 96.8);
        assert_eq!(card.composite, 95.7);
        assert_eq!(card.band, PerformanceBand::High);
        // Gap column is signed.
        assert_eq!(card.groups[0].indicators[6].gap, -21.0);
    }

    #[test]
    fn composite_is_the_weighted_rounding_of_group_rates() {
        let mk = |rates: &[f64]| -> Vec<ActivityGroup> {
            rates
                .iter()
                .enumerate()
                .map(|(i, r)| ActivityGroup {
                    name: format!("Activité {}", i + 1),
                    // One indicator per group pins the group rate to `r`.
                    indicators: vec![ActivityIndicator {
                        name: "x".to_string(),
                        planned: 100.0,
                        achieved: *r,
                    }],
                })
                .collect()
        };
        let w = ActivityWeights::default();
        let card = score_activities(&mk(&[100.0, 100.0, 100.0]), &w).unwrap();
        assert_eq!(card.composite, 100.0);
        let card = score_activities(&mk(&[80.0, 70.0, 60.0]), &w).unwrap();
        assert_eq!(card.composite, round1(0.4 * 80.0 + 0.3 * 70.0 + 0.3 * 60.0));
    }

    #[test]
    fn performance_bands_are_half_open_on_the_lower_bound() {
        use PerformanceBand::*;
        assert_eq!(PerformanceBand::from_score(90.0), High);
        assert_eq!(PerformanceBand::from_score(89.9), Satisfactory);
        assert_eq!(PerformanceBand::from_score(75.0), Satisfactory);
        assert_eq!(PerformanceBand::from_score(74.9), Intermediate);
        assert_eq!(PerformanceBand::from_score(60.0), Intermediate);
        assert_eq!(PerformanceBand::from_score(59.9), Low);
    }

    #[test]
    fn zero_planned_activity_scores_zero() {
        let groups = vec![
            ActivityGroup {
                name: "Activité 1".to_string(),
                indicators: vec![ActivityIndicator {
                    name: "x".to_string(),
                    planned: 0.0,
                    achieved: 10.0,
                }],
            },
            ActivityGroup { name: "Activité 2".to_string(), indicators: vec![] },
            ActivityGroup { name: "Activité 3".to_string(), indicators: vec![] },
        ];
        let card = score_activities(&groups, &ActivityWeights::default()).unwrap();
        assert_eq!(card.groups[0].indicators[0].rate, 0.0);
    }

    #[test]
    fn score_rejects_wrong_group_count() {
        assert!(score_activities(&[], &ActivityWeights::default()).is_err());
    }
}
