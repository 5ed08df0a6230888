// Builds the display/export rows out of computation results. Number columns
// are formatted here once so the console tables and the CSV files agree.
use crate::config::{ActivityWeights, Palette};
use crate::geo;
use crate::types::{
    ActivityRow, ActivityScorecard, BreakdownRow, ClassifiedFeature, CumulativePoint,
    CumulativeRow, DistributionRecord, DistrictSummaryRow, DistrictTotals, GroupRateEntry,
    GroupScore, IndicatorRow, IndicatorView, KpiRow, ScoreSummary, Snapshot, ZoneRow,
};
use crate::util::{format_int, format_number};
use std::cmp::Ordering;

pub fn snapshot_kpis(d: &DistributionRecord) -> Vec<KpiRow> {
    let kpi = |metric: &str, value: String| KpiRow {
        metric: metric.to_string(),
        value,
    };
    vec![
        kpi("Households Plan", format_int(d.households_plan)),
        kpi("Households Reached", format_int(d.households_reach)),
        kpi("Cash to Beneficiary (Plan) – MGA", format_number(d.cash_plan, 0)),
        kpi("Cash to Beneficiary (Reach) – MGA", format_number(d.cash_reach, 0)),
    ]
}

/// Reach vs undelivered, the horizontal-bar breakdown of the snapshot page.
pub fn cash_breakdown(d: &DistributionRecord, s: &Snapshot, palette: &Palette) -> Vec<BreakdownRow> {
    vec![
        BreakdownRow {
            category: "Reach".to_string(),
            amount: format_number(d.cash_reach, 0),
            bar_color: palette.program_blue.to_string(),
        },
        BreakdownRow {
            category: "Undelivered".to_string(),
            amount: format_number(s.undelivered, 0),
            bar_color: palette.program_red.to_string(),
        },
    ]
}

/// Logframe rows in ascending completion order (stable, so equal-rate rows
/// keep their logframe order).
pub fn indicator_rows(view: &IndicatorView) -> Vec<IndicatorRow> {
    let mut scored = view.rows.clone();
    scored.sort_by(|a, b| {
        a.completion_rate
            .partial_cmp(&b.completion_rate)
            .unwrap_or(Ordering::Equal)
    });
    scored
        .into_iter()
        .map(|s| IndicatorRow {
            result_group: s.record.result_group,
            theme: s.record.theme,
            indicator: s.record.indicator_name,
            location: s.record.location_level,
            baseline: format_number(s.record.baseline, 0),
            target: format_number(s.record.target, 0),
            achieved: format_number(s.record.achieved, 0),
            rate: format!("{:.1}", s.completion_rate),
            verification: s.record.verification_means,
        })
        .collect()
}

pub fn cumulative_rows(points: &[CumulativePoint]) -> Vec<CumulativeRow> {
    points
        .iter()
        .map(|p| CumulativeRow {
            label: p.label.clone(),
            reach: format_number(p.reach, 0),
            plan: format_number(p.plan, 0),
            cumulative_reach: format_number(p.cumulative_reach, 0),
            cumulative_plan: format_number(p.cumulative_plan, 0),
        })
        .collect()
}

pub fn activity_rows(group: &GroupScore) -> Vec<ActivityRow> {
    group
        .indicators
        .iter()
        .map(|i| ActivityRow {
            indicator: i.name.clone(),
            planned: format_number(i.planned, 0),
            achieved: format_number(i.achieved, 0),
            gap: format_number(i.gap, 0),
            rate: format!("{:.1}", i.rate),
        })
        .collect()
}

pub fn zone_rows(classified: &[ClassifiedFeature], palette: &Palette) -> Vec<ZoneRow> {
    classified
        .iter()
        .map(|c| {
            let style = geo::feature_style(c, palette);
            let count = |n: Option<i64>| n.map(format_int).unwrap_or_else(|| "–".to_string());
            ZoneRow {
                district: c.feature.district.clone(),
                // Prefer the statistics table's commune name when joined.
                commune: c
                    .stat
                    .as_ref()
                    .map(|s| s.commune.clone())
                    .unwrap_or_else(|| c.feature.name.clone()),
                admin_code: c.feature.admin_code.clone(),
                children: count(c.stat.as_ref().map(|s| s.children)),
                disabled: count(c.stat.as_ref().map(|s| s.disabled)),
                pregnant_women: count(c.stat.as_ref().map(|s| s.pregnant_women)),
                classification: c.classification_label().to_string(),
                fill_color: style.fill_color,
            }
        })
        .collect()
}

pub fn district_summary_rows(summary: &[(String, DistrictTotals)]) -> Vec<DistrictSummaryRow> {
    summary
        .iter()
        .map(|(district, totals)| DistrictSummaryRow {
            district: district.clone(),
            children: format_int(totals.children),
            disabled: format_int(totals.disabled),
            pregnant_women: format_int(totals.pregnant_women),
        })
        .collect()
}

/// The dated JSON summary exported with the scorecard page.
pub fn score_summary(card: &ActivityScorecard, weights: &ActivityWeights) -> ScoreSummary {
    ScoreSummary {
        generated_on: chrono::Local::now().date_naive().to_string(),
        group_rates: card
            .groups
            .iter()
            .zip(weights.as_array())
            .map(|(g, w)| GroupRateEntry {
                group: g.name.clone(),
                rate: g.group_rate,
                weight: w,
            })
            .collect(),
        composite: card.composite,
        band: card.band,
        band_label: card.band.label().to_string(),
    }
}
