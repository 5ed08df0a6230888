use serde::Serialize;
use tabled::Tabled;

// ---------------------------------------------------------------------------
// Domain records. Constructed fresh from the literal datasets on every page
// render; nothing here is persisted or mutated.
// ---------------------------------------------------------------------------

/// One cash payment cycle of the program.
#[derive(Debug, Clone)]
pub struct DistributionRecord {
    pub name: String,
    pub coverage_period: String,
    pub payment_code: String,
    pub households_plan: i64,
    pub households_reach: i64,
    /// MGA, minor-unit-free.
    pub cash_plan: f64,
    pub cash_reach: f64,
}

/// Derived view of one distribution. Rates are unrounded percentages;
/// the display layer formats to 2 decimals.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Snapshot {
    pub coverage_rate: f64,
    pub delivery_rate: f64,
    /// Signed: negative when more cash went out than was planned.
    pub undelivered: f64,
}

/// One row of the project logframe.
#[derive(Debug, Clone)]
pub struct IndicatorRecord {
    pub result_group: String,
    pub theme: String,
    pub indicator_name: String,
    pub location_level: String,
    pub baseline: f64,
    pub target: f64,
    pub achieved: f64,
    pub verification_means: String,
}

#[derive(Debug, Clone)]
pub struct ScoredIndicator {
    pub record: IndicatorRecord,
    /// Percent, rounded to 1 decimal; 0 when the target is unset.
    pub completion_rate: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndicatorSummary {
    pub avg_rate: f64,
    pub count: usize,
    pub count_below_50: usize,
}

/// Filtered logframe view plus its headline figures.
#[derive(Debug, Clone)]
pub struct IndicatorView {
    pub rows: Vec<ScoredIndicator>,
    pub summary: IndicatorSummary,
}

/// One point of the per-distribution cash series, in chronological order.
#[derive(Debug, Clone)]
pub struct SeriesPoint {
    pub label: String,
    pub reach: f64,
    pub plan: f64,
}

#[derive(Debug, Clone)]
pub struct CumulativePoint {
    pub label: String,
    pub reach: f64,
    pub plan: f64,
    pub cumulative_reach: f64,
    pub cumulative_plan: f64,
}

#[derive(Debug, Clone)]
pub struct ActivityIndicator {
    pub name: String,
    pub planned: f64,
    pub achieved: f64,
}

#[derive(Debug, Clone)]
pub struct ActivityGroup {
    pub name: String,
    pub indicators: Vec<ActivityIndicator>,
}

#[derive(Debug, Clone)]
pub struct ScoredActivityIndicator {
    pub name: String,
    pub planned: f64,
    pub achieved: f64,
    pub gap: f64,
    pub rate: f64,
}

#[derive(Debug, Clone)]
pub struct GroupScore {
    pub name: String,
    pub indicators: Vec<ScoredActivityIndicator>,
    pub group_rate: f64,
}

/// Severity label for the weighted composite score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PerformanceBand {
    High,
    Satisfactory,
    Intermediate,
    Low,
}

impl PerformanceBand {
    /// Bands are half-open on the lower bound: [90,∞) [75,90) [60,75) (-∞,60).
    pub fn from_score(score: f64) -> Self {
        if score >= 90.0 {
            PerformanceBand::High
        } else if score >= 75.0 {
            PerformanceBand::Satisfactory
        } else if score >= 60.0 {
            PerformanceBand::Intermediate
        } else {
            PerformanceBand::Low
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PerformanceBand::High => "High performance – strong compliance",
            PerformanceBand::Satisfactory => "Satisfactory performance – minor improvements",
            PerformanceBand::Intermediate => "Intermediate performance – adjustments required",
            PerformanceBand::Low => "Low performance – corrective action needed",
        }
    }
}

#[derive(Debug, Clone)]
pub struct ActivityScorecard {
    pub groups: Vec<GroupScore>,
    pub composite: f64,
    pub band: PerformanceBand,
}

/// Beneficiary counts of one targeted commune.
#[derive(Debug, Clone)]
pub struct CommuneStat {
    pub district: String,
    pub commune: String,
    /// ADM3 p-code, unique join key against the commune polygons.
    pub admin_code: String,
    pub children: i64,
    pub disabled: i64,
    pub pregnant_women: i64,
}

/// One administrative polygon out of the GeoJSON file.
#[derive(Debug, Clone)]
pub struct GeoFeature {
    pub admin_code: String,
    pub name: String,
    pub district: String,
    pub geometry: Option<geojson::Geometry>,
}

/// A feature joined with its commune statistics and color group.
/// Both sides are optional by design: an unmatched feature is the
/// "Non ciblée" outcome, not an error.
#[derive(Debug, Clone)]
pub struct ClassifiedFeature {
    pub feature: GeoFeature,
    pub stat: Option<CommuneStat>,
    pub group: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DistrictTotals {
    pub children: i64,
    pub disabled: i64,
    pub pregnant_women: i64,
}

/// Leaflet-style styling for one polygon, derived from its classification.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FeatureStyle {
    pub fill_color: String,
    pub line_color: String,
    pub weight: u8,
    pub fill_opacity: f64,
}

// ---------------------------------------------------------------------------
// Display/export rows. Numbers are pre-formatted strings so the console
// table and the CSV export show identical values.
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct KpiRow {
    #[serde(rename = "Metric")]
    #[tabled(rename = "Metric")]
    pub metric: String,
    #[serde(rename = "Value")]
    #[tabled(rename = "Value")]
    pub value: String,
}

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct BreakdownRow {
    #[serde(rename = "Category")]
    #[tabled(rename = "Category")]
    pub category: String,
    #[serde(rename = "AmountMGA")]
    #[tabled(rename = "Amount (MGA)")]
    pub amount: String,
    #[serde(rename = "BarColor")]
    #[tabled(rename = "Bar")]
    pub bar_color: String,
}

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct IndicatorRow {
    #[serde(rename = "Resultat")]
    #[tabled(rename = "Résultat")]
    pub result_group: String,
    #[serde(rename = "Volet")]
    #[tabled(rename = "Volet")]
    pub theme: String,
    #[serde(rename = "Indicateur")]
    #[tabled(rename = "Indicateur")]
    pub indicator: String,
    #[serde(rename = "Lieu")]
    #[tabled(rename = "Lieu")]
    pub location: String,
    #[serde(rename = "Baseline")]
    #[tabled(rename = "Baseline")]
    pub baseline: String,
    #[serde(rename = "Cible")]
    #[tabled(rename = "Cible")]
    pub target: String,
    #[serde(rename = "Realise")]
    #[tabled(rename = "Réalisé")]
    pub achieved: String,
    #[serde(rename = "TauxPct")]
    #[tabled(rename = "Taux (%)")]
    pub rate: String,
    #[serde(rename = "MoyensVerification")]
    #[tabled(rename = "Moyens de vérification")]
    pub verification: String,
}

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct CumulativeRow {
    #[serde(rename = "Distribution")]
    #[tabled(rename = "Distribution")]
    pub label: String,
    #[serde(rename = "CashReach")]
    #[tabled(rename = "Cash Reach")]
    pub reach: String,
    #[serde(rename = "CashPlan")]
    #[tabled(rename = "Cash Plan")]
    pub plan: String,
    #[serde(rename = "CumulativeReach")]
    #[tabled(rename = "Cumulative Reach")]
    pub cumulative_reach: String,
    #[serde(rename = "CumulativePlan")]
    #[tabled(rename = "Cumulative Plan")]
    pub cumulative_plan: String,
}

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct ActivityRow {
    #[serde(rename = "Indicateur")]
    #[tabled(rename = "Indicateur")]
    pub indicator: String,
    #[serde(rename = "Planifie")]
    #[tabled(rename = "Planifié")]
    pub planned: String,
    #[serde(rename = "Realise")]
    #[tabled(rename = "Réalisé")]
    pub achieved: String,
    #[serde(rename = "Ecart")]
    #[tabled(rename = "Écart")]
    pub gap: String,
    #[serde(rename = "TauxPct")]
    #[tabled(rename = "Taux (%)")]
    pub rate: String,
}

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct ZoneRow {
    #[serde(rename = "District")]
    #[tabled(rename = "District")]
    pub district: String,
    #[serde(rename = "Commune")]
    #[tabled(rename = "Commune")]
    pub commune: String,
    #[serde(rename = "AdminCode")]
    #[tabled(rename = "ADM3_PCODE")]
    pub admin_code: String,
    #[serde(rename = "Enfants")]
    #[tabled(rename = "Enfants")]
    pub children: String,
    #[serde(rename = "Handicap")]
    #[tabled(rename = "Handicap")]
    pub disabled: String,
    #[serde(rename = "FemmesEnceintes")]
    #[tabled(rename = "Femmes Enceintes")]
    pub pregnant_women: String,
    #[serde(rename = "Classification")]
    #[tabled(rename = "Classification")]
    pub classification: String,
    #[serde(rename = "FillColor")]
    #[tabled(rename = "Fill")]
    pub fill_color: String,
}

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct DistrictSummaryRow {
    #[serde(rename = "District")]
    #[tabled(rename = "District")]
    pub district: String,
    #[serde(rename = "Enfants")]
    #[tabled(rename = "Enfants")]
    pub children: String,
    #[serde(rename = "Handicap")]
    #[tabled(rename = "Handicap")]
    pub disabled: String,
    #[serde(rename = "FemmesEnceintes")]
    #[tabled(rename = "Femmes Enceintes")]
    pub pregnant_women: String,
}

/// JSON export of page 5, mirrors what the score section prints.
#[derive(Debug, Serialize)]
pub struct ScoreSummary {
    pub generated_on: String,
    pub group_rates: Vec<GroupRateEntry>,
    pub composite: f64,
    pub band: PerformanceBand,
    pub band_label: String,
}

#[derive(Debug, Serialize)]
pub struct GroupRateEntry {
    pub group: String,
    pub rate: f64,
    pub weight: f64,
}
