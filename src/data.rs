// Literal operational datasets of the ZARA MIRA program, one constructor per
// dashboard page. Values are transcribed from the monitoring workbook; there
// is no external ingestion. Every constructor returns fresh records so a
// render can never observe another render's state.
use crate::types::{
    ActivityGroup, ActivityIndicator, CommuneStat, DistributionRecord, IndicatorRecord,
    SeriesPoint,
};

/// Number of payment cycles in the program plan. Cycles beyond the realized
/// ones appear in the selector but carry no operational data yet.
pub const PLANNED_DISTRIBUTIONS: usize = 10;

/// Outcome of selecting a distribution by name. A cycle that has not run yet
/// is a first-class state, not an error.
#[derive(Debug, Clone)]
pub enum DistributionStatus {
    Realized(DistributionRecord),
    NotYetRealized,
}

pub fn distribution_names() -> Vec<String> {
    (1..=PLANNED_DISTRIBUTIONS)
        .map(|i| format!("Distribution {i}"))
        .collect()
}

pub fn distribution(name: &str) -> DistributionStatus {
    realized_distributions()
        .into_iter()
        .find(|d| d.name == name)
        .map(DistributionStatus::Realized)
        .unwrap_or(DistributionStatus::NotYetRealized)
}

pub fn realized_distributions() -> Vec<DistributionRecord> {
    vec![
        DistributionRecord {
            name: "Distribution 1".to_string(),
            coverage_period: "4 Months".to_string(),
            payment_code: "PP-2670-25-00000001".to_string(),
            households_plan: 17788,
            households_reach: 16487,
            cash_plan: 1_943_720_000.0,
            cash_reach: 1_821_600_000.0,
        },
        DistributionRecord {
            name: "Distribution 2".to_string(),
            coverage_period: "4 Months".to_string(),
            payment_code: "PP-2670-25-00000005".to_string(),
            households_plan: 17798,
            households_reach: 16243,
            cash_plan: 1_103_700_000.0,
            cash_reach: 958_340_000.0,
        },
        DistributionRecord {
            name: "Distribution 3".to_string(),
            coverage_period: "4 Months".to_string(),
            payment_code: "PP-2670-25-00000006".to_string(),
            households_plan: 28022,
            households_reach: 26215,
            cash_plan: 3_443_280_000.0,
            cash_reach: 3_200_900_000.0,
        },
    ]
}

fn ind(
    result_group: &str,
    theme: &str,
    indicator_name: &str,
    location_level: &str,
    target: f64,
    achieved: f64,
    verification_means: &str,
) -> IndicatorRecord {
    IndicatorRecord {
        result_group: result_group.to_string(),
        theme: theme.to_string(),
        indicator_name: indicator_name.to_string(),
        location_level: location_level.to_string(),
        // All logframe baselines are zero at program start.
        baseline: 0.0,
        target,
        achieved,
        verification_means: verification_means.to_string(),
    }
}

/// The full project logframe: three result groups, 22 indicators.
pub fn indicator_records() -> Vec<IndicatorRecord> {
    vec![
        // Résultat 1
        ind(
            "Résultat 1",
            "Couverture effective des allocations",
            "Nombre de bénéficiaires recevant des paiements (enfants + PHS)",
            "Fokontany",
            // 68 000 enfants + 3 500 PHS
            68_000.0 + 3_500.0,
            76_541.0,
            "Fiche de paiement; HOPE; Listes bénéficiaires",
        ),
        ind(
            "Résultat 1",
            "Capacités des acteurs locaux",
            "% d’acteurs locaux formés (PL, RCJ, TS, CMS…)",
            "Région/district",
            100.0,
            0.0,
            "Registres formation; Rapports; Évaluations post-formation",
        ),
        ind(
            "Résultat 1",
            "Conformité des paiements",
            "Nombre de paiements suivis régulièrement",
            "Sites distribution",
            18.0,
            0.0,
            "États de paiement; HOPE; Rapport narratif SAF",
        ),
        ind(
            "Résultat 1",
            "Appropriation MACC",
            "Taux d’agents évalués compétents après coaching",
            "Région/district",
            70.0,
            0.0,
            "Rapports coaching; Grilles; Feedback bénéficiaires",
        ),
        ind(
            "Résultat 1",
            "Performance GRM",
            "% de plaintes résolues / total plaintes",
            "Fokontany/commune",
            90.0,
            0.0,
            "Système plaintes; Registres; Rapports",
        ),
        ind(
            "Résultat 1",
            "Activités EBE",
            "Fréquence séances thématiques (EBE)",
            "Fokontany",
            36.0,
            0.0,
            "Rapports; Fiches présence",
        ),
        ind(
            "Résultat 1",
            "Sensibilisation MACC",
            "Nombre bénéficiaires sensibilisés MACC",
            "Fokontany",
            62_250.0,
            0.0,
            "Fiches AL; Fiches présence",
        ),
        ind(
            "Résultat 1",
            "PEAS – sensibilisation",
            "Nombre de sites avec sessions PEAS",
            "Fokontany",
            35.0,
            0.0,
            "Rapport activité",
        ),
        ind(
            "Résultat 1",
            "PEAS – formation staff",
            "Personnel formé PEAS",
            "Fokontany",
            1_370.0,
            0.0,
            "Rapport activité",
        ),
        ind(
            "Résultat 1",
            "EBE – mise en place",
            "Nombre d’EBE créées",
            "Fokontany",
            102.0,
            0.0,
            "Registres; Photographies",
        ),
        // Résultat 2
        ind(
            "Résultat 2",
            "Référencement & prise en charge",
            "Circuit de référence établi",
            "District",
            1.0,
            0.0,
            "Rapport validation",
        ),
        ind(
            "Résultat 2",
            "Comités gestion de cas",
            "Nombre comités gestion cas",
            "District",
            3.0,
            0.0,
            "Rapports; Listes comités",
        ),
        ind(
            "Résultat 2",
            "Réunions gestion de cas",
            "Nombre réunions gestion cas",
            "District",
            27.0,
            0.0,
            "Comptes rendus",
        ),
        ind(
            "Résultat 2",
            "Population cible",
            "Bénéficiaires ciblés intervention protection",
            "Fokontany",
            68_000.0 + 3_500.0,
            0.0,
            "Listes bénéficiaires",
        ),
        ind(
            "Résultat 2",
            "Sensibilisation communautés",
            "Communautés sensibilisées (PE/VBG)",
            "Fokontany",
            18_000.0,
            0.0,
            "Fiches présence",
        ),
        ind(
            "Résultat 2",
            "Violences signalées et traitées",
            "Nombre cas violences traités",
            "District",
            900.0,
            0.0,
            "Dossiers cas",
        ),
        ind(
            "Résultat 2",
            "Participation communautaire",
            "% communautés ayant participé campagnes",
            "Région/district",
            70.0,
            0.0,
            "Rapports sensibilisation",
        ),
        ind(
            "Résultat 2",
            "Cas protection identifiés",
            "Cas protection identifiés et pris en charge",
            "Région/district",
            100.0,
            0.0,
            "Base de données cas",
        ),
        ind(
            "Résultat 2",
            "PEAS – engagement",
            "% enfants/adultes engagés PEAS",
            "Fokontany",
            80.0,
            0.0,
            "Rapports activité",
        ),
        // Résultat 3
        ind(
            "Résultat 3",
            "Communication projet",
            "Taux compréhension programme",
            "3 districts",
            95.0,
            0.0,
            "Rapports atelier; Focus group",
        ),
        ind(
            "Résultat 3",
            "Supports communication",
            "Nombre supports communication produits",
            "Districts",
            3.0,
            0.0,
            "Inventaire supports",
        ),
        ind(
            "Résultat 3",
            "Success stories",
            "Nombre histoires de réussite produites",
            "Districts",
            6.0,
            0.0,
            "Liens publications",
        ),
    ]
}

/// Per-distribution cash series for the cumulative page. This is the
/// monitoring workbook's own series; its Distribution 2–3 figures differ
/// from the snapshot page's payment records and are kept as-is.
pub fn cash_series() -> Vec<SeriesPoint> {
    let reach = [1_821_600_000.0, 1_954_000_000.0, 2_103_000_000.0];
    let plan = [1_943_720_000.0, 2_050_000_000.0, 2_200_000_000.0];
    reach
        .iter()
        .zip(plan.iter())
        .enumerate()
        .map(|(i, (r, p))| SeriesPoint {
            label: format!("Distribution {}", i + 1),
            reach: *r,
            plan: *p,
        })
        .collect()
}

fn act(name: &str, planned: f64, achieved: f64) -> ActivityIndicator {
    ActivityIndicator {
        name: name.to_string(),
        planned,
        achieved,
    }
}

/// The three DCT 2 activity groups, in composite-weight order.
pub fn activity_groups() -> Vec<ActivityGroup> {
    vec![
        ActivityGroup {
            name: "Activité 1 – Paiement & Supervision".to_string(),
            indicators: vec![
                act("CMS impliqués", 400.0, 404.0),
                act("AL recrutés & formés", 60.0, 63.0),
                act("IS formés", 30.0, 31.0),
                act("Superviseurs impliqués", 6.0, 6.0),
                act("Sites de paiement", 33.0, 33.0),
                act("Vagues de paiement", 2.0, 2.0),
                act("Sites avec ombrage conforme", 33.0, 12.0),
            ],
        },
        ActivityGroup {
            name: "Activité 2 – Mécanisme de Plaintes (GRM)".to_string(),
            indicators: vec![
                act("Ligne verte dédiée", 1.0, 1.0),
                act("Boîtes à doléances installées", 102.0, 102.0),
                act("Plaintes traitées (%)", 90.0, 88.0),
                act("Couverture géographique", 102.0, 102.0),
            ],
        },
        ActivityGroup {
            name: "Activité 3 – EBE & Acteurs Communautaires".to_string(),
            indicators: vec![
                act("Espaces de Bien-Être (EBE)", 102.0, 95.0),
                act("Parents Leaders mobilisés", 742.0, 700.0),
                act("Relais Communautaires Jeunes (RCJ)", 102.0, 102.0),
                act("Fokontany avec RCJ", 102.0, 102.0),
            ],
        },
    ]
}

fn commune(
    district: &str,
    name: &str,
    admin_code: &str,
    children: i64,
    disabled: i64,
    pregnant_women: i64,
) -> CommuneStat {
    CommuneStat {
        district: district.to_string(),
        commune: name.to_string(),
        admin_code: admin_code.to_string(),
        children,
        disabled,
        pregnant_women,
    }
}

/// Beneficiary counts of the eleven targeted communes, grouped by district
/// in the order the intervention zones are presented.
pub fn commune_stats() -> Vec<CommuneStat> {
    vec![
        commune("BEFOTAKA", "ANTANINARENINA", "MG25222032", 3723, 92, 29),
        commune("BEFOTAKA", "BEFOTAKA SUD", "MG25222011", 5680, 158, 50),
        commune("BEFOTAKA", "BEHARENA", "MG25222052", 4403, 114, 50),
        commune("MIDONGY-ATSIMO", "ANKAZOVELO", "MG25215012", 3377, 29, 48),
        commune("MIDONGY-ATSIMO", "NOSIFENO", "MG25215011", 10618, 117, 104),
        commune("MIDONGY-ATSIMO", "MALIORANO", "MG25215032", 4125, 41, 19),
        commune("VONDROZO", "VONDROZO", "MG25217011", 5573, 125, 79),
        commune("VONDROZO", "MANAMBIDALA", "MG25217012", 11327, 238, 49),
        commune("VONDROZO", "ANANDRAVY", "MG25217013", 4964, 105, 74),
        commune("VONDROZO", "MAHATSINJO", "MG25217030", 15095, 372, 228),
        commune("VONDROZO", "VOHIMARY", "MG25217071", 7656, 167, 39),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn realized_distribution_is_found_by_name() {
        match distribution("Distribution 1") {
            DistributionStatus::Realized(d) => {
                assert_eq!(d.payment_code, "PP-2670-25-00000001");
                assert_eq!(d.households_plan, 17788);
            }
            DistributionStatus::NotYetRealized => panic!("Distribution 1 must be realized"),
        }
    }

    #[test]
    fn future_and_unknown_selections_are_not_yet_realized() {
        assert!(matches!(
            distribution("Distribution 7"),
            DistributionStatus::NotYetRealized
        ));
        assert!(matches!(
            distribution("Distribution 99"),
            DistributionStatus::NotYetRealized
        ));
    }

    #[test]
    fn selector_lists_all_planned_cycles() {
        let names = distribution_names();
        assert_eq!(names.len(), PLANNED_DISTRIBUTIONS);
        assert_eq!(names[0], "Distribution 1");
        assert_eq!(names[9], "Distribution 10");
    }

    #[test]
    fn logframe_has_three_result_groups() {
        let records = indicator_records();
        assert_eq!(records.len(), 22);
        let r1 = records.iter().filter(|r| r.result_group == "Résultat 1").count();
        let r2 = records.iter().filter(|r| r.result_group == "Résultat 2").count();
        let r3 = records.iter().filter(|r| r.result_group == "Résultat 3").count();
        assert_eq!((r1, r2, r3), (10, 9, 3));
    }

    #[test]
    fn commune_codes_are_unique() {
        let stats = commune_stats();
        let mut codes: Vec<&str> = stats.iter().map(|s| s.admin_code.as_str()).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), stats.len());
    }
}
