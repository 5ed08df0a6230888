// Geographic join between the commune statistics table and the program's
// boundary files. Polygon files are opaque read-only resources; they are
// parsed once per path and reused across renders.
use crate::config::Palette;
use crate::types::{ClassifiedFeature, CommuneStat, DistrictTotals, FeatureStyle, GeoFeature};
use anyhow::{Context, Result};
use geojson::FeatureCollection;
use once_cell::sync::Lazy;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Classification shown for a polygon with no commune statistics.
pub const NOT_TARGETED: &str = "Non ciblée";

/// Property keys of one boundary file. The district key is absent on the
/// district-outline file, where the feature's own name is its district.
#[derive(Debug, Clone, Copy)]
pub struct FeatureSchema {
    pub code: &'static str,
    pub name: &'static str,
    pub district: Option<&'static str>,
}

/// Commune polygons (`zara_mira_adm3.geojson`).
pub const COMMUNE_SCHEMA: FeatureSchema = FeatureSchema {
    code: "ADM3_PCODE",
    name: "ADM3_EN",
    district: Some("ADM2_EN"),
};

/// District outlines (`zara_mira_adm2.geojson`).
pub const DISTRICT_SCHEMA: FeatureSchema = FeatureSchema {
    code: "ADM2_PCODE",
    name: "ADM2_EN",
    district: None,
};

// Boundary files are static for the lifetime of the program, so a plain
// path-keyed cache with no invalidation is enough.
static FEATURE_CACHE: Lazy<Mutex<HashMap<PathBuf, Arc<Vec<GeoFeature>>>>> =
    Lazy::new(|| Mutex::new(HashMap::new()));

/// Load a boundary file, parsing it at most once per path.
pub fn load_features(path: &Path, schema: &FeatureSchema) -> Result<Arc<Vec<GeoFeature>>> {
    {
        let cache = FEATURE_CACHE.lock().unwrap();
        if let Some(features) = cache.get(path) {
            return Ok(Arc::clone(features));
        }
    }
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading boundary file {}", path.display()))?;
    let fc: FeatureCollection = raw
        .parse()
        .with_context(|| format!("parsing boundary file {}", path.display()))?;
    let features = Arc::new(parse_features(&fc, schema)?);
    FEATURE_CACHE
        .lock()
        .unwrap()
        .insert(path.to_path_buf(), Arc::clone(&features));
    Ok(features)
}

pub fn parse_features(fc: &FeatureCollection, schema: &FeatureSchema) -> Result<Vec<GeoFeature>> {
    fc.features
        .iter()
        .map(|f| {
            let admin_code = required_str(f, schema.code)?;
            let name = required_str(f, schema.name)?;
            let district = match schema.district {
                Some(key) => required_str(f, key)?,
                None => name.clone(),
            };
            Ok(GeoFeature {
                admin_code,
                name,
                district,
                geometry: f.geometry.clone(),
            })
        })
        .collect()
}

fn required_str(f: &geojson::Feature, key: &str) -> Result<String> {
    f.property(key)
        .and_then(|v| v.as_str())
        .map(str::to_string)
        .with_context(|| format!("feature missing string property {key}"))
}

/// A named set of admin codes sharing one map color. Order in the returned
/// vector is the membership-test priority order.
#[derive(Debug, Clone)]
pub struct DistrictGroup {
    pub name: String,
    pub codes: HashSet<String>,
}

/// Partition the commune table by district, in first-seen order.
pub fn district_groups(stats: &[CommuneStat]) -> Vec<DistrictGroup> {
    let mut groups: Vec<DistrictGroup> = Vec::new();
    for stat in stats {
        match groups.iter_mut().find(|g| g.name == stat.district) {
            Some(g) => {
                g.codes.insert(stat.admin_code.clone());
            }
            None => groups.push(DistrictGroup {
                name: stat.district.clone(),
                codes: HashSet::from([stat.admin_code.clone()]),
            }),
        }
    }
    groups
}

/// Join each polygon with its commune statistics and color group by exact
/// admin-code match. Absent stat and absent group are both defined
/// fallbacks; the first matching group wins.
pub fn classify_features(
    features: &[GeoFeature],
    stats: &[CommuneStat],
    groups: &[DistrictGroup],
) -> Vec<ClassifiedFeature> {
    let by_code: HashMap<&str, &CommuneStat> =
        stats.iter().map(|s| (s.admin_code.as_str(), s)).collect();
    features
        .iter()
        .map(|f| ClassifiedFeature {
            stat: by_code.get(f.admin_code.as_str()).map(|s| (*s).clone()),
            group: groups
                .iter()
                .find(|g| g.codes.contains(&f.admin_code))
                .map(|g| g.name.clone()),
            feature: f.clone(),
        })
        .collect()
}

impl ClassifiedFeature {
    pub fn classification_label(&self) -> &str {
        self.group.as_deref().unwrap_or(NOT_TARGETED)
    }
}

/// Grouped beneficiary sums, districts in first-seen order for stable display.
pub fn summarize_by_district(stats: &[CommuneStat]) -> Vec<(String, DistrictTotals)> {
    let mut rows: Vec<(String, DistrictTotals)> = Vec::new();
    for stat in stats {
        let idx = match rows.iter().position(|(name, _)| *name == stat.district) {
            Some(i) => i,
            None => {
                rows.push((stat.district.clone(), DistrictTotals::default()));
                rows.len() - 1
            }
        };
        let totals = &mut rows[idx].1;
        totals.children += stat.children;
        totals.disabled += stat.disabled;
        totals.pregnant_women += stat.pregnant_women;
    }
    rows
}

/// Fill/outline styling of one commune polygon: the district color at full
/// strength when targeted, a faint neutral grey otherwise.
pub fn feature_style(classified: &ClassifiedFeature, palette: &Palette) -> FeatureStyle {
    match classified
        .group
        .as_deref()
        .and_then(|g| palette.district_color(g))
    {
        Some(color) => FeatureStyle {
            fill_color: color.to_string(),
            line_color: color.to_string(),
            weight: 2,
            fill_opacity: 0.7,
        },
        None => FeatureStyle {
            fill_color: palette.untargeted_fill.to_string(),
            line_color: palette.untargeted_line.to_string(),
            weight: 1,
            fill_opacity: 0.05,
        },
    }
}

/// Uniform styling of the district outline layer.
pub fn outline_style(palette: &Palette) -> FeatureStyle {
    FeatureStyle {
        fill_color: palette.program_blue.to_string(),
        line_color: palette.program_blue.to_string(),
        weight: 2,
        fill_opacity: 0.10,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data;

    const COMMUNES_FIXTURE: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "properties": {"ADM3_PCODE": "MG25217030", "ADM3_EN": "MAHATSINJO", "ADM2_EN": "VONDROZO"},
                "geometry": {"type": "Polygon", "coordinates": [[[47.3, -22.8], [47.4, -22.8], [47.4, -22.7], [47.3, -22.8]]]}
            },
            {
                "type": "Feature",
                "properties": {"ADM3_PCODE": "MG25217090", "ADM3_EN": "IVATO", "ADM2_EN": "VONDROZO"},
                "geometry": {"type": "Polygon", "coordinates": [[[47.5, -22.8], [47.6, -22.8], [47.6, -22.7], [47.5, -22.8]]]}
            }
        ]
    }"#;

    fn fixture_features() -> Vec<GeoFeature> {
        let fc: FeatureCollection = COMMUNES_FIXTURE.parse().unwrap();
        parse_features(&fc, &COMMUNE_SCHEMA).unwrap()
    }

    #[test]
    fn parse_reads_schema_properties() {
        let features = fixture_features();
        assert_eq!(features.len(), 2);
        assert_eq!(features[0].admin_code, "MG25217030");
        assert_eq!(features[0].name, "MAHATSINJO");
        assert_eq!(features[0].district, "VONDROZO");
        assert!(features[0].geometry.is_some());
    }

    #[test]
    fn parse_rejects_feature_without_code() {
        let raw = r#"{"type": "FeatureCollection", "features": [
            {"type": "Feature", "properties": {"ADM3_EN": "X", "ADM2_EN": "Y"}, "geometry": null}
        ]}"#;
        let fc: FeatureCollection = raw.parse().unwrap();
        assert!(parse_features(&fc, &COMMUNE_SCHEMA).is_err());
    }

    #[test]
    fn join_matches_on_admin_code() {
        let stats = data::commune_stats();
        let groups = district_groups(&stats);
        let classified = classify_features(&fixture_features(), &stats, &groups);

        let mahatsinjo = &classified[0];
        let stat = mahatsinjo.stat.as_ref().expect("MG25217030 must join");
        assert_eq!(stat.children, 15095);
        assert_eq!(mahatsinjo.classification_label(), "VONDROZO");

        let ivato = &classified[1];
        assert!(ivato.stat.is_none());
        assert!(ivato.group.is_none());
        assert_eq!(ivato.classification_label(), NOT_TARGETED);
    }

    #[test]
    fn group_priority_is_first_seen_district_order() {
        let groups = district_groups(&data::commune_stats());
        let names: Vec<&str> = groups.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec!["BEFOTAKA", "MIDONGY-ATSIMO", "VONDROZO"]);
        assert!(groups[2].codes.contains("MG25217030"));
        assert_eq!(groups[0].codes.len(), 3);
    }

    #[test]
    fn district_summary_sums_counts_in_stable_order() {
        let summary = summarize_by_district(&data::commune_stats());
        assert_eq!(summary.len(), 3);
        assert_eq!(summary[0].0, "BEFOTAKA");
        assert_eq!(
            summary[0].1,
            DistrictTotals { children: 13806, disabled: 364, pregnant_women: 129 }
        );
        assert_eq!(
            summary[2].1,
            DistrictTotals { children: 44615, disabled: 1007, pregnant_women: 469 }
        );
        let total_children: i64 = summary.iter().map(|(_, t)| t.children).sum();
        assert_eq!(total_children, 76541);
    }

    #[test]
    fn styles_follow_classification() {
        let stats = data::commune_stats();
        let groups = district_groups(&stats);
        let classified = classify_features(&fixture_features(), &stats, &groups);
        let palette = Palette::default();

        let targeted = feature_style(&classified[0], &palette);
        assert_eq!(targeted.fill_color, "#005b96");
        assert_eq!(targeted.fill_opacity, 0.7);

        let untargeted = feature_style(&classified[1], &palette);
        assert_eq!(untargeted.fill_color, "#cfd8dc");
        assert_eq!(untargeted.weight, 1);

        let outline = outline_style(&palette);
        assert_eq!(outline.fill_opacity, 0.10);
    }

    #[test]
    fn load_features_parses_once_per_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("communes.geojson");
        std::fs::write(&path, COMMUNES_FIXTURE).unwrap();

        let first = load_features(&path, &COMMUNE_SCHEMA).unwrap();
        // Rewrite the file: the cached parse must still be served.
        std::fs::write(&path, "not geojson").unwrap();
        let second = load_features(&path, &COMMUNE_SCHEMA).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn load_features_reports_malformed_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.geojson");
        std::fs::write(&path, "{ not geojson ]").unwrap();
        assert!(load_features(&path, &COMMUNE_SCHEMA).is_err());
        assert!(load_features(&dir.path().join("absent.geojson"), &COMMUNE_SCHEMA).is_err());
    }
}
