// Program-wide configuration. The original dashboard scattered these values
// across page scripts; here they are named structures passed into the
// calculators and renderers.
use anyhow::{bail, Result};

/// Weights of the three DCT 2 activity groups in the composite score.
/// Fixed by program design, not derived from data.
#[derive(Debug, Clone, PartialEq)]
pub struct ActivityWeights {
    pub payment: f64,
    pub grievance: f64,
    pub community: f64,
}

impl Default for ActivityWeights {
    fn default() -> Self {
        ActivityWeights {
            payment: 0.4,
            grievance: 0.3,
            community: 0.3,
        }
    }
}

impl ActivityWeights {
    pub fn as_array(&self) -> [f64; 3] {
        [self.payment, self.grievance, self.community]
    }

    /// Weights must cover the whole score. Tolerance absorbs decimal
    /// literals that are not exactly representable.
    pub fn validate(&self) -> Result<()> {
        let sum: f64 = self.as_array().iter().sum();
        if (sum - 1.0).abs() > 1e-9 {
            bail!("activity weights must sum to 1.0, got {sum}");
        }
        Ok(())
    }
}

/// Hex colors of the dashboard, keyed where needed by district name.
#[derive(Debug, Clone)]
pub struct Palette {
    pub program_blue: &'static str,
    pub program_red: &'static str,
    /// (district, fill color) in display order.
    pub district_colors: Vec<(&'static str, &'static str)>,
    pub untargeted_fill: &'static str,
    pub untargeted_line: &'static str,
}

impl Default for Palette {
    fn default() -> Self {
        Palette {
            program_blue: "#005b96",
            program_red: "#c62828",
            district_colors: vec![
                ("BEFOTAKA", "#c62828"),
                ("MIDONGY-ATSIMO", "#2e7d32"),
                ("VONDROZO", "#005b96"),
            ],
            untargeted_fill: "#cfd8dc",
            untargeted_line: "#90a4ae",
        }
    }
}

impl Palette {
    pub fn district_color(&self, district: &str) -> Option<&'static str> {
        self.district_colors
            .iter()
            .find(|(name, _)| *name == district)
            .map(|(_, color)| *color)
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub program_title: &'static str,
    pub weights: ActivityWeights,
    pub palette: Palette,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            program_title: "ZARA MIRA – Multi-Cycle Monitoring",
            weights: ActivityWeights::default(),
            palette: Palette::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_weights_are_valid() {
        assert!(ActivityWeights::default().validate().is_ok());
    }

    #[test]
    fn unbalanced_weights_are_rejected() {
        let w = ActivityWeights {
            payment: 0.5,
            grievance: 0.3,
            community: 0.3,
        };
        assert!(w.validate().is_err());
    }

    #[test]
    fn district_color_lookup() {
        let p = Palette::default();
        assert_eq!(p.district_color("VONDROZO"), Some("#005b96"));
        assert_eq!(p.district_color("IHOSY"), None);
    }
}
