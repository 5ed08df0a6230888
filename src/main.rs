// Entry point and console flow.
//
// Each page of the ZARA MIRA monitoring dashboard is a menu entry: it builds
// its literal dataset, runs the computation layer, prints the derived tables
// and exports them. Pages are independent; a failing page reports its error
// and returns to the menu without touching any other page's data.
mod config;
mod data;
mod geo;
mod metrics;
mod output;
mod reports;
mod types;
mod util;

use anyhow::Result;
use config::AppConfig;
use data::DistributionStatus;
use std::io::{self, Write};
use std::path::Path;

const ADM2_FILE: &str = "data/zara_mira_adm2.geojson";
const ADM3_FILE: &str = "data/zara_mira_adm3.geojson";

fn prompt(label: &str) -> String {
    print!("{label}");
    let _ = io::stdout().flush();
    let mut buf = String::new();
    io::stdin().read_line(&mut buf).ok();
    buf.trim().to_string()
}

/// Page 1: Household & cash snapshot of one selected distribution.
fn page_snapshot(cfg: &AppConfig) -> Result<()> {
    println!("Distributions:");
    for (i, name) in data::distribution_names().iter().enumerate() {
        println!("  [{}] {}", i + 1, name);
    }
    let choice = prompt("Select distribution: ");
    let Ok(n) = choice.parse::<usize>() else {
        println!("Invalid choice. Please enter a number.\n");
        return Ok(());
    };
    let name = format!("Distribution {n}");

    let record = match data::distribution(&name) {
        DistributionStatus::Realized(record) => record,
        DistributionStatus::NotYetRealized => {
            // Defined state for planned cycles, not an error.
            println!("\nStatus: Not yet implemented / Not yet realized.");
            println!("This distribution has no operational data available yet.\n");
            return Ok(());
        }
    };

    let snapshot = metrics::compute_snapshot(&record);

    println!(
        "\n{} | Coverage Period: {} | Payment Plan Code: {}",
        record.name, record.coverage_period, record.payment_code
    );

    output::section("Household & Cash Snapshot", None);
    output::print_table(&reports::snapshot_kpis(&record));

    output::section("Operational Performance", Some("gauges bounded 0–100"));
    println!("Household Coverage (%): {:.2}", snapshot.coverage_rate);
    println!("Cash Delivery (%):      {:.2}", snapshot.delivery_rate);

    output::section("Cash Distribution Breakdown", None);
    let breakdown = reports::cash_breakdown(&record, &snapshot, &cfg.palette);
    output::print_table(&breakdown);
    let file = "snapshot_cash_breakdown.csv";
    output::write_csv(file, &breakdown)?;
    println!("(Breakdown exported to {file})\n");

    println!(
        "{} – Coverage: {:.2}% | Cash Delivery: {:.2}%\n",
        record.name, snapshot.coverage_rate, snapshot.delivery_rate
    );
    Ok(())
}

/// Page 2: Global logframe indicators with filters and headline figures.
fn page_indicators() -> Result<()> {
    let records = data::indicator_records();

    let group = prompt("Filter by result group (blank or 'Tous' = all): ");
    let search = prompt("Search indicator / theme (blank = none): ");
    let filter = metrics::IndicatorFilter::new(Some(group.as_str()), &search);

    let view = metrics::aggregate_indicators(&records, &filter);

    output::section("Indicateurs globaux du projet – ZARA MIRA", None);
    println!("Indicateurs affichés : {}", view.summary.count);
    println!("Taux moyen           : {}%", view.summary.avg_rate);
    println!("Indicateurs <50%     : {}", view.summary.count_below_50);

    output::section("Tableau de suivi global", Some("ascending by completion rate"));
    let rows = reports::indicator_rows(&view);
    output::print_table(&rows);
    let file = "indicateurs_globaux.csv";
    output::write_csv(file, &rows)?;
    println!("(Full table exported to {file})\n");

    // Strategic reading: beneficiary coverage off the first logframe row,
    // overall pace off the filtered mean.
    if let Some(first) = records.first() {
        let rate = metrics::completion_rate(first.achieved, first.target);
        println!("{}", metrics::CoverageReading::from_rate(rate).label());
    }
    if view.summary.avg_rate < 30.0 {
        println!("Mise en œuvre globale encore faible (hors paiements).");
    }
    println!();
    Ok(())
}

/// Page 3: Cumulative cash series across the realized distributions.
fn page_cumulative() -> Result<()> {
    let series = data::cash_series();
    let points = metrics::cumulative(&series);

    output::section("Cumulative Cash Analysis", Some("Distribution 1–3"));
    let rows = reports::cumulative_rows(&points);
    output::print_table(&rows);
    let file = "cumulative_cash.csv";
    output::write_csv(file, &rows)?;
    println!("(Full table exported to {file})\n");

    let total: f64 = series.iter().map(|p| p.reach).sum();
    println!(
        "Total Cumulative Cash Delivered (Distribution 1–3): {} MGA\n",
        util::format_number(total, 0)
    );
    Ok(())
}

/// Page 4: Intervention zones: beneficiary totals, geo join, district sums.
fn page_zones(cfg: &AppConfig) -> Result<()> {
    let stats = data::commune_stats();

    output::section("Zones d’Intervention & Bénéficiaires", None);
    let children: i64 = stats.iter().map(|s| s.children).sum();
    let disabled: i64 = stats.iter().map(|s| s.disabled).sum();
    let pregnant: i64 = stats.iter().map(|s| s.pregnant_women).sum();
    println!("Total Enfants Éligibles      : {}", util::format_int(children));
    println!("Total Personnes Handicapées  : {}", util::format_int(disabled));
    println!("Total Femmes Enceintes       : {}", util::format_int(pregnant));

    // A malformed boundary file is fatal for this page only.
    let outlines = geo::load_features(Path::new(ADM2_FILE), &geo::DISTRICT_SCHEMA)?;
    let communes = geo::load_features(Path::new(ADM3_FILE), &geo::COMMUNE_SCHEMA)?;

    let outline_style = geo::outline_style(&cfg.palette);
    let polygons = communes.iter().filter(|f| f.geometry.is_some()).count();
    println!(
        "\nDistrict outline layer: {} features, uniform style {} (weight {}, opacity {:.2})",
        outlines.len(),
        outline_style.line_color,
        outline_style.weight,
        outline_style.fill_opacity
    );
    println!("Commune layer: {} features, {} with polygon geometry", communes.len(), polygons);

    let groups = geo::district_groups(&stats);
    let classified = geo::classify_features(&communes, &stats, &groups);

    output::section("Communes ciblées", Some("join on ADM3_PCODE"));
    let rows = reports::zone_rows(&classified, &cfg.palette);
    output::print_table(&rows);
    let file = "zones_intervention.csv";
    output::write_csv(file, &rows)?;
    println!("(Full table exported to {file})\n");

    output::section("Résumé par District", None);
    output::print_table(&reports::district_summary_rows(&geo::summarize_by_district(&stats)));
    Ok(())
}

/// Page 5: DCT 2 weighted activity scorecard.
fn page_scorecard(cfg: &AppConfig) -> Result<()> {
    let groups = data::activity_groups();
    let card = metrics::score_activities(&groups, &cfg.weights)?;

    output::section("DCT 2 – Suivi Global des Indicateurs", Some("Activités 1, 2 et 3"));
    for group in &card.groups {
        println!("{} — Taux Global : {}%", group.name, group.group_rate);
        output::print_table(&reports::activity_rows(group));
    }

    println!("Score Global DCT 2 : {}%", card.composite);
    println!("{}\n", card.band.label());

    let summary = reports::score_summary(&card, &cfg.weights);
    let file = "dct2_score_summary.json";
    output::write_json(file, &summary)?;
    println!("(Score summary exported to {file})\n");
    Ok(())
}

fn main() {
    let cfg = AppConfig::default();
    loop {
        println!("DASHBOARD — {}", cfg.program_title);
        println!("[1] Distribution snapshot");
        println!("[2] Global project indicators");
        println!("[3] Cumulative cash analysis");
        println!("[4] Intervention zones & beneficiaries");
        println!("[5] DCT 2 activity scorecard");
        println!("[0] Exit\n");

        let result = match prompt("Enter choice: ").as_str() {
            "1" => page_snapshot(&cfg),
            "2" => page_indicators(),
            "3" => page_cumulative(),
            "4" => page_zones(&cfg),
            "5" => page_scorecard(&cfg),
            "0" => break,
            _ => {
                println!("Invalid choice. Please enter 0–5.\n");
                Ok(())
            }
        };
        if let Err(e) = result {
            // Page-local failure; other pages stay available.
            eprintln!("Page error: {e:#}\n");
        }
    }
    println!("Exiting the program.");
}
