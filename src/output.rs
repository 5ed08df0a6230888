use anyhow::Result;
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

pub fn write_csv<T: Serialize>(path: &str, rows: &[T]) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;
    for r in rows {
        wtr.serialize(r)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_json<T: Serialize>(path: &str, value: &T) -> Result<()> {
    let s = serde_json::to_string_pretty(value)?;
    std::fs::write(path, s)?;
    Ok(())
}

/// Section header in the style of the dashboard's page titles.
pub fn section(title: &str, note: Option<&str>) {
    println!("\n{title}");
    if let Some(n) = note {
        println!("({n})");
    }
    println!();
}

pub fn print_table<T>(rows: &[T])
where
    T: Tabled + Clone,
{
    if rows.is_empty() {
        println!("(no rows)\n");
        return;
    }
    let table = Table::new(rows.to_vec()).with(Style::markdown()).to_string();
    println!("{table}\n");
}
