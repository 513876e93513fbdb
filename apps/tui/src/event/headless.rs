use canon_core::{
    CountMethod, Continent, Dashboard, DataWarning, DerivedCountryEntry, Filters, Summary,
};
use canon_tui::{load_store, Settings};
use chrono::{DateTime, Local};
use color_eyre::Result;
use serde::Serialize;
use std::fmt::{self, Write as _};

/// Run the application in headless mode (no UI)
pub async fn run_headless(settings: &Settings, json: bool) -> Result<()> {
    let store = load_store(&settings.data_path).await?;

    let mut dashboard = Dashboard::new(settings.filters, settings.top_n);
    dashboard.load_finished(Ok(store));

    let report = build_report(&dashboard, settings, Local::now());
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", format_report(&report)?);
    }

    Ok(())
}

#[derive(Debug, Serialize)]
struct HeadlessReport {
    generated: String,
    data_path: String,
    filters: Filters,
    summary: Summary,
    method: CountMethod,
    top_countries: Vec<DerivedCountryEntry>,
    continents: Vec<HeadlessContinent>,
    warnings: Vec<DataWarning>,
}

#[derive(Debug, Serialize)]
struct HeadlessContinent {
    continent: Continent,
    countries: usize,
    total_films: u64,
    percent_of_total: f64,
}

fn build_report(
    dashboard: &Dashboard,
    settings: &Settings,
    generated: DateTime<Local>,
) -> HeadlessReport {
    let continents = dashboard
        .groups()
        .iter()
        .zip(dashboard.continent_shares())
        .map(|(group, share)| HeadlessContinent {
            continent: group.continent,
            countries: group.countries.len(),
            total_films: share.total_films,
            percent_of_total: share.percent_of_total,
        })
        .collect();

    HeadlessReport {
        generated: generated.to_rfc3339(),
        data_path: settings.data_path.display().to_string(),
        filters: dashboard.filters(),
        summary: dashboard.summary(),
        method: dashboard.derived().method,
        top_countries: dashboard.chart_rows().into_iter().cloned().collect(),
        continents,
        warnings: dashboard
            .store()
            .map(|store| store.warnings().to_vec())
            .unwrap_or_default(),
    }
}

fn format_report(report: &HeadlessReport) -> Result<String, fmt::Error> {
    let mut out = String::new();

    writeln!(out, "\nFilms by Country of Origin")?;
    writeln!(out, "==========================")?;
    writeln!(out, "{}", report.summary.headline())?;
    writeln!(out, "Filters: {}", report.summary.filters)?;
    if report.method == CountMethod::Estimated {
        writeln!(out, "Note: counts estimated from poll totals")?;
    }

    writeln!(out, "\nTop Countries:")?;
    for (rank, entry) in report.top_countries.iter().enumerate() {
        writeln!(
            out,
            "{:>3}. {} | {} | {} | {:.1}%",
            rank + 1,
            entry.name,
            entry.continent,
            entry.film_count,
            entry.percent_of_total
        )?;
    }

    writeln!(out, "\nBy Continent:")?;
    for continent in &report.continents {
        writeln!(
            out,
            "- {}: {} films from {} countries ({:.1}%)",
            continent.continent,
            continent.total_films,
            continent.countries,
            continent.percent_of_total
        )?;
    }

    if !report.warnings.is_empty() {
        writeln!(out, "\nData Warnings:")?;
        for warning in &report.warnings {
            writeln!(out, "- {warning}")?;
        }
    }

    writeln!(out, "\nGenerated {}", report.generated)?;
    Ok(out)
}
