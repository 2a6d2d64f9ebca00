use tabled::settings::object::Rows;
use tabled::settings::{Color, Style};
use tabled::{Table, Tabled};
use ttrack_core::{PublicHoliday, Report, Timelog};

#[derive(Tabled)]
struct SummaryRow {
    #[tabled(rename = "Metric")]
    metric: String,
    #[tabled(rename = "Value")]
    value: String,
}

#[derive(Tabled)]
struct WarningRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Warning")]
    warning: String,
}

#[derive(Tabled)]
struct TimelogRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Start")]
    start: String,
    #[tabled(rename = "Stop")]
    stop: String,
    #[tabled(rename = "Reason")]
    reason: String,
    #[tabled(rename = "Location")]
    location: String,
}

#[derive(Tabled)]
struct HolidayRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Day")]
    day: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Half day")]
    half_day: String,
}

fn render<T: Tabled>(rows: Vec<T>) -> String {
    let mut table = Table::new(rows);
    table.with(Style::modern()).modify(Rows::first(), Color::FG_CYAN);
    table.to_string()
}

fn summary(metric: &str, value: impl ToString) -> SummaryRow {
    SummaryRow {
        metric: metric.to_string(),
        value: value.to_string(),
    }
}

pub fn show_report(report: &Report) {
    println!(
        "\n\x1b[1;36mReport {}\x1b[0m ({} - {})",
        report.year,
        report.first_day.format("%Y-%m-%d"),
        report.last_day.format("%Y-%m-%d")
    );

    let mut rows = vec![
        summary("Days", report.days),
        summary("Work days", report.work_days),
        summary("Days on weekend", report.days_on_weekend),
        summary("Public holidays", report.public_holidays),
        summary("Public holidays on workdays", report.public_holidays_on_workdays),
    ];
    for (reason, days) in &report.work_days_per_reason {
        rows.push(summary(&format!("Days with {}", reason), days));
    }
    for (location, days) in &report.works_days_per_location {
        rows.push(summary(&format!("Work days at {}", location), days));
    }
    println!("{}", render(rows));

    if report.warnings.is_empty() {
        return;
    }

    let mut warnings = Vec::new();
    for (date, messages) in &report.warnings {
        for (i, message) in messages.iter().enumerate() {
            // Date column: Only show on first row of the day group
            warnings.push(WarningRow {
                date: if i == 0 { date.clone() } else { String::new() },
                warning: message.clone(),
            });
        }
    }
    println!("\n\x1b[1;33mWarnings\x1b[0m");
    println!("{}", render(warnings));
}

pub fn show_timelogs(timelogs: &[Timelog]) {
    if timelogs.is_empty() {
        println!("No timelogs found.");
        return;
    }

    let rows: Vec<TimelogRow> = timelogs
        .iter()
        .map(|t| TimelogRow {
            id: t.id.to_string()[..8].to_string(),
            start: t.start.format("%Y-%m-%d %H:%M").to_string(),
            stop: if t.is_open() {
                "-".to_string()
            } else {
                t.stop.map(|s| s.format("%Y-%m-%d %H:%M").to_string()).unwrap_or_default()
            },
            reason: t.reason.to_string(),
            location: t.location.to_string(),
        })
        .collect();
    println!("{}", render(rows));
}

pub fn show_holidays(holidays: &[PublicHoliday]) {
    if holidays.is_empty() {
        println!("No public holidays found.");
        return;
    }

    let rows: Vec<HolidayRow> = holidays
        .iter()
        .map(|h| HolidayRow {
            id: h.id.to_string()[..8].to_string(),
            day: h.date().format("%Y-%m-%d (%a)").to_string(),
            name: h.name.clone(),
            half_day: if h.half_day { "yes" } else { "no" }.to_string(),
        })
        .collect();
    println!("{}", render(rows));
}
