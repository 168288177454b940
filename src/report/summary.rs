//! Cleaning summary shown at the end of a run

use std::time::Duration;

use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, Color, Table};
use console::style;

use crate::pipeline::CleaningCounts;

/// Row counts, metric counts and step timings for one run
#[derive(Debug, Default)]
pub struct CleaningSummary {
    pub rows_in: usize,
    pub rows_out: usize,
    pub counts: CleaningCounts,
    pub tenure_mean: f64,
    pub reference_time: Duration,
    pub clean_time: Duration,
    pub scoring_time: Option<Duration>,
}

impl CleaningSummary {
    pub fn new(rows_in: usize, rows_out: usize, counts: CleaningCounts, tenure_mean: f64) -> Self {
        Self {
            rows_in,
            rows_out,
            counts,
            tenure_mean,
            ..Default::default()
        }
    }

    pub fn set_reference_time(&mut self, elapsed: Duration) {
        self.reference_time = elapsed;
    }

    pub fn set_clean_time(&mut self, elapsed: Duration) {
        self.clean_time = elapsed;
    }

    pub fn set_scoring_time(&mut self, elapsed: Duration) {
        self.scoring_time = Some(elapsed);
    }

    pub fn rows_dropped(&self) -> usize {
        self.rows_in.saturating_sub(self.rows_out)
    }

    fn count_cell(count: usize) -> Cell {
        Cell::new(count).fg(if count == 0 { Color::White } else { Color::Yellow })
    }

    pub fn display(&self) {
        println!();
        println!(
            "    {} {}",
            style("📋").cyan(),
            style("CLEANING SUMMARY").white().bold()
        );
        println!("    {}", style("─".repeat(50)).dim());
        println!();

        let mut table = Table::new();
        table.load_preset(UTF8_FULL_CONDENSED);
        table.set_header(vec![
            Cell::new("Metric").add_attribute(Attribute::Bold),
            Cell::new("Value").add_attribute(Attribute::Bold),
        ]);

        table.add_row(vec![Cell::new("📁 Input Rows"), Cell::new(self.rows_in)]);
        table.add_row(vec![
            Cell::new("🗑️  Dropped (Invalid Contract)"),
            Cell::new(self.counts.invalid_contract_rows).fg(
                if self.counts.invalid_contract_rows == 0 {
                    Color::White
                } else {
                    Color::Red
                },
            ),
        ]);
        table.add_row(vec![
            Cell::new("💲 TotalCharges Defaulted"),
            Self::count_cell(self.counts.total_charges_defaulted),
        ]);
        table.add_row(vec![
            Cell::new("💲 TotalCharges Patched"),
            Self::count_cell(self.counts.total_charges_patched),
        ]);
        table.add_row(vec![
            Cell::new("📞 PhoneService Imputed"),
            Self::count_cell(self.counts.phone_service_imputed),
        ]);
        table.add_row(vec![
            Cell::new("📅 Tenure Imputed (Missing)"),
            Self::count_cell(self.counts.tenure_imputed_mean),
        ]);
        table.add_row(vec![
            Cell::new("📅 Tenure Imputed (Empty)"),
            Self::count_cell(self.counts.tenure_imputed_empty),
        ]);
        table.add_row(vec![
            Cell::new("📐 Reference Tenure Mean"),
            Cell::new(format!("{:.4}", self.tenure_mean)),
        ]);
        table.add_row(vec![
            Cell::new("✅ Output Rows"),
            Cell::new(self.rows_out)
                .fg(Color::Green)
                .add_attribute(Attribute::Bold),
        ]);

        for line in table.to_string().lines() {
            println!("    {}", line);
        }

        println!();
        println!(
            "      {} reference {:.2?} · clean {:.2?}{}",
            style("⏱").dim(),
            self.reference_time,
            self.clean_time,
            self.scoring_time
                .map(|t| format!(" · score {:.2?}", t))
                .unwrap_or_default()
        );
    }
}
