//! Report writers: JSON for export tooling, markdown for docs, and a
//! colored table view for the terminal.

use colored::Colorize;
use comfy_table::{presets, Cell, Table};
use std::io::Write;

use crate::core::types::AnalyticsReport;
use crate::formatting::{format_duration_hours, format_money, format_percent_change, ColorMode};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Markdown,
    Terminal,
}

pub trait ReportWriter {
    fn write_report(&mut self, report: &AnalyticsReport) -> anyhow::Result<()>;
}

pub struct JsonWriter<W: Write> {
    writer: W,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> ReportWriter for JsonWriter<W> {
    fn write_report(&mut self, report: &AnalyticsReport) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(report)?;
        self.writer.write_all(json.as_bytes())?;
        writeln!(self.writer)?;
        Ok(())
    }
}

pub struct MarkdownWriter<W: Write> {
    writer: W,
}

impl<W: Write> MarkdownWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    fn write_header(&mut self, report: &AnalyticsReport) -> anyhow::Result<()> {
        writeln!(self.writer, "# Expert Dashboard Report")?;
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "Generated: {}",
            report.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
        )?;
        writeln!(
            self.writer,
            "Records: {} questions, {} answers",
            report.question_count, report.answer_count
        )?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_summary(&mut self, report: &AnalyticsReport) -> anyhow::Result<()> {
        let m = &report.metrics;
        writeln!(self.writer, "## Summary")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "| Metric | Value |")?;
        writeln!(self.writer, "|--------|-------|")?;
        writeln!(
            self.writer,
            "| Revenue (this month) | {} |",
            format_money(m.this_month_revenue)
        )?;
        writeln!(
            self.writer,
            "| Revenue trend | {} |",
            format_percent_change(m.revenue_change)
        )?;
        writeln!(
            self.writer,
            "| Avg response time | {} |",
            format_duration_hours(m.avg_response_time_hours)
        )?;
        writeln!(self.writer, "| Avg rating | {:.1} |", m.avg_rating)?;
        writeln!(self.writer, "| Pending | {} |", m.pending_count)?;
        writeln!(self.writer, "| Urgent | {} |", m.urgent_count)?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_distributions(&mut self, report: &AnalyticsReport) -> anyhow::Result<()> {
        writeln!(self.writer, "## Response Times")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "| Bucket | Count |")?;
        writeln!(self.writer, "|--------|-------|")?;
        for bucket in &report.response_times.buckets {
            writeln!(self.writer, "| {} | {} |", bucket.label, bucket.count)?;
        }
        writeln!(self.writer)?;

        writeln!(self.writer, "## Ratings")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "| Stars | Count | Share |")?;
        writeln!(self.writer, "|-------|-------|-------|")?;
        for row in &report.ratings.distribution {
            writeln!(
                self.writer,
                "| {} | {} | {:.1}% |",
                row.stars, row.count, row.percentage
            )?;
        }
        writeln!(self.writer)?;

        writeln!(self.writer, "## Tiers")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "| Tier | Answered | Avg response |")?;
        writeln!(self.writer, "|------|----------|--------------|")?;
        writeln!(
            self.writer,
            "| Quick Consult | {} | {} |",
            report.tiers.quick.answered_count,
            format_duration_hours(report.tiers.quick.avg_response_time_hours)
        )?;
        writeln!(
            self.writer,
            "| Deep Dive | {} | {} |",
            report.tiers.deep_dive.answered_count,
            format_duration_hours(report.tiers.deep_dive.avg_response_time_hours)
        )?;
        Ok(())
    }
}

impl<W: Write> ReportWriter for MarkdownWriter<W> {
    fn write_report(&mut self, report: &AnalyticsReport) -> anyhow::Result<()> {
        self.write_header(report)?;
        self.write_summary(report)?;
        self.write_distributions(report)?;
        Ok(())
    }
}

pub struct TerminalWriter<W: Write> {
    writer: W,
    use_color: bool,
}

impl<W: Write> TerminalWriter<W> {
    pub fn new(writer: W, color: ColorMode) -> Self {
        Self {
            writer,
            use_color: color.should_use_color(),
        }
    }

    fn heading(&self, text: &str) -> String {
        if self.use_color {
            text.bold().cyan().to_string()
        } else {
            text.to_string()
        }
    }

    fn trend(&self, percent: f64) -> String {
        let formatted = format_percent_change(percent);
        if !self.use_color {
            return formatted;
        }
        if percent >= 0.0 {
            formatted.green().to_string()
        } else {
            formatted.red().to_string()
        }
    }

    fn urgent(&self, count: usize) -> String {
        if self.use_color && count > 0 {
            count.to_string().red().bold().to_string()
        } else {
            count.to_string()
        }
    }
}

impl<W: Write> ReportWriter for TerminalWriter<W> {
    fn write_report(&mut self, report: &AnalyticsReport) -> anyhow::Result<()> {
        let m = &report.metrics;

        writeln!(self.writer, "{}", self.heading("DASHBOARD"))?;
        let mut summary = Table::new();
        summary.load_preset(presets::UTF8_FULL_CONDENSED);
        summary.set_header(vec!["Metric", "Value"]);
        summary.add_row(vec![
            Cell::new("Revenue (this month)"),
            Cell::new(format_money(m.this_month_revenue)),
        ]);
        summary.add_row(vec![Cell::new("Revenue trend"), Cell::new(self.trend(m.revenue_change))]);
        summary.add_row(vec![
            Cell::new("Avg response time"),
            Cell::new(format_duration_hours(m.avg_response_time_hours)),
        ]);
        summary.add_row(vec![
            Cell::new("Avg rating"),
            Cell::new(format!("{:.1} / 5", m.avg_rating)),
        ]);
        summary.add_row(vec![Cell::new("Pending"), Cell::new(m.pending_count)]);
        summary.add_row(vec![Cell::new("Urgent"), Cell::new(self.urgent(m.urgent_count))]);
        writeln!(self.writer, "{summary}")?;
        writeln!(self.writer)?;

        writeln!(
            self.writer,
            "{} ({} answered)",
            self.heading("RESPONSE TIMES"),
            report.response_times.total_answered
        )?;
        let mut histogram = Table::new();
        histogram.load_preset(presets::UTF8_FULL_CONDENSED);
        histogram.set_header(vec!["Bucket", "Count"]);
        for bucket in &report.response_times.buckets {
            histogram.add_row(vec![Cell::new(&bucket.label), Cell::new(bucket.count)]);
        }
        writeln!(self.writer, "{histogram}")?;
        writeln!(self.writer)?;

        writeln!(
            self.writer,
            "{} ({} ratings, avg {:.1})",
            self.heading("RATINGS"),
            report.ratings.total_ratings,
            report.ratings.avg_rating
        )?;
        let mut ratings = Table::new();
        ratings.load_preset(presets::UTF8_FULL_CONDENSED);
        ratings.set_header(vec!["Stars", "Count", "Share"]);
        for row in &report.ratings.distribution {
            ratings.add_row(vec![
                Cell::new(format!("{}★", row.stars)),
                Cell::new(row.count),
                Cell::new(format!("{:.1}%", row.percentage)),
            ]);
        }
        writeln!(self.writer, "{ratings}")?;
        writeln!(self.writer)?;

        writeln!(self.writer, "{}", self.heading("TIERS"))?;
        let mut tiers = Table::new();
        tiers.load_preset(presets::UTF8_FULL_CONDENSED);
        tiers.set_header(vec!["Tier", "Answered", "Avg response"]);
        tiers.add_row(vec![
            Cell::new("Quick Consult"),
            Cell::new(report.tiers.quick.answered_count),
            Cell::new(format_duration_hours(report.tiers.quick.avg_response_time_hours)),
        ]);
        tiers.add_row(vec![
            Cell::new("Deep Dive"),
            Cell::new(report.tiers.deep_dive.answered_count),
            Cell::new(format_duration_hours(
                report.tiers.deep_dive.avg_response_time_hours,
            )),
        ]);
        writeln!(self.writer, "{tiers}")?;

        Ok(())
    }
}

/// Create a report writer for the requested format.
pub fn create_writer<W: Write + 'static>(
    writer: W,
    format: OutputFormat,
    color: ColorMode,
) -> Box<dyn ReportWriter> {
    match format {
        OutputFormat::Json => Box::new(JsonWriter::new(writer)),
        OutputFormat::Markdown => Box::new(MarkdownWriter::new(writer)),
        OutputFormat::Terminal => Box::new(TerminalWriter::new(writer, color)),
    }
}
