//! Report rendering.
//!
//! The report value itself carries no serialization format; these writers
//! are the rendering collaborators. JSON is the machine interface,
//! Markdown suits files, Terminal is the default human view.

use crate::core::AnalysisReport;
use colored::*;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Markdown,
    Terminal,
}

pub trait OutputWriter {
    fn write_report(&mut self, report: &AnalysisReport) -> anyhow::Result<()>;
}

pub struct JsonWriter<W: Write> {
    writer: W,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for JsonWriter<W> {
    fn write_report(&mut self, report: &AnalysisReport) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(report)?;
        self.writer.write_all(json.as_bytes())?;
        self.writer.write_all(b"\n")?;
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
}

impl<W: Write> OutputWriter for MarkdownWriter<W> {
    fn write_report(&mut self, report: &AnalysisReport) -> anyhow::Result<()> {
        self.write_header(report)?;
        self.write_summary(report)?;
        self.write_lines(report)?;
        self.write_structure(report)?;
        self.write_distributions(report)?;
        self.write_dependencies(report)?;
        self.write_diagnostics(report)?;
        Ok(())
    }
}

impl<W: Write> MarkdownWriter<W> {
    fn write_header(&mut self, report: &AnalysisReport) -> anyhow::Result<()> {
        writeln!(self.writer, "# Source Metrics Report")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "Project: {}", report.project_path.display())?;
        writeln!(
            self.writer,
            "Generated: {}",
            report.timestamp.format("%Y-%m-%d %H:%M:%S UTC")
        )?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_summary(&mut self, report: &AnalysisReport) -> anyhow::Result<()> {
        writeln!(self.writer, "## Summary")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "| Metric | Value |")?;
        writeln!(self.writer, "|--------|-------|")?;
        writeln!(self.writer, "| Files analyzed | {} |", report.summary.total_files)?;
        writeln!(self.writer, "| Total lines | {} |", report.summary.total_lines)?;
        writeln!(self.writer, "| Methods | {} |", report.summary.total_methods)?;
        writeln!(
            self.writer,
            "| Classes/modules | {} |",
            report.summary.total_classes
        )?;
        writeln!(
            self.writer,
            "| Average complexity | {:.2} |",
            report.summary.average_complexity
        )?;
        if let Some(ext) = &report.summary.most_common_extension {
            writeln!(self.writer, "| Most common extension | {ext} |")?;
        }
        if let Some(dir) = &report.summary.largest_directory {
            writeln!(self.writer, "| Largest directory | {} |", dir.display())?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_lines(&mut self, report: &AnalysisReport) -> anyhow::Result<()> {
        writeln!(self.writer, "## Lines")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "- Total: {}", report.loc.total_lines)?;
        writeln!(self.writer, "- Code: {}", report.loc.code_lines)?;
        writeln!(
            self.writer,
            "- Comments: {} ({:.2}%)",
            report.loc.comment_lines, report.loc.comment_ratio
        )?;
        writeln!(self.writer, "- Blank: {}", report.loc.blank_lines)?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_structure(&mut self, report: &AnalysisReport) -> anyhow::Result<()> {
        writeln!(self.writer, "## Structure")?;
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "- Average method length: {:.1} lines",
            report.structure.average_method_length
        )?;
        writeln!(
            self.writer,
            "- Average class size: {:.1} lines",
            report.structure.average_class_size
        )?;
        writeln!(
            self.writer,
            "- Max nesting depth: {}",
            report.nesting.max_nesting_depth
        )?;
        writeln!(
            self.writer,
            "- Average nesting depth: {:.2}",
            report.nesting.average_nesting_depth
        )?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_distributions(&mut self, report: &AnalysisReport) -> anyhow::Result<()> {
        if !report.file_types.is_empty() {
            writeln!(self.writer, "## File Types")?;
            writeln!(self.writer)?;
            for entry in &report.file_types {
                writeln!(self.writer, "- {}: {}", entry.extension, entry.count)?;
            }
            writeln!(self.writer)?;
        }

        writeln!(self.writer, "## Size Buckets")?;
        writeln!(self.writer)?;
        let buckets = &report.size_buckets;
        writeln!(self.writer, "- tiny (<1 KiB): {}", buckets.tiny)?;
        writeln!(self.writer, "- small (<10 KiB): {}", buckets.small)?;
        writeln!(self.writer, "- medium (<100 KiB): {}", buckets.medium)?;
        writeln!(self.writer, "- large (<1 MiB): {}", buckets.large)?;
        writeln!(self.writer, "- huge (>=1 MiB): {}", buckets.huge)?;
        writeln!(self.writer)?;

        if !report.directories.is_empty() {
            writeln!(self.writer, "## Top Directories")?;
            writeln!(self.writer)?;
            for entry in report.directories.iter().take(5) {
                writeln!(
                    self.writer,
                    "- {}: {} files",
                    entry.directory.display(),
                    entry.count
                )?;
            }
            writeln!(self.writer)?;
        }

        if !report.largest_files.is_empty() {
            writeln!(self.writer, "## Largest Files")?;
            writeln!(self.writer)?;
            for entry in &report.largest_files {
                writeln!(
                    self.writer,
                    "- {} ({} bytes)",
                    entry.path.display(),
                    entry.size
                )?;
            }
            writeln!(self.writer)?;
        }
        Ok(())
    }

    fn write_dependencies(&mut self, report: &AnalysisReport) -> anyhow::Result<()> {
        let deps = &report.dependencies;
        if deps.manifests_analyzed == 0 {
            return Ok(());
        }
        writeln!(self.writer, "## Dependencies")?;
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "{} manifest(s), {} runtime gem(s), {} development gem(s)",
            deps.manifests_analyzed,
            deps.runtime_gems.len(),
            deps.development_gems.len()
        )?;
        for gem in &deps.runtime_gems {
            writeln!(self.writer, "- {gem}")?;
        }
        for gem in &deps.development_gems {
            writeln!(self.writer, "- {gem} (development)")?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_diagnostics(&mut self, report: &AnalysisReport) -> anyhow::Result<()> {
        if report.diagnostics.files_skipped.is_empty() {
            return Ok(());
        }
        writeln!(self.writer, "## Skipped Files")?;
        writeln!(self.writer)?;
        for path in &report.diagnostics.files_skipped {
            writeln!(self.writer, "- {}", path.display())?;
        }
        writeln!(self.writer)?;
        Ok(())
    }
}

pub struct TerminalWriter;

impl Default for TerminalWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalWriter {
    pub fn new() -> Self {
        Self
    }
}

impl OutputWriter for TerminalWriter {
    fn write_report(&mut self, report: &AnalysisReport) -> anyhow::Result<()> {
        print_header(report);
        print_lines(report);
        print_structure(report);
        print_complexity(report);
        print_diagnostics(report);
        Ok(())
    }
}

fn print_header(report: &AnalysisReport) {
    println!("{}", "Source Metrics Report".bold().blue());
    println!("{}", "=====================".blue());
    println!("  Project: {}", report.project_path.display());
    println!("  Files analyzed: {}", report.summary.total_files);
    println!();
}

fn print_lines(report: &AnalysisReport) {
    println!("{}", "Lines".bold());
    println!("  Total: {}", report.loc.total_lines);
    println!("  Code: {}", report.loc.code_lines);
    println!(
        "  Comments: {} ({:.2}%)",
        report.loc.comment_lines, report.loc.comment_ratio
    );
    println!("  Blank: {}", report.loc.blank_lines);
    println!();
}

fn print_structure(report: &AnalysisReport) {
    println!("{}", "Structure".bold());
    println!(
        "  Methods: {} (avg {:.1} lines)",
        report.structure.total_methods, report.structure.average_method_length
    );
    println!(
        "  Classes/modules: {} (avg {:.1} lines)",
        report.structure.total_classes, report.structure.average_class_size
    );
    println!(
        "  Nesting: max {}, avg {:.2}",
        report.nesting.max_nesting_depth, report.nesting.average_nesting_depth
    );
    println!();
}

fn print_complexity(report: &AnalysisReport) {
    let average = report.complexity.average_complexity;
    let display = format!("{average:.2}");
    let colored_average = match average {
        a if a < 5.0 => display.green(),
        a if a < 10.0 => display.yellow(),
        _ => display.red(),
    };
    println!("{}", "Complexity".bold());
    println!(
        "  Average: {} (total {} over {} files)",
        colored_average, report.complexity.total_complexity, report.complexity.files_analyzed
    );
    println!();
}

fn print_diagnostics(report: &AnalysisReport) {
    let skipped = &report.diagnostics.files_skipped;
    if skipped.is_empty() {
        return;
    }
    println!(
        "{} {} file(s) skipped:",
        "warning:".yellow().bold(),
        skipped.len()
    );
    for path in skipped {
        println!("  - {}", path.display());
    }
    println!();
}

/// Stdout writer for the chosen format.
pub fn create_writer(format: OutputFormat) -> Box<dyn OutputWriter> {
    match format {
        OutputFormat::Json => Box::new(JsonWriter::new(std::io::stdout())),
        OutputFormat::Markdown => Box::new(MarkdownWriter::new(std::io::stdout())),
        OutputFormat::Terminal => Box::new(TerminalWriter::new()),
    }
}

/// Write the report to a file. Terminal colors make no sense on disk, so
/// that format falls back to Markdown.
pub fn write_report_to_file(
    path: &Path,
    format: OutputFormat,
    report: &AnalysisReport,
) -> anyhow::Result<()> {
    let file = BufWriter::new(File::create(path)?);
    let mut writer: Box<dyn OutputWriter> = match format {
        OutputFormat::Json => Box::new(JsonWriter::new(file)),
        _ => Box::new(MarkdownWriter::new(file)),
    };
    writer.write_report(report)
}
