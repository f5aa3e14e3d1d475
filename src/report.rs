/*!
 * Reporting functionality for ftpgen
 *
 * Renders the outcome of a generation and the list of configured profiles
 * as console tables using the tabled library.
 */

use std::time::Duration;

use chrono::{DateTime, Local};
use tabled::{
    settings::{object::Columns, Alignment, Modify, Padding, Style},
    Table, Tabled,
};

use crate::config::ProfileEntry;
use crate::writer::Generation;

/// Statistics of one generation run
#[derive(Debug, Clone)]
pub struct GenerationReport {
    /// Profile id
    pub profile_id: String,
    /// Output file path
    pub output_file: String,
    /// Whether the desktop fallback was used
    pub used_fallback: bool,
    /// Directories mirrored
    pub directories: usize,
    /// Files uploaded
    pub files: usize,
    /// Lines written
    pub lines_written: usize,
    /// Files moved in from additional folders
    pub files_merged: usize,
    /// Files left in additional folders because they already existed
    pub files_skipped: usize,
    /// Merge failure messages
    pub merge_failures: Vec<String>,
    /// Time taken
    pub duration: Duration,
    /// When the file was generated
    pub generated_at: DateTime<Local>,
}

impl GenerationReport {
    /// Build a report from a finished generation
    pub fn new(profile_id: &str, generation: &Generation, duration: Duration) -> Self {
        Self {
            profile_id: profile_id.to_string(),
            output_file: generation.output_path.display().to_string(),
            used_fallback: generation.used_fallback,
            directories: generation.directories,
            files: generation.files,
            lines_written: generation.lines_written,
            files_merged: generation.merge.moved.len(),
            files_skipped: generation.merge.skipped.len(),
            merge_failures: generation
                .merge
                .failures
                .iter()
                .map(|e| e.to_string())
                .collect(),
            duration,
            generated_at: Local::now(),
        }
    }
}

/// Report generator
pub struct Reporter;

impl Reporter {
    /// Create a new reporter
    pub fn new() -> Self {
        Self
    }

    /// Print the generation report to stdout
    pub fn print_report(&self, report: &GenerationReport) {
        println!("\n{}", self.generate_report(report));
    }

    /// Print the profile listing to stdout
    pub fn print_profiles(&self, entries: &[ProfileEntry]) {
        println!("{}", self.create_profiles_table(entries));
    }

    /// Generate the report string for a generation
    pub fn generate_report(&self, report: &GenerationReport) -> String {
        let summary = self.create_summary_table(report);

        if report.merge_failures.is_empty() {
            format!("✅  COMMAND FILE GENERATED\n{}", summary)
        } else {
            format!(
                "✅  COMMAND FILE GENERATED\n{}\n\n⚠️  MERGE FAILURES\n{}",
                summary,
                report.merge_failures.join("\n")
            )
        }
    }

    // Create a summary table using the tabled crate
    fn create_summary_table(&self, report: &GenerationReport) -> String {
        #[derive(Tabled)]
        struct SummaryRow {
            #[tabled(rename = "Metric")]
            key: &'static str,

            #[tabled(rename = "Value")]
            value: String,
        }

        let output_value = if report.used_fallback {
            format!("{} (fallback)", report.output_file)
        } else {
            report.output_file.clone()
        };

        let rows = vec![
            SummaryRow {
                key: "🖥️ Profile",
                value: report.profile_id.clone(),
            },
            SummaryRow {
                key: "📂 Output File",
                value: output_value,
            },
            SummaryRow {
                key: "📁 Directories",
                value: report.directories.to_string(),
            },
            SummaryRow {
                key: "📄 Files",
                value: report.files.to_string(),
            },
            SummaryRow {
                key: "📝 Command Lines",
                value: report.lines_written.to_string(),
            },
            SummaryRow {
                key: "🔀 Merged Files",
                value: format!(
                    "{} moved / {} kept / {} failed",
                    report.files_merged,
                    report.files_skipped,
                    report.merge_failures.len()
                ),
            },
            SummaryRow {
                key: "⏱️ Process Time",
                value: format!("{:.4?}", report.duration),
            },
            SummaryRow {
                key: "🕒 Generated",
                value: report.generated_at.format("%Y-%m-%d %H:%M:%S").to_string(),
            },
        ];

        styled(Table::new(rows))
    }

    // Create the profile listing table; passwords are never shown
    fn create_profiles_table(&self, entries: &[ProfileEntry]) -> String {
        #[derive(Tabled)]
        struct ProfileRow {
            #[tabled(rename = "Id")]
            id: String,

            #[tabled(rename = "Address")]
            address: String,

            #[tabled(rename = "User")]
            user: String,

            #[tabled(rename = "Local Directory")]
            local_directory: String,

            #[tabled(rename = "Command File")]
            command_file: String,

            #[tabled(rename = "Extra Folders")]
            additional: usize,
        }

        let rows: Vec<ProfileRow> = entries
            .iter()
            .map(|entry| ProfileRow {
                id: entry.id.clone(),
                address: entry.address.clone(),
                user: entry.user.clone(),
                local_directory: entry.local_directory.clone(),
                command_file: entry.output_file_name.clone(),
                additional: entry.additional_folders.len(),
            })
            .collect();

        styled(Table::new(rows))
    }
}

impl Default for Reporter {
    fn default() -> Self {
        Self::new()
    }
}

fn styled(mut table: Table) -> String {
    table
        .with(Style::rounded())
        .with(Padding::new(1, 1, 0, 0))
        .with(Modify::new(Columns::new(..)).with(Alignment::left()));

    table.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report() -> GenerationReport {
        GenerationReport {
            profile_id: "prod".to_string(),
            output_file: "/srv/out/prod.ftp".to_string(),
            used_fallback: false,
            directories: 3,
            files: 7,
            lines_written: 25,
            files_merged: 2,
            files_skipped: 1,
            merge_failures: vec![],
            duration: Duration::from_millis(12),
            generated_at: Local::now(),
        }
    }

    #[test]
    fn test_summary_contains_counts() {
        let text = Reporter::new().generate_report(&report());

        assert!(text.contains("/srv/out/prod.ftp"));
        assert!(text.contains("2 moved / 1 kept / 0 failed"));
        assert!(!text.contains("(fallback)"));
        assert!(!text.contains("MERGE FAILURES"));
    }

    #[test]
    fn test_summary_flags_fallback_and_failures() {
        let mut report = report();
        report.used_fallback = true;
        report.merge_failures = vec!["Failed to merge /x: denied".to_string()];

        let text = Reporter::new().generate_report(&report);

        assert!(text.contains("(fallback)"));
        assert!(text.contains("MERGE FAILURES"));
        assert!(text.contains("Failed to merge /x: denied"));
    }

    #[test]
    fn test_profiles_table_hides_password() {
        let entry = ProfileEntry {
            id: "prod".to_string(),
            address: "10.0.0.5".to_string(),
            user: "deploy".to_string(),
            encoded_password: "c2VjcmV0".to_string(),
            local_directory: "/srv/site".to_string(),
            output_file_name: "prod.ftp".to_string(),
            output_directory: "/srv/out".to_string(),
            additional_folders: vec![],
        };

        let text = Reporter::new().create_profiles_table(&[entry]);

        assert!(text.contains("10.0.0.5"));
        assert!(!text.contains("c2VjcmV0"));
    }
}
