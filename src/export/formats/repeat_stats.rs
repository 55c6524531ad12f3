use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

use crate::intervals::{IntervalAggregate, RawOutputPaths};
use crate::stats::SummaryStatistics;

/// Statistics for one intron category, or the reason they could not be
/// computed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CategoryReport {
    Computed(SummaryStatistics),
    Unavailable { count: usize, reason: String },
}

impl CategoryReport {
    pub fn from_values(values: &[i64]) -> Self {
        match SummaryStatistics::from_values(values) {
            Ok(stats) => CategoryReport::Computed(stats),
            Err(e) => CategoryReport::Unavailable {
                count: values.len(),
                reason: e.to_string(),
            },
        }
    }

    /// Titled console section for this category.
    pub fn section<'a>(&'a self, title: &'a str) -> CategorySection<'a> {
        CategorySection {
            title,
            report: self,
        }
    }
}

pub struct CategorySection<'a> {
    title: &'a str,
    report: &'a CategoryReport,
}

impl fmt::Display for CategorySection<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "\n{}:", self.title)?;
        match self.report {
            CategoryReport::Computed(s) => {
                writeln!(f, "Count: {}", s.count)?;
                writeln!(f, "Max: {}", s.max)?;
                writeln!(f, "Min: {}", s.min)?;
                writeln!(f, "Mean: {:.2}", s.mean)?;
                writeln!(f, "Median: {:.2}", s.median)?;
                writeln!(f, "Mode: {}", s.mode)?;
                writeln!(f, "GMean: {}", format_optional(s.geometric_mean))?;
                writeln!(f, "HMean: {}", format_optional(s.harmonic_mean))
            }
            CategoryReport::Unavailable { count, reason } => {
                writeln!(f, "Count: {count}")?;
                writeln!(f, "Statistics unavailable: {reason}")
            }
        }
    }
}

fn format_optional(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v:.2}"),
        None => "n/a".to_string(),
    }
}

/// Everything reported for one interval file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileReport {
    pub input: PathBuf,
    pub intron_count: u64,
    pub repeat_count: u64,
    pub repeat_length: i64,
    /// `None` when the file has no introns
    pub repeats_per_intron: Option<f64>,
    pub introns_with_repeats: i64,
    pub non_repeat: CategoryReport,
    pub repeat: CategoryReport,
    pub outputs: RawOutputPaths,
}

impl FileReport {
    pub fn from_aggregate(input: &Path, aggregate: &IntervalAggregate, outputs: RawOutputPaths) -> Self {
        Self {
            input: input.to_path_buf(),
            intron_count: aggregate.intron_count,
            repeat_count: aggregate.repeat_count,
            repeat_length: aggregate.repeat_length,
            repeats_per_intron: aggregate.repeats_per_intron().ok(),
            introns_with_repeats: aggregate.introns_with_repeats(),
            non_repeat: CategoryReport::from_values(&aggregate.non_rep_intron_sizes),
            repeat: CategoryReport::from_values(&aggregate.rep_intron_sizes),
            outputs,
        }
    }
}

/// Console summary block.
impl fmt::Display for FileReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Number of introns: {}", self.intron_count)?;
        writeln!(f, "Repeat count: {}", self.repeat_count)?;
        writeln!(f, "Repeat length: {}", self.repeat_length)?;
        writeln!(f, "Repeats per intron: {}", format_optional(self.repeats_per_intron))?;
        writeln!(
            f,
            "Number of introns containing repeats: {}",
            self.introns_with_repeats
        )?;
        writeln!(
            f,
            "Raw unique intron sizes outputted to {}",
            self.outputs.unique.display()
        )?;
        write!(f, "{}", self.non_repeat.section("Non repeat introns"))?;
        write!(f, "{}", self.repeat.section("Repeat introns"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intervals::{collect_reader, HeaderLayout};
    use pretty_assertions::assert_eq;

    fn example_report() -> FileReport {
        let agg = collect_reader(
            ">seq1 a b c d 100\n10 - 19\n30 - 39\n>seq2 a b c d 50\n".as_bytes(),
            HeaderLayout::WINDOWMASKER,
        )
        .unwrap();
        FileReport::from_aggregate(
            Path::new("in/example.wm.txt"),
            &agg,
            RawOutputPaths::for_input(Path::new("in/example.wm.txt"), None),
        )
    }

    #[test]
    fn renders_counts_and_categories() {
        let text = example_report().to_string();
        assert!(text.starts_with("Number of introns: 2\nRepeat count: 2\nRepeat length: 20\n"));
        assert!(text.contains("Repeats per intron: 1.00\n"));
        assert!(text.contains("Number of introns containing repeats: 1\n"));
        assert!(text.contains("\nNon repeat introns:\nCount: 1\nMax: 50\nMin: 50\nMean: 50.00\n"));
        assert!(text.contains("\nRepeat introns:\nCount: 1\nMax: 80\n"));
        assert!(text.contains("GMean: 80.00\nHMean: 80.00\n"));
    }

    #[test]
    fn empty_category_reports_the_error() {
        let agg = IntervalAggregate {
            intron_count: 1,
            unique_intron_sizes: vec![10],
            non_rep_intron_sizes: vec![10],
            ..Default::default()
        };
        let report = FileReport::from_aggregate(
            Path::new("x.txt"),
            &agg,
            RawOutputPaths::for_input(Path::new("x.txt"), None),
        );

        assert_eq!(
            report.repeat,
            CategoryReport::Unavailable {
                count: 0,
                reason: "insufficient data: min/max requires at least one value".to_string(),
            }
        );
        assert!(report
            .to_string()
            .ends_with("\nRepeat introns:\nCount: 0\nStatistics unavailable: insufficient data: min/max requires at least one value\n"));
    }

    #[test]
    fn no_introns_prints_not_applicable_ratio() {
        let report = FileReport::from_aggregate(
            Path::new("x.txt"),
            &IntervalAggregate::default(),
            RawOutputPaths::for_input(Path::new("x.txt"), None),
        );
        assert_eq!(report.repeats_per_intron, None);
        assert!(report.to_string().contains("Repeats per intron: n/a\n"));
    }

    #[test]
    fn category_section_lists_every_measure() {
        let text = CategoryReport::from_values(&[2, 2, 3, 5])
            .section("Repeat introns")
            .to_string();
        assert_eq!(
            text,
            "\nRepeat introns:\nCount: 4\nMax: 5\nMin: 2\nMean: 3.00\nMedian: 2.50\nMode: 2\nGMean: 2.78\nHMean: 2.61\n"
        );
    }
}
