use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use super::classifier::{classify_line, masked_length, HeaderLayout, LineKind};
use crate::error::{ParseError, StatsError};

/// Counts and intron size lists gathered from one interval file.
///
/// Built fresh for every input file and handed back by value; nothing is
/// shared between files.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntervalAggregate {
    pub intron_count: u64,
    pub repeat_count: u64,
    pub repeat_length: i64,
    /// Intron length minus masked length, one entry per record
    pub unique_intron_sizes: Vec<i64>,
    /// Lengths of introns without any masked base
    pub non_rep_intron_sizes: Vec<i64>,
    /// Unique sizes of introns with at least one masked base
    pub rep_intron_sizes: Vec<i64>,
}

impl IntervalAggregate {
    pub fn repeats_per_intron(&self) -> Result<f64, StatsError> {
        if self.intron_count == 0 {
            return Err(StatsError::DivisionUndefined(
                "repeats per intron with no introns",
            ));
        }
        Ok(self.repeat_count as f64 / self.intron_count as f64)
    }

    pub fn introns_with_repeats(&self) -> i64 {
        self.unique_intron_sizes.len() as i64 - self.non_rep_intron_sizes.len() as i64
    }

    /// Remove zero sizes from the unique and repeat lists.
    ///
    /// An intron whose masked length equals its length ends up in neither
    /// category, so it is absent from every statistic. The non-repeat list is
    /// left untouched.
    pub fn drop_fully_masked(&mut self) {
        self.unique_intron_sizes.retain(|&size| size != 0);
        self.rep_intron_sizes.retain(|&size| size != 0);
    }
}

#[derive(Debug, Clone, Copy)]
struct OpenRecord {
    intron_length: i64,
    masked_length: i64,
}

/// Streaming accumulator for one interval file.
///
/// Feed lines in order with [`push_line`](Self::push_line) and call
/// [`finish`](Self::finish) at end of input.
pub struct IntervalStatsCollector {
    layout: HeaderLayout,
    aggregate: IntervalAggregate,
    current: Option<OpenRecord>,
    line_no: usize,
    orphan_ranges: u64,
}

impl IntervalStatsCollector {
    pub fn new(layout: HeaderLayout) -> Self {
        Self {
            layout,
            aggregate: IntervalAggregate::default(),
            current: None,
            line_no: 0,
            orphan_ranges: 0,
        }
    }

    pub fn push_line(&mut self, line: &str) -> Result<(), ParseError> {
        self.line_no += 1;
        let line = line.strip_suffix('\r').unwrap_or(line);

        match classify_line(line) {
            LineKind::Header(header) => {
                let intron_length = self.layout.intron_length(header, self.line_no)?;
                self.close_record();
                self.current = Some(OpenRecord {
                    intron_length,
                    masked_length: 0,
                });
                self.aggregate.intron_count += 1;
            }
            LineKind::RepeatRange { start, end } => {
                let out_of_range = || ParseError::InvalidRange {
                    line: self.line_no,
                    text: line.to_string(),
                };
                let length = masked_length(start, end).ok_or_else(out_of_range)?;
                let repeat_length = self
                    .aggregate
                    .repeat_length
                    .checked_add(length)
                    .ok_or_else(out_of_range)?;
                // the unique size must stay representable when the record closes
                let record_masked = match self.current {
                    Some(record) => Some(
                        record
                            .masked_length
                            .checked_add(length)
                            .filter(|&masked| record.intron_length.checked_sub(masked).is_some())
                            .ok_or_else(out_of_range)?,
                    ),
                    None => None,
                };

                self.aggregate.repeat_count += 1;
                self.aggregate.repeat_length = repeat_length;
                match (self.current.as_mut(), record_masked) {
                    (Some(record), Some(masked)) => record.masked_length = masked,
                    _ => self.orphan_ranges += 1,
                }
            }
            LineKind::Other => {}
        }
        Ok(())
    }

    fn close_record(&mut self) {
        let Some(record) = self.current.take() else {
            return;
        };

        if record.masked_length != 0 {
            // checked when each range was added
            let unique = record.intron_length - record.masked_length;
            self.aggregate.unique_intron_sizes.push(unique);
            self.aggregate.rep_intron_sizes.push(unique);
        } else {
            self.aggregate.unique_intron_sizes.push(record.intron_length);
            self.aggregate.non_rep_intron_sizes.push(record.intron_length);
        }
    }

    /// Flush the last record and apply the zero-size filter.
    pub fn finish(mut self) -> IntervalAggregate {
        self.close_record();
        if self.orphan_ranges > 0 {
            warn!(
                "{} repeat range(s) appeared before the first header; counted in totals only",
                self.orphan_ranges
            );
        }
        self.aggregate.drop_fully_masked();
        debug!(
            "Collected {} introns over {} lines",
            self.aggregate.intron_count, self.line_no
        );
        self.aggregate
    }
}

pub fn collect_reader<R: BufRead>(
    reader: R,
    layout: HeaderLayout,
) -> Result<IntervalAggregate, ParseError> {
    let mut collector = IntervalStatsCollector::new(layout);
    for line in reader.lines() {
        collector.push_line(&line?)?;
    }
    Ok(collector.finish())
}

/// Collect a plain or compressed interval file.
pub fn collect_file(path: &Path, layout: HeaderLayout) -> Result<IntervalAggregate, ParseError> {
    let file = File::open(path)?;
    let reader: Box<dyn Read> = match niffler::get_reader(Box::new(file)) {
        Ok((reader, _format)) => reader,
        // too small to sniff a magic number, so it cannot be compressed
        Err(niffler::Error::FileTooShort) => Box::new(File::open(path)?),
        Err(e) => return Err(ParseError::Io(std::io::Error::other(e))),
    };
    collect_reader(BufReader::new(reader), layout)
}
