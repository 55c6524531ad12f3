//! WindowMasker interval parsing and per-file intron/repeat aggregation.

mod classifier;
mod collector;
mod output;

pub use classifier::{classify_line, masked_length, FieldDelimiter, HeaderLayout, LineKind};
pub use collector::{collect_file, collect_reader, IntervalAggregate, IntervalStatsCollector};
pub use output::{
    output_stem, read_raw_sizes, write_raw_outputs, write_raw_sizes, RawOutputPaths,
    NON_REPEAT_SUFFIX, RAW_SIZES_HEADER, REPEAT_SUFFIX, UNIQUE_SIZES_HEADER, UNIQUE_SUFFIX,
};
