pub mod formatter;

pub use formatter::{
    format_breakdown, format_feedback, format_json, format_metadata, format_metadata_tsv,
    format_score_table, format_tsv, should_use_colors,
};
