pub mod formatter;

pub use formatter::{
    format_breakdown, format_comparison, format_distance, format_evaluation, format_nearby_table,
    format_ranking_table, format_score, format_tsv, should_use_colors,
};
