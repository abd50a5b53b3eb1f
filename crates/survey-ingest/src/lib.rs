pub mod csv_table;
pub mod frame;
pub mod polars_utils;
pub mod profile;

pub use csv_table::{IngestOptions, SurveyTable, read_survey_table, read_survey_table_with_options};
pub use frame::to_data_frame;
pub use polars_utils::{any_to_f64, any_to_string, format_numeric, parse_f64};
pub use profile::build_column_profiles;
