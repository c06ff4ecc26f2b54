pub mod chart;
pub mod column_selection_dialog;
pub mod comparison_table;
pub mod results_page;
