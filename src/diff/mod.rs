pub mod line_diff;
