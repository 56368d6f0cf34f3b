pub mod result_panel;
pub mod stats_sidebar;
pub mod typing_area;
