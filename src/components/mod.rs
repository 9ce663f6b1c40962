pub mod details_panel;
pub mod filter_panel;
pub mod force_graph;
pub mod header;
pub mod timeline_bar;
