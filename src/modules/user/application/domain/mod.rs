pub mod entities;
pub mod follow_graph;
