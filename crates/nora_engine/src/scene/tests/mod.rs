//! Cross-module scene scenarios

mod graph_scenarios;
