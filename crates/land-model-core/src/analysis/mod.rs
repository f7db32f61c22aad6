pub mod compare;
pub mod plot;

pub use compare::{compare_plots, ComparedPlot, PlotComparison};
pub use plot::{analyze_plot, PeerPlot, PlotAnalysis, PlotAnalysisInput};
