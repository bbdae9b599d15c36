pub mod chart;
pub mod config;
pub mod fetch;
pub mod load;
pub mod period;
pub mod pipeline;
pub mod process;
