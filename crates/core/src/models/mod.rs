pub mod card;
pub mod chart;
pub mod dca;
pub mod market;
pub mod quote;
pub mod report;
pub mod settings;
