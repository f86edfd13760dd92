pub mod aligner;
pub mod benchmark;
pub mod classifiers;
pub mod fetch;
pub mod output;
pub mod spots;
