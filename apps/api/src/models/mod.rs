pub mod cv;
pub mod matching;
pub mod offer;
