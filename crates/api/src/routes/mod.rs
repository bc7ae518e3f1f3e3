pub mod consumption;
pub mod prediction;
pub mod statement;
