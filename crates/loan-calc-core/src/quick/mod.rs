//! Single-shot calculators behind the landing-page widgets. Payment only,
//! no schedule and no recurring costs.

pub mod emi;
pub mod mortgage;
