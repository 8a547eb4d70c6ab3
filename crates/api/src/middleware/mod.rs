pub mod extract;
pub mod preflight;
