pub mod allowlist;
pub mod mint;
