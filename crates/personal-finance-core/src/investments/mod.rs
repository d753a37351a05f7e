pub mod portfolio;
pub mod sip;
