//! Valuation engine: remaining term, cash flows, annualized yields.

mod cash_flow;
mod term;
mod valuation_model;
mod valuation_service;

pub use term::RemainingTerm;
pub use valuation_model::PresentationRow;
pub use valuation_service::ValuationService;
