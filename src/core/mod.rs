pub mod checklist;
pub mod risk;
