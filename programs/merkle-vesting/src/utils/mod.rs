pub mod accrual;
pub mod merkle;
