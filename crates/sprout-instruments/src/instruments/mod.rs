pub mod criteria;
pub mod screener;
