pub mod check;
pub mod predict;
pub mod replay;
