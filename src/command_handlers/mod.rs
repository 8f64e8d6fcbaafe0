pub mod check;
pub mod dispatch;
pub mod modify;
pub mod new;
