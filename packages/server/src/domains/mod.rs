pub mod circle;
pub mod member;
