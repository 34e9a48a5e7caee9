pub mod latch;
pub mod vector2d;
