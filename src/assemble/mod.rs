pub mod assembler;
pub mod frame;
pub mod overlays;
pub mod tiling;
