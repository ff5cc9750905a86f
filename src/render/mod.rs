//! CPU rasterization of ring paint commands.

pub(crate) mod cpu;
pub(crate) mod frame;
