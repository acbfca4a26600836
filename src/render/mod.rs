//! Rasterization: adapter over the vectorize (`usvg`) and rasterize
//! (`resvg`) services, plus required-font provisioning.

pub mod rasterizer;
