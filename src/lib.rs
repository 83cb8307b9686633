//! spritegrid - Library for converting text sprite grids to RGBA rasters and back
//!
//! This library provides functionality to:
//! - Parse JSON sprite descriptions (a character grid plus a symbol -> color palette)
//! - Render sprites to PNG and lay several out as a horizontal spritesheet
//! - Quantize PNGs back into sprite descriptions, one sprite or a whole sheet
//! - Process single files or whole folders from the command line

pub mod batch;
pub mod cli;
pub mod color;
pub mod config;
pub mod error;
pub mod import;
pub mod models;
pub mod output;
pub mod parser;
pub mod renderer;
pub mod split;
pub mod spritesheet;
