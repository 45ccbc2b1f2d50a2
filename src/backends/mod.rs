pub mod recording;
pub mod tikz;
