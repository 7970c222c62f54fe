pub mod chord;
pub mod fingering;
pub mod instrument;
pub mod math;
pub mod pitch;
pub mod scale;
pub mod search;
pub mod shape;
