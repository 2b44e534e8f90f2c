mod data;
mod image;
mod location;
mod problem;
mod speeding;
mod wire;

pub use data::Report;
pub use image::ImageAttachment;
pub use location::Location;
pub use problem::{ProblemType, UnknownProblemType};
pub use speeding::{School, SpeedingDetail, UnknownSchool};
pub use wire::{NestedLocation, WireReport, WireTimestamp};
