mod fill;
mod path;
mod stroke;

pub use self::{
    fill::*,
    path::*,
    stroke::{LineCap, LineJoin, Stroke, StrokeDash},
};
