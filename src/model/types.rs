use nalgebra::Point3;

pub type Point = Point3<f64>;
