pub mod mae;

pub use mae::MaeLoss;
