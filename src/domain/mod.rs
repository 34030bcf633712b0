pub mod application;
pub mod notice;
pub mod student;

pub use application::*;
pub use notice::*;
pub use student::*;
