pub mod hover;
pub mod motion;
