pub mod logging;
pub mod pointer;
pub mod trace;
