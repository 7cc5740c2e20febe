mod app;
mod effects;
mod logging;
mod settings;

pub use app::run;
