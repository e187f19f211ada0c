mod analysis;
mod app;
mod config;
mod dataset;
mod duration;
mod runtime;
mod ui;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    runtime::run()
}
