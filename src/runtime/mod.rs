use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::App;
use crate::dataset;

mod event_loop;
mod settings;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let settings = settings::load_settings();

    // Point out configured files that are not actually on disk.
    for file in settings.paths.file_paths() {
        if !file.exists() {
            eprintln!(
                "staccato: configured dataset file missing: {}",
                file.display()
            );
        }
    }

    let tracks_path = settings.paths.tracks_path();
    let tracks = match dataset::load(&tracks_path, &settings.dataset) {
        Ok(tracks) => tracks,
        Err(e) => {
            // Help the user out: say what dataset files actually exist.
            let available = dataset::discover(&settings.paths.data_dir, &settings.dataset);
            if available.is_empty() {
                eprintln!(
                    "staccato: no dataset files found under {}",
                    settings.paths.data_dir.display()
                );
            } else {
                eprintln!("staccato: available dataset files:");
                for file in &available {
                    eprintln!("  {}", file.display());
                }
            }
            return Err(Box::new(e));
        }
    };

    let mut app = App::new(tracks);
    app.set_source(tracks_path.display().to_string());

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result: Result<(), Box<dyn std::error::Error>> =
        event_loop::run(&mut terminal, &settings, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    run_result
}
