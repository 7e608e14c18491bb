use clap::Parser;
use env_logger::Env;

use ixpman::{
    Cli, EnsureOutcome, IxpAction, IxpError, IxpResult, Palette, Request, SettingsAction,
    SettingsLoader,
};

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let loader = cli.global.loader();

    let request = cli
        .command
        .into_request(std::io::stdin().lock())
        .unwrap_or_else(|e| fail(&Palette::plain(), &e));

    match request {
        Request::File(action) => run_file(&loader, &action),
        Request::Settings(action) => run_settings(&loader, &action),
    }
}

fn run_file(loader: &SettingsLoader, action: &IxpAction) {
    // No theme can be applied until settings have loaded.
    let settings = loader.load().unwrap_or_else(|e| fail(&Palette::plain(), &e));
    let palette = Palette::from_settings(&settings.theme);

    let result = settings
        .session()
        .and_then(|session| session.handle(action))
        .unwrap_or_else(|e| fail(&palette, &e));
    notify(&palette, &result);
}

/// `settings set` must keep working when the current settings do not load,
/// otherwise a broken file could not be repaired from the CLI.
fn run_settings(loader: &SettingsLoader, action: &SettingsAction) {
    let palette = loader
        .load()
        .map(|settings| Palette::from_settings(&settings.theme))
        .unwrap_or_else(|_| Palette::plain());

    let output = loader
        .handle(action)
        .unwrap_or_else(|e| fail(&palette, &e))
        .to_string();
    if output.ends_with('\n') {
        print!("{output}");
    } else {
        println!("{output}");
    }
}

/// Titles go to stderr so stdout carries only file contents and status.
fn notify(palette: &Palette, result: &IxpResult) {
    let title = palette.paint(palette.accent, &format!("{}:", result.title()));
    if let IxpResult::Status(_) = result {
        eprintln!("{title}");
        println!("{result}");
        return;
    }

    let color = match result {
        IxpResult::Ensured {
            outcome: EnsureOutcome::Reset,
            ..
        } => palette.warning,
        _ => palette.success,
    };
    eprintln!("{title} {}", palette.paint(color, &result.to_string()));
    if let Some(buffer) = result.buffer() {
        println!("{}", buffer.text);
    }
}

fn fail(palette: &Palette, err: &IxpError) -> ! {
    eprintln!(
        "{} {err}",
        palette.paint(palette.error, &format!("{}:", err.kind()))
    );
    std::process::exit(1);
}
