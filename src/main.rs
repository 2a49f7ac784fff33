mod app;
mod audio;
mod config;
mod library;
mod mpris;
mod player;
mod prefs;
mod runtime;
mod ui;

#[cfg(test)]
mod test_env;

fn main() {
    if let Err(e) = runtime::run() {
        eprintln!("howl: {e:#}");
        std::process::exit(1);
    }
}
