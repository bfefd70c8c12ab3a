fn main() {
    let config_path = std::env::args_os().nth(1).map(std::path::PathBuf::from);
    if let Err(e) = kanji_drill_lib::run(config_path) {
        eprintln!("kanji-drill: {:#}", e);
        std::process::exit(1);
    }
}
