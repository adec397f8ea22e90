fn main() {
    if let Err(error) = notefrais_cli::run() {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}
