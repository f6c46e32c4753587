fn main() {
    if let Err(err) = niaga_ingest::run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
