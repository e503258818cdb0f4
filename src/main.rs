fn main() {
    if let Err(err) = latimed::run() {
        eprintln!("latimed: {err}");
        std::process::exit(1);
    }
}
