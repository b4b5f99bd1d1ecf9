fn main() {
    if let Err(err) = xlsxbench::bigfile::run(std::env::args_os()) {
        eprintln!("xlsx benchmark failed: {err:#}");
        std::process::exit(1);
    }
}
