use std::process;

use certsrv_cli::certsrv_main;

fn main() {
    if let Some(err) = certsrv_main().err() {
        eprintln!("ERROR: {err}");
        process::exit(1);
    }
}
