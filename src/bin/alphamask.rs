use std::ffi::OsString;

use alphamask::{args, error::MaskError, help};

fn main() {
    help::maybe_print_help_and_exit("alphamask");
    let arguments: Vec<_> = std::env::args_os().collect();

    if let Err(e) = real_main(arguments) {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn real_main(args: Vec<OsString>) -> Result<(), MaskError> {
    let plan = args::parse_args(args)?;
    plan.execute()
}
