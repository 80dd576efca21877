/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use caissa::{GameCommand, Session};
use clap::{error::ErrorKind, Parser};
use log::LevelFilter;

fn main() {
    // Logs go to stderr, so they never interleave with the board on stdout
    env_logger::Builder::new()
        .filter_level(LevelFilter::Warn)
        .parse_default_env()
        .init();

    let mut session = Session::new();

    // Skip the executable name
    let args = std::env::args().skip(1).collect::<Vec<_>>();

    // Commands may be chained at startup, such as `caissa move e2 e4 board`.
    // Find the longest prefix that parses, queue it, and continue after it.
    let mut arg_idx = args.len();
    let mut parsed_idx = 0;
    while parsed_idx < arg_idx {
        let slice = &args[parsed_idx..arg_idx];

        match GameCommand::try_parse_from(slice) {
            Ok(cmd) => {
                if let Err(e) = session.send_command(cmd) {
                    eprintln!("{e:#}");
                }
                parsed_idx = arg_idx;
                arg_idx = args.len();
            }

            // Edge case: `help` is an "error" case according to Clap
            Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp) => {
                println!("{e}");
                parsed_idx = arg_idx;
                arg_idx = args.len();
            }

            // Nothing starting here parses, so report it and skip this argument
            Err(e) if arg_idx == parsed_idx + 1 => {
                eprintln!("Skipping startup argument {:?}:\n{e}", args[parsed_idx]);
                parsed_idx += 1;
                arg_idx = args.len();
            }

            Err(_) => arg_idx -= 1,
        }
    }

    if let Err(e) = session.run() {
        eprintln!("{} encountered an error: {e:#}", env!("CARGO_PKG_NAME"));
    }
}
