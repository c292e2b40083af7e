//! syl - check a curriculum's section dependency matrix

use std::process::ExitCode;

fn main() -> ExitCode {
    syllabus::cli::run()
}
