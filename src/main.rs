//! TaskTracker main entrypoint.

use tasktracker::run;
use tasktracker::ui::messages::error;

fn main() {
    if let Err(e) = run() {
        error(format!("Error: {}", e));
        std::process::exit(1);
    }
}
