use std::process::ExitCode;

fn main() -> ExitCode {
    match embedview::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("embedview failed: {e}");
            ExitCode::FAILURE
        }
    }
}
