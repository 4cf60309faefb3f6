use std::process::ExitCode;

fn main() -> anyhow::Result<ExitCode> {
    contact_app::platform::run_app()
}
