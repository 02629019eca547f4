fn main() -> Result<(), eframe::Error> {
    // Set up logging; RUST_LOG controls verbosity
    env_logger::init();

    dilation_sandbox::run_app()
}
