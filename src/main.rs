use cabinetkit::init_logging;

fn main() -> anyhow::Result<()> {
    // Initialize logging
    init_logging()?;

    cabinetkit::cli::run()
}
