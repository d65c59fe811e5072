use anyhow::Result;

fn main() -> Result<()> {
    klepto::cli::run(std::env::args_os())
}
