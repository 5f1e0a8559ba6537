//! Binary entrypoint for the `marquee` command.

#[tokio::main]
async fn main() {
    std::process::exit(marquee_cli::run().await);
}
