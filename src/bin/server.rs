use clap::Parser;
use statedb::{server, Error};

const ADDRESS: &str = "127.0.0.1";
const PORT: u16 = 8080;

#[derive(Parser, Debug)]
struct Args {
    /// The address to listen on
    #[arg(short, long, default_value = ADDRESS)]
    address: String,

    /// The port to listen on
    #[arg(short, long, default_value_t = PORT)]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    let args = Args::parse();

    server::run(&args.address, args.port).await
}
