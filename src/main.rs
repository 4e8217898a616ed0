use clap::{Parser, Subcommand};
use packetlink_rs::logging::{log_error, log_info};
use packetlink_rs::{init_logger, PacketTransport, TransportConfig, TransportError};

#[derive(Parser)]
#[command(name = "packetlink-cli")]
#[command(about = "CLI tool for the COBS/CRC packet transport")]
struct Cli {
    /// Serial device, e.g. /dev/ttyUSB0 or COM3.
    port: String,
    #[arg(short, long, default_value = "115200")]
    baudrate: u32,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sends a payload given as a hex string, e.g. "010203".
    Send { hex_payload: String },
    /// Polls once for an incoming packet and prints its payload as hex.
    Receive,
}

#[tokio::main]
async fn main() -> Result<(), TransportError> {
    init_logger();

    let cli = Cli::parse();
    let mut transport =
        PacketTransport::connect_with_config(&cli.port, cli.baudrate, TransportConfig::default())
            .await
            .map_err(|e| {
                log_error(&format!("failed to open {}: {e}", cli.port));
                e
            })?;

    match cli.command {
        Commands::Send { hex_payload } => {
            let payload = hex::decode(&hex_payload).map_err(|e| {
                TransportError::InvalidConfig(format!("invalid hex payload: {e}"))
            })?;
            transport.stage(&payload)?;
            transport.send().await?;
            log_info(&format!("sent {} byte payload", payload.len()));
        }
        Commands::Receive => {
            if transport.receive().await? {
                let payload = transport.received_payload();
                log_info(&format!("received: {}", hex::encode(payload)));
            } else {
                log_info("nothing to receive");
            }
        }
    }

    Ok(())
}
