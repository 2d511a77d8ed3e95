// ABOUTME: Demo application printing inbound messages and delivery receipts from an SMSC
// ABOUTME: Binds as receiver and answers keep-alives between reads

use argh::FromArgs;
use smpp_esme::client::{ClientOptions, Session};
use smpp_esme::connection::{TcpConnection, Transport};
use std::error::Error;
use std::time::Duration;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Print messages delivered by an SMSC until interrupted
#[derive(FromArgs)]
struct CliArgs {
    /// log every PDU exchanged
    #[argh(switch, short = 'd')]
    debugging: bool,

    /// the system id
    #[argh(option)]
    system_id: Option<String>,

    /// the password
    #[argh(option)]
    password: Option<String>,

    /// the hostname of IP address of the SMSC (default: localhost)
    #[argh(option)]
    host: Option<String>,

    /// the port to use when connecting to the SMSC (default: 2775)
    #[argh(option, short = 'p')]
    port: Option<u16>,

    /// seconds to wait for each message before checking the link (default: 30)
    #[argh(option, default = "30")]
    wait: u64,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let cli_args: CliArgs = argh::from_env();

    let level = if cli_args.debugging {
        Level::TRACE
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    let host = cli_args.host.unwrap_or_else(|| "localhost".to_owned());
    let port = cli_args.port.unwrap_or(2775);
    let system_id = cli_args.system_id.unwrap_or_default();
    let password = cli_args.password.unwrap_or_default();

    let mut connection =
        TcpConnection::new(host, port).with_recv_timeout(Duration::from_secs(cli_args.wait));
    connection.open().await?;

    let mut session = Session::new(connection, ClientOptions::default());
    session.bind_receiver(&system_id, &password).await?;
    println!("Bound as receiver, waiting for messages");

    while session.transport().is_open() {
        match session.read_sms().await? {
            Some(message) => match &message.receipt {
                Some(receipt) => println!(
                    "Receipt for {}: {} (err {}) done {:?}",
                    receipt.id, receipt.stat, receipt.err, receipt.done_date
                ),
                None => println!(
                    "From {}: {}",
                    message.source,
                    String::from_utf8_lossy(&message.message)
                ),
            },
            None => {
                // quiet period: prove the link is still alive
                session.respond_enquire_link().await?;
                session.enquire_link().await?;
            }
        }
    }

    session.close().await?;
    Ok(())
}
