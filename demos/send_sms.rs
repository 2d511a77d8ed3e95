// ABOUTME: Demo application sending one SMS through an SMPP transmitter session
// ABOUTME: Long messages are segmented with the CSMS method chosen on the command line

use argh::FromArgs;
use smpp_esme::client::{ClientBuilder, ClientOptions, SmsMessage};
use smpp_esme::datatypes::Address;
use smpp_esme::segmenter::CsmsMethod;
use std::error::Error;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Send a single SMS message through an SMSC
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

    /// concatenation method for long messages: sar, udh or payload (default: sar)
    #[argh(option)]
    csms: Option<String>,

    /// request a delivery receipt
    #[argh(switch, short = 'r')]
    receipt: bool,

    /// the message to send
    #[argh(option, short = 'm')]
    message: String,

    /// the recipient telephone number in international format
    #[argh(option, short = 't')]
    to: String,

    /// the sender: a telephone number or an alphanumeric name
    #[argh(option, short = 'f')]
    from: String,
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

    let csms_method = match cli_args.csms.as_deref() {
        None | Some("sar") => CsmsMethod::SarTags,
        Some("udh") => CsmsMethod::Udh8Bit,
        Some("payload") => CsmsMethod::Payload,
        Some(other) => return Err(format!("unknown CSMS method {other:?}").into()),
    };
    let options = ClientOptions::default()
        .with_csms_method(csms_method)
        .with_registered_delivery(u8::from(cli_args.receipt));

    let from = if cli_args.from.chars().all(|c| c.is_ascii_digit()) {
        Address::international(cli_args.from)?
    } else {
        Address::alphanumeric(cli_args.from)?
    };
    let to = Address::international(cli_args.to)?;

    println!("Connecting to {host}:{port}");
    let mut session =
        ClientBuilder::transmitter(host, port, &system_id, &password, options).await?;
    println!("Connected and bound successfully");

    let sms = SmsMessage::new(from, to, cli_args.message.into_bytes());
    let result = session.send_sms(&sms).await;

    if let Err(e) = session.close().await {
        eprintln!("Warning: close failed: {e}");
    }

    match result {
        Ok(message_id) => {
            println!("Message sent successfully! Message ID: {message_id}");
            Ok(())
        }
        Err(e) => {
            eprintln!("Failed to send message: {e}");
            Err(e.into())
        }
    }
}
