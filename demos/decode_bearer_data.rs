// ABOUTME: Command line tool that decodes or builds a CDMA Bearer Data parameter
// ABOUTME: Prints the decoded record, or encodes a text message and prints the hex PDU

use argh::FromArgs;
use cdma_sms::{BearerData, HexData, MessageEncoding, MessageType, Priority, UserData};
use std::error::Error;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Decode a hex Bearer Data parameter, or encode a message into one
#[derive(FromArgs)]
struct CliArgs {
    /// whether or not to log each sub-parameter
    #[argh(switch, short = 'd')]
    debugging: bool,

    /// hex Bearer Data to decode
    #[argh(positional)]
    hex: Option<String>,

    /// text to encode instead of decoding
    #[argh(option, short = 'm')]
    message: Option<String>,

    /// message id for an encoded message (default: 1)
    #[argh(option)]
    id: Option<u16>,

    /// encode with GSM 7-bit instead of picking ASCII or UTF-16
    #[argh(switch)]
    gsm: bool,

    /// mark an encoded message urgent
    #[argh(switch)]
    urgent: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli_args: CliArgs = argh::from_env();

    let level = if cli_args.debugging {
        Level::TRACE
    } else {
        Level::WARN
    };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    if let Some(text) = cli_args.message {
        let mut record = BearerData::new(MessageType::Submit, cli_args.id.unwrap_or(1));
        record.user_data = Some(if cli_args.gsm {
            UserData::with_encoding(text, MessageEncoding::Gsm7Bit)
        } else {
            UserData::new(text)
        });
        if cli_args.urgent {
            record.priority = Some(Priority::Urgent);
        }
        let pdu = record.encode()?;
        println!("{}", HexData(&pdu));
        return Ok(());
    }

    let Some(hex) = cli_args.hex else {
        return Err("either a hex PDU or --message is required".into());
    };
    let pdu = HexData::decode(&hex)?;
    let record = BearerData::decode(&pdu)?;
    println!("{record:#?}");
    if let Some(text) = record.text() {
        println!("text: {text}");
    }
    Ok(())
}
