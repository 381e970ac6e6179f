//! Command line parsing for fbm

/// What the binary was asked to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Subscribe the app to the page's webhooks
    Subscribe,
    /// Unsubscribe the app from the page's webhooks
    Unsubscribe,
    /// Send a text message to a page-scoped user id
    Send { recipient_id: String, text: String },
    Help,
    Version,
}

/// Parse arguments (without the program name)
pub fn parse_args<I>(args: I) -> Result<Command, String>
where
    I: IntoIterator<Item = String>,
{
    let mut args = args.into_iter();

    let Some(first) = args.next() else {
        return Ok(Command::Help);
    };

    match first.as_str() {
        "--help" | "-h" | "help" => Ok(Command::Help),
        "--version" | "-v" => Ok(Command::Version),
        "subscribe" => Ok(Command::Subscribe),
        "unsubscribe" => Ok(Command::Unsubscribe),
        "send" => {
            let recipient_id = args
                .next()
                .ok_or_else(|| "send: missing <recipient-id>".to_string())?;
            let text = args.collect::<Vec<_>>().join(" ");
            if text.is_empty() {
                return Err("send: missing <text>".to_string());
            }
            Ok(Command::Send { recipient_id, text })
        }
        other => Err(format!("unknown command: {}", other)),
    }
}

/// Print help message
pub fn print_help() {
    println!("fbm - Facebook Messenger Platform client");
    println!();
    println!("Usage:");
    println!("  fbm subscribe                  Subscribe the app to page webhooks");
    println!("  fbm unsubscribe                Unsubscribe the app from page webhooks");
    println!("  fbm send <recipient-id> <text> Send a text message");
    println!("  fbm --help                     Show this help message");
    println!("  fbm --version                  Show version");
    println!();
    println!("Environment Variables:");
    println!("  FB_PAGE_ACCESS_TOKEN  Page access token (required)");
    println!("  FB_GRAPH_BASE_URL     Graph API base URL (default: https://graph.facebook.com/v2.6/me)");
    println!("  FB_HTTP_TIMEOUT_SECS  Request timeout in seconds (default: 30)");
    println!("  RUST_LOG              Log filter (default: info)");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Command, String> {
        parse_args(args.iter().map(|s| s.to_string()))
    }

    #[test]
    fn test_no_args_shows_help() {
        assert_eq!(parse(&[]), Ok(Command::Help));
        assert_eq!(parse(&["-h"]), Ok(Command::Help));
    }

    #[test]
    fn test_subscription_commands() {
        assert_eq!(parse(&["subscribe"]), Ok(Command::Subscribe));
        assert_eq!(parse(&["unsubscribe"]), Ok(Command::Unsubscribe));
        assert_eq!(parse(&["--version"]), Ok(Command::Version));
    }

    #[test]
    fn test_send_joins_text() {
        assert_eq!(
            parse(&["send", "123", "Hello,", "human!"]),
            Ok(Command::Send {
                recipient_id: "123".to_string(),
                text: "Hello, human!".to_string(),
            })
        );
    }

    #[test]
    fn test_send_requires_arguments() {
        assert!(parse(&["send"]).is_err());
        assert!(parse(&["send", "123"]).is_err());
        assert!(parse(&["deliver"]).is_err());
    }
}
