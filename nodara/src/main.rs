//! Nodara command-line client.
//!
//! ```text
//! nodara [status]       show the restored wallet selection
//! nodara balance        SOL balance of the active wallet
//! nodara history [N]    last N transactions (default 10)
//! nodara sign-out       clear the session and the persisted selection
//! ```

use std::process::ExitCode;
use std::sync::Arc;

use lib_solana::SolanaClient;
use lib_utils::time::format_block_time;
use nodara::app::{App, AppEvent, NoticeLevel};
use nodara::config::AppConfig;
use nodara::core::AppError;
use nodara::debug::{self, LogConfig};
use nodara::services::storage::FileStore;
use nodara::services::wallet::{AnonymousIdentity, NamespaceProbe, SignerRegistry, WalletDeps};
use shared::{format_sol, short_address};

const DEFAULT_HISTORY_LIMIT: usize = 10;

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Status,
    Balance,
    History(usize),
    SignOut,
}

fn parse_command(args: &[String]) -> Result<Command, AppError> {
    match args.first().map(String::as_str) {
        None | Some("status") => Ok(Command::Status),
        Some("balance") => Ok(Command::Balance),
        Some("history") => {
            let limit = match args.get(1) {
                Some(raw) => raw
                    .parse()
                    .map_err(|_| AppError::Validation(format!("Invalid history limit: {}", raw)))?,
                None => DEFAULT_HISTORY_LIMIT,
            };
            Ok(Command::History(limit))
        }
        Some("sign-out") => Ok(Command::SignOut),
        Some(other) => Err(AppError::Validation(format!("Unknown command: {}", other))),
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    debug::init(&LogConfig::from_env());

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), AppError> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let command = parse_command(&args)?;

    let config = AppConfig::from_env().map_err(AppError::Config)?;
    config.validate().map_err(AppError::Config)?;

    let deps = WalletDeps {
        identity: Arc::new(AnonymousIdentity),
        probe: Arc::new(NamespaceProbe::new(Arc::new(SignerRegistry::default()))),
        rpc: Arc::new(SolanaClient::new(config.rpc_url.clone())),
        store: Arc::new(FileStore::new(config.store_path())),
    };
    let app = App::bootstrap(config, deps);
    app.wallet.mount().await;

    match command {
        Command::Status => print_status(&app),
        Command::Balance => match app.wallet.wallet_address() {
            Some(address) => {
                let balance = app.wallet.get_balance().await;
                println!("{}  {}", short_address(&address), format_sol(balance));
            }
            None => println!("No wallet selected"),
        },
        Command::History(limit) => {
            let records = app.wallet.get_transaction_history(limit).await;
            if records.is_empty() {
                println!("No transactions");
            }
            for record in records {
                let status = if record.err.is_some() {
                    "failed"
                } else {
                    record.confirmation_status.as_str()
                };
                println!(
                    "{}  {}  slot {}  {}",
                    format_block_time(record.block_time),
                    short_address(&record.signature),
                    record.slot,
                    status
                );
            }
        }
        Command::SignOut => {
            app.wallet.sign_out().await;
            println!("Signed out");
        }
    }

    print_events(&app);
    Ok(())
}

fn print_status(app: &App) {
    let snapshot = app.wallet.snapshot();
    println!("Signed in:   {}", snapshot.authenticated);
    match (&snapshot.selected_wallet_type, &snapshot.wallet_address) {
        (Some(kind), Some(address)) => {
            println!("Wallet:      {} ({})", kind.provider_name(), address)
        }
        _ => println!("Wallet:      none"),
    }
    for option in app.wallet.available_wallets() {
        println!(
            "  {:<10} available={} connected={}",
            option.name, option.available, option.connected
        );
    }
}

fn print_events(app: &App) {
    for event in app.drain_events() {
        match event {
            AppEvent::Notice { level, title, message } => {
                let marker = match level {
                    NoticeLevel::Success => "+",
                    NoticeLevel::Error => "!",
                };
                println!("[{}] {}: {}", marker, title, message);
            }
            AppEvent::InstallPrompt { wallet, url } => {
                println!("[?] {} is not installed. Get it at {}", wallet, url);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_command() {
        assert_eq!(parse_command(&args(&[])).unwrap(), Command::Status);
        assert_eq!(parse_command(&args(&["balance"])).unwrap(), Command::Balance);
        assert_eq!(
            parse_command(&args(&["history"])).unwrap(),
            Command::History(DEFAULT_HISTORY_LIMIT)
        );
        assert_eq!(parse_command(&args(&["history", "3"])).unwrap(), Command::History(3));
        assert_eq!(parse_command(&args(&["sign-out"])).unwrap(), Command::SignOut);
    }

    #[test]
    fn test_parse_command_rejects_garbage() {
        assert!(matches!(
            parse_command(&args(&["history", "many"])),
            Err(AppError::Validation(_))
        ));
        assert!(parse_command(&args(&["launch"])).is_err());
    }
}
