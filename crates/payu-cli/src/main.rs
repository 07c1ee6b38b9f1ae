use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use payu::{ClientConfig, PayU, Transaction};

/// Query and submit payments against the PayU Latam API.
///
/// Credentials and endpoint settings are read from the environment
/// (`PAYU_API_LOGIN`, `PAYU_API_KEY`, `PAYU_MERCHANT_ID`, `PAYU_ENVIRONMENT`, ...),
/// optionally through a `.env` file.
#[derive(Debug, Parser)]
#[command(name = "payu", version)]
struct Cli {
    #[command(subcommand)]
    command: Cmd,
}

#[derive(Debug, Subcommand)]
enum Cmd {
    /// Check connectivity and credentials
    Ping,
    /// Show an order by gateway id
    Order { id: u64 },
    /// List the orders carrying a merchant reference code
    OrderRef { reference: String },
    /// Show the processing result of a transaction
    Transaction { id: String },
    /// Submit the transaction described in a JSON file
    Pay { file: PathBuf },
    /// List payment methods enabled for the merchant
    PaymentMethods,
    /// List banks for a bank-transfer payment method
    Banks {
        payment_method: String,
        country: String,
    },
}

type CliResult = Result<(), Box<dyn std::error::Error>>;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        tracing::error!("{e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> CliResult {
    let config = ClientConfig::from_env()?;
    let client = PayU::from_config(&config)?;

    tracing::info!(
        environment = %client.environment().kind(),
        base_url = client.environment().base_url(),
        language = %client.language(),
        "PayU client ready"
    );

    match cli.command {
        Cmd::Ping => {
            client.send_ping().await?;
            println!("PONG");
        }
        Cmd::Order { id } => match client.get_order_by_id(id).await? {
            Some(order) => print_json(&order)?,
            None => return Err(format!("order {id} not found").into()),
        },
        Cmd::OrderRef { reference } => {
            print_json(&client.get_order_by_reference(&reference).await?)?
        }
        Cmd::Transaction { id } => match client.get_transaction_by_id(&id).await? {
            Some(detail) => print_json(&detail)?,
            None => return Err(format!("transaction {id} not found").into()),
        },
        Cmd::Pay { file } => {
            let raw = std::fs::read_to_string(&file)
                .map_err(|e| format!("failed to read {}: {e}", file.display()))?;
            let transaction: Transaction = serde_json::from_str(&raw)
                .map_err(|e| format!("invalid transaction in {}: {e}", file.display()))?;
            let reference = transaction.order.reference_code.clone();

            let result = client.do_payment(transaction).await?;
            if result.is_approved() {
                tracing::info!(reference = %reference, "payment approved");
            } else {
                tracing::warn!(reference = %reference, state = ?result.state, "payment not approved");
            }
            print_json(&result)?;
        }
        Cmd::PaymentMethods => print_json(&client.get_payment_methods().await?)?,
        Cmd::Banks {
            payment_method,
            country,
        } => print_json(&client.get_banks_list(&payment_method, &country).await?)?,
    }

    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> CliResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
