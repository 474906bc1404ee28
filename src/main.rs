use cartflow::application::cart::CartEngine;
use cartflow::application::checkout::CheckoutEngine;
use cartflow::application::locks::OwnerLocks;
use cartflow::config::Config;
use cartflow::domain::ports::{CartStoreHandle, CatalogHandle, UserStoreHandle};
use cartflow::domain::product::Product;
use cartflow::domain::user::{CurrentUser, UserAccount};
use cartflow::error::{CartError, USER_NOT_FOUND};
use cartflow::infrastructure::in_memory::{InMemoryCartStore, InMemoryCatalog, InMemoryUserStore};
use cartflow::interfaces::csv::account_writer::{AccountRow, AccountWriter};
use cartflow::interfaces::csv::command_reader::{CartCommand, CommandAction, CommandReader};
use cartflow::interfaces::csv::seed_reader::{ProductReader, UserReader};
use cartflow::interfaces::transport::CartController;
use cartflow::telemetry;
use clap::Parser;
use miette::{IntoDiagnostic, Result};
use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Cart commands CSV file (`op, user, product, quantity, address`)
    input: PathBuf,

    /// Catalog CSV file (`id, name, cost`)
    #[arg(long)]
    catalog: PathBuf,

    /// Users CSV file (`id, email, wallet, address`)
    #[arg(long)]
    users: PathBuf,

    /// Path to persistent database (optional). If provided, uses RocksDB.
    #[arg(long)]
    db_path: Option<PathBuf>,
}

struct Backend {
    catalog: CatalogHandle,
    carts: CartStoreHandle,
    users: UserStoreHandle,
}

fn in_memory_backend(products: Vec<Product>) -> Backend {
    Backend {
        catalog: Arc::new(InMemoryCatalog::with_products(products)),
        carts: Arc::new(InMemoryCartStore::new()),
        users: Arc::new(InMemoryUserStore::new()),
    }
}

#[cfg(feature = "storage-rocksdb")]
fn open_backend(db_path: Option<PathBuf>, products: Vec<Product>) -> Result<Backend> {
    use cartflow::infrastructure::rocksdb::RocksDBStore;

    let Some(db_path) = db_path else {
        return Ok(in_memory_backend(products));
    };
    let store = RocksDBStore::open(db_path).into_diagnostic()?;
    for product in &products {
        store.put_product(product).into_diagnostic()?;
    }
    Ok(Backend {
        catalog: Arc::new(store.clone()),
        carts: Arc::new(store.clone()),
        users: Arc::new(store),
    })
}

#[cfg(not(feature = "storage-rocksdb"))]
fn open_backend(db_path: Option<PathBuf>, products: Vec<Product>) -> Result<Backend> {
    if db_path.is_some() {
        warn!(
            "Persistent storage requested via --db-path, but 'storage-rocksdb' feature is not enabled. Falling back to In-Memory storage."
        );
    }
    Ok(in_memory_backend(products))
}

/// Registers accounts that the store does not know yet. Existing accounts
/// keep their persisted wallet and address.
async fn seed_users(users: &UserStoreHandle, accounts: Vec<UserAccount>) -> Result<()> {
    for account in accounts {
        if users.get(&account.id).await.into_diagnostic()?.is_none() {
            users.store(account).await.into_diagnostic()?;
        }
    }
    Ok(())
}

async fn process_command(
    controller: &CartController,
    users: &UserStoreHandle,
    command: CartCommand,
) -> cartflow::error::Result<()> {
    let account = users
        .get(&command.user)
        .await?
        .ok_or(CartError::NotFound(USER_NOT_FOUND))?;
    let op = command.op;

    match command.into_action()? {
        CommandAction::Cart(request) => {
            let response = controller
                .handle(&CurrentUser::from(&account), request)
                .await;
            if response.is_success() {
                info!(user = %account.id, ?op, status = response.status, "command applied");
            } else {
                let body = response.body.map(|b| b.to_string()).unwrap_or_default();
                warn!(user = %account.id, ?op, status = response.status, %body, "command rejected");
            }
        }
        CommandAction::SetAddress(address) => {
            let stored = users.set_address(&account.id, address).await?;
            info!(user = %account.id, address = %stored, "address updated");
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env();
    telemetry::init(&config);
    let cli = Cli::parse();

    let products = ProductReader::new(File::open(&cli.catalog).into_diagnostic()?)
        .products()
        .collect::<cartflow::error::Result<Vec<_>>>()
        .into_diagnostic()?;
    let accounts = UserReader::new(File::open(&cli.users).into_diagnostic()?)
        .accounts(&config)
        .collect::<cartflow::error::Result<Vec<_>>>()
        .into_diagnostic()?;

    let backend = open_backend(cli.db_path, products)?;
    seed_users(&backend.users, accounts).await?;

    let locks = OwnerLocks::new();
    let controller = CartController::new(
        CartEngine::new(backend.carts.clone(), backend.catalog.clone(), locks.clone()),
        CheckoutEngine::new(backend.carts.clone(), backend.users.clone(), locks),
    );

    let file = File::open(cli.input).into_diagnostic()?;
    for command in CommandReader::new(file).commands() {
        match command {
            Ok(command) => {
                if let Err(e) = process_command(&controller, &backend.users, command).await {
                    warn!(error = %e, "Error processing command");
                }
            }
            Err(e) => {
                warn!(error = %e, "Error reading command");
            }
        }
    }

    let mut rows = Vec::new();
    for account in backend.users.all_accounts().await.into_diagnostic()? {
        let cart = backend.carts.get(&account.email).await.into_diagnostic()?;
        rows.push(AccountRow::new(&account, cart.as_ref()).into_diagnostic()?);
    }

    let stdout = io::stdout();
    let mut writer = AccountWriter::new(stdout.lock());
    writer.write_accounts(rows).into_diagnostic()?;

    Ok(())
}
