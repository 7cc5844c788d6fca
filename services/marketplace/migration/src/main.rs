use sea_orm_migration::prelude::*;

use gigmarket_marketplace_migration::Migrator;

#[tokio::main]
async fn main() {
    cli::run_cli(Migrator).await;
}
