//! Show per-store record counts.

use tracing::info;

use ridegear_store::backend::{FileBackend, StoreBackend};
use ridegear_store::stores;

/// Print a count of records in every object store.
///
/// # Errors
///
/// Returns an error if the store cannot be opened or read.
pub async fn run(data_dir: &str) -> Result<(), Box<dyn std::error::Error>> {
    let backend = FileBackend::open(data_dir).await?;

    info!("Store Statistics");
    info!("================");
    info!("Data directory: {data_dir}");

    let mut total = 0usize;
    for store in stores::ALL {
        let count = backend.load(store).await?.len();
        total += count;
        info!("  {store}: {count}");
    }

    info!("Total records: {total}");
    Ok(())
}
