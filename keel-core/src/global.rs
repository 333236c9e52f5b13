use crate::{AsValue, Driver, Engine, Failure, Record, Result, Rows, Value};
use std::sync::{Arc, RwLock};

static DRIVER: RwLock<Option<Arc<dyn Driver>>> = RwLock::new(None);

/// Install the driver used by the free functions of this module, replacing the previous one.
pub fn setup_driver(driver: Arc<dyn Driver>) {
    log::debug!("Installing the {} driver", driver.name());
    let mut current = DRIVER.write().unwrap_or_else(|e| e.into_inner());
    *current = Some(driver);
}

/// An engine over the installed driver.
pub fn engine() -> Result<Engine> {
    let current = DRIVER.read().unwrap_or_else(|e| e.into_inner());
    match current.as_ref() {
        Some(driver) => Ok(Engine::new(driver.clone())),
        None => {
            let error = Failure::configuration("No driver was installed, call `setup_driver` first");
            log::error!("{}", error);
            Err(error.into())
        }
    }
}

pub async fn save<R: Record>(record: &mut R) -> Result<()> {
    engine()?.save(record).await
}

pub async fn get<R: Record>(record: &mut R, id: impl AsValue) -> Result<()> {
    engine()?.get(record, id).await
}

pub async fn all<R: Record + Default>() -> Result<Rows<R>> {
    engine()?.all().await
}

pub async fn filter<R: Record + Default>(clause: &str, args: &[Value]) -> Result<Rows<R>> {
    engine()?.filter(clause, args).await
}

pub async fn first<R: Record + Default>(clause: &str, args: &[Value]) -> Result<R> {
    engine()?.first(clause, args).await
}

pub async fn remove<R: Record>(record: &R) -> Result<()> {
    engine()?.remove(record).await
}
