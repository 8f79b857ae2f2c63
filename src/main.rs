use std::error::Error;
use std::sync::Arc;

use github_profiles::{
    http, AstraDocumentStore, Config, CoordinateLookup, DocumentStore, GoogleGeocoder,
    InMemoryDocumentStore, ProfileService, StoreBackend,
};
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let config = Config::from_env()?;
    let geocoder = GoogleGeocoder::with_base_url(&config.geocoding_base_url, &config.geocoding_api_key);

    match config.store {
        StoreBackend::Memory => {
            warn!("using the in-memory store, profiles are lost on restart");
            run(InMemoryDocumentStore::new(), geocoder, &config.bind_address).await?;
        }
        StoreBackend::Astra(astra) => {
            info!(base_url = %astra.base_url, namespace = %astra.namespace, "using astra store");
            run(AstraDocumentStore::new(astra), geocoder, &config.bind_address).await?;
        }
    }

    info!("server shut down");
    Ok(())
}

async fn run<S, G>(store: S, geocoder: G, addr: &str) -> Result<(), std::io::Error>
where
    S: DocumentStore + 'static,
    G: CoordinateLookup + 'static,
{
    let service = Arc::new(ProfileService::new(store, geocoder));
    http::serve(service, addr).await
}
