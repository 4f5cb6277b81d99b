use std::sync::Arc;

use rigview::{App, AssetCatalog, JsonModelLoader, ViewerSettings};

fn main() -> rigview::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let settings = match std::env::args().nth(1) {
        Some(path) => {
            log::info!("Reading settings from {path}");
            ViewerSettings::from_json_file(path)?
        }
        // The JSON loader only reads prefabs, so point the default catalog at them.
        None => ViewerSettings::default()
            .with_catalog(AssetCatalog::default().with_format("json", "json")),
    };

    App::new(settings, Arc::new(JsonModelLoader::new())).run()
}
