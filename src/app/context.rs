use std::sync::Arc;

use crate::app::error::Result;
use crate::config::{ApiKey, Config};
use crate::reader::{ContentReader, HttpReader};

pub struct AppContext {
    pub config: Config,
    pub reader: Arc<dyn ContentReader>,
}

impl AppContext {
    pub fn new(config: Config, api_key: ApiKey) -> Result<Self> {
        let reader: Arc<dyn ContentReader> = Arc::new(HttpReader::new(&config.reader, api_key)?);
        Ok(Self { config, reader })
    }

    pub fn with_reader(config: Config, reader: Arc<dyn ContentReader>) -> Self {
        Self { config, reader }
    }
}
