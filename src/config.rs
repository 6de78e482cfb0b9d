use std::env;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;
use crate::error::{AppError, Result};

#[derive(Clone)]
pub struct Config {
    pub server_addr: SocketAddr,
    /// Directory holding the CNN/DailyMail CSV export. Evaluation routes
    /// are disabled when unset.
    pub data_dir: Option<PathBuf>,
    /// Apply English stemming before ROUGE overlap counting.
    pub use_stemmer: bool,
}

impl Config {
    pub fn load() -> Result<Self> {
        // Load environment variables from .env file if it exists
        dotenv::dotenv().ok();

        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("PORT").unwrap_or_else(|_| "3000".to_string());
        let port = port.parse::<u16>().map_err(|e| AppError::Config(format!("Invalid port: {}", e)))?;
        let ip = IpAddr::from_str(&host).map_err(|e| AppError::Config(format!("Invalid host address: {}", e)))?;

        let server_addr = SocketAddr::new(ip, port);

        let data_dir = env::var("DATA_DIR").ok().map(PathBuf::from);

        let use_stemmer = match env::var("ROUGE_STEMMER") {
            Ok(v) => v
                .parse::<bool>()
                .map_err(|e| AppError::Config(format!("Invalid ROUGE_STEMMER flag: {}", e)))?,
            Err(_) => true,
        };

        Ok(Config {
            server_addr,
            data_dir,
            use_stemmer,
        })
    }
}
