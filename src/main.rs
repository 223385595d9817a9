use std::env;
use std::sync::Arc;

use academia_match::db::{establish_connection_pool, run_migrations};
use academia_match::matching::MatchOptions;
use academia_match::matching::embedding::{Embedder, FastembedEmbedder};
use academia_match::models::config::ServerConfig;
use academia_match::processing::ZMQMessage;
use academia_match::processing::load::process_load_message;
use academia_match::processing::matching::{process_match_all_message, process_match_message};
use academia_match::repository::DieselRepository;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config_path = env::var("CONFIG_PATH").unwrap_or_else(|_| "config".to_string());
    let config = match ServerConfig::load(&config_path) {
        Ok(config) => config,
        Err(e) => {
            log::error!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    let pool = match establish_connection_pool(&config.database_url) {
        Ok(pool) => pool,
        Err(e) => {
            log::error!("Failed to establish database connection: {e}");
            std::process::exit(1);
        }
    };
    match pool.get() {
        Ok(mut conn) => {
            if let Err(e) = run_migrations(&mut conn) {
                log::error!("Failed to run migrations: {e}");
                std::process::exit(1);
            }
        }
        Err(e) => {
            log::error!("Failed to get database connection: {e}");
            std::process::exit(1);
        }
    }
    let repo = DieselRepository::new(pool);

    // Preload the model eagerly: construction takes seconds and the first
    // match request should not pay for it. A failed load disables matching
    // but leaves roster loading functional.
    let embedder: Option<Arc<dyn Embedder>> = match FastembedEmbedder::new() {
        Ok(embedder) => Some(Arc::new(embedder)),
        Err(e) => {
            log::error!("Failed to preload embedding model, matching disabled: {e}");
            None
        }
    };

    let options = MatchOptions {
        top_n: config.top_n,
        threshold: config.similarity_threshold,
    };

    let context = zmq::Context::new();
    let responder = context.socket(zmq::PULL).expect("Cannot create zmq socket");
    responder
        .bind(&config.zmq_address)
        .expect("Cannot bind to zmq port");
    log::info!("Listening on {}", config.zmq_address);

    loop {
        let msg = match responder.recv_bytes(0) {
            Ok(msg) => msg,
            Err(e) => {
                log::error!("Failed to receive message: {e}");
                continue;
            }
        };
        match serde_json::from_slice::<ZMQMessage>(&msg) {
            Ok(parsed) => {
                let repo = repo.clone();
                let embedder = embedder.clone();
                let config = config.clone();
                tokio::spawn(async move {
                    match parsed {
                        ZMQMessage::Load => {
                            process_load_message(
                                repo,
                                &config.internal_roster,
                                &config.external_roster,
                            )
                            .await
                        }
                        ZMQMessage::Match(email) => {
                            process_match_message(repo, embedder, email, options).await
                        }
                        ZMQMessage::MatchAll => {
                            process_match_all_message(repo, embedder, options).await
                        }
                    }
                });
            }
            Err(e) => log::error!("Failed to parse JSON: {e}"),
        }
    }
}
