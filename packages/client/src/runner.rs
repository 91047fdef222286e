//! Client execution logic with reconnection support.

use std::{sync::Arc, time::Duration};

use tokio::sync::Mutex;

use crate::{
    domain::should_attempt_reconnect, error::ClientError, session::run_client_session,
    state::ClientState, ui::spawn_readline,
};

const MAX_RECONNECT_ATTEMPTS: u32 = 5;
const RECONNECT_INTERVAL_SECS: u64 = 5;

/// Run the terminal client with reconnection logic
pub async fn run_client(url: String) -> Result<(), ClientError> {
    let state = Arc::new(Mutex::new(ClientState::default()));
    let mut input_rx = spawn_readline(state.clone());
    let mut reconnect_count = 0;

    loop {
        tracing::info!(
            "Attempting to connect to {} (attempt {}/{})",
            url,
            reconnect_count + 1,
            MAX_RECONNECT_ATTEMPTS
        );

        match run_client_session(&url, &state, &mut input_rx).await {
            Ok(()) => {
                tracing::info!("Client session ended normally");
                return Ok(());
            }
            Err(e) => {
                tracing::warn!("Connection lost: {}", e);

                if !should_attempt_reconnect(&e, reconnect_count, MAX_RECONNECT_ATTEMPTS) {
                    tracing::error!(
                        "Giving up after {} reconnection attempt(s)",
                        reconnect_count
                    );
                    return Err(e);
                }
                reconnect_count += 1;

                tracing::info!(
                    "Reconnecting in {} seconds... (attempt {}/{})",
                    RECONNECT_INTERVAL_SECS,
                    reconnect_count,
                    MAX_RECONNECT_ATTEMPTS
                );
                tokio::time::sleep(Duration::from_secs(RECONNECT_INTERVAL_SECS)).await;
            }
        }
    }
}
