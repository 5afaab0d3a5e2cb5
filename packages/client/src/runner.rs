//! Client execution logic with reconnection support.

use std::time::Duration;

use super::{
    domain::{should_attempt_reconnect, validate_server_url},
    error::ClientError,
    session::run_client_session,
    ui::spawn_line_reader,
};

const MAX_RECONNECT_ATTEMPTS: u32 = 5;
const RECONNECT_INTERVAL_SECS: u64 = 5;

/// Run the terminal client with reconnection logic
///
/// Each reconnect joins the same room again.
pub async fn run_client(url: String, username: String, room_id: String) -> Result<(), ClientError> {
    validate_server_url(&url)?;

    let mut input_rx = spawn_line_reader(username.clone());
    let mut reconnect_count = 0;

    loop {
        tracing::info!(
            "Attempting to connect to {} as '{}' (attempt {}/{})",
            url,
            username,
            reconnect_count + 1,
            MAX_RECONNECT_ATTEMPTS
        );

        match run_client_session(&url, &username, &room_id, &mut input_rx).await {
            Ok(()) => {
                tracing::info!("Client session ended normally");
                // If the user left, don't reconnect
                break;
            }
            Err(e) => {
                tracing::warn!("Connection lost: {}", e);
                reconnect_count += 1;

                if !should_attempt_reconnect(reconnect_count, MAX_RECONNECT_ATTEMPTS) {
                    tracing::error!(
                        "Failed to reconnect after {} attempts. Exiting.",
                        reconnect_count
                    );
                    return Err(e);
                }

                tracing::info!(
                    "Reconnecting in {} seconds... (attempt {}/{})",
                    RECONNECT_INTERVAL_SECS,
                    reconnect_count + 1,
                    MAX_RECONNECT_ATTEMPTS
                );

                tokio::time::sleep(Duration::from_secs(RECONNECT_INTERVAL_SECS)).await;
            }
        }
    }

    Ok(())
}
