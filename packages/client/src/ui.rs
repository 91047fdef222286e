//! UI utilities for the client.

use std::{io::Write, sync::Arc};

use rustyline::{DefaultEditor, error::ReadlineError};
use tokio::sync::{Mutex, mpsc};

use crate::state::ClientState;

/// Redisplay the prompt after receiving a message
pub fn redisplay_prompt(prompt: &str) {
    print!("{}", prompt);
    std::io::stdout().flush().ok();
}

/// Spawn a blocking thread that reads lines with rustyline
///
/// The channel closes on Ctrl+C / Ctrl+D, which ends the client.
pub fn spawn_readline(state: Arc<Mutex<ClientState>>) -> mpsc::UnboundedReceiver<String> {
    let (input_tx, input_rx) = mpsc::unbounded_channel::<String>();

    std::thread::spawn(move || {
        let mut rl = match DefaultEditor::new() {
            Ok(rl) => rl,
            Err(e) => {
                eprintln!("Failed to initialize readline: {}", e);
                return;
            }
        };

        loop {
            let prompt = state.blocking_lock().prompt();
            match rl.readline(&prompt) {
                Ok(line) => {
                    let line = line.trim();
                    if !line.is_empty() {
                        rl.add_history_entry(line).ok();
                        if input_tx.send(line.to_string()).is_err() {
                            break;
                        }
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    tracing::info!("Interrupted");
                    break;
                }
                Err(ReadlineError::Eof) => {
                    tracing::info!("EOF");
                    break;
                }
                Err(err) => {
                    tracing::error!("Readline error: {}", err);
                    break;
                }
            }
        }
    });

    input_rx
}
