use crate::dataset::loader::load_records;
use crate::dataset::LoadTicket;
use crate::error::BrowserError;
use crate::render::protocol::{display_name, LoadCommand, LoadResponse};
use std::path::PathBuf;
use tokio::sync::mpsc::{Receiver, Sender};

/// Run the load worker processing commands from the coordinator.
///
/// Every load runs on the blocking pool in its own task, so a slow file never holds up a newer
/// request. Responses may therefore arrive out of order; the ticket tells the coordinator which
/// one still matters.
pub async fn load_worker_loop(mut rx: Receiver<LoadCommand>, tx: Sender<LoadResponse>) {
    while let Some(cmd) = rx.recv().await {
        let outcome = handle_command(cmd, &tx);
        if outcome.done {
            break;
        }
    }
}

fn handle_command(cmd: LoadCommand, tx: &Sender<LoadResponse>) -> HandlerOutcome {
    match cmd {
        LoadCommand::Load { ticket, path } => {
            tokio::spawn(run_load(ticket, path, tx.clone()));
            HandlerOutcome::continue_loop()
        }
        LoadCommand::Shutdown => HandlerOutcome::exit(),
    }
}

async fn run_load(ticket: LoadTicket, path: PathBuf, tx: Sender<LoadResponse>) {
    let file_name = display_name(&path);
    log::debug!(
        "reading {} for generation {}",
        path.display(),
        ticket.generation()
    );

    let result = match tokio::task::spawn_blocking(move || load_records(&path)).await {
        Ok(result) => result,
        Err(join_error) => Err(BrowserError::other(format!(
            "load task failed: {join_error}"
        ))),
    };

    let response = LoadResponse::Loaded {
        ticket,
        file_name,
        result,
    };
    if tx.send(response).await.is_err() {
        log::debug!("coordinator gone before load finished");
    }
}

struct HandlerOutcome {
    done: bool,
}

impl HandlerOutcome {
    fn continue_loop() -> Self {
        Self { done: false }
    }

    fn exit() -> Self {
        Self { done: true }
    }
}
