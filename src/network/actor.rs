//! Network actor - runs HTTP requests in the Tokio runtime, off the UI loop

use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::{JoinError, JoinSet};

use crate::error::ExecuteError;
use crate::messages::{NetworkCommand, NetworkResponse};
use crate::network::executor::RequestExecutor;

/// Network actor that executes at most one request at a time
pub struct NetworkActor {
    executor: Arc<RequestExecutor>,
    response_tx: mpsc::UnboundedSender<NetworkResponse>,
    active_requests: JoinSet<NetworkResponse>,
    in_flight: Option<u64>,
}

impl NetworkActor {
    pub fn new(executor: RequestExecutor, response_tx: mpsc::UnboundedSender<NetworkResponse>) -> Self {
        NetworkActor {
            executor: Arc::new(executor),
            response_tx,
            active_requests: JoinSet::new(),
            in_flight: None,
        }
    }

    /// Run the network actor message loop
    pub async fn run(mut self, mut cmd_rx: mpsc::UnboundedReceiver<NetworkCommand>) {
        loop {
            tokio::select! {
                biased;

                // Handle incoming commands
                cmd = cmd_rx.recv() => {
                    match cmd {
                        Some(NetworkCommand::ExecuteRequest { id, spec }) => {
                            if let Some(busy) = self.in_flight {
                                tracing::warn!(id, busy, "Rejecting request, another is in flight");
                                let _ = self.response_tx.send(NetworkResponse::Failed {
                                    id,
                                    error: ExecuteError::RequestInFlight,
                                });
                                continue;
                            }

                            self.in_flight = Some(id);
                            let executor = self.executor.clone();
                            self.active_requests.spawn(async move {
                                tracing::info!(id, url = %spec.url(), method = %spec.method(), "Executing request");
                                match executor.execute(&spec).await {
                                    Ok(summary) => {
                                        tracing::info!(id, status = summary.status_code, elapsed = ?summary.elapsed, "Request completed");
                                        NetworkResponse::Completed { id, summary }
                                    }
                                    Err(error) => {
                                        tracing::warn!(id, %error, "Request failed");
                                        NetworkResponse::Failed { id, error }
                                    }
                                }
                            });
                        }

                        Some(NetworkCommand::CancelRequest(id)) => {
                            if self.in_flight == Some(id) {
                                tracing::info!(id, "Cancelling request");
                                if !self.executor.cancel() {
                                    // Not started yet
                                    self.active_requests.abort_all();
                                }
                                // The slot is free before the next command is read
                                if let Some(joined) = self.active_requests.join_next().await {
                                    self.finish(joined);
                                }
                            }
                        }

                        Some(NetworkCommand::Shutdown) | None => {
                            self.executor.cancel();
                            self.active_requests.abort_all();
                            break;
                        }
                    }
                }

                // Forward results only after the slot is free, so a follow-up
                // send is never rejected by a request that already finished
                Some(joined) = self.active_requests.join_next() => {
                    self.finish(joined);
                }
            }
        }
    }

    /// Free the slot, then report how the request ended
    fn finish(&mut self, joined: Result<NetworkResponse, JoinError>) {
        let id = self.in_flight.take();
        let response = match (joined, id) {
            (Ok(response), _) => response,
            (Err(e), Some(id)) if e.is_cancelled() => NetworkResponse::Failed {
                id,
                error: ExecuteError::Cancelled,
            },
            (Err(e), Some(id)) => {
                tracing::error!(id, error = %e, "Request task failed");
                NetworkResponse::Failed {
                    id,
                    error: ExecuteError::Network(format!("request task failed: {}", e)),
                }
            }
            (Err(e), None) => {
                tracing::error!(error = %e, "Request task failed");
                return;
            }
        };
        let _ = self.response_tx.send(response);
    }
}
