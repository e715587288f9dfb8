//! TCP server for the arcade adapter
//!
//! Owns the authoritative [`Game`] behind a mutex, accepts line-delimited
//! JSON clients, and broadcasts an observation after every accepted
//! command. The first client (unless it asks to observe) becomes the
//! controller; everyone else watches. Commands are applied strictly in
//! arrival order under the game lock, so clients only ever observe
//! between-pass states.

use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::{mpsc, Mutex};

use serde::Serialize;

use wordgrid_core::{Game, TwistOutcome};
use wordgrid_engine::{apply_pick_twist, apply_place, apply_remove, OpError};
use wordgrid_types::{GRID_HEIGHT, GRID_WIDTH};

use crate::protocol::*;

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub protocol_version: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 7878,
            protocol_version: "1.0.0".to_string(),
        }
    }
}

impl ServerConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        use std::env;

        let host = env::var("WORDGRID_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("WORDGRID_PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(7878);

        Self {
            host,
            port,
            protocol_version: "1.0.0".to_string(),
        }
    }
}

struct ClientHandle {
    id: u64,
    role: AssignedRole,
    tx: mpsc::UnboundedSender<String>,
}

/// Authoritative state shared by every connection task
struct Shared {
    game: Game,
    last_pass: Option<PassInfo>,
    clients: Vec<ClientHandle>,
    next_client_id: u64,
    seq: u64,
}

impl Shared {
    fn new(game: Game) -> Self {
        Self {
            game,
            last_pass: None,
            clients: Vec::new(),
            next_client_id: 0,
            seq: 0,
        }
    }

    fn next_seq(&mut self) -> u64 {
        self.seq += 1;
        self.seq
    }

    fn register(
        &mut self,
        tx: mpsc::UnboundedSender<String>,
        requested: Option<RequestedRole>,
    ) -> (u64, AssignedRole) {
        self.next_client_id += 1;
        let id = self.next_client_id;

        let has_controller = self
            .clients
            .iter()
            .any(|c| c.role == AssignedRole::Controller);
        let role = match requested {
            Some(RequestedRole::Observer) => AssignedRole::Observer,
            _ if has_controller => AssignedRole::Observer,
            _ => AssignedRole::Controller,
        };

        self.clients.push(ClientHandle { id, role, tx });
        (id, role)
    }

    /// Drop a client; if the controller left, the oldest remaining client
    /// is promoted and told so with a fresh welcome
    fn unregister(&mut self, id: u64, protocol_version: &str) {
        let was_controller = self
            .clients
            .iter()
            .any(|c| c.id == id && c.role == AssignedRole::Controller);
        self.clients.retain(|c| c.id != id);

        if was_controller {
            if let Some(next) = self.clients.first_mut() {
                next.role = AssignedRole::Controller;
                let promoted_id = next.id;
                let seq = self.next_seq();
                let welcome =
                    create_welcome(seq, protocol_version, promoted_id, AssignedRole::Controller);
                self.send_to(promoted_id, &welcome);
            }
        }
    }

    fn role_of(&self, id: u64) -> Option<AssignedRole> {
        self.clients.iter().find(|c| c.id == id).map(|c| c.role)
    }

    fn send_to<T: Serialize>(&self, id: u64, message: &T) {
        if let Some(client) = self.clients.iter().find(|c| c.id == id) {
            if let Ok(line) = serde_json::to_string(message) {
                let _ = client.tx.send(line);
            }
        }
    }

    fn broadcast<T: Serialize>(&self, message: &T) {
        if let Ok(line) = serde_json::to_string(message) {
            for client in &self.clients {
                let _ = client.tx.send(line.clone());
            }
        }
    }

    /// Apply one controller command; on success the dealt letter (for the
    /// deal op) is returned for the caller to answer with
    fn apply_command(&mut self, op: &CommandOp) -> std::result::Result<Option<char>, OpError> {
        match *op {
            CommandOp::Place { letter, x, y } => {
                let result = apply_place(&mut self.game, letter, x, y)?;
                self.last_pass = Some(PassInfo::from(&result));
                Ok(None)
            }
            CommandOp::Remove { x, y } => {
                let result = apply_remove(&mut self.game, x, y)?;
                self.last_pass = Some(PassInfo::from(&result));
                Ok(None)
            }
            CommandOp::PickTwist { index } => {
                let (_, outcome) = apply_pick_twist(&mut self.game, index as usize)?;
                // Replace sub-passes surface as one merged event stream;
                // the other twists have no scoring to report
                self.last_pass = match outcome {
                    TwistOutcome::Replaced { ref passes, .. } => Some(PassInfo {
                        events: passes
                            .iter()
                            .flat_map(|p| PassInfo::from(p).events)
                            .collect(),
                        outcome: PassOutcomeTag::Continue,
                    }),
                    _ => None,
                };
                Ok(None)
            }
            CommandOp::Deal => Ok(Some(self.game.deal())),
        }
    }

    fn observation(&mut self) -> ObservationMessage {
        let snapshot = self.game.snapshot();
        let seq = self.next_seq();

        ObservationMessage {
            msg_type: ObservationType::Observation,
            seq,
            ts: current_timestamp_ms(),
            playable: snapshot.playable(),
            game_over: snapshot.game_over,
            board: BoardSnapshot {
                width: GRID_WIDTH,
                height: GRID_HEIGHT,
                cells: snapshot.board,
            },
            used: snapshot.used,
            score: ScoreSnapshot {
                total: snapshot.score_total,
                pending: snapshot.score_pending,
            },
            multiplier_step: snapshot.multiplier_step,
            move_count: snapshot.move_count,
            seed: snapshot.seed,
            twists: self
                .game
                .offered_twists()
                .map(|twists| twists.iter().map(TwistInfo::from).collect()),
            last_pass: self.last_pass.clone(),
            state_hash: state_hash(&snapshot),
        }
    }
}

/// Run the arcade server until the process is stopped
pub async fn run_server(config: ServerConfig, game: Game) -> Result<()> {
    let listener = TcpListener::bind((config.host.as_str(), config.port))
        .await
        .with_context(|| format!("failed to bind {}:{}", config.host, config.port))?;

    let shared = Arc::new(Mutex::new(Shared::new(game)));

    loop {
        let (stream, _addr) = listener.accept().await.context("accept failed")?;
        let _ = stream.set_nodelay(true);
        let shared = Arc::clone(&shared);
        let protocol_version = config.protocol_version.clone();
        tokio::spawn(async move {
            handle_client(stream, shared, protocol_version).await;
        });
    }
}

/// Synchronous entry point: builds a runtime and serves forever
pub fn run_blocking(config: ServerConfig, game: Game) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new().context("failed to create tokio runtime")?;
    runtime.block_on(run_server(config, game))
}

async fn handle_client(stream: TcpStream, shared: Arc<Mutex<Shared>>, protocol_version: String) {
    let (read_half, mut write_half) = stream.into_split();

    // Writer task: drains the per-client outbound queue
    let (tx, mut rx) = mpsc::unbounded_channel::<String>();
    let writer = tokio::spawn(async move {
        while let Some(line) = rx.recv().await {
            if write_half.write_all(line.as_bytes()).await.is_err() {
                break;
            }
            if write_half.write_all(b"\n").await.is_err() {
                break;
            }
        }
    });

    let mut lines = BufReader::new(read_half).lines();
    let mut client_id: Option<u64> = None;

    while let Ok(Some(line)) = lines.next_line().await {
        if line.trim().is_empty() {
            continue;
        }

        match parse_message(&line) {
            Ok(ParsedMessage::Hello(hello)) => {
                if client_id.is_some() {
                    // Repeated handshake is harmless; ignore it
                    continue;
                }
                let mut state = shared.lock().await;
                let (id, role) = state.register(tx.clone(), hello.requested.role);
                client_id = Some(id);

                let seq = state.next_seq();
                state.send_to(id, &create_welcome(seq, &protocol_version, id, role));
                let observation = state.observation();
                state.send_to(id, &observation);
            }
            Ok(ParsedMessage::Command(command)) => {
                let mut state = shared.lock().await;
                let Some(id) = client_id else {
                    let seq = state.next_seq();
                    let error = create_error(
                        seq,
                        ErrorCode::HandshakeRequired,
                        "hello must precede commands",
                    );
                    if let Ok(line) = serde_json::to_string(&error) {
                        let _ = tx.send(line);
                    }
                    continue;
                };

                if state.role_of(id) != Some(AssignedRole::Controller) {
                    let seq = state.next_seq();
                    let error = create_error(
                        seq,
                        ErrorCode::NotController,
                        "only the controller may send commands",
                    );
                    state.send_to(id, &error);
                    continue;
                }

                match state.apply_command(&command.op) {
                    Ok(dealt) => {
                        let seq = state.next_seq();
                        state.send_to(id, &create_ack(seq));
                        if let Some(letter) = dealt {
                            let seq = state.next_seq();
                            state.send_to(id, &create_letter(seq, letter));
                        }
                        let observation = state.observation();
                        state.broadcast(&observation);
                    }
                    Err(op_error) => {
                        let seq = state.next_seq();
                        let error = create_error(seq, op_error.into(), op_error.message());
                        state.send_to(id, &error);
                    }
                }
            }
            Ok(ParsedMessage::Unknown(unknown)) => {
                let error = create_error(
                    unknown.seq,
                    ErrorCode::InvalidCommand,
                    "unknown message type",
                );
                if let Ok(line) = serde_json::to_string(&error) {
                    let _ = tx.send(line);
                }
            }
            Err(_) => {
                let error = create_error(0, ErrorCode::InvalidCommand, "malformed message");
                if let Ok(line) = serde_json::to_string(&error) {
                    let _ = tx.send(line);
                }
            }
        }
    }

    if let Some(id) = client_id {
        shared.lock().await.unregister(id, &protocol_version);
    }
    writer.abort();
}
