//! Protocol module - JSON message types for the arcade adapter
//!
//! Implements the line-delimited JSON protocol spoken between the
//! authoritative arcade server and its clients. All messages have: type,
//! seq (sequence number), ts (timestamp in ms). Clients send `hello` once,
//! then `command` messages; the server answers with `welcome`, `ack`,
//! `error`, `letter`, and streams `observation` messages after every
//! accepted command.

use serde::{Deserialize, Serialize};

use wordgrid_core::{PassOutcome, PassResult, Twist};
use wordgrid_core::snapshot::GameSnapshot;
use wordgrid_engine::OpError;
use wordgrid_types::{GRID_HEIGHT, GRID_WIDTH};

// ============== Client -> Server Messages ==============

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum HelloType {
    #[serde(rename = "hello")]
    #[default]
    Hello,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CommandType {
    #[serde(rename = "command")]
    #[default]
    Command,
}

/// Client hello message (first message to establish connection)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HelloMessage {
    #[serde(rename = "type")]
    #[serde(default)]
    pub msg_type: HelloType,
    pub seq: u64,
    pub ts: u64,
    pub client: ClientInfo,
    pub protocol_version: String,
    pub requested: RequestedCapabilities,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientInfo {
    pub name: String,
    pub version: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestedCapabilities {
    #[serde(rename = "stream_observations")]
    pub stream_observations: bool,
    /// Optional role request; the server only honors it when the slot is free.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<RequestedRole>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestedRole {
    Auto,
    Controller,
    Observer,
}

impl<'de> Deserialize<'de> for RequestedRole {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = <&str>::deserialize(deserializer)?;
        if s.eq_ignore_ascii_case("auto") {
            Ok(Self::Auto)
        } else if s.eq_ignore_ascii_case("controller") {
            Ok(Self::Controller)
        } else if s.eq_ignore_ascii_case("observer") {
            Ok(Self::Observer)
        } else {
            Err(serde::de::Error::custom("invalid requested role"))
        }
    }
}

impl Serialize for RequestedRole {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            RequestedRole::Auto => serializer.serialize_str("auto"),
            RequestedRole::Controller => serializer.serialize_str("controller"),
            RequestedRole::Observer => serializer.serialize_str("observer"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssignedRole {
    #[serde(rename = "controller")]
    Controller,
    #[serde(rename = "observer")]
    Observer,
}

/// Command message (controller only)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandMessage {
    #[serde(rename = "type")]
    #[serde(default)]
    pub msg_type: CommandType,
    pub seq: u64,
    pub ts: u64,
    pub op: CommandOp,
}

/// The operations a controller may apply to the authoritative game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op")]
pub enum CommandOp {
    /// Place a hand letter at (x, y) and resolve
    #[serde(rename = "place")]
    Place { letter: char, x: i8, y: i8 },
    /// Undo: clear (x, y) and re-resolve
    #[serde(rename = "remove")]
    Remove { x: i8, y: i8 },
    /// Pick one of the offered twists by stable index
    #[serde(rename = "pickTwist")]
    PickTwist { index: u8 },
    /// Draw the next hand letter from the authoritative pool
    #[serde(rename = "deal")]
    Deal,
}

// ============== Server -> Client Messages ==============

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WelcomeType {
    #[serde(rename = "welcome")]
    Welcome,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AckType {
    #[serde(rename = "ack")]
    Ack,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AckStatus {
    #[serde(rename = "ok")]
    Ok,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorType {
    #[serde(rename = "error")]
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LetterType {
    #[serde(rename = "letter")]
    Letter,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObservationType {
    #[serde(rename = "observation")]
    Observation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCode {
    #[serde(rename = "handshake_required")]
    HandshakeRequired,
    #[serde(rename = "not_controller")]
    NotController,
    #[serde(rename = "invalid_command")]
    InvalidCommand,
    #[serde(rename = "game_over")]
    GameOver,
    #[serde(rename = "twist_pending")]
    TwistPending,
    #[serde(rename = "no_twist_pending")]
    NoTwistPending,
    #[serde(rename = "invalid_place")]
    InvalidPlace,
    #[serde(rename = "invalid_letter")]
    InvalidLetter,
    #[serde(rename = "invalid_twist")]
    InvalidTwist,
}

impl From<OpError> for ErrorCode {
    fn from(value: OpError) -> Self {
        match value {
            OpError::GameOver => Self::GameOver,
            OpError::TwistPending => Self::TwistPending,
            OpError::NoTwistPending => Self::NoTwistPending,
            OpError::OutOfBounds | OpError::CellOccupied | OpError::CellEmpty => {
                Self::InvalidPlace
            }
            OpError::NotALetter => Self::InvalidLetter,
            OpError::BadTwistIndex => Self::InvalidTwist,
        }
    }
}

/// Welcome message (response to hello)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WelcomeMessage {
    #[serde(rename = "type")]
    pub msg_type: WelcomeType,
    pub seq: u64,
    pub ts: u64,
    pub protocol_version: String,
    pub client_id: u64,
    pub role: AssignedRole,
    pub game_id: String,
}

/// Acknowledgment for command receipt
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AckMessage {
    #[serde(rename = "type")]
    pub msg_type: AckType,
    pub seq: u64,
    pub ts: u64,
    pub status: AckStatus,
}

/// Error message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorMessage {
    #[serde(rename = "type")]
    pub msg_type: ErrorType,
    pub seq: u64,
    pub ts: u64,
    pub code: ErrorCode,
    pub message: String,
}

/// A dealt hand letter (response to the deal command)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LetterMessage {
    #[serde(rename = "type")]
    pub msg_type: LetterType,
    pub seq: u64,
    pub ts: u64,
    pub letter: char,
}

/// Game state observation (sent to all clients)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservationMessage {
    #[serde(rename = "type")]
    pub msg_type: ObservationType,
    pub seq: u64,
    pub ts: u64,
    pub playable: bool,
    #[serde(rename = "game_over")]
    pub game_over: bool,
    pub board: BoardSnapshot,
    pub used: [[bool; GRID_WIDTH as usize]; GRID_HEIGHT as usize],
    pub score: ScoreSnapshot,
    #[serde(rename = "multiplier_step")]
    pub multiplier_step: u32,
    #[serde(rename = "move_count")]
    pub move_count: u32,
    pub seed: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub twists: Option<Vec<TwistInfo>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(rename = "last_pass")]
    pub last_pass: Option<PassInfo>,
    #[serde(rename = "state_hash")]
    pub state_hash: StateHash,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardSnapshot {
    pub width: u8,
    pub height: u8,
    /// 0 = empty, 1..=26 = letter code
    pub cells: [[u8; GRID_WIDTH as usize]; GRID_HEIGHT as usize],
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ScoreSnapshot {
    pub total: u64,
    pub pending: u32,
}

/// One offered twist as shown to the player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TwistInfo {
    pub index: u8,
    pub kind: String,
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first: Option<char>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub second: Option<char>,
}

impl From<&Twist> for TwistInfo {
    fn from(value: &Twist) -> Self {
        Self {
            index: value.index,
            kind: value.kind.as_str().to_string(),
            title: value.title.to_string(),
            description: value.description.to_string(),
            first: value.first,
            second: value.second,
        }
    }
}

/// One scored match on the wire
///
/// The server replica reports matched letters through the word text itself;
/// tile identities stay server-side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PassEventInfo {
    pub word: String,
    pub reversed: bool,
    pub multiplier: u32,
    pub bonus: u32,
    pub awarded: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PassOutcomeTag {
    #[serde(rename = "continue")]
    Continue,
    #[serde(rename = "gameOver")]
    GameOver,
    #[serde(rename = "offerTwists")]
    OfferTwists,
    #[serde(rename = "offerUndo")]
    OfferUndo,
}

impl From<&PassOutcome> for PassOutcomeTag {
    fn from(value: &PassOutcome) -> Self {
        match value {
            PassOutcome::Continue => Self::Continue,
            PassOutcome::GameOver => Self::GameOver,
            PassOutcome::OfferTwists(_) => Self::OfferTwists,
            PassOutcome::OfferUndo => Self::OfferUndo,
        }
    }
}

/// The fully-computed event stream of one resolution pass
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PassInfo {
    pub events: Vec<PassEventInfo>,
    pub outcome: PassOutcomeTag,
}

impl From<&PassResult> for PassInfo {
    fn from(value: &PassResult) -> Self {
        Self {
            events: value
                .events
                .iter()
                .map(|e| PassEventInfo {
                    word: e.word.clone(),
                    reversed: e.reversed,
                    multiplier: e.multiplier,
                    bonus: e.bonus,
                    awarded: e.awarded,
                })
                .collect(),
            outcome: PassOutcomeTag::from(&value.outcome),
        }
    }
}

/// Deterministic state hash serialized as lowercase hex (without heap allocation).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StateHash(pub u64);

impl Serialize for StateHash {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        const HEX: &[u8; 16] = b"0123456789abcdef";
        let mut buf = [0u8; 16];
        let mut v = self.0;
        for i in 0..16 {
            let nib = (v & 0x0f) as usize;
            buf[15 - i] = HEX[nib];
            v >>= 4;
        }
        let s = std::str::from_utf8(&buf).expect("hex is valid utf8");
        serializer.serialize_str(s)
    }
}

impl<'de> Deserialize<'de> for StateHash {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = <&str>::deserialize(deserializer)?;
        let s = s.trim();
        let mut v: u64 = 0;
        for b in s.as_bytes() {
            let d = match b {
                b'0'..=b'9' => (b - b'0') as u64,
                b'a'..=b'f' => (b - b'a' + 10) as u64,
                b'A'..=b'F' => (b - b'A' + 10) as u64,
                _ => return Err(serde::de::Error::custom("invalid hex")),
            };
            v = (v << 4) | d;
        }
        Ok(StateHash(v))
    }
}

/// Stable 64-bit FNV-1a hash of a snapshot for cross-replica comparison
///
/// `DefaultHasher` is avoided since its output is not guaranteed stable
/// across Rust versions/platforms.
pub fn state_hash(snapshot: &GameSnapshot) -> StateHash {
    const OFFSET_BASIS: u64 = 0xcbf29ce484222325;
    const PRIME: u64 = 0x100000001b3;

    let mut hash = OFFSET_BASIS;
    let mut write = |bytes: &[u8]| {
        for &b in bytes {
            hash ^= b as u64;
            hash = hash.wrapping_mul(PRIME);
        }
    };

    for row in &snapshot.board {
        write(row);
    }
    for row in &snapshot.used {
        for &flag in row {
            write(&[flag as u8]);
        }
    }
    write(&snapshot.score_total.to_le_bytes());
    write(&snapshot.score_pending.to_le_bytes());
    write(&snapshot.multiplier_step.to_le_bytes());
    write(&snapshot.move_count.to_le_bytes());
    write(&[snapshot.twists_pending as u8, snapshot.game_over as u8]);
    write(&snapshot.seed.to_le_bytes());

    StateHash(hash)
}

// ============== Message Parsing ==============

/// Parsed incoming message
#[derive(Debug, Clone)]
pub enum ParsedMessage {
    Hello(HelloMessage),
    Command(CommandMessage),
    Unknown(UnknownMessage),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnknownMessage {
    pub seq: u64,
}

/// Parse a JSON message from a string
///
/// An unknown message type is not a hard parse error for the protocol; it
/// surfaces as [`ParsedMessage::Unknown`] so the server can answer with a
/// typed error instead of dropping the connection.
pub fn parse_message(json: &str) -> Result<ParsedMessage, serde_json::Error> {
    #[derive(Debug, Deserialize)]
    #[serde(tag = "type")]
    enum InboundMessage {
        #[serde(rename = "hello")]
        Hello(HelloMessage),
        #[serde(rename = "command")]
        Command(CommandMessage),
    }

    match serde_json::from_str::<InboundMessage>(json) {
        Ok(InboundMessage::Hello(m)) => Ok(ParsedMessage::Hello(m)),
        Ok(InboundMessage::Command(m)) => Ok(ParsedMessage::Command(m)),
        Err(e) => {
            #[derive(Debug, Deserialize)]
            struct TypeOnly<'a> {
                #[serde(rename = "type")]
                msg_type: Option<&'a str>,
            }
            let msg_type = serde_json::from_str::<TypeOnly>(json)?
                .msg_type
                .unwrap_or("unknown");
            if msg_type != "hello" && msg_type != "command" {
                #[derive(Debug, Deserialize)]
                struct SeqOnly {
                    seq: Option<u64>,
                }
                let seq = serde_json::from_str::<SeqOnly>(json)?.seq.unwrap_or(0);
                return Ok(ParsedMessage::Unknown(UnknownMessage { seq }));
            }
            Err(e)
        }
    }
}

// ============== Utility Functions ==============

/// Create a hello message
pub fn create_hello(seq: u64, client_name: &str, protocol_version: &str) -> HelloMessage {
    HelloMessage {
        msg_type: HelloType::Hello,
        seq,
        ts: current_timestamp_ms(),
        client: ClientInfo {
            name: client_name.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        protocol_version: protocol_version.to_string(),
        requested: RequestedCapabilities {
            stream_observations: true,
            role: Some(RequestedRole::Auto),
        },
    }
}

/// Create a welcome message
pub fn create_welcome(
    seq: u64,
    protocol_version: &str,
    client_id: u64,
    role: AssignedRole,
) -> WelcomeMessage {
    WelcomeMessage {
        msg_type: WelcomeType::Welcome,
        seq,
        ts: current_timestamp_ms(),
        protocol_version: protocol_version.to_string(),
        client_id,
        role,
        game_id: "wordgrid".to_string(),
    }
}

/// Create an acknowledgment
pub fn create_ack(seq: u64) -> AckMessage {
    AckMessage {
        msg_type: AckType::Ack,
        seq,
        ts: current_timestamp_ms(),
        status: AckStatus::Ok,
    }
}

/// Create an error message
pub fn create_error(seq: u64, code: ErrorCode, message: &str) -> ErrorMessage {
    ErrorMessage {
        msg_type: ErrorType::Error,
        seq,
        ts: current_timestamp_ms(),
        code,
        message: message.to_string(),
    }
}

/// Create a dealt-letter message
pub fn create_letter(seq: u64, letter: char) -> LetterMessage {
    LetterMessage {
        msg_type: LetterType::Letter,
        seq,
        ts: current_timestamp_ms(),
        letter,
    }
}

/// Get current timestamp in milliseconds
pub(crate) fn current_timestamp_ms() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}
