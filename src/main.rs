//! Arcade server binary
//!
//! Loads a word list, builds the authoritative game session, and serves the
//! line-delimited JSON protocol over TCP until stopped.
//!
//! ```text
//! wordgrid-arcade [--dict PATH] [--host HOST] [--port PORT] [--seed SEED]
//! ```

use anyhow::{anyhow, Context, Result};

use wordgrid_adapter::{run_blocking, ServerConfig};
use wordgrid_core::{Dictionary, Game};

#[derive(Debug, Clone, PartialEq, Eq)]
struct Options {
    dict_path: String,
    host: String,
    port: u16,
    seed: Option<u32>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            dict_path: "assets/words_en.txt".to_string(),
            host: "127.0.0.1".to_string(),
            port: 7878,
            seed: None,
        }
    }
}

fn parse_args(args: &[String]) -> Result<Options> {
    let mut options = Options::default();
    let mut i = 0usize;
    while i < args.len() {
        match args[i].as_str() {
            "--dict" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("missing value for --dict"))?;
                options.dict_path = v.clone();
            }
            "--host" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("missing value for --host"))?;
                options.host = v.clone();
            }
            "--port" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("missing value for --port"))?;
                options.port = v
                    .parse::<u16>()
                    .map_err(|_| anyhow!("invalid --port value: {}", v))?;
            }
            "--seed" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("missing value for --seed"))?;
                options.seed = Some(
                    v.parse::<u32>()
                        .map_err(|_| anyhow!("invalid --seed value: {}", v))?,
                );
            }
            other => {
                return Err(anyhow!("unknown argument: {}", other));
            }
        }
        i += 1;
    }
    Ok(options)
}

/// Wall-clock fallback when no seed is given; sessions meant to be
/// reproduced across replicas should pass --seed explicitly.
fn time_seed() -> u32 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u32
}

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let options = parse_args(&args)?;

    let text = std::fs::read_to_string(&options.dict_path)
        .with_context(|| format!("failed to read word list {}", options.dict_path))?;
    let dict = Dictionary::from_text(&text);
    if dict.is_empty() {
        return Err(anyhow!("word list {} contains no words", options.dict_path));
    }
    println!("loaded {} words from {}", dict.len(), options.dict_path);

    let seed = options.seed.unwrap_or_else(time_seed);
    let game = Game::new(dict, seed);

    let config = ServerConfig {
        host: options.host.clone(),
        port: options.port,
        ..ServerConfig::default()
    };
    println!(
        "wordgrid arcade listening on {}:{} (seed {})",
        config.host, config.port, seed
    );
    run_blocking(config, game)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn parse_args_defaults() {
        let options = parse_args(&[]).unwrap();
        assert_eq!(options, Options::default());
    }

    #[test]
    fn parse_args_full() {
        let options = parse_args(&args(&[
            "--dict", "words.txt", "--host", "0.0.0.0", "--port", "9001", "--seed", "42",
        ]))
        .unwrap();
        assert_eq!(options.dict_path, "words.txt");
        assert_eq!(options.host, "0.0.0.0");
        assert_eq!(options.port, 9001);
        assert_eq!(options.seed, Some(42));
    }

    #[test]
    fn parse_args_rejects_unknown() {
        assert!(parse_args(&args(&["--frobnicate"])).is_err());
    }

    #[test]
    fn parse_args_rejects_bad_port() {
        assert!(parse_args(&args(&["--port", "many"])).is_err());
        assert!(parse_args(&args(&["--port"])).is_err());
    }
}
