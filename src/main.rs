use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use urlform::{
    utils::{set_global_log_level, LogLevel},
    CodecConfig, CodecSettings, DecodeMode, UrlCodec,
};

#[derive(Parser, Debug)]
#[command(name = "urlform", version, about = "x-www-form-urlencoded codec and query-string parser")]
struct Cli {
    /// Character encoding label (utf-8, windows-1252, shift_jis, ...)
    #[arg(long, global = true)]
    encoding: Option<String>,

    /// Reject characters outside the literal-safe set when decoding
    #[arg(long, global = true)]
    strict: bool,

    /// JSON settings file; flags override its values
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[arg(long, global = true, default_value = "warn")]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Percent-encode text
    Encode(Input),
    /// Decode percent-encoded text
    Decode(Input),
    /// Parse a query string and print its parameters as JSON
    Parse {
        #[command(flatten)]
        input: Input,
        #[arg(long)]
        pretty: bool,
    },
    /// Show the encoded bytes of every character
    Bytes(Input),
}

#[derive(Args, Debug)]
struct Input {
    /// Text to process; read from --file or stdin when omitted
    text: Option<String>,

    #[arg(long, conflicts_with = "text")]
    file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    set_global_log_level(cli.log_level);

    let codec = UrlCodec::new(codec_config(&cli)?).context("failed to build codec")?;

    match &cli.command {
        Command::Encode(input) => {
            let text = read_input(input)?;
            println!("{}", codec.encode(&text).context("failed to encode input")?);
        }
        Command::Decode(input) => {
            let text = read_input(input)?;
            println!("{}", codec.decode(&text).context("failed to decode input")?);
        }
        Command::Parse { input, pretty } => {
            let query = read_input(input)?;
            let params = codec.parse_query(&query);
            let json = if *pretty {
                serde_json::to_string_pretty(&params)?
            } else {
                serde_json::to_string(&params)?
            };
            println!("{}", json);
        }
        Command::Bytes(input) => {
            let text = read_input(input)?;
            for line in describe_bytes(&codec, &text) {
                println!("{}", line);
            }
        }
    }

    Ok(())
}

fn codec_config(cli: &Cli) -> Result<CodecConfig> {
    let mut settings = match &cli.config {
        Some(path) => CodecSettings::load(path)?,
        None => CodecSettings::default(),
    };
    if let Some(encoding) = &cli.encoding {
        settings.encoding = encoding.clone();
    }

    let mut config = settings.to_config()?;
    if cli.strict {
        config = config.with_mode(DecodeMode::Strict);
    }
    Ok(config)
}

fn read_input(input: &Input) -> Result<String> {
    if let Some(text) = &input.text {
        return Ok(text.clone());
    }

    let raw = match &input.file {
        Some(path) => read_file(path)?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read stdin")?;
            buf
        }
    };
    Ok(trim_newline(raw))
}

fn read_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

fn trim_newline(mut text: String) -> String {
    if text.ends_with('\n') {
        text.pop();
        if text.ends_with('\r') {
            text.pop();
        }
    }
    text
}

/// One line per character: the character, its code point and its encoded bytes.
fn describe_bytes(codec: &UrlCodec, text: &str) -> Vec<String> {
    text.chars()
        .map(|ch| {
            let bytes = codec.table().bytes_for(ch);
            let encoded = if bytes.is_empty() {
                "unencodable".to_string()
            } else {
                hex::encode_upper(bytes)
            };
            format!("{:?}\tU+{:04X}\t{}", ch, ch as u32, encoded)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn input_from_file(contents: &str) -> (tempfile::NamedTempFile, Input) {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        let input = Input {
            text: None,
            file: Some(file.path().to_path_buf()),
        };
        (file, input)
    }

    #[test]
    fn positional_text_wins() {
        let input = Input {
            text: Some("a=b\n".to_string()),
            file: None,
        };
        assert_eq!(read_input(&input).unwrap(), "a=b\n");
    }

    #[test]
    fn file_input_drops_one_trailing_newline() {
        let (_file, input) = input_from_file("q=1&r=2\r\n");
        assert_eq!(read_input(&input).unwrap(), "q=1&r=2");

        let (_file, input) = input_from_file("x\n\n");
        assert_eq!(read_input(&input).unwrap(), "x\n");
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let input = Input {
            text: None,
            file: Some(dir.path().join("nope.txt")),
        };
        let err = read_input(&input).unwrap_err();
        assert!(err.to_string().contains("nope.txt"));
    }

    #[test]
    fn flags_override_settings_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "encoding": "shift_jis", "strict": false }}"#).unwrap();
        let path = file.path().to_str().unwrap().to_string();

        let cli = Cli::parse_from([
            "urlform", "--config", path.as_str(), "--encoding", "latin1", "--strict", "decode", "x",
        ]);
        let config = codec_config(&cli).unwrap();
        assert_eq!(config.encoding, encoding_rs::WINDOWS_1252);
        assert_eq!(config.mode, DecodeMode::Strict);
    }

    #[test]
    fn cli_parses_subcommands() {
        let cli = Cli::parse_from(["urlform", "parse", "--pretty", "a=1", "--log-level", "debug"]);
        assert_eq!(cli.log_level, LogLevel::Debug);
        match cli.command {
            Command::Parse { input, pretty } => {
                assert!(pretty);
                assert_eq!(input.text.as_deref(), Some("a=1"));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn describes_bytes_per_character() {
        let lines = describe_bytes(urlform::default_codec(), "aé\u{E000}");
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "'a'\tU+0061\t61");
        assert_eq!(lines[1], "'é'\tU+00E9\tC3A9");
        assert!(lines[2].ends_with("\tU+E000\tunencodable"));
    }
}
