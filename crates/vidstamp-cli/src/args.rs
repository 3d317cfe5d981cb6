use anyhow::Result;
use std::fmt;
use std::io::Read;
use std::path::PathBuf;

pub const USAGE: &str = "Usage: vidstamp-cli [--video <url-or-id>] <file>
       vidstamp-cli html <file>
       vidstamp-cli text <file>
       vidstamp-cli video <url-or-id> [oembed.json]

Use '-' as <file> to read timestamps from stdin.";

/// Where the timestamp text comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Stdin,
    File(PathBuf),
}

impl Source {
    fn from_arg(arg: &str) -> Self {
        if arg == "-" {
            Source::Stdin
        } else {
            Source::File(PathBuf::from(arg))
        }
    }

    pub fn read(&self) -> Result<String> {
        match self {
            Source::Stdin => {
                let mut raw = String::new();
                std::io::stdin().read_to_string(&mut raw)?;
                Ok(raw)
            }
            Source::File(path) => Ok(vidstamp_engine::io::read_text(path)?),
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Stdin => write!(f, "<stdin>"),
            Source::File(path) => write!(f, "{}", path.display()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Interactive timeline viewer.
    View {
        source: Source,
        video: Option<String>,
    },
    /// Print the rendered HTML fragment.
    Html(Source),
    /// Print canonical text.
    Text(Source),
    /// Print player URLs and a generation request for a video.
    Video {
        input: String,
        details: Option<PathBuf>,
    },
}

/// Parses `argv` (program name included).
pub fn parse_args(args: &[String]) -> Result<Command, String> {
    let rest = args.get(1..).unwrap_or_default();

    match rest.first().map(String::as_str) {
        Some(sub @ ("html" | "text")) => {
            let [_, file] = rest else {
                return Err(format!("'{sub}' takes exactly one <file>"));
            };
            let source = Source::from_arg(file);
            Ok(if sub == "html" {
                Command::Html(source)
            } else {
                Command::Text(source)
            })
        }
        Some("video") => match rest {
            [_, input] => Ok(Command::Video {
                input: input.clone(),
                details: None,
            }),
            [_, input, details] => Ok(Command::Video {
                input: input.clone(),
                details: Some(PathBuf::from(details)),
            }),
            _ => Err("'video' takes <url-or-id> and an optional oEmbed JSON file".to_string()),
        },
        _ => parse_view_args(rest),
    }
}

fn parse_view_args(rest: &[String]) -> Result<Command, String> {
    let mut video = None;
    let mut file = None;
    let mut iter = rest.iter();

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--video" => match iter.next() {
                Some(value) => video = Some(value.clone()),
                None => return Err("--video needs a URL or video id".to_string()),
            },
            "-h" | "--help" => return Err(String::new()),
            "-" => file = replace_file(file, arg)?,
            flag if flag.starts_with('-') => return Err(format!("Unknown option '{flag}'")),
            _ => file = replace_file(file, arg)?,
        }
    }

    match file {
        Some(file) => Ok(Command::View {
            source: Source::from_arg(&file),
            video,
        }),
        None => Err("No timestamp file given".to_string()),
    }
}

fn replace_file(current: Option<String>, arg: &str) -> Result<Option<String>, String> {
    match current {
        Some(existing) => Err(format!("Unexpected argument '{arg}' after '{existing}'")),
        None => Ok(Some(arg.to_string())),
    }
}
