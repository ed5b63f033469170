use tubesum_core::{ChunkLimit, ChunkLimitError, Model, ProviderError};

/// One line of interactive input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Summarize `url`, or the remembered URL when `None`
    Generate(Option<String>),
    ListTrending,
    Trending(usize),
    ListModels,
    Model(Model),
    Chunk(ChunkLimit),
    Restart,
    Status,
    Help,
    Quit,
    Empty,
}

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("Unknown command `{0}`, type `help` for a list")]
    Unknown(String),

    #[error("`{command}` needs {what}")]
    MissingArgument {
        command: &'static str,
        what: &'static str,
    },

    #[error("Trending video number must be 1-3, got `{0}`")]
    BadTrending(String),

    #[error(transparent)]
    Model(#[from] ProviderError),

    #[error(transparent)]
    Chunk(#[from] ChunkLimitError),
}

pub const HELP: &str = "\
  <url>              summarize a video
  generate [url]     summarize a video, or the last one again
  trending           list trending videos
  trending <n>       summarize trending video n
  models             list models
  model <id>         switch model
  chunk <words>      set the chunk size (1000-10000, steps of 500)
  status             show current settings
  restart            forget the video and clear the screen
  help               show this list
  quit               exit";

impl Command {
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };
        let arg = (!rest.is_empty()).then_some(rest);

        let command = match word.to_ascii_lowercase().as_str() {
            "" => Command::Empty,
            "generate" | "go" => Command::Generate(arg.map(str::to_owned)),
            "trending" => match arg {
                None => Command::ListTrending,
                Some(n) => Command::Trending(
                    n.parse::<usize>()
                        .ok()
                        .filter(|number| (1..=3).contains(number))
                        .ok_or_else(|| CommandError::BadTrending(n.to_string()))?,
                ),
            },
            "models" => Command::ListModels,
            "model" => Command::Model(
                arg.ok_or(CommandError::MissingArgument {
                    command: "model",
                    what: "a model id",
                })?
                .parse()?,
            ),
            "chunk" => Command::Chunk(
                arg.ok_or(CommandError::MissingArgument {
                    command: "chunk",
                    what: "a word count",
                })?
                .parse()?,
            ),
            "restart" => Command::Restart,
            "status" => Command::Status,
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            _ if looks_like_url(word) && arg.is_none() => Command::Generate(Some(word.to_string())),
            _ => return Err(CommandError::Unknown(word.to_string())),
        };
        Ok(command)
    }
}

fn looks_like_url(word: &str) -> bool {
    word.starts_with("http://")
        || word.starts_with("https://")
        || word.starts_with("youtu.be/")
        || word.starts_with("www.youtube.com/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_url_generates() {
        assert_eq!(
            Command::parse("  https://youtu.be/zjkBMFhNj_g ").unwrap(),
            Command::Generate(Some("https://youtu.be/zjkBMFhNj_g".into()))
        );
    }

    #[test]
    fn generate_with_and_without_url() {
        assert_eq!(Command::parse("generate").unwrap(), Command::Generate(None));
        assert_eq!(
            Command::parse("GENERATE youtu.be/x").unwrap(),
            Command::Generate(Some("youtu.be/x".into()))
        );
    }

    #[test]
    fn trending_list_and_pick() {
        assert_eq!(Command::parse("trending").unwrap(), Command::ListTrending);
        assert_eq!(Command::parse("trending 3").unwrap(), Command::Trending(3));
        assert!(matches!(
            Command::parse("trending 4"),
            Err(CommandError::BadTrending(_))
        ));
    }

    #[test]
    fn model_and_chunk_arguments_are_typed() {
        assert_eq!(
            Command::parse("model mixtral-8x7b-32768").unwrap(),
            Command::Model(Model::Mixtral8x7b)
        );
        assert!(matches!(
            Command::parse("model gpt-4"),
            Err(CommandError::Model(ProviderError::UnknownModel(_)))
        ));
        assert_eq!(
            Command::parse("chunk 2500").unwrap(),
            Command::Chunk(ChunkLimit::new(2_500).unwrap())
        );
        assert!(matches!(
            Command::parse("chunk 2600"),
            Err(CommandError::Chunk(_))
        ));
        assert!(matches!(
            Command::parse("chunk"),
            Err(CommandError::MissingArgument { command: "chunk", .. })
        ));
    }

    #[test]
    fn simple_commands() {
        assert_eq!(Command::parse("").unwrap(), Command::Empty);
        assert_eq!(Command::parse("models").unwrap(), Command::ListModels);
        assert_eq!(Command::parse("restart").unwrap(), Command::Restart);
        assert_eq!(Command::parse("status").unwrap(), Command::Status);
        assert_eq!(Command::parse("?").unwrap(), Command::Help);
        assert_eq!(Command::parse("exit").unwrap(), Command::Quit);
    }

    #[test]
    fn unknown_words_are_rejected() {
        assert!(matches!(
            Command::parse("summarize please"),
            Err(CommandError::Unknown(w)) if w == "summarize"
        ));
    }
}
