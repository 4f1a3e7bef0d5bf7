use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use quiz_core::model::{AdvanceMode, Difficulty, SessionConfig};
use rand::SeedableRng;
use rand::rngs::StdRng;
use services::{Clock, QuizLoopService};
use storage::CsvContentRepository;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod terminal;

const DEFAULT_VOCAB_PATH: &str = "data/beginner.csv";
const DEFAULT_SENTENCES_PATH: &str = "data/advanced.csv";
const DEFAULT_QUESTIONS: usize = 10;
const OPTIONS_PER_QUESTION: usize = 4;

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidMode { raw: String },
    InvalidQuestions { raw: String },
    InvalidSeed { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidMode { raw } => {
                write!(f, "invalid --mode value: {raw} (expected beginner or advanced)")
            }
            ArgsError::InvalidQuestions { raw } => write!(f, "invalid --questions value: {raw}"),
            ArgsError::InvalidSeed { raw } => write!(f, "invalid --seed value: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!(
        "  cargo run -p app -- [--mode beginner|advanced] [--vocab <csv>] [--sentences <csv>]"
    );
    eprintln!("                     [--questions <n>] [--seed <u64>] [--manual-advance]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --mode beginner");
    eprintln!("  --vocab {DEFAULT_VOCAB_PATH}");
    eprintln!("  --sentences {DEFAULT_SENTENCES_PATH}");
    eprintln!("  --questions {DEFAULT_QUESTIONS}");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  QUIZ_MODE, QUIZ_VOCAB_PATH, QUIZ_SENTENCES_PATH, QUIZ_QUESTIONS, QUIZ_SEED");
    eprintln!("  QUIZ_LOG (tracing filter, default info)");
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Args {
    mode: Difficulty,
    vocab_path: PathBuf,
    sentences_path: PathBuf,
    questions: usize,
    seed: Option<u64>,
    manual_advance: bool,
    show_help: bool,
}

impl Args {
    /// Environment first, flags override.
    fn parse(
        args: &mut impl Iterator<Item = String>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ArgsError> {
        let mut parsed = Self {
            mode: Difficulty::default(),
            vocab_path: env("QUIZ_VOCAB_PATH")
                .map_or_else(|| DEFAULT_VOCAB_PATH.into(), PathBuf::from),
            sentences_path: env("QUIZ_SENTENCES_PATH")
                .map_or_else(|| DEFAULT_SENTENCES_PATH.into(), PathBuf::from),
            questions: DEFAULT_QUESTIONS,
            seed: None,
            manual_advance: false,
            show_help: false,
        };
        if let Some(raw) = env("QUIZ_MODE") {
            parsed.mode = parse_mode(raw)?;
        }
        if let Some(raw) = env("QUIZ_QUESTIONS") {
            parsed.questions = parse_questions(raw)?;
        }
        if let Some(raw) = env("QUIZ_SEED") {
            parsed.seed = Some(parse_seed(raw)?);
        }

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--mode" => parsed.mode = parse_mode(require_value(args, "--mode")?)?,
                "--vocab" => parsed.vocab_path = require_value(args, "--vocab")?.into(),
                "--sentences" => {
                    parsed.sentences_path = require_value(args, "--sentences")?.into();
                }
                "--questions" => {
                    parsed.questions = parse_questions(require_value(args, "--questions")?)?;
                }
                "--seed" => parsed.seed = Some(parse_seed(require_value(args, "--seed")?)?),
                "--manual-advance" => parsed.manual_advance = true,
                "--help" | "-h" => parsed.show_help = true,
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(parsed)
    }
}

fn parse_mode(raw: String) -> Result<Difficulty, ArgsError> {
    raw.parse().map_err(|_| ArgsError::InvalidMode { raw })
}

fn parse_questions(raw: String) -> Result<usize, ArgsError> {
    match raw.trim().parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(ArgsError::InvalidQuestions { raw }),
    }
}

fn parse_seed(raw: String) -> Result<u64, ArgsError> {
    raw.trim()
        .parse()
        .map_err(|_| ArgsError::InvalidSeed { raw })
}

fn init_tracing() {
    let filter = std::env::var("QUIZ_LOG").unwrap_or_else(|_| "info".to_owned());
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&filter).unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv = std::env::args().skip(1);
    let args = Args::parse(&mut argv, |key| std::env::var(key).ok()).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;
    if args.show_help {
        print_usage();
        return Ok(());
    }

    init_tracing();

    let advance_mode = if args.manual_advance {
        AdvanceMode::Manual
    } else {
        AdvanceMode::Immediate
    };
    let config =
        SessionConfig::new(args.questions, OPTIONS_PER_QUESTION)?.with_advance_mode(advance_mode);
    let content = Arc::new(CsvContentRepository::new(
        args.vocab_path.clone(),
        args.sentences_path.clone(),
    ));
    let service = QuizLoopService::new(Clock::system(), content, config);

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    info!(mode = %args.mode, seed = ?args.seed, "starting quiz");

    let mut session = service.start_session(args.mode, &mut rng).await?;
    match terminal::play(&mut session).await? {
        Some(result) => info!(
            session_id = %result.session_id,
            score = result.score,
            total = result.total,
            "quiz finished"
        ),
        None => info!(session_id = %session.id(), "quiz abandoned"),
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str], env: &[(&str, &str)]) -> Result<Args, ArgsError> {
        let env: Vec<(String, String)> = env
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        let mut iter = argv.iter().map(|s| (*s).to_owned());
        Args::parse(&mut iter, |key| {
            env.iter().find(|(k, _)| k == key).map(|(_, v)| v.clone())
        })
    }

    #[test]
    fn defaults_apply_without_flags() {
        let args = parse(&[], &[]).unwrap();
        assert_eq!(args.mode, Difficulty::Beginner);
        assert_eq!(args.vocab_path, PathBuf::from(DEFAULT_VOCAB_PATH));
        assert_eq!(args.sentences_path, PathBuf::from(DEFAULT_SENTENCES_PATH));
        assert_eq!(args.questions, DEFAULT_QUESTIONS);
        assert_eq!(args.seed, None);
        assert!(!args.manual_advance);
    }

    #[test]
    fn flags_override_environment() {
        let args = parse(
            &["--mode", "advanced", "--questions", "3", "--manual-advance"],
            &[("QUIZ_MODE", "beginner"), ("QUIZ_QUESTIONS", "7"), ("QUIZ_SEED", "42")],
        )
        .unwrap();
        assert_eq!(args.mode, Difficulty::Advanced);
        assert_eq!(args.questions, 3);
        assert_eq!(args.seed, Some(42));
        assert!(args.manual_advance);
    }

    #[test]
    fn bad_values_are_rejected() {
        assert!(matches!(
            parse(&["--mode", "expert"], &[]),
            Err(ArgsError::InvalidMode { .. })
        ));
        assert!(matches!(
            parse(&["--questions", "0"], &[]),
            Err(ArgsError::InvalidQuestions { .. })
        ));
        assert!(matches!(
            parse(&["--seed"], &[]),
            Err(ArgsError::MissingValue { flag: "--seed" })
        ));
        assert!(matches!(
            parse(&["--verbose"], &[]),
            Err(ArgsError::UnknownArg(_))
        ));
    }
}
