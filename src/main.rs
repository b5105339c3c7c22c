use std::{
    io::{self, Write},
    path::PathBuf,
    sync::Arc,
    time::Instant,
};

use anyhow::Context;
use chatterbox::{
    Analyzer, ChatConfig, Console, Corpus, IdentityLemmatizer, Lemmatizer, NounLemmatizer,
    RandomChooser, ResponseChooser, SeededChooser, Session,
};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Answers questions with the closest sentence of a text corpus.
#[derive(Debug, Parser)]
#[command(name = "chatterbox", version, about)]
struct Args {
    /// Corpus text file
    #[arg(long, env = "CHATTERBOX_CORPUS", default_value = "data1.txt")]
    corpus: PathBuf,

    /// TOML file overriding the conversation settings
    #[arg(long)]
    config: Option<PathBuf>,

    /// Lemma dictionary (base forms and `inflected base` exceptions)
    #[arg(long, env = "CHATTERBOX_LEMMA_DICT", conflicts_with = "no_lemma")]
    lemma_dict: Option<PathBuf>,

    /// Do not lemmatize
    #[arg(long)]
    no_lemma: bool,

    /// Seed for the greeting choice
    #[arg(long)]
    seed: Option<u64>,

    /// Answer this utterance and exit
    #[arg(long)]
    query: Option<String>,

    /// More logging on stderr (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn lemmatizer(args: &Args) -> anyhow::Result<Arc<dyn Lemmatizer>> {
    if args.no_lemma {
        return Ok(Arc::new(IdentityLemmatizer));
    }
    match &args.lemma_dict {
        Some(path) => {
            let lemmatizer = NounLemmatizer::from_path(path)
                .with_context(|| format!("loading lemma dictionary {}", path.display()))?;
            Ok(Arc::new(lemmatizer))
        }
        None => Ok(Arc::new(NounLemmatizer::new())),
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);
    let start = Instant::now();

    let config = match &args.config {
        Some(path) => ChatConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => ChatConfig::default(),
    };
    let analyzer: Analyzer = config.analyzer(lemmatizer(&args)?);
    let corpus = Corpus::load(&args.corpus)
        .with_context(|| format!("loading corpus {}", args.corpus.display()))?;
    if corpus.is_empty() {
        warn!(path = %args.corpus.display(), "corpus is empty, every query will get the fallback");
    }
    let vectorizer = config.vectorizer(analyzer);
    info!(
        sentences = corpus.len(),
        lemmatizer = if args.no_lemma { "identity" } else { "noun" },
        config = %args.config.as_ref().map_or("defaults".into(), |p| p.display().to_string()),
        elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
        "startup"
    );

    let chooser: Box<dyn ResponseChooser> = match args.seed {
        Some(seed) => Box::new(SeededChooser::new(seed)),
        None => Box::new(RandomChooser::new()),
    };
    let mut session = Session::new(corpus, vectorizer, config, chooser);

    match args.query {
        Some(query) => {
            let reply = session.respond(&query);
            let mut stdout = io::stdout().lock();
            writeln!(stdout, "{}: {}", session.config().bot_name, reply.text())?;
        }
        None => {
            let stdin = io::stdin().lock();
            let stdout = io::stdout().lock();
            Console::new(stdin, stdout).run(&mut session)?;
        }
    }
    Ok(())
}
