use std::cell::RefCell;
use std::path::PathBuf;
use std::process::ExitCode;
use std::rc::Rc;
use std::time::Duration;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use corrigo::app::controllers::correction::CorrectionController;
use corrigo::app::domain::{FocusTarget, HostEvent, PointerPosition, RequestKind, Settings, Suggestions};
use corrigo::app::infrastructure::chrome::{RecordingChrome, Rendered};
use corrigo::app::infrastructure::host::{EditableSurface, RichTextHost};
use corrigo::app::infrastructure::memory::{MemoryInput, MemoryRichText};
use corrigo::app::services::field::get_field_value;
use corrigo::app::services::selection::SelectionTrigger;
use corrigo::app::services::suggestions::SuggestionService;

/// Corrigo command line driver.
#[derive(Parser)]
#[command(name = "corrigo")]
#[command(about = "Selection-based text correction against a suggestion service")]
#[command(version)]
struct Cli {
    /// Settings file (defaults to the platform config directory)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Override the service host
    #[arg(long, global = true, env = "CORRIGO_HOST")]
    host: Option<String>,

    /// Override the service port
    #[arg(long, global = true, env = "CORRIGO_PORT")]
    port: Option<u16>,

    /// Log debug output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Correct a phrase
    Correct { text: String },

    /// Spell-fix candidates for a word
    Word { word: String },

    /// Synonyms for a word
    Synonym { word: String },

    /// Run a full select → suggest → write-back cycle on an in-memory field
    Fix {
        /// Initial field content
        #[arg(long)]
        text: String,

        /// Selection start, in characters
        #[arg(long)]
        start: usize,

        /// Selection end, in characters
        #[arg(long)]
        end: usize,

        /// Kind of field to simulate
        #[arg(long, value_enum, default_value_t = FieldKind::Plain)]
        field: FieldKind,

        /// Page hostname, used to pick the write-back strategy
        #[arg(long, default_value = "localhost")]
        origin: String,

        /// Simulate a page that ignores direct text mutation
        #[arg(long)]
        restricted: bool,

        /// Request kind; defaults to what the popup would pick
        #[arg(long, value_enum)]
        kind: Option<KindArg>,

        /// Index of the suggestion to apply
        #[arg(long, default_value_t = 0)]
        pick: usize,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum FieldKind {
    Plain,
    Rich,
}

#[derive(Clone, Copy, ValueEnum)]
enum KindArg {
    Correct,
    Word,
    Synonym,
}

impl From<KindArg> for RequestKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Correct => RequestKind::Correct,
            KindArg::Word => RequestKind::WordFix,
            KindArg::Synonym => RequestKind::Synonym,
        }
    }
}

/// Concrete handle on the in-memory field, kept for printing its event log.
enum MemoryField {
    Plain(Rc<RefCell<MemoryInput>>),
    Rich(Rc<RefCell<MemoryRichText>>),
}

const ANSWER_TIMEOUT: Duration = Duration::from_secs(30);

fn init_tracing(verbose: bool) {
    let default = if verbose { "corrigo=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_settings(cli: &Cli) -> Settings {
    let mut settings = match &cli.config {
        Some(path) => Settings::load_or_default(path),
        None => Settings::load(),
    };
    if let Some(host) = &cli.host {
        settings.host = host.clone();
    }
    if let Some(port) = cli.port {
        settings.port = port;
    }
    settings
}

fn print_suggestions(kind: RequestKind, suggestions: &Suggestions) {
    let candidates = suggestions.candidates();
    if candidates.is_empty() {
        println!("{}", kind.empty_message());
        return;
    }
    for (i, candidate) in candidates.iter().enumerate() {
        println!("{}. {}", i + 1, candidate);
    }
}

#[allow(clippy::too_many_arguments)]
fn run_fix(
    settings: &Settings,
    text: &str,
    (start, end): (usize, usize),
    field: FieldKind,
    origin: &str,
    restricted: bool,
    kind: Option<RequestKind>,
    pick: usize,
) -> ExitCode {
    let mut controller = CorrectionController::new(settings, RecordingChrome::new());

    let (surface, memory) = match field {
        FieldKind::Plain => {
            let input = Rc::new(RefCell::new(MemoryInput::new(text)));
            input.borrow_mut().select(start, end);
            let surface = EditableSurface::PlainInput(input.clone());
            controller.on_focus_in(&FocusTarget::textarea(), surface.clone(), origin);
            (surface, MemoryField::Plain(input))
        }
        FieldKind::Rich => {
            let mut host = MemoryRichText::new("DIV");
            if restricted {
                host = host.restricted();
            }
            let root = host.root();
            let node = host.append_text(root, text);
            host.select_in_text(node, start, end);
            let host = Rc::new(RefCell::new(host));
            let surface = EditableSurface::RichText(host.clone());
            controller.on_focus_in(&FocusTarget::content_editable("DIV"), surface.clone(), origin);
            (surface, MemoryField::Rich(host))
        }
    };

    if controller
        .on_release(SelectionTrigger::PointerUp, PointerPosition::default())
        .is_none()
    {
        println!("Nothing selected.");
        return ExitCode::SUCCESS;
    }
    controller.wait(ANSWER_TIMEOUT);

    if let Some(kind) = kind {
        if controller.request(kind).is_none() {
            eprintln!("{} is not available for this selection", kind.label());
            return ExitCode::FAILURE;
        }
        controller.wait(ANSWER_TIMEOUT);
    }

    match &controller.chrome().rendered {
        Some(Rendered::Options(kind, candidates)) => {
            println!("{} suggestions:", kind.label());
            for (i, candidate) in candidates.iter().enumerate() {
                println!("  {}. {}", i + 1, candidate);
            }
        }
        Some(Rendered::Message(_, message)) => {
            println!("{}", message);
            println!("{}", get_field_value(&surface));
            return ExitCode::SUCCESS;
        }
        None => {
            println!("No answer from the suggestion service.");
            return ExitCode::FAILURE;
        }
    }

    match controller.choose(pick) {
        Some(outcome) => tracing::debug!(?outcome, "write-back finished"),
        None => {
            eprintln!("No suggestion at index {}", pick);
            return ExitCode::FAILURE;
        }
    }
    println!("{}", get_field_value(&surface));
    print_host_events(&memory);
    ExitCode::SUCCESS
}

fn print_host_events(memory: &MemoryField) {
    let events: Vec<HostEvent> = match memory {
        MemoryField::Plain(input) => input.borrow().events().to_vec(),
        MemoryField::Rich(host) => host.borrow().dispatched().iter().map(|(_, e)| e.clone()).collect(),
    };
    if events.is_empty() {
        return;
    }
    println!("dispatched {} events:", events.len());
    for event in events {
        println!("  {:?}", event);
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let settings = load_settings(&cli);

    match &cli.command {
        Commands::Correct { text } => {
            let service = SuggestionService::from_settings(&settings);
            let result = service.correct(text);
            println!("{}", result.corrected);
            for suggestion in &result.suggestions {
                println!("  - {}", suggestion);
            }
            ExitCode::SUCCESS
        }
        Commands::Word { word } => {
            let service = SuggestionService::from_settings(&settings);
            print_suggestions(RequestKind::WordFix, &service.word_fix(word));
            ExitCode::SUCCESS
        }
        Commands::Synonym { word } => {
            let service = SuggestionService::from_settings(&settings);
            print_suggestions(RequestKind::Synonym, &service.synonyms(word));
            ExitCode::SUCCESS
        }
        Commands::Fix {
            text,
            start,
            end,
            field,
            origin,
            restricted,
            kind,
            pick,
        } => run_fix(
            &settings,
            text,
            (*start, *end),
            *field,
            origin,
            *restricted,
            kind.map(RequestKind::from),
            *pick,
        ),
    }
}
