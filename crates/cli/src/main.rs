use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;

use transcript_align_core::pipeline::align_transcript_use_case::AlignTranscriptUseCase;
use transcript_align_core::pipeline::aligned_document::AlignedDocument;
use transcript_align_core::pipeline::alignment_logger::{AlignmentLogger, LogAlignmentLogger};
use transcript_align_core::pipeline::batch_executor::{BatchExecutor, DocumentOutcome};
use transcript_align_core::pipeline::infrastructure::sequential_batch_executor::SequentialBatchExecutor;
use transcript_align_core::pipeline::infrastructure::threaded_batch_executor::ThreadedBatchExecutor;
use transcript_align_core::pipeline::timestamp_renderer::render_timestamped;
use transcript_align_core::shared::align_config::AlignConfig;
use transcript_align_core::shared::constants::{
    PROGRESS_THROTTLE_DOCUMENTS, TRANSCRIPT_EXTENSIONS,
};
use transcript_align_core::tokenization::infrastructure::punctuation_sentence_splitter::PunctuationSentenceSplitter;
use transcript_align_core::tokenization::infrastructure::regex_tokenizer::RegexTokenizer;
use transcript_align_core::transcript::domain::granularity::Granularity;
use transcript_align_core::transcript::domain::transcript_reader::TranscriptReader;
use transcript_align_core::transcript::infrastructure::json_transcript_reader::JsonTranscriptReader;

/// Align Whisper-style transcript timings with tokens, sentences and documents.
#[derive(Parser)]
#[command(name = "transcript-align")]
struct Cli {
    /// Transcript JSON files, or directories containing them.
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Output directory (required for more than one transcript).
    #[arg(long)]
    output: Option<PathBuf>,

    /// JSON config file (defaults to the per-user config if present).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Timing source: word or segment.
    #[arg(long)]
    granularity: Option<String>,

    /// Top-level key holding the segment array.
    #[arg(long)]
    segments_key: Option<String>,

    /// Per-segment key holding the word array.
    #[arg(long)]
    words_key: Option<String>,

    /// Output format: json or timestamped.
    #[arg(long, default_value = "json")]
    format: String,

    /// Documents aligned in parallel.
    #[arg(long)]
    jobs: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Json,
    Timestamped,
}

impl OutputFormat {
    fn extension(self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Timestamped => "txt",
        }
    }
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    validate(&cli)?;

    let config = resolve_config(&cli)?;
    let format = parse_format(&cli.format)?;
    let inputs = expand_inputs(&cli.inputs)?;
    if inputs.is_empty() {
        return Err("No transcript files found in the given inputs".into());
    }
    if inputs.len() > 1 && cli.output.is_none() {
        return Err("--output is required when aligning more than one transcript".into());
    }

    log::info!(
        "Aligning with {} granularity (segments key '{}', words key '{}')",
        config.granularity,
        config.segments_key,
        config.words_key
    );

    let reader = JsonTranscriptReader::new(&config.segments_key, &config.words_key);
    let use_case = build_use_case(config.granularity)?;
    let mut logger = LogAlignmentLogger::new(PROGRESS_THROTTLE_DOCUMENTS);

    if let [input] = inputs.as_slice() {
        run_single(input, cli.output.as_deref(), format, &reader, &use_case, &mut logger)
    } else {
        // Checked above.
        let output_dir = cli.output.as_deref().ok_or("--output is required")?;
        let executor = build_executor(cli.jobs);
        run_batch(
            &inputs,
            output_dir,
            format,
            &*executor,
            &reader,
            &use_case,
            &mut logger,
        )
    }
}

fn run_single(
    input: &Path,
    output_dir: Option<&Path>,
    format: OutputFormat,
    reader: &dyn TranscriptReader,
    use_case: &AlignTranscriptUseCase,
    logger: &mut LogAlignmentLogger,
) -> Result<(), Box<dyn std::error::Error>> {
    let segments = reader.read(input)?;
    let document = use_case.execute_with_logger(&segments, logger)?;
    if let Some(seconds) = document.timestamp.duration() {
        log::info!("{} spans {seconds:.2}s", input.display());
    }
    logger.summary();

    let rendered = render(&document, format)?;
    match output_dir {
        Some(dir) => {
            let path = write_output(dir, input, format, &rendered)?;
            log::info!("Output written to {}", path.display());
        }
        None => print!("{rendered}"),
    }
    Ok(())
}

fn run_batch(
    inputs: &[PathBuf],
    output_dir: &Path,
    format: OutputFormat,
    executor: &dyn BatchExecutor,
    reader: &JsonTranscriptReader,
    use_case: &AlignTranscriptUseCase,
    logger: &mut LogAlignmentLogger,
) -> Result<(), Box<dyn std::error::Error>> {
    let process = |path: &Path| -> DocumentOutcome {
        let segments = reader.read(path).map_err(|e| e.to_string())?;
        use_case
            .execute_with_stats(&segments)
            .map_err(|e| e.to_string())
    };

    let outcomes = executor.execute(inputs, &process, logger);

    let mut failed = 0;
    for (input, outcome) in inputs.iter().zip(outcomes) {
        match outcome {
            Ok((document, _)) => {
                let rendered = render(&document, format)?;
                write_output(output_dir, input, format, &rendered)?;
            }
            Err(e) => {
                eprintln!("{}: {e}", input.display());
                failed += 1;
            }
        }
    }
    logger.info(&format!(
        "Wrote {} of {} documents to {}",
        inputs.len() - failed,
        inputs.len(),
        output_dir.display()
    ));
    logger.summary();

    if failed > 0 {
        return Err(format!("{failed} of {} documents failed to align", inputs.len()).into());
    }
    Ok(())
}

fn build_executor(jobs: Option<usize>) -> Box<dyn BatchExecutor> {
    match jobs {
        Some(1) => Box::new(SequentialBatchExecutor::new()),
        Some(n) => Box::new(ThreadedBatchExecutor::new(n)),
        None => Box::new(ThreadedBatchExecutor::default()),
    }
}

fn build_use_case(
    granularity: Granularity,
) -> Result<AlignTranscriptUseCase, Box<dyn std::error::Error>> {
    Ok(AlignTranscriptUseCase::new(
        Box::new(RegexTokenizer::new()?),
        Some(Box::new(PunctuationSentenceSplitter::new())),
        None,
        granularity,
    ))
}

fn render(
    document: &AlignedDocument,
    format: OutputFormat,
) -> Result<String, Box<dyn std::error::Error>> {
    Ok(match format {
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(document)?;
            json.push('\n');
            json
        }
        OutputFormat::Timestamped => render_timestamped(&document.sentences),
    })
}

fn write_output(
    output_dir: &Path,
    input: &Path,
    format: OutputFormat,
    rendered: &str,
) -> Result<PathBuf, Box<dyn std::error::Error>> {
    fs::create_dir_all(output_dir)?;
    let stem = input
        .file_stem()
        .ok_or_else(|| format!("Input has no file name: {}", input.display()))?;
    let path = output_dir
        .join(stem)
        .with_extension(format.extension());
    fs::write(&path, rendered)?;
    Ok(path)
}

fn resolve_config(cli: &Cli) -> Result<AlignConfig, Box<dyn std::error::Error>> {
    let mut config = AlignConfig::load_or_default(cli.config.as_deref())?;
    if let Some(granularity) = &cli.granularity {
        config.granularity = granularity.parse::<Granularity>()?;
    }
    if let Some(key) = &cli.segments_key {
        config.segments_key = key.clone();
    }
    if let Some(key) = &cli.words_key {
        config.words_key = key.clone();
    }
    Ok(config)
}

fn validate(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    for input in &cli.inputs {
        if !input.exists() {
            return Err(format!("Input not found: {}", input.display()).into());
        }
    }
    if let Some(config) = &cli.config {
        if !config.exists() {
            return Err(format!("Config file not found: {}", config.display()).into());
        }
    }
    if cli.jobs == Some(0) {
        return Err("--jobs must be at least 1".into());
    }
    if let Some(key) = &cli.segments_key {
        if key.is_empty() {
            return Err("--segments-key must not be empty".into());
        }
    }
    if let Some(key) = &cli.words_key {
        if key.is_empty() {
            return Err("--words-key must not be empty".into());
        }
    }
    Ok(())
}

fn parse_format(format: &str) -> Result<OutputFormat, Box<dyn std::error::Error>> {
    match format {
        "json" => Ok(OutputFormat::Json),
        "timestamped" => Ok(OutputFormat::Timestamped),
        other => Err(format!("Format must be 'json' or 'timestamped', got '{other}'").into()),
    }
}

/// Replaces each directory with the transcript files directly inside it,
/// sorted by name.
fn expand_inputs(inputs: &[PathBuf]) -> Result<Vec<PathBuf>, Box<dyn std::error::Error>> {
    let mut files = Vec::new();
    for input in inputs {
        if input.is_dir() {
            let mut found: Vec<PathBuf> = fs::read_dir(input)?
                .filter_map(|entry| entry.ok().map(|e| e.path()))
                .filter(|path| path.is_file() && is_transcript(path))
                .collect();
            found.sort();
            files.extend(found);
        } else {
            files.push(input.clone());
        }
    }
    Ok(files)
}

fn is_transcript(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| TRANSCRIPT_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}
